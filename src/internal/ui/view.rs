#![allow(clippy::single_match)]
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::app::{App, InputMode};
use crate::internal::comment::FormField;
use crate::internal::models::{
    Article, Category, EVENT_STATUS_OPEN, Event, Gallery, MediaKind, MediaItem, OrgNode,
    PeriodSummary, Podcast,
};
use crate::internal::pages::{
    ArticleDetailState, ArticleTab, ArticlesState, BoardHistoryState, DepartmentState,
    EventDetailState, EventsState, GalleriesState, GalleryDetailState, GenbiPointState, HomeState,
    OrganisationState, Page, PeriodStructureState, PodcastsState,
};
use crate::internal::filters::ALL_TAB;
use crate::internal::tabs::TabController;
use crate::utils::datetime::{format_date, reading_minutes};
use crate::utils::html::extract_text_from_html;
use crate::utils::theme_loader::TuiTheme;
use crate::utils::url::storage_url;

const SKELETON_ROWS: usize = 4;

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &mut App, f: &mut Frame) {
    // Logged at the end when performance metrics are enabled in debug builds.
    let start = std::time::Instant::now();
    let theme = app.theme.palette().clone();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, &theme, f, chunks[0]);
    render_tab_bar(&app.page, &theme, f, chunks[1]);

    let view_start = std::time::Instant::now();
    match &app.page {
        Page::Home(s) => render_home(s, &theme, f, chunks[2]),
        Page::Articles(s) => render_articles(s, &theme, f, chunks[2]),
        Page::ArticleDetail(s) => render_article_detail(s, &theme, f, chunks[2]),
        Page::Events(s) => render_events(s, &theme, f, chunks[2]),
        Page::EventDetail(s) => render_event_detail(s, &theme, f, chunks[2]),
        Page::Galleries(s) => render_galleries(s, &theme, f, chunks[2]),
        Page::GalleryDetail(s) => render_gallery_detail(s, &theme, f, chunks[2]),
        Page::Organisation(s) => render_organisation(s, &theme, f, chunks[2]),
        Page::BoardHistory(s) => render_board_history(s, &theme, f, chunks[2]),
        Page::PeriodStructure(s) => render_period_structure(s, &theme, f, chunks[2]),
        Page::Department(s) => render_department(s, &theme, f, chunks[2]),
        Page::Podcasts(s) => render_podcasts(s, &theme, f, chunks[2]),
        Page::GenbiPoint(s) => render_genbi_point(s, app.api.base_url(), &theme, f, chunks[2]),
    }
    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?view_start.elapsed(), page = app.route.title(), "render.page");
    }

    render_status_bar(app, &theme, f, chunks[3]);

    match app.input_mode {
        InputMode::Search => render_search_overlay(app, &theme, f),
        _ => {}
    }

    if let Page::ArticleDetail(s) = &app.page
        && s.form_open
    {
        render_comment_form(s, &theme, f);
    }

    if app.notification.is_some() {
        render_notification(app, &theme, f);
    }

    if app.show_help {
        render_help_overlay(&theme, f);
    }

    if app.config.logging.enable_performance_metrics && cfg!(debug_assertions) {
        tracing::debug!(elapsed = ?start.elapsed(), "render.draw");
    }
}

fn render_top_bar(app: &App, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" GenBI Purwokerto v{}", app.app_version),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(theme.border)),
        Span::styled(app.route.title(), Style::default().fg(theme.foreground)),
    ]))
    .style(Style::default().bg(theme.background));
    f.render_widget(title, halves[0]);

    let mode = Paragraph::new(format!("Tema: {} ", app.theme.mode()))
        .alignment(Alignment::Right)
        .style(Style::default().fg(theme.muted).bg(theme.background));
    f.render_widget(mode, halves[1]);
}

fn tab_labels<K: ToString + Clone + PartialEq>(tabs: &TabController<K>) -> (Vec<String>, usize) {
    let labels = tabs
        .tabs()
        .iter()
        .map(|t| match t.to_string() {
            label if label == ALL_TAB => "Semua".to_string(),
            label => label,
        })
        .collect();
    (labels, tabs.active_index())
}

fn render_tab_bar(page: &Page, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let (labels, active) = match page {
        Page::Articles(s) => tab_labels(&s.tabs),
        Page::ArticleDetail(s) => tab_labels(&s.sidebar),
        Page::Events(s) => tab_labels(&s.tabs),
        Page::Galleries(s) => tab_labels(&s.tabs),
        Page::GalleryDetail(s) => tab_labels(&s.tabs),
        Page::Organisation(s) => tab_labels(&s.tabs),
        Page::BoardHistory(s) => tab_labels(&s.tabs),
        Page::PeriodStructure(s) => tab_labels(&s.tabs),
        Page::Podcasts(s) => tab_labels(&s.tabs),
        Page::GenbiPoint(s) => tab_labels(&s.tabs),
        Page::Home(_) | Page::EventDetail(_) | Page::Department(_) => (Vec::new(), 0),
    };

    let tabs = Tabs::new(labels)
        .select(active)
        .style(Style::default().fg(theme.muted).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("|", Style::default().fg(theme.border)));
    f.render_widget(tabs, area);
}

fn panel<'a>(theme: &TuiTheme, title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title)
        .title_style(Style::default().fg(theme.foreground))
}

fn skeleton_items(theme: &TuiTheme) -> Vec<ListItem<'static>> {
    (0..SKELETON_ROWS)
        .map(|i| {
            let width = 24 + (i * 7) % 16;
            ListItem::new(vec![
                Line::from(Span::styled(
                    "░".repeat(width),
                    Style::default().fg(theme.skeleton),
                )),
                Line::from(Span::styled(
                    "░".repeat(width / 2),
                    Style::default().fg(theme.skeleton),
                )),
            ])
        })
        .collect()
}

/// Red alert box for a list whose last request failed.
fn error_alert<'a>(theme: &TuiTheme, message: &'a str) -> Paragraph<'a> {
    Paragraph::new(Line::from(vec![
        Span::styled(
            "Gagal memuat data: ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(message),
    ]))
    .style(Style::default().fg(theme.error))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error)),
    )
}

/// One remotely loaded list inside a bordered panel.
struct Section<'a> {
    title: String,
    loading: bool,
    error: Option<&'a str>,
    items: Vec<ListItem<'a>>,
    selected: Option<usize>,
    empty: &'static str,
}

fn render_section(section: Section, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let block = panel(theme, section.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if section.items.is_empty() {
        match (section.loading, section.error) {
            (true, _) => f.render_widget(List::new(skeleton_items(theme)), inner),
            (false, Some(message)) => f.render_widget(error_alert(theme, message), inner),
            (false, None) => f.render_widget(
                Paragraph::new(section.empty).style(Style::default().fg(theme.muted)),
                inner,
            ),
        }
        return;
    }

    let list_area = match section.error {
        Some(message) => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(inner);
            f.render_widget(error_alert(theme, message), parts[0]);
            parts[1]
        }
        None => inner,
    };

    let list = List::new(section.items).highlight_style(
        Style::default()
            .bg(theme.selection_bg)
            .fg(theme.selection_fg)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(section.selected);
    f.render_stateful_widget(list, list_area, &mut state);
}

fn two_line_item<'a>(theme: &TuiTheme, title: &str, meta: String) -> ListItem<'a> {
    ListItem::new(vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(theme.foreground),
        )),
        Line::from(Span::styled(
            format!("  {}", meta),
            Style::default().fg(theme.muted),
        )),
    ])
}

fn article_item<'a>(theme: &TuiTheme, article: &Article) -> ListItem<'a> {
    let mut meta = vec![format_date(article.published_at.as_deref())];
    if let Some(category) = article.category_name() {
        meta.push(category.to_string());
    }
    if let Some(author) = article.author_name() {
        meta.push(author.to_string());
    }
    two_line_item(theme, &article.title, meta.join(" | "))
}

fn event_item<'a>(theme: &TuiTheme, event: &Event) -> ListItem<'a> {
    let meta = format!(
        "{} | {} | {}",
        format_date(event.date.as_deref()),
        event.place.as_deref().unwrap_or("-"),
        event.status.as_deref().unwrap_or("-")
    );
    two_line_item(theme, &event.name, meta)
}

fn gallery_item<'a>(theme: &TuiTheme, gallery: &Gallery) -> ListItem<'a> {
    let meta = format!(
        "{} | {} | {} media",
        format_date(gallery.time.as_deref()),
        gallery.place.as_deref().unwrap_or("-"),
        gallery.media.len()
    );
    two_line_item(theme, &gallery.title, meta)
}

fn node_item<'a>(theme: &TuiTheme, node: &OrgNode) -> ListItem<'a> {
    two_line_item(
        theme,
        node.display_name(),
        node.position.clone().unwrap_or_else(|| "-".to_string()),
    )
}

fn period_item<'a>(theme: &TuiTheme, period: &PeriodSummary) -> ListItem<'a> {
    two_line_item(
        theme,
        &format!("Periode {}", period.periode.as_deref().unwrap_or("-")),
        period.nama.clone().unwrap_or_default(),
    )
}

fn podcast_item<'a>(theme: &TuiTheme, podcast: &Podcast) -> ListItem<'a> {
    two_line_item(
        theme,
        &podcast.title,
        podcast.date.clone().unwrap_or_else(|| "-".to_string()),
    )
}

fn category_item<'a>(theme: &TuiTheme, category: &Category) -> ListItem<'a> {
    two_line_item(
        theme,
        &category.name,
        format!(
            "{} artikel",
            category.article_count.as_deref().unwrap_or("0")
        ),
    )
}

fn media_item<'a>(theme: &TuiTheme, media: &MediaItem) -> ListItem<'a> {
    let tag = match media.kind() {
        MediaKind::Photo => "[Foto] ",
        MediaKind::Video => "[Video]",
    };
    let label = media.caption.as_deref().unwrap_or(&media.file_name);
    ListItem::new(Line::from(vec![
        Span::styled(tag, Style::default().fg(theme.primary)),
        Span::raw(" "),
        Span::styled(label.to_string(), Style::default().fg(theme.foreground)),
    ]))
}

fn split_sidebar(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area)
}

fn render_home(state: &HomeState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let idx = state.cursor.index();
    let n = state.articles.items.len();

    render_section(
        Section {
            title: "Artikel Terbaru".to_string(),
            loading: state.articles.loading,
            error: state.articles.error.as_deref(),
            items: state
                .articles
                .items
                .iter()
                .map(|a| article_item(theme, a))
                .collect(),
            selected: (idx < n).then_some(idx),
            empty: "Belum ada artikel.",
        },
        theme,
        f,
        parts[0],
    );
    render_section(
        Section {
            title: "Event".to_string(),
            loading: state.events.loading,
            error: state.events.error.as_deref(),
            items: state
                .events
                .items
                .iter()
                .map(|e| event_item(theme, e))
                .collect(),
            selected: idx.checked_sub(n),
            empty: "Belum ada event.",
        },
        theme,
        f,
        parts[1],
    );
}

fn render_articles(state: &ArticlesState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let idx = state.cursor.index();
    let columns = split_sidebar(area);

    match state.active_tab() {
        ArticleTab::Latest => {
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(9), Constraint::Min(0)])
                .split(columns[0]);

            let mut featured: Vec<ListItem> = Vec::new();
            if let Some(hero) = state.hero() {
                let mut lines = vec![Line::from(Span::styled(
                    hero.title.clone(),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                ))];
                if let Some(excerpt) = &hero.excerpt {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", excerpt),
                        Style::default().fg(theme.foreground),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    format!("  {}", format_date(hero.published_at.as_deref())),
                    Style::default().fg(theme.muted),
                )));
                featured.push(ListItem::new(lines));
            }
            featured.extend(state.secondary().iter().map(|a| article_item(theme, a)));

            render_section(
                Section {
                    title: "Sorotan".to_string(),
                    loading: state.articles.loading,
                    error: None,
                    items: featured,
                    selected: (idx < 3).then_some(idx),
                    empty: "Belum ada artikel.",
                },
                theme,
                f,
                left[0],
            );

            let status = match (state.scroll.in_flight(), state.scroll.is_exhausted()) {
                (Some(page), _) if page > 1 => format!(" (memuat halaman {}...)", page),
                (_, true) if !state.articles.is_empty() => " (semua artikel dimuat)".to_string(),
                _ => String::new(),
            };
            render_section(
                Section {
                    title: format!("Artikel Lainnya{}", status),
                    loading: state.articles.loading,
                    error: state.articles.error.as_deref(),
                    items: state
                        .main_list()
                        .iter()
                        .map(|a| article_item(theme, a))
                        .collect(),
                    selected: idx.checked_sub(3),
                    empty: "",
                },
                theme,
                f,
                left[1],
            );
        }
        ArticleTab::Categories => render_section(
            Section {
                title: "Kategori".to_string(),
                loading: state.categories.loading,
                error: state.categories.error.as_deref(),
                items: state
                    .categories
                    .items
                    .iter()
                    .map(|c| category_item(theme, c))
                    .collect(),
                selected: Some(idx),
                empty: "Belum ada kategori.",
            },
            theme,
            f,
            columns[0],
        ),
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    for (title, list, slot) in [
        ("Trending", &state.trending, right[0]),
        ("Rekomendasi", &state.recommended, right[1]),
    ] {
        render_section(
            Section {
                title: title.to_string(),
                loading: list.loading,
                error: list.error.as_deref(),
                items: list.items.iter().map(|a| article_item(theme, a)).collect(),
                selected: None,
                empty: "-",
            },
            theme,
            f,
            slot,
        );
    }
}

fn render_article_detail(state: &ArticleDetailState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let columns = split_sidebar(area);

    match &state.article.value {
        Some(article) => {
            let width = columns[0].width.saturating_sub(4) as usize;
            let body = article
                .content
                .as_deref()
                .map(|html| extract_text_from_html(html, width))
                .unwrap_or_default();

            let mut lines: Vec<Line> = Vec::new();
            if let Some(error) = &state.article.error {
                lines.push(Line::from(Span::styled(
                    format!("Gagal memuat ulang: {}", error),
                    Style::default().fg(theme.error),
                )));
            }
            lines.push(Line::from(Span::styled(
                article.title.clone(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} | {} | {} | {} menit baca",
                    article.category_name().unwrap_or("-"),
                    article.author_name().unwrap_or("-"),
                    format_date(article.published_at.as_deref()),
                    reading_minutes(&body)
                ),
                Style::default().fg(theme.muted),
            )));
            lines.push(Line::from(""));
            lines.extend(
                body.lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.foreground)))),
            );
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Komentar ({})", article.comments.len()),
                Style::default().add_modifier(Modifier::BOLD).fg(theme.foreground),
            )));
            for comment in &article.comments {
                lines.push(Line::from(vec![
                    Span::styled(
                        comment.name.clone(),
                        Style::default().fg(theme.link).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", format_date(comment.created_at.as_deref())),
                        Style::default().fg(theme.muted),
                    ),
                ]));
                let options = textwrap::Options::new(width.max(10))
                    .initial_indent("  ")
                    .subsequent_indent("  ");
                lines.extend(textwrap::wrap(&comment.text, options).into_iter().map(|l| {
                    Line::from(Span::styled(
                        l.into_owned(),
                        Style::default().fg(theme.foreground),
                    ))
                }));
            }

            let p = Paragraph::new(lines)
                .block(panel(theme, " Artikel "))
                .wrap(Wrap { trim: false })
                .scroll((state.scroll, 0));
            f.render_widget(p, columns[0]);
        }
        None => render_section(
            Section {
                title: " Artikel ".to_string(),
                loading: state.article.loading,
                error: state.article.error.as_deref(),
                items: Vec::new(),
                selected: None,
                empty: "Artikel tidak ditemukan.",
            },
            theme,
            f,
            columns[0],
        ),
    }

    let list = state.sidebar_list();
    let title = state
        .sidebar
        .active()
        .map(|t| t.to_string())
        .unwrap_or_default();
    render_section(
        Section {
            title,
            loading: list.loading,
            error: list.error.as_deref(),
            items: list.items.iter().map(|a| article_item(theme, a)).collect(),
            selected: Some(state.sidebar_cursor.index()),
            empty: "-",
        },
        theme,
        f,
        columns[1],
    );
}

fn render_events(state: &EventsState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let title = match state.query.is_empty() {
        true => format!("{}", state.active_tab()),
        false => format!("{} (Cari: {})", state.active_tab(), state.query.query),
    };
    render_section(
        Section {
            title,
            loading: state.events.loading,
            error: state.events.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .map(|e| event_item(theme, e))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Tidak ada event yang cocok.",
        },
        theme,
        f,
        area,
    );
}

fn render_event_detail(state: &EventDetailState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let columns = split_sidebar(area);

    match &state.event.value {
        Some(event) => {
            let width = columns[0].width.saturating_sub(4) as usize;
            let status_style = match event.status.as_deref() {
                Some(EVENT_STATUS_OPEN) => Style::default().fg(theme.success),
                _ => Style::default().fg(theme.muted),
            };
            let mut lines = vec![
                Line::from(Span::styled(
                    event.name.clone(),
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    event.status.clone().unwrap_or_else(|| "-".to_string()),
                    status_style,
                )),
                Line::from(Span::styled(
                    format!(
                        "{} | {}",
                        format_date(event.date.as_deref()),
                        event.place.as_deref().unwrap_or("-")
                    ),
                    Style::default().fg(theme.muted),
                )),
            ];
            if !event.speakers.is_empty() {
                let names: Vec<&str> = event.speakers.iter().map(|s| s.name.as_str()).collect();
                lines.push(Line::from(Span::styled(
                    format!("Pembicara: {}", names.join(", ")),
                    Style::default().fg(theme.foreground),
                )));
            }
            if let Some(link) = state.cta_link() {
                lines.push(Line::from(vec![
                    Span::styled("Daftar: ", Style::default().fg(theme.foreground)),
                    Span::styled(
                        link.to_string(),
                        Style::default()
                            .fg(theme.link)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
            lines.push(Line::from(""));
            if let Some(html) = event.description.as_deref() {
                lines.extend(
                    extract_text_from_html(html, width)
                        .lines()
                        .map(|l| Line::from(l.to_string())),
                );
            }

            let p = Paragraph::new(lines)
                .style(Style::default().fg(theme.foreground))
                .block(panel(theme, " Event "))
                .wrap(Wrap { trim: false })
                .scroll((state.scroll, 0));
            f.render_widget(p, columns[0]);
        }
        None => render_section(
            Section {
                title: " Event ".to_string(),
                loading: state.event.loading,
                error: state.event.error.as_deref(),
                items: Vec::new(),
                selected: None,
                empty: "Event tidak ditemukan.",
            },
            theme,
            f,
            columns[0],
        ),
    }

    render_section(
        Section {
            title: "Event Lainnya".to_string(),
            loading: state.recommended.loading,
            error: state.recommended.error.as_deref(),
            items: state
                .recommended
                .items
                .iter()
                .map(|e| event_item(theme, e))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "-",
        },
        theme,
        f,
        columns[1],
    );
}

fn render_galleries(state: &GalleriesState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    render_section(
        Section {
            title: "Galeri".to_string(),
            loading: state.galleries.loading,
            error: state.galleries.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .map(|g| gallery_item(theme, g))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Belum ada galeri.",
        },
        theme,
        f,
        area,
    );
}

fn render_gallery_detail(state: &GalleryDetailState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let Some(gallery) = &state.gallery.value else {
        render_section(
            Section {
                title: " Galeri ".to_string(),
                loading: state.gallery.loading,
                error: state.gallery.error.as_deref(),
                items: Vec::new(),
                selected: None,
                empty: "Galeri tidak ditemukan.",
            },
            theme,
            f,
            area,
        );
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            gallery.title.clone(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} | {}",
                format_date(gallery.time.as_deref()),
                gallery.place.as_deref().unwrap_or("-")
            ),
            Style::default().fg(theme.muted),
        )),
        Line::from(Span::styled(
            gallery.description.clone().unwrap_or_default(),
            Style::default().fg(theme.foreground),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(panel(theme, " Galeri "));
    f.render_widget(header, parts[0]);

    render_section(
        Section {
            title: format!("Media ({})", state.visible_media().len()),
            loading: state.gallery.loading,
            error: state.gallery.error.as_deref(),
            items: state
                .visible_media()
                .into_iter()
                .map(|m| media_item(theme, m))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Tidak ada media.",
        },
        theme,
        f,
        parts[1],
    );
}

fn render_organisation(state: &OrganisationState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    render_section(
        Section {
            title: "Pengurus Aktif".to_string(),
            loading: state.nodes.loading,
            error: state.nodes.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .map(|n| node_item(theme, n))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Belum ada pengurus.",
        },
        theme,
        f,
        area,
    );
}

fn render_board_history(state: &BoardHistoryState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    render_section(
        Section {
            title: "Sejarah Kepengurusan".to_string(),
            loading: state.periods.loading,
            error: state.periods.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .map(|p| period_item(theme, p))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Belum ada data kepengurusan.",
        },
        theme,
        f,
        area,
    );
}

fn render_period_structure(
    state: &PeriodStructureState,
    theme: &TuiTheme,
    f: &mut Frame,
    area: Rect,
) {
    render_section(
        Section {
            title: format!("Periode {}", state.periode),
            loading: state.nodes.loading,
            error: state.nodes.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .map(|n| node_item(theme, n))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Belum ada pengurus.",
        },
        theme,
        f,
        area,
    );
}

fn render_department(state: &DepartmentState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let Some(detail) = &state.detail.value else {
        render_section(
            Section {
                title: format!(" Bidang {} ", state.department),
                loading: state.detail.loading,
                error: state.detail.error.as_deref(),
                items: Vec::new(),
                selected: None,
                empty: "Bidang tidak ditemukan.",
            },
            theme,
            f,
            area,
        );
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let label = detail.department_label(&state.department);
    let head = match &detail.head {
        Some(node) => vec![
            Line::from(Span::styled(
                node.display_name().to_string(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                node.position.clone().unwrap_or_default(),
                Style::default().fg(theme.muted),
            )),
            Line::from(Span::styled(
                node.quote.clone().unwrap_or_default(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::ITALIC),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "Kepala bidang belum diisi.",
            Style::default().fg(theme.muted),
        ))],
    };
    f.render_widget(
        Paragraph::new(head)
            .wrap(Wrap { trim: true })
            .block(panel(theme, format!(" Bidang {} | Periode {} ", label, state.periode))),
        parts[0],
    );

    // Group headers are extra rows, so the cursor is mapped onto item rows.
    let mut items = Vec::new();
    let mut selected = None;
    let mut ordinal = 0;
    for (group, members) in detail.grouped_members() {
        items.push(ListItem::new(Line::from(Span::styled(
            group,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))));
        for member in members {
            if ordinal == state.cursor.index() {
                selected = Some(items.len());
            }
            ordinal += 1;
            items.push(two_line_item(
                theme,
                &format!("  {}", member.name),
                member.position.clone().unwrap_or_else(|| "Anggota".to_string()),
            ));
        }
    }

    render_section(
        Section {
            title: format!("Anggota ({})", state.member_count()),
            loading: state.detail.loading,
            error: state.detail.error.as_deref(),
            items,
            selected,
            empty: "Belum ada anggota.",
        },
        theme,
        f,
        parts[1],
    );
}

fn render_podcasts(state: &PodcastsState, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    render_section(
        Section {
            title: "Podcast".to_string(),
            loading: state.podcasts.loading,
            error: state.podcasts.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .map(|p| podcast_item(theme, p))
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Belum ada podcast.",
        },
        theme,
        f,
        area,
    );
}

/// What the GenBI Point platform covers, shown above the posters.
const GENBI_POINT_FEATURES: [(&str, &str); 4] = [
    ("Kegiatan", "Kegiatan yang direncanakan atau telah dilaksanakan."),
    ("Penilaian Deputi", "Penilaian kinerja deputi secara objektif dan transparan."),
    ("Absensi", "Kehadiran anggota pada setiap kegiatan atau rapat."),
    ("Ranking", "Peringkat deputi dan staf berdasarkan skor penilaian."),
];

fn render_genbi_point(
    state: &GenbiPointState,
    base_url: &str,
    theme: &TuiTheme,
    f: &mut Frame,
    area: Rect,
) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GENBI_POINT_FEATURES.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    let features: Vec<Line> = GENBI_POINT_FEATURES
        .iter()
        .map(|(title, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<18}", title),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(desc.to_string(), Style::default().fg(theme.foreground)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(features).block(panel(theme, " GenBI Point ")),
        parts[0],
    );

    let tab = state.active_tab();
    render_section(
        Section {
            title: format!("Staff of the Month: {}", tab),
            loading: state.posters.loading,
            error: state.posters.error.as_deref(),
            items: state
                .visible()
                .into_iter()
                .enumerate()
                .map(|(i, p)| {
                    two_line_item(
                        theme,
                        &format!("SOTM {} #{}", tab, i + 1),
                        storage_url(base_url, p.image.as_deref()),
                    )
                })
                .collect(),
            selected: Some(state.cursor.index()),
            empty: "Belum ada data SOTM.",
        },
        theme,
        f,
        parts[1],
    );
}

fn status_hint(app: &App) -> &'static str {
    match (&app.input_mode, &app.page) {
        (InputMode::Search, _) => "Ketik untuk mencari | Enter: Terapkan | Esc: Batal",
        (InputMode::Comment, _) => "Tab: Pindah kolom | Enter: Kirim | Esc: Tutup",
        (_, Page::Events(_)) => {
            "1-8: Menu | Tab: Status | /: Cari | j/k: Navigasi | Enter: Buka | t: Tema | ?: Bantuan | q: Keluar"
        }
        (_, Page::ArticleDetail(_)) => {
            "Esc: Kembali | j/k: Gulir | J/K: Sidebar | Tab: Sidebar | c: Komentar | Enter: Buka | t: Tema"
        }
        (_, Page::EventDetail(_)) => {
            "Esc: Kembali | j/k: Gulir | J/K: Event lain | Enter: Buka/Daftar | t: Tema"
        }
        (_, Page::GalleryDetail(_)) => {
            "Esc: Kembali | Tab: Foto/Video | j/k: Navigasi | Enter: Buka media | t: Tema"
        }
        (_, Page::Podcasts(_)) => {
            "1-8: Menu | Tab: Tanggal | j/k: Navigasi | Enter: Tonton di YouTube | t: Tema | q: Keluar"
        }
        _ => "1-8: Menu | Tab: Tab | j/k: Navigasi | Enter: Buka | Esc: Kembali | r: Muat ulang | t: Tema | ?: Bantuan | q: Keluar",
    }
}

fn render_status_bar(app: &App, theme: &TuiTheme, f: &mut Frame, area: Rect) {
    let status = match app.is_loading() {
        true => format!("{} Memuat... | {}", app.get_spinner_char(), status_hint(app)),
        false => status_hint(app).to_string(),
    };

    let p = Paragraph::new(status)
        .block(Block::default().style(Style::default().bg(theme.selection_bg)))
        .style(Style::default().fg(theme.selection_fg));
    f.render_widget(p, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_notification(app: &App, theme: &TuiTheme, f: &mut Frame) {
    if let Some(notification) = &app.notification {
        let popup_area = centered(f.area(), notification.message.chars().count() as u16 + 4, 3);

        use crate::internal::notification::NotificationType;
        let (bg_color, title) = match notification.notification_type {
            NotificationType::Info => (Color::Blue, "Info"),
            NotificationType::Success => (Color::Green, "Berhasil"),
            NotificationType::Error => (Color::Red, "Error"),
        };

        let popup = Paragraph::new(notification.message.as_str())
            .style(
                Style::default()
                    .bg(bg_color)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border))
                    .title(title),
            )
            .alignment(Alignment::Center);

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

fn render_search_overlay(app: &App, theme: &TuiTheme, f: &mut Frame) {
    let Page::Events(state) = &app.page else {
        return;
    };
    let search_area = centered(f.area(), 60, 4);

    let lines = vec![
        Line::from(Span::styled(
            format!("{}█", state.input),
            Style::default().fg(theme.foreground),
        )),
        Line::from(Span::styled(
            "Nama, deskripsi atau tempat",
            Style::default().fg(theme.muted),
        )),
    ];

    let search_box = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.selection_bg))
                .title(" Cari Event ")
                .title_style(
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection_bg)
                        .add_modifier(Modifier::BOLD),
                ),
        );

    f.render_widget(Clear, search_area);
    f.render_widget(search_box, search_area);
}

fn render_comment_form(state: &ArticleDetailState, theme: &TuiTheme, f: &mut Frame) {
    let area = centered(f.area(), 70, 11);
    let form = &state.comment;

    let field = |label: &str, value: &str, which: FormField| {
        let focused = form.focus == which;
        let marker = if focused { "▶ " } else { "  " };
        let cursor = if focused { "█" } else { "" };
        Line::from(vec![
            Span::styled(
                format!("{}{:<9}", marker, label),
                Style::default().fg(theme.muted),
            ),
            Span::styled(
                format!("{}{}", value, cursor),
                Style::default().fg(theme.foreground),
            ),
        ])
    };

    let mut lines = vec![
        field("Nama", &form.name, FormField::Name),
        field("Email", &form.email, FormField::Email),
        field("Komentar", &form.text, FormField::Text),
        Line::from(""),
    ];
    match (&form.error, form.submitting) {
        (_, true) => lines.push(Line::from(Span::styled(
            "Mengirim...",
            Style::default().fg(theme.muted),
        ))),
        (Some(error), false) => lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error),
        ))),
        (None, false) => {}
    }

    let popup = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(" Tinggalkan Komentar ")
                .title_style(Style::default().fg(theme.foreground)),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn render_help_overlay(theme: &TuiTheme, f: &mut Frame) {
    let area = centered(f.area(), 60, 18);

    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(
                format!("{:<12}", k),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(theme.foreground)),
        ])
    };

    let lines = vec![
        key("1-8", "Beranda, Artikel, Event, Galeri, Organisasi, Sejarah, Podcast, GenBI Point"),
        key("j / k", "Turun / naik"),
        key("J / K", "Navigasi daftar samping"),
        key("Tab / l", "Tab berikutnya"),
        key("S-Tab / h", "Tab sebelumnya"),
        key("Enter", "Buka item atau tautan"),
        key("Esc", "Kembali"),
        key("/", "Cari event"),
        key("c", "Tulis komentar di artikel"),
        key("r", "Muat ulang halaman"),
        key("t", "Ganti tema terang/gelap"),
        key("?", "Tampilkan/sembunyikan bantuan"),
        key("q", "Keluar"),
    ];

    let help = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border))
                .title(" Bantuan ")
                .title_style(Style::default().fg(theme.foreground)),
        );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
