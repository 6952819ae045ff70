use strum_macros::Display;

use super::{
    Cursor, Fetch, FetchResult, Loaded, PageCommand, PageSettings, PageState, Route, refilter,
};
use crate::internal::comment::{CommentError, CommentForm};
use crate::internal::filters::dedupe_by_id;
use crate::internal::infinite_scroll::InfiniteScroll;
use crate::internal::models::{Article, Category, CommentPayload, Paginated};
use crate::internal::remote_list::{Applied, MergeMode, RemoteItem, RemoteList, RequestTicket};
use crate::internal::tabs::{TabChange, TabController, TabPolicy};

/// Number of articles shown in the featured block of the first page.
const FEATURED: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArticleTab {
    #[strum(serialize = "Terbaru")]
    Latest,
    #[strum(serialize = "Kategori")]
    Categories,
}

pub struct ArticlesState {
    pub tabs: TabController<ArticleTab>,
    pub articles: RemoteList<Article>,
    pub categories: RemoteList<Category>,
    pub trending: RemoteList<Article>,
    pub recommended: RemoteList<Article>,
    pub scroll: InfiniteScroll,
    pub cursor: Cursor,
    dedupe: bool,
}

impl ArticlesState {
    pub fn new(settings: &PageSettings) -> Self {
        Self {
            tabs: TabController::new(
                vec![ArticleTab::Latest, ArticleTab::Categories],
                TabPolicy::Refetch,
            ),
            articles: RemoteList::new(),
            categories: RemoteList::new(),
            trending: RemoteList::new(),
            recommended: RemoteList::new(),
            scroll: InfiniteScroll::new(settings.scroll_threshold),
            cursor: Cursor::default(),
            dedupe: settings.dedupe_pages,
        }
    }

    pub fn active_tab(&self) -> ArticleTab {
        self.tabs.active().copied().unwrap_or(ArticleTab::Latest)
    }

    /// First article of the listing.
    pub fn hero(&self) -> Option<&Article> {
        self.articles.items.first()
    }

    /// Second and third article.
    pub fn secondary(&self) -> &[Article] {
        let n = self.articles.items.len();
        &self.articles.items[1.min(n)..FEATURED.min(n)]
    }

    /// Everything after the featured block, including appended pages.
    pub fn main_list(&self) -> &[Article] {
        let n = self.articles.items.len();
        &self.articles.items[FEATURED.min(n)..]
    }

    fn rows(&self) -> usize {
        match self.active_tab() {
            ArticleTab::Latest => self.articles.items.len(),
            ArticleTab::Categories => self.categories.items.len(),
        }
    }

    /// Clear the active tab's list and fetch it from scratch. Whatever the
    /// other tab still has in flight is cancelled.
    fn load_tab(&mut self) -> Vec<Fetch> {
        self.cursor.reset();
        match self.active_tab() {
            ArticleTab::Latest => {
                self.categories.cancel();
                self.articles.reset();
                self.scroll.reset();
                let page = self.scroll.start();
                vec![Fetch::ArticlesPage(self.articles.begin(), page)]
            }
            ArticleTab::Categories => {
                self.articles.cancel();
                self.scroll.reset();
                self.categories.reset();
                vec![Fetch::Categories(self.categories.begin())]
            }
        }
    }

    fn on_tab_change(&mut self, change: TabChange<ArticleTab>) -> Vec<Fetch> {
        match change {
            TabChange::Refetch(tab) => {
                tracing::debug!(%tab, "article tab switched");
                self.load_tab()
            }
            _ => Vec::new(),
        }
    }

    fn apply_page(
        &mut self,
        ticket: RequestTicket,
        page: u32,
        result: FetchResult<Paginated<Article>>,
    ) {
        match result {
            Ok(paginated) => {
                let mode = match page {
                    1 => MergeMode::Replace,
                    _ => MergeMode::Append,
                };
                let count = paginated.data.len();
                let items = match self.dedupe && mode == MergeMode::Append {
                    true => dedupe_by_id(&self.articles.items, paginated.data, |a| a.id),
                    false => paginated.data,
                };
                if self.articles.finish(ticket, Ok::<_, String>(items), mode) == Applied::Updated {
                    self.scroll
                        .on_page_loaded(page, count, paginated.last_page);
                }
            }
            Err(e) => {
                if self.articles.finish(ticket, Err::<Vec<Article>, _>(e), MergeMode::Append)
                    == Applied::Failed
                {
                    self.scroll.on_page_failed(page);
                }
            }
        }
    }
}

impl PageState for ArticlesState {
    fn load(&mut self) -> Vec<Fetch> {
        let mut fetches = self.load_tab();
        fetches.push(Fetch::TrendingArticles(self.trending.begin()));
        fetches.push(Fetch::RecommendedArticles(self.recommended.begin()));
        fetches
    }

    fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::ArticlesPage(t, page, r) => self.apply_page(t, page, r),
            Loaded::Categories(t, r) => {
                self.categories.finish(t, r, MergeMode::Replace);
            }
            Loaded::TrendingArticles(t, r) => {
                self.trending.finish(t, r, MergeMode::Replace);
            }
            Loaded::RecommendedArticles(t, r) => {
                self.recommended.finish(t, r, MergeMode::Replace);
            }
            _ => {}
        }
    }

    fn is_loading(&self) -> bool {
        self.articles.loading
            || self.categories.loading
            || self.trending.loading
            || self.recommended.loading
    }

    fn cancel(&mut self) {
        self.articles.cancel();
        self.categories.cancel();
        self.trending.cancel();
        self.recommended.cancel();
    }

    fn next_tab(&mut self) -> Vec<Fetch> {
        let change = self.tabs.next();
        self.on_tab_change(change)
    }

    fn prev_tab(&mut self) -> Vec<Fetch> {
        let change = self.tabs.prev();
        self.on_tab_change(change)
    }

    fn down(&mut self) -> Vec<Fetch> {
        self.cursor.down(self.rows());
        if self.active_tab() != ArticleTab::Latest {
            return Vec::new();
        }
        match self
            .scroll
            .on_scroll(self.cursor.index(), self.articles.items.len())
        {
            Some(page) => vec![Fetch::ArticlesPage(self.articles.begin(), page)],
            None => Vec::new(),
        }
    }

    fn up(&mut self) {
        self.cursor.up();
    }

    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        match self.active_tab() {
            ArticleTab::Latest => self
                .articles
                .items
                .get(self.cursor.index())
                .map(|a| PageCommand::Navigate(Route::ArticleDetail(a.slug.clone()))),
            ArticleTab::Categories => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SidebarTab {
    #[strum(serialize = "Terbaru")]
    Latest,
    #[strum(serialize = "Rekomendasi")]
    Recommended,
}

/// One article with its comments, the comment form and a sidebar of related
/// articles.
pub struct ArticleDetailState {
    pub slug: String,
    pub article: RemoteItem<Article>,
    pub latest: RemoteList<Article>,
    pub random: RemoteList<Article>,
    pub sidebar: TabController<SidebarTab>,
    pub sidebar_cursor: Cursor,
    pub comment: CommentForm,
    /// Tracks the comment POST so a late result never lands on another page.
    pub comment_request: RemoteItem<()>,
    pub form_open: bool,
    pub scroll: u16,
}

impl ArticleDetailState {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            article: RemoteItem::new(),
            latest: RemoteList::new(),
            random: RemoteList::new(),
            sidebar: TabController::new(
                vec![SidebarTab::Latest, SidebarTab::Recommended],
                TabPolicy::LocalFilter,
            ),
            sidebar_cursor: Cursor::default(),
            comment: CommentForm::default(),
            comment_request: RemoteItem::new(),
            form_open: false,
            scroll: 0,
        }
    }

    pub fn sidebar_list(&self) -> &RemoteList<Article> {
        match self.sidebar.active() {
            Some(SidebarTab::Recommended) => &self.random,
            _ => &self.latest,
        }
    }

    /// Reload the article, keeping the current copy on screen meanwhile.
    pub fn refetch_article(&mut self) -> Fetch {
        Fetch::Article(self.article.begin(), self.slug.clone())
    }

    /// Validate the form and produce the payload to POST, if allowed.
    pub fn begin_comment(&mut self) -> Option<(RequestTicket, CommentPayload)> {
        let article_id = self.article.value.as_ref()?.id;
        let payload = self.comment.begin_submit(article_id)?;
        Some((self.comment_request.begin(), payload))
    }

    /// Apply the outcome of a comment POST. Returns `None` when the result
    /// belongs to an earlier page or a cancelled submission; otherwise the
    /// article refetch to run on success, or the error to show.
    pub fn finish_comment(
        &mut self,
        ticket: RequestTicket,
        result: Result<(), CommentError>,
    ) -> Option<Result<Fetch, CommentError>> {
        if self.comment_request.finish(ticket, result.clone()) == Applied::Stale {
            return None;
        }
        self.comment.finish_submit(result.clone());
        match result {
            Ok(()) => {
                self.form_open = false;
                Some(Ok(self.refetch_article()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl PageState for ArticleDetailState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![
            self.refetch_article(),
            Fetch::LatestArticles(self.latest.begin()),
            Fetch::RandomArticles(self.random.begin()),
        ]
    }

    fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Article(t, r) => {
                self.article.finish(t, r);
            }
            Loaded::LatestArticles(t, r) => {
                self.latest.finish(t, r, MergeMode::Replace);
            }
            Loaded::RandomArticles(t, r) => {
                self.random.finish(t, r, MergeMode::Replace);
            }
            _ => {}
        }
    }

    fn is_loading(&self) -> bool {
        self.article.loading || self.latest.loading || self.random.loading
    }

    fn cancel(&mut self) {
        self.article.cancel();
        self.latest.cancel();
        self.random.cancel();
        self.comment_request.cancel();
        self.comment.submitting = false;
    }

    fn next_tab(&mut self) -> Vec<Fetch> {
        let change = self.sidebar.next();
        refilter(change, &mut self.sidebar_cursor);
        Vec::new()
    }

    fn prev_tab(&mut self) -> Vec<Fetch> {
        let change = self.sidebar.prev();
        refilter(change, &mut self.sidebar_cursor);
        Vec::new()
    }

    fn down(&mut self) -> Vec<Fetch> {
        self.scroll = self.scroll.saturating_add(1);
        Vec::new()
    }

    fn up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn related_down(&mut self) {
        let len = self.sidebar_list().items.len();
        self.sidebar_cursor.down(len);
    }

    fn related_up(&mut self) {
        self.sidebar_cursor.up();
    }

    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        self.sidebar_list()
            .items
            .get(self.sidebar_cursor.index())
            .filter(|a| a.slug != self.slug)
            .map(|a| PageCommand::Navigate(Route::ArticleDetail(a.slug.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: u64, slug: &str) -> Article {
        Article {
            id,
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            ..Default::default()
        }
    }

    fn page(items: Vec<Article>, last: u32) -> FetchResult<Paginated<Article>> {
        Ok(Paginated {
            data: items,
            current_page: None,
            last_page: Some(last),
        })
    }

    fn first_page_ticket(fetches: &[Fetch]) -> RequestTicket {
        match fetches.first() {
            Some(Fetch::ArticlesPage(t, 1)) => *t,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn settings(threshold: usize) -> PageSettings {
        PageSettings {
            scroll_threshold: threshold,
            dedupe_pages: true,
        }
    }

    #[test]
    fn test_first_page_split() {
        let mut state = ArticlesState::new(&settings(3));
        let t = first_page_ticket(&state.load());
        state.apply(Loaded::ArticlesPage(
            t,
            1,
            page(
                vec![article(1, "a"), article(2, "b"), article(3, "c"), article(4, "d")],
                2,
            ),
        ));
        assert_eq!(state.hero().map(|a| a.slug.as_str()), Some("a"));
        let secondary: Vec<_> = state.secondary().iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(secondary, vec!["b", "c"]);
        let main: Vec<_> = state.main_list().iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(main, vec!["d"]);
    }

    #[test]
    fn test_split_with_short_page() {
        let mut state = ArticlesState::new(&settings(3));
        let t = first_page_ticket(&state.load());
        state.apply(Loaded::ArticlesPage(t, 1, page(vec![article(1, "a")], 1)));
        assert!(state.secondary().is_empty());
        assert!(state.main_list().is_empty());
    }

    #[test]
    fn test_scrolling_appends_next_page_and_dedupes() {
        let mut state = ArticlesState::new(&settings(0));
        let t = first_page_ticket(&state.load());
        state.apply(Loaded::ArticlesPage(
            t,
            1,
            page(vec![article(1, "a"), article(2, "b"), article(3, "c")], 3),
        ));

        assert!(state.down().is_empty());
        let fetches = state.down();
        let t2 = match fetches.as_slice() {
            [Fetch::ArticlesPage(t, 2)] => *t,
            other => panic!("unexpected {other:?}"),
        };
        assert!(state.down().is_empty(), "no second request while in flight");

        state.apply(Loaded::ArticlesPage(
            t2,
            2,
            page(vec![article(3, "c"), article(4, "d")], 3),
        ));
        let slugs: Vec<_> = state.articles.items.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c", "d"]);
        assert_eq!(state.scroll.in_flight(), None);
    }

    #[test]
    fn test_failed_page_keeps_items_and_sets_error() {
        let mut state = ArticlesState::new(&settings(0));
        let t = first_page_ticket(&state.load());
        state.apply(Loaded::ArticlesPage(t, 1, page(vec![article(1, "a")], 5)));
        let t2 = match state.down().as_slice() {
            [Fetch::ArticlesPage(t, 2)] => *t,
            other => panic!("unexpected {other:?}"),
        };
        state.apply(Loaded::ArticlesPage(t2, 2, Err("Fetch error: timeout".into())));
        assert_eq!(state.articles.items.len(), 1);
        assert_eq!(state.articles.error.as_deref(), Some("Fetch error: timeout"));
        assert_eq!(state.scroll.page(), 1);
    }

    #[test]
    fn test_failed_first_page_retries_page_one() {
        let mut state = ArticlesState::new(&settings(3));
        let t = first_page_ticket(&state.load());
        state.apply(Loaded::ArticlesPage(t, 1, Err("Fetch error: timeout".into())));
        assert!(state.articles.items.is_empty());
        assert_eq!(state.articles.error.as_deref(), Some("Fetch error: timeout"));

        let retry = first_page_ticket(&state.down());
        state.apply(Loaded::ArticlesPage(
            retry,
            1,
            page(vec![article(1, "a"), article(2, "b"), article(3, "c")], 2),
        ));
        assert_eq!(state.hero().map(|a| a.slug.as_str()), Some("a"));
        assert_eq!(state.articles.error, None);
        assert_eq!(state.scroll.page(), 1);
    }

    #[test]
    fn test_tab_switch_refetches_and_drops_stale() {
        let mut state = ArticlesState::new(&settings(3));
        let old = first_page_ticket(&state.load());

        let fetches = state.next_tab();
        let cat_ticket = match fetches.as_slice() {
            [Fetch::Categories(t)] => *t,
            other => panic!("unexpected {other:?}"),
        };

        let fetches = state.prev_tab();
        let fresh = first_page_ticket(&fetches);
        state.apply(Loaded::ArticlesPage(old, 1, page(vec![article(9, "old")], 1)));
        assert!(state.articles.items.is_empty());
        assert!(state.articles.loading);

        state.apply(Loaded::Categories(cat_ticket, Ok(vec![Category::default()])));
        assert!(state.categories.items.is_empty());

        state.apply(Loaded::ArticlesPage(fresh, 1, page(vec![article(1, "new")], 1)));
        assert_eq!(state.articles.items[0].slug, "new");
    }

    #[test]
    fn test_comment_requires_loaded_article() {
        let mut detail = ArticleDetailState::new("x");
        detail.comment.name = "Sari".into();
        detail.comment.email = "sari@mail.id".into();
        detail.comment.text = "Bagus".into();
        assert!(detail.begin_comment().is_none());

        let fetches = detail.load();
        let t = match &fetches[0] {
            Fetch::Article(t, slug) if slug == "x" => *t,
            other => panic!("unexpected {other:?}"),
        };
        detail.apply(Loaded::Article(t, Ok(article(42, "x"))));
        assert_eq!(detail.begin_comment().map(|(_, p)| p.artikel_id), Some(42));
    }

    #[test]
    fn test_comment_result_after_cancel_is_dropped() {
        let mut detail = ArticleDetailState::new("x");
        let t = match detail.load().first() {
            Some(Fetch::Article(t, _)) => *t,
            other => panic!("unexpected {other:?}"),
        };
        detail.apply(Loaded::Article(t, Ok(article(42, "x"))));
        detail.comment.name = "Sari".into();
        detail.comment.email = "sari@mail.id".into();
        detail.comment.text = "Bagus".into();
        detail.form_open = true;
        let (ticket, _) = detail.begin_comment().expect("valid form");

        detail.cancel();
        assert!(!detail.comment.submitting);
        assert_eq!(detail.finish_comment(ticket, Ok(())), None);
        assert_eq!(detail.comment.name, "Sari");
        assert!(detail.form_open);

        let (ticket, _) = detail.begin_comment().expect("valid form");
        assert!(matches!(
            detail.finish_comment(ticket, Ok(())),
            Some(Ok(Fetch::Article(_, slug))) if slug == "x"
        ));
        assert!(detail.comment.name.is_empty());
        assert!(!detail.form_open);
    }

    #[test]
    fn test_sidebar_tabs_filter_locally() {
        let mut detail = ArticleDetailState::new("x");
        let fetches = detail.load();
        let (tl, tr) = match (&fetches[1], &fetches[2]) {
            (Fetch::LatestArticles(a), Fetch::RandomArticles(b)) => (*a, *b),
            other => panic!("unexpected {other:?}"),
        };
        detail.apply(Loaded::LatestArticles(tl, Ok(vec![article(1, "x"), article(2, "y")])));
        detail.apply(Loaded::RandomArticles(tr, Ok(vec![article(3, "z")])));

        assert_eq!(detail.activate(""), None, "current article is not reopened");
        detail.related_down();
        assert_eq!(
            detail.activate(""),
            Some(PageCommand::Navigate(Route::ArticleDetail("y".into())))
        );
        assert!(detail.next_tab().is_empty());
        assert_eq!(
            detail.activate(""),
            Some(PageCommand::Navigate(Route::ArticleDetail("z".into())))
        );
    }
}
