//! Per-page state.
//!
//! A page never talks to the network itself. Opening it, switching a tab or
//! scrolling returns [`Fetch`] requests; the app runs them on the runtime and
//! feeds the [`Loaded`] results back through [`PageState::apply`]. Every
//! request carries the [`RequestTicket`] of the list it targets, so results for
//! a closed page or an outdated parameter are dropped by the list itself.

mod articles;
mod events;
mod gallery;
mod genbi_point;
mod home;
mod organisation;
mod podcasts;

pub use articles::{ArticleDetailState, ArticleTab, ArticlesState, SidebarTab};
pub use events::{EventDetailState, EventsState};
pub use gallery::{GalleriesState, GalleryDetailState};
pub use genbi_point::GenbiPointState;
pub use home::HomeState;
pub use organisation::{BoardHistoryState, DepartmentState, OrganisationState, PeriodStructureState};
pub use podcasts::PodcastsState;

use crate::api::{ApiError, ApiService};
use crate::config::AppConfig;
use crate::internal::models::{
    Article, Category, DepartmentDetail, Event, Gallery, OrgNode, Paginated, PeriodSummary, Podcast,
    Sotm,
};
use crate::internal::remote_list::RequestTicket;
use crate::internal::tabs::TabChange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Articles,
    ArticleDetail(String),
    Events,
    EventDetail(String),
    Galleries,
    GalleryDetail(String),
    Organisation,
    BoardHistory,
    PeriodStructure(String),
    Department { periode: String, department: String },
    Podcasts,
    GenbiPoint,
}

impl Route {
    /// Top-level pages bound to the number keys.
    pub const TOP_LEVEL: [Route; 8] = [
        Route::Home,
        Route::Articles,
        Route::Events,
        Route::Galleries,
        Route::Organisation,
        Route::BoardHistory,
        Route::Podcasts,
        Route::GenbiPoint,
    ];

    pub fn from_digit(c: char) -> Option<Route> {
        let n = c.to_digit(10)? as usize;
        match n {
            1..=8 => Some(Self::TOP_LEVEL[n - 1].clone()),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Beranda",
            Route::Articles => "Artikel",
            Route::ArticleDetail(_) => "Detail Artikel",
            Route::Events => "Event",
            Route::EventDetail(_) => "Detail Event",
            Route::Galleries => "Galeri",
            Route::GalleryDetail(_) => "Detail Galeri",
            Route::Organisation => "Organisasi",
            Route::BoardHistory => "Sejarah Kepengurusan",
            Route::PeriodStructure(_) => "Struktur Kepengurusan",
            Route::Department { .. } => "Detail Bidang",
            Route::Podcasts => "Podcast",
            Route::GenbiPoint => "GenBI Point",
        }
    }
}

/// Settings that shape page behaviour, taken from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub scroll_threshold: usize,
    pub dedupe_pages: bool,
}

impl From<&AppConfig> for PageSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            scroll_threshold: config.scroll_threshold,
            dedupe_pages: config.dedupe_pages,
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// What `Enter` on a row asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    Navigate(Route),
    Open(String),
}

/// Selected row of a list. Moving stops at the ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn down(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// Reset the cursor when a local-filter tab actually changed.
fn refilter<K>(change: TabChange<K>, cursor: &mut Cursor) {
    if !matches!(change, TabChange::Unchanged) {
        cursor.reset();
    }
}

pub type FetchResult<T> = Result<T, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Fetch {
    HomeArticles(RequestTicket),
    HomeEvents(RequestTicket),
    ArticlesPage(RequestTicket, u32),
    TrendingArticles(RequestTicket),
    RecommendedArticles(RequestTicket),
    Categories(RequestTicket),
    Article(RequestTicket, String),
    LatestArticles(RequestTicket),
    RandomArticles(RequestTicket),
    Events(RequestTicket),
    Event(RequestTicket, String),
    RecommendedEvents(RequestTicket),
    Galleries(RequestTicket),
    Gallery(RequestTicket, String),
    Structure(RequestTicket),
    PeriodStructure(RequestTicket, String),
    Department(RequestTicket, String, String),
    BoardHistory(RequestTicket),
    Podcasts(RequestTicket),
    Sotm(RequestTicket),
}

#[derive(Debug, Clone)]
pub enum Loaded {
    HomeArticles(RequestTicket, FetchResult<Vec<Article>>),
    HomeEvents(RequestTicket, FetchResult<Vec<Event>>),
    ArticlesPage(RequestTicket, u32, FetchResult<Paginated<Article>>),
    TrendingArticles(RequestTicket, FetchResult<Vec<Article>>),
    RecommendedArticles(RequestTicket, FetchResult<Vec<Article>>),
    Categories(RequestTicket, FetchResult<Vec<Category>>),
    Article(RequestTicket, FetchResult<Article>),
    LatestArticles(RequestTicket, FetchResult<Vec<Article>>),
    RandomArticles(RequestTicket, FetchResult<Vec<Article>>),
    Events(RequestTicket, FetchResult<Vec<Event>>),
    Event(RequestTicket, FetchResult<Event>),
    RecommendedEvents(RequestTicket, FetchResult<Vec<Event>>),
    Galleries(RequestTicket, FetchResult<Vec<Gallery>>),
    Gallery(RequestTicket, FetchResult<Gallery>),
    Structure(RequestTicket, FetchResult<Vec<OrgNode>>),
    Department(RequestTicket, FetchResult<DepartmentDetail>),
    BoardHistory(RequestTicket, FetchResult<Vec<PeriodSummary>>),
    Podcasts(RequestTicket, FetchResult<Vec<Podcast>>),
    Sotm(RequestTicket, FetchResult<Vec<Sotm>>),
}

fn text<T>(result: Result<T, ApiError>) -> FetchResult<T> {
    result.map_err(|e| {
        tracing::warn!("request failed: {}", e);
        e.to_string()
    })
}

impl Fetch {
    /// Perform the request. Errors become the message shown in the list's error slot.
    pub async fn run(self, api: &ApiService) -> Loaded {
        match self {
            Fetch::HomeArticles(t) => Loaded::HomeArticles(t, text(api.fetch_home_articles().await)),
            Fetch::HomeEvents(t) => Loaded::HomeEvents(t, text(api.fetch_home_events().await)),
            Fetch::ArticlesPage(t, page) => {
                Loaded::ArticlesPage(t, page, text(api.fetch_articles_page(page).await))
            }
            Fetch::TrendingArticles(t) => {
                Loaded::TrendingArticles(t, text(api.fetch_trending_articles().await))
            }
            Fetch::RecommendedArticles(t) => {
                Loaded::RecommendedArticles(t, text(api.fetch_recommended_articles().await))
            }
            Fetch::Categories(t) => Loaded::Categories(t, text(api.fetch_categories().await)),
            Fetch::Article(t, slug) => Loaded::Article(t, text(api.fetch_article(&slug).await)),
            Fetch::LatestArticles(t) => {
                Loaded::LatestArticles(t, text(api.fetch_latest_for_detail().await))
            }
            Fetch::RandomArticles(t) => {
                Loaded::RandomArticles(t, text(api.fetch_random_articles().await))
            }
            Fetch::Events(t) => Loaded::Events(t, text(api.fetch_events().await)),
            Fetch::Event(t, slug) => Loaded::Event(t, text(api.fetch_event(&slug).await)),
            Fetch::RecommendedEvents(t) => {
                Loaded::RecommendedEvents(t, text(api.fetch_recommended_events().await))
            }
            Fetch::Galleries(t) => Loaded::Galleries(t, text(api.fetch_galleries().await)),
            Fetch::Gallery(t, slug) => Loaded::Gallery(t, text(api.fetch_gallery(&slug).await)),
            Fetch::Structure(t) => Loaded::Structure(t, text(api.fetch_structure().await)),
            Fetch::PeriodStructure(t, periode) => {
                Loaded::Structure(t, text(api.fetch_period_structure(&periode).await))
            }
            Fetch::Department(t, periode, department) => Loaded::Department(
                t,
                text(api.fetch_department(&periode, &department).await),
            ),
            Fetch::BoardHistory(t) => Loaded::BoardHistory(t, text(api.fetch_board_history().await)),
            Fetch::Podcasts(t) => Loaded::Podcasts(t, text(api.fetch_podcasts().await)),
            Fetch::Sotm(t) => Loaded::Sotm(t, text(api.fetch_sotm().await)),
        }
    }
}

/// Behaviour shared by every page.
pub trait PageState {
    /// Requests issued when the page opens (or is refreshed).
    fn load(&mut self) -> Vec<Fetch>;

    /// Apply a result. Results meant for other pages are ignored.
    fn apply(&mut self, loaded: Loaded);

    /// Invalidate everything in flight; called when the page is left.
    fn cancel(&mut self);

    fn next_tab(&mut self) -> Vec<Fetch> {
        Vec::new()
    }

    fn prev_tab(&mut self) -> Vec<Fetch> {
        Vec::new()
    }

    /// Move down one row (or scroll the body on detail pages). May request the
    /// next page of an infinite listing.
    fn down(&mut self) -> Vec<Fetch>;

    fn up(&mut self);

    /// Move the selection in a detail page's related list.
    fn related_down(&mut self) {}

    fn related_up(&mut self) {}

    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        None
    }

    /// Any of the page's lists still waiting for a response.
    fn is_loading(&self) -> bool;
}

pub enum Page {
    Home(HomeState),
    Articles(ArticlesState),
    ArticleDetail(ArticleDetailState),
    Events(EventsState),
    EventDetail(EventDetailState),
    Galleries(GalleriesState),
    GalleryDetail(GalleryDetailState),
    Organisation(OrganisationState),
    BoardHistory(BoardHistoryState),
    PeriodStructure(PeriodStructureState),
    Department(DepartmentState),
    Podcasts(PodcastsState),
    GenbiPoint(GenbiPointState),
}

impl Page {
    /// Build the page for `route` together with its initial requests.
    pub fn open(route: &Route, settings: &PageSettings) -> (Self, Vec<Fetch>) {
        let mut page = match route {
            Route::Home => Page::Home(HomeState::default()),
            Route::Articles => Page::Articles(ArticlesState::new(settings)),
            Route::ArticleDetail(slug) => Page::ArticleDetail(ArticleDetailState::new(slug)),
            Route::Events => Page::Events(EventsState::default()),
            Route::EventDetail(slug) => Page::EventDetail(EventDetailState::new(slug)),
            Route::Galleries => Page::Galleries(GalleriesState::default()),
            Route::GalleryDetail(slug) => Page::GalleryDetail(GalleryDetailState::new(slug)),
            Route::Organisation => Page::Organisation(OrganisationState::default()),
            Route::BoardHistory => Page::BoardHistory(BoardHistoryState::default()),
            Route::PeriodStructure(periode) => {
                Page::PeriodStructure(PeriodStructureState::new(periode))
            }
            Route::Department {
                periode,
                department,
            } => Page::Department(DepartmentState::new(periode, department)),
            Route::Podcasts => Page::Podcasts(PodcastsState::default()),
            Route::GenbiPoint => Page::GenbiPoint(GenbiPointState::default()),
        };
        let fetches = page.state_mut().load();
        (page, fetches)
    }

    pub fn state(&self) -> &dyn PageState {
        match self {
            Page::Home(s) => s,
            Page::Articles(s) => s,
            Page::ArticleDetail(s) => s,
            Page::Events(s) => s,
            Page::EventDetail(s) => s,
            Page::Galleries(s) => s,
            Page::GalleryDetail(s) => s,
            Page::Organisation(s) => s,
            Page::BoardHistory(s) => s,
            Page::PeriodStructure(s) => s,
            Page::Department(s) => s,
            Page::Podcasts(s) => s,
            Page::GenbiPoint(s) => s,
        }
    }

    pub fn state_mut(&mut self) -> &mut dyn PageState {
        match self {
            Page::Home(s) => s,
            Page::Articles(s) => s,
            Page::ArticleDetail(s) => s,
            Page::Events(s) => s,
            Page::EventDetail(s) => s,
            Page::Galleries(s) => s,
            Page::GalleryDetail(s) => s,
            Page::Organisation(s) => s,
            Page::BoardHistory(s) => s,
            Page::PeriodStructure(s) => s,
            Page::Department(s) => s,
            Page::Podcasts(s) => s,
            Page::GenbiPoint(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_routes() {
        assert_eq!(Route::from_digit('1'), Some(Route::Home));
        assert_eq!(Route::from_digit('7'), Some(Route::Podcasts));
        assert_eq!(Route::from_digit('8'), Some(Route::GenbiPoint));
        assert_eq!(Route::from_digit('9'), None);
        assert_eq!(Route::from_digit('x'), None);
    }

    #[test]
    fn test_cursor_clamps() {
        let mut cursor = Cursor::default();
        cursor.up();
        assert_eq!(cursor.index(), 0);
        cursor.down(2);
        cursor.down(2);
        assert_eq!(cursor.index(), 1);
        cursor.down(0);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_open_issues_initial_requests() {
        let (_, fetches) = Page::open(&Route::Articles, &PageSettings::default());
        assert!(matches!(fetches[0], Fetch::ArticlesPage(_, 1)));
        assert_eq!(fetches.len(), 3);

        let (_, fetches) = Page::open(&Route::GalleryDetail("dies".into()), &PageSettings::default());
        assert!(matches!(&fetches[..], [Fetch::Gallery(_, slug)] if slug == "dies"));
    }
}
