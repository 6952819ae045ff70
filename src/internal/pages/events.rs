use super::{Cursor, Fetch, Loaded, PageCommand, PageState, Route, refilter};
use crate::internal::models::Event;
use crate::internal::remote_list::{MergeMode, RemoteItem, RemoteList};
use crate::internal::search::{EventTab, SearchQuery, filter_events};
use crate::internal::tabs::{TabController, TabPolicy};

/// Event listing with status tabs and a debounced text search.
pub struct EventsState {
    pub events: RemoteList<Event>,
    pub tabs: TabController<EventTab>,
    /// Text in the search box, applied to `query` once typing settles.
    pub input: String,
    pub query: SearchQuery,
    pub cursor: Cursor,
}

impl Default for EventsState {
    fn default() -> Self {
        Self {
            events: RemoteList::new(),
            tabs: TabController::new(EventTab::all(), TabPolicy::LocalFilter),
            input: String::new(),
            query: SearchQuery::default(),
            cursor: Cursor::default(),
        }
    }
}

impl EventsState {
    pub fn active_tab(&self) -> EventTab {
        self.tabs.active().copied().unwrap_or(EventTab::All)
    }

    pub fn visible(&self) -> Vec<&Event> {
        filter_events(&self.events.items, self.active_tab(), &self.query)
    }

    /// Apply a settled search string. Unchanged queries keep the selection.
    pub fn apply_query(&mut self, raw: &str) {
        let query = SearchQuery::new(raw);
        if query != self.query {
            tracing::debug!(query = %query.query, "event search applied");
            self.query = query;
            self.cursor.reset();
        }
    }
}

impl PageState for EventsState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Events(self.events.begin())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Events(t, r) = loaded {
            self.events.finish(t, r, MergeMode::Replace);
        }
    }

    fn is_loading(&self) -> bool {
        self.events.loading
    }

    fn cancel(&mut self) {
        self.events.cancel();
    }

    fn next_tab(&mut self) -> Vec<Fetch> {
        let change = self.tabs.next();
        refilter(change, &mut self.cursor);
        Vec::new()
    }

    fn prev_tab(&mut self) -> Vec<Fetch> {
        let change = self.tabs.prev();
        refilter(change, &mut self.cursor);
        Vec::new()
    }

    fn down(&mut self) -> Vec<Fetch> {
        let len = self.visible().len();
        self.cursor.down(len);
        Vec::new()
    }

    fn up(&mut self) {
        self.cursor.up();
    }

    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        self.visible()
            .get(self.cursor.index())
            .map(|e| PageCommand::Navigate(Route::EventDetail(e.slug.clone())))
    }
}

pub struct EventDetailState {
    pub slug: String,
    pub event: RemoteItem<Event>,
    pub recommended: RemoteList<Event>,
    pub cursor: Cursor,
    pub scroll: u16,
}

impl EventDetailState {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            event: RemoteItem::new(),
            recommended: RemoteList::new(),
            cursor: Cursor::default(),
            scroll: 0,
        }
    }

    /// Registration link of the event, if it has one.
    pub fn cta_link(&self) -> Option<&str> {
        self.event
            .value
            .as_ref()
            .and_then(|e| e.cta_link.as_deref())
            .filter(|l| !l.trim().is_empty())
    }
}

impl PageState for EventDetailState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![
            Fetch::Event(self.event.begin(), self.slug.clone()),
            Fetch::RecommendedEvents(self.recommended.begin()),
        ]
    }

    fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::Event(t, r) => {
                self.event.finish(t, r);
            }
            Loaded::RecommendedEvents(t, r) => {
                self.recommended.finish(t, r, MergeMode::Replace);
            }
            _ => {}
        }
    }

    fn is_loading(&self) -> bool {
        self.event.loading || self.recommended.loading
    }

    fn cancel(&mut self) {
        self.event.cancel();
        self.recommended.cancel();
    }

    fn down(&mut self) -> Vec<Fetch> {
        self.scroll = self.scroll.saturating_add(1);
        Vec::new()
    }

    fn up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn related_down(&mut self) {
        self.cursor.down(self.recommended.items.len());
    }

    fn related_up(&mut self) {
        self.cursor.up();
    }

    /// Opens the selected recommendation, or the registration link when there
    /// are no recommendations.
    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        match self.recommended.items.get(self.cursor.index()) {
            Some(e) if e.slug != self.slug => {
                Some(PageCommand::Navigate(Route::EventDetail(e.slug.clone())))
            }
            Some(_) => None,
            None => self.cta_link().map(|l| PageCommand::Open(l.to_string())),
        }
    }
}
