use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::internal::models::{EVENT_STATUS_ENDED, EVENT_STATUS_OPEN, Event};

/// Status tabs of the events page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum EventTab {
    #[strum(serialize = "Semua Kegiatan")]
    All,
    #[strum(serialize = "Sedang Berlangsung")]
    Ongoing,
    #[strum(serialize = "Sudah Berakhir")]
    Ended,
}

impl EventTab {
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Ongoing => event.status.as_deref() == Some(EVENT_STATUS_OPEN),
            Self::Ended => event.status.as_deref() == Some(EVENT_STATUS_ENDED),
        }
    }
}

/// Normalised free-text query. Matching is a case-insensitive substring test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            query: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.query)
    }

    /// Name, excerpt or place of an event.
    pub fn matches_event(&self, event: &Event) -> bool {
        self.is_empty()
            || self.matches(&event.name)
            || event.excerpt.as_deref().is_some_and(|e| self.matches(e))
            || event.place.as_deref().is_some_and(|p| self.matches(p))
    }
}

/// Events visible under `tab` that match `query`, in API order.
pub fn filter_events<'a>(events: &'a [Event], tab: EventTab, query: &SearchQuery) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| tab.matches(e) && query.matches_event(e))
        .collect()
}
