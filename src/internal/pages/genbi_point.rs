use strum::IntoEnumIterator;

use super::{Cursor, Fetch, Loaded, PageCommand, PageState, refilter};
use crate::internal::filters::{SotmTab, filter_sotm};
use crate::internal::models::Sotm;
use crate::internal::remote_list::{MergeMode, RemoteList};
use crate::internal::tabs::{TabController, TabPolicy};
use crate::utils::url::storage_url;

/// Staff-of-the-month posters, split into deputy and staff tabs.
pub struct GenbiPointState {
    pub posters: RemoteList<Sotm>,
    pub tabs: TabController<SotmTab>,
    pub cursor: Cursor,
}

impl Default for GenbiPointState {
    fn default() -> Self {
        Self {
            posters: RemoteList::new(),
            tabs: TabController::new(SotmTab::iter().collect(), TabPolicy::LocalFilter),
            cursor: Cursor::default(),
        }
    }
}

impl GenbiPointState {
    pub fn active_tab(&self) -> SotmTab {
        self.tabs.active().copied().unwrap_or(SotmTab::Deputy)
    }

    pub fn visible(&self) -> Vec<&Sotm> {
        filter_sotm(&self.posters.items, self.active_tab())
    }
}

impl PageState for GenbiPointState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Sotm(self.posters.begin())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Sotm(t, r) = loaded {
            self.posters.finish(t, r, MergeMode::Replace);
        }
    }

    fn is_loading(&self) -> bool {
        self.posters.loading
    }

    fn cancel(&mut self) {
        self.posters.cancel();
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

    /// Opens the poster image.
    fn activate(&self, base_url: &str) -> Option<PageCommand> {
        self.visible()
            .get(self.cursor.index())
            .map(|p| PageCommand::Open(storage_url(base_url, p.image.as_deref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poster(id: u64, kind: &str, image: &str) -> Sotm {
        Sotm {
            id,
            kind: Some(kind.to_string()),
            image: Some(image.to_string()),
        }
    }

    #[test]
    fn test_tabs_split_posters_and_open_image() {
        let mut state = GenbiPointState::default();
        let t = match state.load().as_slice() {
            [Fetch::Sotm(t)] => *t,
            other => panic!("unexpected {other:?}"),
        };
        state.apply(Loaded::Sotm(
            t,
            Ok(vec![
                poster(1, "deputi", "sotm/d1.jpg"),
                poster(2, "staff", "sotm/s1.jpg"),
                poster(3, "deputi", "sotm/d2.jpg"),
            ]),
        ));

        assert_eq!(state.tabs.tabs(), [SotmTab::Deputy, SotmTab::Staff]);
        assert_eq!(state.visible().len(), 2);
        state.down();
        assert_eq!(
            state.activate("https://data.example"),
            Some(PageCommand::Open(
                "https://data.example/storage/sotm/d2.jpg".into()
            ))
        );

        state.next_tab();
        assert_eq!(state.cursor.index(), 0);
        let ids: Vec<u64> = state.visible().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_error_keeps_previous_posters() {
        let mut state = GenbiPointState::default();
        let t = match state.load().as_slice() {
            [Fetch::Sotm(t)] => *t,
            other => panic!("unexpected {other:?}"),
        };
        state.apply(Loaded::Sotm(t, Ok(vec![poster(1, "deputi", "a.jpg")])));
        let t = match state.load().as_slice() {
            [Fetch::Sotm(t)] => *t,
            other => panic!("unexpected {other:?}"),
        };
        state.apply(Loaded::Sotm(t, Err("HTTP error: 500".into())));
        assert_eq!(state.posters.items.len(), 1);
        assert_eq!(state.posters.error.as_deref(), Some("HTTP error: 500"));
        assert!(!state.is_loading());
    }
}
