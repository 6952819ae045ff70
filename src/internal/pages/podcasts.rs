use super::{Cursor, Fetch, Loaded, PageCommand, PageState, refilter};
use crate::internal::filters::{ALL_TAB, filter_podcasts, podcast_date_tabs};
use crate::internal::models::Podcast;
use crate::internal::remote_list::{Applied, MergeMode, RemoteList};
use crate::internal::tabs::{TabController, TabPolicy};
use crate::utils::url::youtube_url;

pub struct PodcastsState {
    pub podcasts: RemoteList<Podcast>,
    pub tabs: TabController<String>,
    pub cursor: Cursor,
}

impl Default for PodcastsState {
    fn default() -> Self {
        Self {
            podcasts: RemoteList::new(),
            tabs: TabController::new(vec![ALL_TAB.to_string()], TabPolicy::LocalFilter),
            cursor: Cursor::default(),
        }
    }
}

impl PodcastsState {
    pub fn visible(&self) -> Vec<&Podcast> {
        let tab = self.tabs.active().map(String::as_str).unwrap_or(ALL_TAB);
        filter_podcasts(&self.podcasts.items, tab)
    }
}

impl PageState for PodcastsState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Podcasts(self.podcasts.begin())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Podcasts(t, r) = loaded
            && self.podcasts.finish(t, r, MergeMode::Replace) == Applied::Updated
        {
            self.tabs.set_tabs(podcast_date_tabs(&self.podcasts.items));
        }
    }

    fn is_loading(&self) -> bool {
        self.podcasts.loading
    }

    fn cancel(&mut self) {
        self.podcasts.cancel();
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

    /// Opens the episode on YouTube.
    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        self.visible()
            .get(self.cursor.index())
            .and_then(|p| youtube_url(p.video_id.as_deref(), p.youtube_url.as_deref()))
            .map(PageCommand::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_tabs_and_youtube_link() {
        let mut state = PodcastsState::default();
        let t = match state.load().as_slice() {
            [Fetch::Podcasts(t)] => *t,
            other => panic!("unexpected {other:?}"),
        };
        state.apply(Loaded::Podcasts(
            t,
            Ok(vec![
                Podcast {
                    id: 1,
                    video_id: Some("x7xMqTNOR9Y".into()),
                    date: Some("2024".into()),
                    ..Default::default()
                },
                Podcast {
                    id: 2,
                    video_id: Some("abc".into()),
                    date: Some("2023".into()),
                    ..Default::default()
                },
            ]),
        ));
        assert_eq!(state.tabs.tabs(), ["all", "2024", "2023"]);
        assert_eq!(
            state.activate(""),
            Some(PageCommand::Open(
                "https://www.youtube.com/watch?v=x7xMqTNOR9Y".into()
            ))
        );
        state.prev_tab();
        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.visible()[0].id, 2);
    }
}
