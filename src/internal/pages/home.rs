use super::{Cursor, Fetch, Loaded, PageCommand, PageState, Route};
use crate::internal::models::{Article, Event};
use crate::internal::remote_list::{MergeMode, RemoteList};

/// Landing page: latest articles followed by upcoming events.
#[derive(Debug, Default)]
pub struct HomeState {
    pub articles: RemoteList<Article>,
    pub events: RemoteList<Event>,
    pub cursor: Cursor,
}

impl HomeState {
    fn rows(&self) -> usize {
        self.articles.items.len() + self.events.items.len()
    }
}

impl PageState for HomeState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![
            Fetch::HomeArticles(self.articles.begin()),
            Fetch::HomeEvents(self.events.begin()),
        ]
    }

    fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::HomeArticles(t, r) => {
                self.articles.finish(t, r, MergeMode::Replace);
            }
            Loaded::HomeEvents(t, r) => {
                self.events.finish(t, r, MergeMode::Replace);
            }
            _ => {}
        }
    }

    fn is_loading(&self) -> bool {
        self.articles.loading || self.events.loading
    }

    fn cancel(&mut self) {
        self.articles.cancel();
        self.events.cancel();
    }

    fn down(&mut self) -> Vec<Fetch> {
        self.cursor.down(self.rows());
        Vec::new()
    }

    fn up(&mut self) {
        self.cursor.up();
    }

    fn activate(&self, _base_url: &str) -> Option<PageCommand> {
        let idx = self.cursor.index();
        let n = self.articles.items.len();
        match idx < n {
            true => self
                .articles
                .items
                .get(idx)
                .map(|a| PageCommand::Navigate(Route::ArticleDetail(a.slug.clone()))),
            false => self
                .events
                .items
                .get(idx - n)
                .map(|e| PageCommand::Navigate(Route::EventDetail(e.slug.clone()))),
        }
    }
}
