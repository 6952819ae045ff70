use super::{Cursor, Fetch, Loaded, PageCommand, PageState, Route, refilter};
use crate::internal::filters::{
    ALL_TAB, MediaFilter, filter_galleries_by_year, filter_media, gallery_year_tabs,
};
use crate::internal::models::{Gallery, MediaItem};
use crate::internal::remote_list::{Applied, MergeMode, RemoteItem, RemoteList};
use crate::internal::tabs::{TabController, TabPolicy};
use crate::utils::url::storage_url;
use strum::IntoEnumIterator;

/// Gallery listing with one tab per year found in the data.
pub struct GalleriesState {
    pub galleries: RemoteList<Gallery>,
    pub tabs: TabController<String>,
    pub cursor: Cursor,
}

impl Default for GalleriesState {
    fn default() -> Self {
        Self {
            galleries: RemoteList::new(),
            tabs: TabController::new(vec![ALL_TAB.to_string()], TabPolicy::LocalFilter),
            cursor: Cursor::default(),
        }
    }
}

impl GalleriesState {
    pub fn visible(&self) -> Vec<&Gallery> {
        let tab = self.tabs.active().map(String::as_str).unwrap_or(ALL_TAB);
        filter_galleries_by_year(&self.galleries.items, tab)
    }
}

impl PageState for GalleriesState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Galleries(self.galleries.begin())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Galleries(t, r) = loaded
            && self.galleries.finish(t, r, MergeMode::Replace) == Applied::Updated
        {
            self.tabs.set_tabs(gallery_year_tabs(&self.galleries.items));
        }
    }

    fn is_loading(&self) -> bool {
        self.galleries.loading
    }

    fn cancel(&mut self) {
        self.galleries.cancel();
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
            .map(|g| PageCommand::Navigate(Route::GalleryDetail(g.slug.clone())))
    }
}

/// One gallery with its photos and videos.
pub struct GalleryDetailState {
    pub slug: String,
    pub gallery: RemoteItem<Gallery>,
    pub tabs: TabController<MediaFilter>,
    pub cursor: Cursor,
}

impl GalleryDetailState {
    pub fn new(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            gallery: RemoteItem::new(),
            tabs: TabController::new(
                MediaFilter::iter().collect(),
                TabPolicy::LocalFilter,
            ),
            cursor: Cursor::default(),
        }
    }

    pub fn visible_media(&self) -> Vec<&MediaItem> {
        let filter = self.tabs.active().copied().unwrap_or(MediaFilter::All);
        match &self.gallery.value {
            Some(gallery) => filter_media(&gallery.media, filter),
            None => Vec::new(),
        }
    }
}

impl PageState for GalleryDetailState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Gallery(self.gallery.begin(), self.slug.clone())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Gallery(t, r) = loaded {
            self.gallery.finish(t, r);
        }
    }

    fn is_loading(&self) -> bool {
        self.gallery.loading
    }

    fn cancel(&mut self) {
        self.gallery.cancel();
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
        let len = self.visible_media().len();
        self.cursor.down(len);
        Vec::new()
    }

    fn up(&mut self) {
        self.cursor.up();
    }

    /// Opens the selected photo or video from storage.
    fn activate(&self, base_url: &str) -> Option<PageCommand> {
        self.visible_media()
            .get(self.cursor.index())
            .map(|m| PageCommand::Open(storage_url(base_url, Some(&m.file_name))))
    }
}
