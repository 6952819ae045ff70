//! Page counter driven by "scrolled near the bottom" signals.
//!
//! A page is requested at most once: while it is in flight, further scroll
//! signals are ignored. The listing stops when the API reports the last page
//! or returns an empty page.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfiniteScroll {
    page: u32,
    in_flight: Option<u32>,
    exhausted: bool,
    threshold: usize,
}

impl InfiniteScroll {
    /// `threshold` is how many rows from the end count as "near the bottom".
    pub fn new(threshold: usize) -> Self {
        Self {
            page: 1,
            in_flight: None,
            exhausted: false,
            threshold,
        }
    }

    /// Highest page requested so far, 0 when the first page failed.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Mark the first page as requested. Returns the page to fetch.
    pub fn start(&mut self) -> u32 {
        self.page = 1;
        self.exhausted = false;
        self.in_flight = Some(1);
        1
    }

    /// Called whenever the visible position changes. `position` is the
    /// selected row, `total` the number of loaded rows. Returns the next page
    /// to fetch when the bottom is reached and no request is outstanding.
    pub fn on_scroll(&mut self, position: usize, total: usize) -> Option<u32> {
        if self.exhausted || self.in_flight.is_some() {
            return None;
        }
        let near_bottom = position + self.threshold >= total.saturating_sub(1);
        if !near_bottom {
            return None;
        }
        self.page += 1;
        self.in_flight = Some(self.page);
        tracing::debug!(page = self.page, "infinite scroll requests next page");
        Some(self.page)
    }

    /// Record a loaded page. Empty pages and the API's last page stop the listing.
    pub fn on_page_loaded(&mut self, page: u32, item_count: usize, last_page: Option<u32>) {
        if self.in_flight == Some(page) {
            self.in_flight = None;
        }
        let reached_last = last_page.is_some_and(|last| page >= last);
        if item_count == 0 || reached_last {
            self.exhausted = true;
        }
    }

    /// A failed page is not retried automatically; the counter steps back so a
    /// later scroll asks for the same page again. After a failed first page
    /// that is page 1 again, never page 2.
    pub fn on_page_failed(&mut self, page: u32) {
        if self.in_flight == Some(page) {
            self.in_flight = None;
            self.page = page.saturating_sub(1);
        }
    }

    /// Back to page 1 with nothing in flight, as after a tab switch.
    pub fn reset(&mut self) {
        self.page = 1;
        self.in_flight = None;
        self.exhausted = false;
    }
}

impl Default for InfiniteScroll {
    fn default() -> Self {
        Self::new(3)
    }
}
