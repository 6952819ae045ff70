//! Page state for one remotely fetched list.
//!
//! Each logical list on a page (main listing, trending, recommendations...)
//! owns a [`RemoteList`] with its own loading flag and error slot, so a slow
//! or failing sidebar never blocks or blanks the main content.
//!
//! Requests are tracked with a generation counter. [`RemoteList::begin`]
//! hands out a [`RequestTicket`]; only the ticket of the latest request can
//! update state. Results carrying an older ticket are stale and dropped.
//! Generations are unique per process, so a response addressed to a page that
//! was closed and reopened never matches the new page's lists.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Identifies one request issued for a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

/// How a successful result is merged into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Replace,
    Append,
}

/// Outcome of [`RemoteList::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Items were replaced or appended.
    Updated,
    /// The error slot was set; items are untouched.
    Failed,
    /// The ticket was outdated; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteList<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> Default for RemoteList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> RemoteList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Any earlier in-flight request becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation = next_generation();
        self.loading = true;
        self.error = None;
        RequestTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the result of the request identified by `ticket`.
    pub fn finish<E: Display>(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<T>, E>,
        mode: MergeMode,
    ) -> Applied {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale response"
            );
            return Applied::Stale;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                match mode {
                    MergeMode::Replace => self.items = items,
                    MergeMode::Append => self.items.extend(items),
                }
                self.error = None;
                Applied::Updated
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    /// Invalidate any in-flight request (unmount or parameter change).
    pub fn cancel(&mut self) {
        self.generation = next_generation();
        self.loading = false;
    }

    /// Cancel and drop everything, as on a tab switch with the refetch policy.
    pub fn reset(&mut self) {
        self.cancel();
        self.items.clear();
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while nothing has been loaded yet and a request is outstanding.
    pub fn shows_skeleton(&self) -> bool {
        self.loading && self.items.is_empty()
    }
}

/// Single-record counterpart of [`RemoteList`] for detail pages.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteItem<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> Default for RemoteItem<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> RemoteItem<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestTicket {
        self.generation = next_generation();
        self.loading = true;
        self.error = None;
        RequestTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn finish<E: Display>(&mut self, ticket: RequestTicket, result: Result<T, E>) -> Applied {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale response"
            );
            return Applied::Stale;
        }
        self.loading = false;
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
                Applied::Updated
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    pub fn cancel(&mut self) {
        self.generation = next_generation();
        self.loading = false;
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.value = None;
        self.error = None;
    }
}
