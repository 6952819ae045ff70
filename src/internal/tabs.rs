/// What a tab switch means for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabPolicy {
    /// Each tab maps to its own endpoint: clear the list and fetch again.
    Refetch,
    /// All data is already loaded: re-filter in memory, no network call.
    LocalFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabChange<K> {
    Unchanged,
    Refetch(K),
    Refilter(K),
}

/// A set of mutually exclusive tabs with one active.
#[derive(Debug, Clone, PartialEq)]
pub struct TabController<K> {
    tabs: Vec<K>,
    active: usize,
    policy: TabPolicy,
}

impl<K: Clone + PartialEq> TabController<K> {
    /// The first tab starts active. An empty tab set is allowed (data-derived
    /// tabs before the data arrives).
    pub fn new(tabs: Vec<K>, policy: TabPolicy) -> Self {
        Self {
            tabs,
            active: 0,
            policy,
        }
    }

    pub fn policy(&self) -> TabPolicy {
        self.policy
    }

    pub fn tabs(&self) -> &[K] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&K> {
        self.tabs.get(self.active)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Switch to `tab`. Selecting the active tab or an unknown tab is a no-op.
    pub fn select(&mut self, tab: &K) -> TabChange<K> {
        match self.tabs.iter().position(|t| t == tab) {
            Some(idx) if idx != self.active => self.activate(idx),
            _ => TabChange::Unchanged,
        }
    }

    pub fn next(&mut self) -> TabChange<K> {
        match self.tabs.len() {
            0 | 1 => TabChange::Unchanged,
            n => self.activate((self.active + 1) % n),
        }
    }

    pub fn prev(&mut self) -> TabChange<K> {
        match self.tabs.len() {
            0 | 1 => TabChange::Unchanged,
            n => self.activate((self.active + n - 1) % n),
        }
    }

    /// Replace the tab set (e.g. years found in freshly loaded data), keeping
    /// the active tab when it still exists.
    pub fn set_tabs(&mut self, tabs: Vec<K>) {
        let current = self.active().cloned();
        self.tabs = tabs;
        self.active = current
            .and_then(|c| self.tabs.iter().position(|t| *t == c))
            .unwrap_or(0);
    }

    fn activate(&mut self, idx: usize) -> TabChange<K> {
        self.active = idx;
        let tab = self.tabs[idx].clone();
        match self.policy {
            TabPolicy::Refetch => TabChange::Refetch(tab),
            TabPolicy::LocalFilter => TabChange::Refilter(tab),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refetch_policy() {
        let mut tabs = TabController::new(vec!["Terbaru", "Kategori"], TabPolicy::Refetch);
        assert_eq!(tabs.active(), Some(&"Terbaru"));
        assert_eq!(tabs.select(&"Kategori"), TabChange::Refetch("Kategori"));
        assert_eq!(tabs.select(&"Kategori"), TabChange::Unchanged);
    }

    #[test]
    fn test_local_filter_policy() {
        let mut tabs = TabController::new(vec!["all", "photo", "video"], TabPolicy::LocalFilter);
        assert_eq!(tabs.next(), TabChange::Refilter("photo"));
        assert_eq!(tabs.prev(), TabChange::Refilter("all"));
        assert_eq!(tabs.prev(), TabChange::Refilter("video"));
    }

    #[test]
    fn test_unknown_tab_is_ignored() {
        let mut tabs = TabController::new(vec!["a", "b"], TabPolicy::LocalFilter);
        assert_eq!(tabs.select(&"z"), TabChange::Unchanged);
        assert_eq!(tabs.active_index(), 0);
    }

    #[test]
    fn test_set_tabs_keeps_active() {
        let mut tabs = TabController::new(
            vec!["all".to_string(), "2023".to_string()],
            TabPolicy::LocalFilter,
        );
        tabs.select(&"2023".to_string());
        tabs.set_tabs(vec!["all".to_string(), "2024".to_string(), "2023".to_string()]);
        assert_eq!(tabs.active().map(String::as_str), Some("2023"));

        tabs.set_tabs(vec!["all".to_string()]);
        assert_eq!(tabs.active().map(String::as_str), Some("all"));
    }

    #[test]
    fn test_empty_tabs() {
        let mut tabs: TabController<String> = TabController::new(vec![], TabPolicy::LocalFilter);
        assert_eq!(tabs.active(), None);
        assert_eq!(tabs.next(), TabChange::Unchanged);
    }
}
