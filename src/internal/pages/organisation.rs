use super::{Cursor, Fetch, Loaded, PageCommand, PageState, Route, refilter};
use crate::internal::filters::{HistoryTab, RoleFilter, board_history, filter_by_role};
use crate::internal::models::{DepartmentDetail, OrgNode, PeriodSummary};
use crate::internal::remote_list::{MergeMode, RemoteItem, RemoteList};
use crate::internal::tabs::{TabController, TabPolicy};
use strum::IntoEnumIterator;

/// Department page for a board member, when the position names one.
fn department_route(node: &OrgNode, fallback_periode: Option<&str>) -> Option<Route> {
    let periode = node.periode.as_deref().or(fallback_periode)?;
    let department = node.department()?;
    Some(Route::Department {
        periode: periode.to_string(),
        department: department.to_string(),
    })
}

/// Current board, one tab per role.
pub struct OrganisationState {
    pub nodes: RemoteList<OrgNode>,
    pub tabs: TabController<RoleFilter>,
    pub cursor: Cursor,
}

impl Default for OrganisationState {
    fn default() -> Self {
        Self {
            nodes: RemoteList::new(),
            tabs: TabController::new(RoleFilter::current_board(), TabPolicy::LocalFilter),
            cursor: Cursor::default(),
        }
    }
}

impl OrganisationState {
    pub fn visible(&self) -> Vec<&OrgNode> {
        let role = self.tabs.active().copied().unwrap_or(RoleFilter::President);
        filter_by_role(&self.nodes.items, role)
    }
}

impl PageState for OrganisationState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Structure(self.nodes.begin())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Structure(t, r) = loaded {
            self.nodes.finish(t, r, MergeMode::Replace);
        }
    }

    fn is_loading(&self) -> bool {
        self.nodes.loading
    }

    fn cancel(&mut self) {
        self.nodes.cancel();
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
            .and_then(|n| department_route(n, None))
            .map(PageCommand::Navigate)
    }
}

/// List of past boards.
pub struct BoardHistoryState {
    pub periods: RemoteList<PeriodSummary>,
    pub tabs: TabController<HistoryTab>,
    pub cursor: Cursor,
}

impl Default for BoardHistoryState {
    fn default() -> Self {
        Self {
            periods: RemoteList::new(),
            tabs: TabController::new(HistoryTab::iter().collect(), TabPolicy::LocalFilter),
            cursor: Cursor::default(),
        }
    }
}

impl BoardHistoryState {
    pub fn visible(&self) -> Vec<&PeriodSummary> {
        let tab = self.tabs.active().copied().unwrap_or(HistoryTab::All);
        board_history(&self.periods.items, tab)
    }
}

impl PageState for BoardHistoryState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::BoardHistory(self.periods.begin())]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::BoardHistory(t, r) = loaded {
            self.periods.finish(t, r, MergeMode::Replace);
        }
    }

    fn is_loading(&self) -> bool {
        self.periods.loading
    }

    fn cancel(&mut self) {
        self.periods.cancel();
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
            .and_then(|p| p.periode.clone())
            .map(|periode| PageCommand::Navigate(Route::PeriodStructure(periode)))
    }
}

/// Board of one past period, with an extra "all" tab.
pub struct PeriodStructureState {
    pub periode: String,
    pub nodes: RemoteList<OrgNode>,
    pub tabs: TabController<RoleFilter>,
    pub cursor: Cursor,
}

impl PeriodStructureState {
    pub fn new(periode: &str) -> Self {
        Self {
            periode: periode.to_string(),
            nodes: RemoteList::new(),
            tabs: TabController::new(RoleFilter::period_board(), TabPolicy::LocalFilter),
            cursor: Cursor::default(),
        }
    }

    pub fn visible(&self) -> Vec<&OrgNode> {
        let role = self.tabs.active().copied().unwrap_or(RoleFilter::All);
        filter_by_role(&self.nodes.items, role)
    }
}

impl PageState for PeriodStructureState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::PeriodStructure(
            self.nodes.begin(),
            self.periode.clone(),
        )]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Structure(t, r) = loaded {
            self.nodes.finish(t, r, MergeMode::Replace);
        }
    }

    fn is_loading(&self) -> bool {
        self.nodes.loading
    }

    fn cancel(&mut self) {
        self.nodes.cancel();
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
            .and_then(|n| department_route(n, Some(self.periode.as_str())))
            .map(PageCommand::Navigate)
    }
}

/// Head and members of one department.
pub struct DepartmentState {
    pub periode: String,
    pub department: String,
    pub detail: RemoteItem<DepartmentDetail>,
    pub cursor: Cursor,
}

impl DepartmentState {
    pub fn new(periode: &str, department: &str) -> Self {
        Self {
            periode: periode.to_string(),
            department: department.to_string(),
            detail: RemoteItem::new(),
            cursor: Cursor::default(),
        }
    }

    pub fn member_count(&self) -> usize {
        self.detail
            .value
            .as_ref()
            .map(|d| d.members.len())
            .unwrap_or(0)
    }
}

impl PageState for DepartmentState {
    fn load(&mut self) -> Vec<Fetch> {
        vec![Fetch::Department(
            self.detail.begin(),
            self.periode.clone(),
            self.department.clone(),
        )]
    }

    fn apply(&mut self, loaded: Loaded) {
        if let Loaded::Department(t, r) = loaded {
            self.detail.finish(t, r);
        }
    }

    fn is_loading(&self) -> bool {
        self.detail.loading
    }

    fn cancel(&mut self) {
        self.detail.cancel();
    }

    fn down(&mut self) -> Vec<Fetch> {
        let len = self.member_count();
        self.cursor.down(len);
        Vec::new()
    }

    fn up(&mut self) {
        self.cursor.up();
    }
}
