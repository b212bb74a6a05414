// The buildings table as a single state owner.
//
// All user input arrives as a `TableAction`; `dispatch` applies it and then
// re-clamps the current page against the freshly filtered set. Derived data
// (`filtered`, `view`) is recomputed from scratch on every call.
use crate::date_range;
use crate::expansion::ExpansionTracker;
use crate::filters::{self, ActiveFilters, FilterCriteria};
use crate::pagination::{self, Page, DEFAULT_PAGE_SIZE};
use crate::types::{
    Building, ComplianceFilter, CustomRange, DateRange, DateRangePreset, SortDirection, SortKey,
};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    SetSearch(String),
    SetComplianceFilter(ComplianceFilter),
    ResetFilters,
    SetDatePreset(DateRangePreset),
    SetCustomRange(CustomRange),
    ResetDateRange,
    SetPage(i64),
    NextPage,
    PreviousPage,
    SetItemsPerPage(usize),
    SetSort(SortKey),
    ClearSort,
    ToggleRow(String),
    ExpandAllOnPage,
    CollapseAll,
}

#[derive(Debug, Clone)]
pub struct TableState {
    pub search_query: String,
    pub filters: ActiveFilters,
    pub date_preset: DateRangePreset,
    pub custom_range: Option<CustomRange>,
    pub current_page: usize,
    pub items_per_page: usize,
    pub sort: Option<(SortKey, SortDirection)>,
    pub expanded: ExpansionTracker<String>,
    initial_preset: DateRangePreset,
}

impl TableState {
    pub fn new(initial_preset: DateRangePreset) -> Self {
        Self {
            search_query: String::new(),
            filters: ActiveFilters::new(ComplianceFilter::All),
            date_preset: initial_preset,
            custom_range: None,
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
            sort: None,
            expanded: ExpansionTracker::new(),
            initial_preset,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct TableView {
    pub page: Page<Building>,
    pub items_per_page: usize,
    pub preset: DateRangePreset,
    pub date_range: Option<DateRange>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.page.items.is_empty()
    }
}

pub struct BuildingsTable {
    dataset: Vec<Building>,
    state: TableState,
    now: NaiveDateTime,
}

impl BuildingsTable {
    pub fn new(dataset: Vec<Building>, now: NaiveDateTime) -> Self {
        Self::with_preset(dataset, now, DateRangePreset::default())
    }

    pub fn with_preset(dataset: Vec<Building>, now: NaiveDateTime, preset: DateRangePreset) -> Self {
        Self {
            dataset,
            state: TableState::new(preset),
            now,
        }
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Move the reference clock; preset ranges resolve against it.
    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.clamp_page();
    }

    pub fn dispatch(&mut self, action: TableAction) {
        debug!(?action, "table action");
        let s = &mut self.state;
        match action {
            TableAction::SetSearch(q) => {
                s.search_query = q;
                s.current_page = 1;
            }
            TableAction::SetComplianceFilter(f) => {
                s.filters.update(f);
                s.current_page = 1;
            }
            TableAction::ResetFilters => {
                s.filters.reset();
                s.current_page = 1;
            }
            // Preset and custom range changes keep the current page; it is
            // only pulled back into range by the clamp below.
            TableAction::SetDatePreset(p) => {
                s.date_preset = p;
                if p != DateRangePreset::Custom {
                    s.custom_range = None;
                }
            }
            TableAction::SetCustomRange(r) => {
                s.custom_range = Some(r);
                s.date_preset = DateRangePreset::Custom;
            }
            TableAction::ResetDateRange => {
                s.date_preset = s.initial_preset;
                s.custom_range = None;
            }
            TableAction::SetPage(n) => {
                let total = self.total_pages();
                self.state.current_page = pagination::clamp_page(n, total);
            }
            TableAction::NextPage => {
                let total = self.total_pages();
                let next = self.state.current_page as i64 + 1;
                self.state.current_page = pagination::clamp_page(next, total);
            }
            TableAction::PreviousPage => {
                let total = self.total_pages();
                let prev = self.state.current_page as i64 - 1;
                self.state.current_page = pagination::clamp_page(prev, total);
            }
            TableAction::SetItemsPerPage(n) => {
                if pagination::is_page_size_option(n) {
                    s.items_per_page = n;
                    s.current_page = 1;
                } else {
                    warn!(requested = n, "ignoring unsupported page size");
                }
            }
            TableAction::SetSort(key) => {
                s.sort = match s.sort {
                    Some((current, dir)) if current == key => Some((key, dir.flip())),
                    _ => Some((key, SortDirection::Asc)),
                };
            }
            TableAction::ClearSort => s.sort = None,
            TableAction::ToggleRow(id) => {
                s.expanded.toggle(&id);
            }
            TableAction::ExpandAllOnPage => {
                let ids: Vec<String> = self.view().page.items.into_iter().map(|b| b.id).collect();
                self.state.expanded.expand_all(ids);
            }
            TableAction::CollapseAll => s.expanded.collapse_all(),
        }
        self.clamp_page();
    }

    /// Window the date filter currently applies, if any.
    pub fn resolved_range(&self) -> Option<DateRange> {
        match self.state.date_preset {
            DateRangePreset::Custom => self.state.custom_range.and_then(|r| r.to_range()),
            preset => date_range::resolve(preset, self.now),
        }
    }

    /// Period projection, then filter, then optional sort.
    pub fn filtered(&self) -> Vec<Building> {
        let projected = filters::project_for_period(&self.dataset, self.state.date_preset);
        let criteria = FilterCriteria {
            search_query: &self.state.search_query,
            compliance: self.state.filters.compliance,
            date_range: self.resolved_range(),
        };
        let matched = filters::filter_buildings(&projected, &criteria);
        match self.state.sort {
            Some((key, dir)) => filters::sort_buildings(&matched, key, dir),
            None => matched,
        }
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered().len(), self.state.items_per_page)
    }

    pub fn view(&self) -> TableView {
        let filtered = self.filtered();
        TableView {
            page: pagination::paginate(&filtered, self.state.current_page, self.state.items_per_page),
            items_per_page: self.state.items_per_page,
            preset: self.state.date_preset,
            date_range: self.resolved_range(),
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.expanded.is_expanded(id)
    }

    pub fn expanded_count(&self) -> usize {
        self.state.expanded.expanded_count()
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        self.state.current_page = pagination::clamp_page(self.state.current_page as i64, total);
    }
}
