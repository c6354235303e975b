use crate::domain::entities::chart::ChartKind;
use crate::domain::entities::filter::{ColumnVisibility, FilterState};
use crate::domain::entities::history::SessionIdentity;
use crate::domain::entities::page::Pagination;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    JobInformations,
    Chart,
}

/// Per-session UI state, passed explicitly into every controller call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: SessionIdentity,
    pub filters: FilterState,
    /// Set once the filter state has been seeded from history (or left empty).
    pub filters_seeded: bool,
    /// Seed from the last persisted entry. Cleared by reset and failed saves.
    pub apply_last_filter: bool,
    /// Query with the current filter instead of the whole table.
    pub filter_applied: bool,
    pub pagination: Pagination,
    /// Keyword of the last search; empty lists every posting.
    pub search_keyword: String,
    pub search_pagination: Pagination,
    pub column_visibility: ColumnVisibility,
    pub view: View,
    pub chart_kind: ChartKind,
}

impl Session {
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            identity,
            filters: FilterState::new(),
            filters_seeded: false,
            apply_last_filter: true,
            filter_applied: false,
            pagination: Pagination::default(),
            search_keyword: String::new(),
            search_pagination: Pagination::default(),
            column_visibility: ColumnVisibility::default(),
            view: View::default(),
            chart_kind: ChartKind::default(),
        }
    }

    /// Merges the result of an async cycle that started from `started_from`.
    /// Only fields the cycle changed are taken, so edits made here while the
    /// cycle was running survive.
    pub fn absorb_cycle(&mut self, started_from: &Session, cycle: Session) {
        take_if_changed(&mut self.filters, &started_from.filters, cycle.filters);
        take_if_changed(&mut self.filters_seeded, &started_from.filters_seeded, cycle.filters_seeded);
        take_if_changed(
            &mut self.apply_last_filter,
            &started_from.apply_last_filter,
            cycle.apply_last_filter,
        );
        take_if_changed(&mut self.filter_applied, &started_from.filter_applied, cycle.filter_applied);
        take_if_changed(&mut self.pagination, &started_from.pagination, cycle.pagination);
        take_if_changed(&mut self.search_keyword, &started_from.search_keyword, cycle.search_keyword);
        take_if_changed(
            &mut self.search_pagination,
            &started_from.search_pagination,
            cycle.search_pagination,
        );
        take_if_changed(
            &mut self.column_visibility,
            &started_from.column_visibility,
            cycle.column_visibility,
        );
        take_if_changed(&mut self.view, &started_from.view, cycle.view);
        take_if_changed(&mut self.chart_kind, &started_from.chart_kind, cycle.chart_kind);
    }

    /// Filters that should constrain the query for this render.
    pub fn active_query_filters(&self) -> Option<&FilterState> {
        if self.filter_applied {
            Some(&self.filters)
        } else {
            None
        }
    }
}

fn take_if_changed<T: PartialEq>(current: &mut T, before: &T, after: T) {
    if after != *before {
        *current = after;
    }
}
