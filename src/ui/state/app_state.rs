use std::collections::BTreeMap;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::chart::StackCount;
use crate::domain::entities::history::SessionIdentity;
use crate::domain::entities::job::{JobSummary, Row};
use crate::domain::entities::session::Session;
use crate::usecase::services::catalog_service::Catalog;
use crate::usecase::services::query_service::PageLoad;
use crate::usecase::services::search_service::SearchPage;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub job: JobSummary,
    pub rows: Vec<Row>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownId {
    ColumnVisibility,
    Filter(usize),
}

pub struct AppState {
    pub session: Signal<Session>,
    pub catalog: Signal<Catalog>,
    pub filter_options: Signal<BTreeMap<String, Vec<String>>>,
    pub page: Signal<Option<PageLoad>>,
    pub search_page: Signal<Option<SearchPage>>,
    /// Text in the search box; only submitted searches reach the session.
    pub search_input: Signal<String>,
    pub stack_counts: Signal<Vec<StackCount>>,
    pub detail: Signal<Option<DetailView>>,
    pub show_filters: Signal<bool>,
    pub open_dropdown: Signal<Option<DropdownId>>,
    pub dropdown_pos: Signal<Option<(f64, f64)>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub filter_notice: Signal<Option<(bool, String)>>,
}

impl AppState {
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            session: use_signal(move || Session::new(identity)),
            catalog: use_signal(Catalog::default),
            filter_options: use_signal(BTreeMap::<String, Vec<String>>::new),
            page: use_signal(|| None::<PageLoad>),
            search_page: use_signal(|| None::<SearchPage>),
            search_input: use_signal(String::new),
            stack_counts: use_signal(Vec::<StackCount>::new),
            detail: use_signal(|| None::<DetailView>),
            show_filters: use_signal(|| false),
            open_dropdown: use_signal(|| None::<DropdownId>),
            dropdown_pos: use_signal(|| None::<(f64, f64)>),
            busy: use_signal(|| false),
            status: use_signal(|| "Loading data...".to_string()),
            filter_notice: use_signal(|| None::<(bool, String)>),
        }
    }
}
