use std::sync::Arc;

use chrono::Utc;
use dioxus::prelude::*;
use tracing::{debug, error, warn};

use crate::build_dashboard;
use crate::domain::entities::job::JobSummary;
use crate::domain::entities::session::View;
use crate::ui::components::chart::ChartPanel;
use crate::ui::components::dropdown::{ColumnVisibilityDropdown, MultiSelect};
use crate::ui::components::paginator::Paginator;
use crate::ui::components::results::{DetailDialog, ResultList, SearchResults};
use crate::ui::components::styles::{
    button_style, main_panel_style, notice_style, root_container_style, sidebar_style,
};
use crate::ui::state::app_state::{AppState, DetailView, DropdownId};
use crate::usecase::services::dashboard::Dashboard;
use crate::usecase::services::filter_service::toggle_value;

#[component]
pub fn App() -> Element {
    let dashboard = use_hook(|| {
        build_dashboard()
            .map(Arc::new)
            .map_err(|err| format!("{err:#}"))
    });
    let dashboard: Arc<Dashboard> = match dashboard {
        Ok(dashboard) => dashboard,
        Err(err) => {
            error!(error = %err, "failed to start dashboard");
            return rsx! {
                div {
                    p { "Unable to start the dashboard: {err}" }
                }
            };
        }
    };

    let dashboard_for_identity = dashboard.clone();
    let identity = use_hook(move || dashboard_for_identity.preferences.session_identity());

    let AppState {
        mut session,
        mut catalog,
        mut filter_options,
        mut page,
        mut search_page,
        mut search_input,
        mut stack_counts,
        mut detail,
        mut show_filters,
        mut open_dropdown,
        dropdown_pos,
        mut busy,
        mut status,
        mut filter_notice,
    } = AppState::new(identity);

    // Async cycles work on a copy and merge back only what they changed.
    let dashboard_for_init = dashboard.clone();
    use_hook(move || {
        spawn(async move {
            busy.set(true);
            let started_from = session();
            let mut working = started_from.clone();
            let loaded = dashboard_for_init.bootstrap(&mut working).await;
            session.write().absorb_cycle(&started_from, working);
            if loaded.catalog.columns.is_empty() {
                status.set("Unable to reach the backend.".to_string());
            } else {
                status.set(format!("{} postings", loaded.page.descriptor.total_rows));
            }
            catalog.set(loaded.catalog);
            filter_options.set(loaded.filter_options);
            page.set(Some(loaded.page));
            search_page.set(Some(loaded.search));
            busy.set(false);
        });
    });

    let dashboard_for_chart = dashboard.clone();
    let dashboard_for_search = dashboard.clone();
    let dashboard_for_search_reset = dashboard.clone();
    let dashboard_for_search_page_size = dashboard.clone();
    let dashboard_for_search_page = dashboard.clone();
    let dashboard_for_search_detail = dashboard.clone();
    let dashboard_for_apply = dashboard.clone();
    let dashboard_for_reset = dashboard.clone();
    let dashboard_for_forget = dashboard.clone();
    let dashboard_for_page_size = dashboard.clone();
    let dashboard_for_page = dashboard.clone();
    let dashboard_for_detail = dashboard.clone();
    let dashboard_for_column = dashboard.clone();
    let dashboard_for_show_all = dashboard.clone();

    let current = session();
    let known_columns = catalog().columns;
    let visible_columns = current.column_visibility.visible_columns(&known_columns);
    let options_by_column = filter_options();
    let loaded_page = page();
    let loaded_search = search_page();
    let is_busy = busy();
    let table = dashboard.table().to_string();

    rsx! {
        div {
            style: "{root_container_style()}",
            onclick: move |_| open_dropdown.set(None),
            nav {
                style: "{sidebar_style()}",
                h2 { style: "margin: 0 0 12px 0;", "Tech Map IT" }
                button {
                    style: "{button_style(current.view == View::Home)}",
                    onclick: move |_| {
                        debug!(action = "navigate", view = "home", "switching view");
                        session.write().view = View::Home;
                    },
                    "Home"
                }
                button {
                    style: "{button_style(current.view == View::JobInformations)}",
                    onclick: move |_| {
                        debug!(action = "navigate", view = "job_informations", "switching view");
                        session.write().view = View::JobInformations;
                    },
                    "Job Informations"
                }
                button {
                    style: "{button_style(current.view == View::Chart)}",
                    onclick: move |_| {
                        debug!(action = "navigate", view = "chart", "switching view");
                        session.write().view = View::Chart;
                        if !stack_counts().is_empty() {
                            return;
                        }
                        let dashboard = dashboard_for_chart.clone();
                        spawn(async move {
                            stack_counts.set(dashboard.charts.top_stacks().await);
                        });
                    },
                    "Chart"
                }
            }
            main {
                style: "{main_panel_style()}",
                if current.view == View::Chart {
                    h1 { style: "margin: 0;", "Tech Stack Statistics" }
                    ChartPanel {
                        kind: current.chart_kind,
                        counts: stack_counts(),
                        on_kind: move |kind| session.write().chart_kind = kind,
                    }
                } else if current.view == View::Home {
                    h1 { style: "margin: 0;", "Job Postings" }
                    div {
                        style: "display: flex; gap: 8px; align-items: center;",
                        input {
                            r#type: "text",
                            placeholder: "Search postings",
                            value: "{search_input}",
                            oninput: move |event| search_input.set(event.value()),
                        }
                        button {
                            style: "{button_style(true)}",
                            disabled: is_busy,
                            onclick: move |_| {
                                if busy() {
                                    return;
                                }
                                let dashboard = dashboard_for_search.clone();
                                let keyword = search_input();
                                spawn(async move {
                                    busy.set(true);
                                    let started_from = session();
                                    let mut working = started_from.clone();
                                    let found = dashboard.search(&mut working, &keyword).await;
                                    session.write().absorb_cycle(&started_from, working);
                                    search_page.set(Some(found));
                                    busy.set(false);
                                });
                            },
                            "Search"
                        }
                        button {
                            style: "{button_style(false)}",
                            disabled: is_busy,
                            onclick: move |_| {
                                if busy() {
                                    return;
                                }
                                search_input.set(String::new());
                                let dashboard = dashboard_for_search_reset.clone();
                                spawn(async move {
                                    busy.set(true);
                                    let started_from = session();
                                    let mut working = started_from.clone();
                                    let found = dashboard.reset_search(&mut working).await;
                                    session.write().absorb_cycle(&started_from, working);
                                    search_page.set(Some(found));
                                    busy.set(false);
                                });
                            },
                            "Reset"
                        }
                    }
                    if let Some(found) = loaded_search {
                        span { style: "color: #666;", "{found.descriptor.total_rows} postings found" }
                        Paginator {
                            descriptor: found.descriptor,
                            disabled: is_busy,
                            on_page_size: move |rows_per_page: u32| {
                                if busy() {
                                    return;
                                }
                                let dashboard = dashboard_for_search_page_size.clone();
                                spawn(async move {
                                    busy.set(true);
                                    let started_from = session();
                                    let mut working = started_from.clone();
                                    match dashboard.change_search_page_size(&mut working, rows_per_page).await {
                                        Ok(found) => {
                                            session.write().absorb_cycle(&started_from, working);
                                            search_page.set(Some(found));
                                        }
                                        Err(err) => {
                                            warn!(rows_per_page, error = %err, "page size rejected");
                                            status.set(err.to_string());
                                        }
                                    }
                                    busy.set(false);
                                });
                            },
                            on_page: move |page_index: i64| {
                                if busy() {
                                    return;
                                }
                                let dashboard = dashboard_for_search_page.clone();
                                spawn(async move {
                                    busy.set(true);
                                    let started_from = session();
                                    let mut working = started_from.clone();
                                    let found = dashboard.change_search_page(&mut working, page_index).await;
                                    session.write().absorb_cycle(&started_from, working);
                                    search_page.set(Some(found));
                                    busy.set(false);
                                });
                            },
                        }
                        SearchResults {
                            hits: found.hits,
                            on_detail: move |pid: i64| {
                                let dashboard = dashboard_for_search_detail.clone();
                                spawn(async move {
                                    debug!(action = "detail", pid, "loading posting");
                                    match dashboard.searches.load_job(pid).await {
                                        Some(hit) => detail.set(Some(DetailView {
                                            job: hit.job,
                                            rows: vec![hit.row],
                                        })),
                                        None => status.set(format!("Posting {pid} is no longer available.")),
                                    }
                                });
                            },
                        }
                    } else {
                        p { style: "color: #666;", "Loading postings..." }
                    }
                } else {
                    h1 { style: "margin: 0;", "Job Informations" }
                    span { style: "color: #666;", "{table}: {status}" }
                    div {
                        style: "display: flex; gap: 16px; align-items: center; flex-wrap: wrap;",
                        ColumnVisibilityDropdown {
                            columns: known_columns.clone(),
                            visibility: current.column_visibility.clone(),
                            open_dropdown,
                            dropdown_pos,
                            on_toggle: move |(column, visible): (String, bool)| {
                                if busy() {
                                    return;
                                }
                                let result = dashboard_for_column.set_column_visible(
                                    &mut session.write(),
                                    &column,
                                    visible,
                                );
                                if let Err(err) = result {
                                    warn!(column = %column, error = %err, "column visibility not saved");
                                    status.set(format!("Failed to save column visibility: {err}"));
                                }
                            },
                            on_show_all: move |_| {
                                if busy() {
                                    return;
                                }
                                if let Err(err) = dashboard_for_show_all.show_all_columns(&mut session.write()) {
                                    warn!(error = %err, "column visibility not saved");
                                    status.set(format!("Failed to save column visibility: {err}"));
                                }
                            },
                        }
                        label {
                            style: "display: inline-flex; gap: 6px; align-items: center;",
                            input {
                                r#type: "checkbox",
                                checked: show_filters(),
                                onclick: move |_| {
                                    let next = !show_filters();
                                    show_filters.set(next);
                                },
                            }
                            span { "Show filter options" }
                        }
                    }
                    if show_filters() {
                        div {
                            style: "display: flex; flex-direction: column; gap: 8px; padding: 12px; border: 1px solid #ddd; border-radius: 8px; background: #fff;",
                            div {
                                style: "display: flex; gap: 12px; flex-wrap: wrap;",
                                {known_columns.iter().enumerate().map(|(idx, column)| {
                                    let options = options_by_column.get(column).cloned().unwrap_or_default();
                                    let selected = current
                                        .filters
                                        .get(column)
                                        .map(<[String]>::to_vec)
                                        .unwrap_or_default();
                                    let column_for_toggle = column.clone();
                                    let known = known_columns.clone();
                                    rsx!(
                                        MultiSelect {
                                            key: "{column}",
                                            id: DropdownId::Filter(idx),
                                            label: column.clone(),
                                            options,
                                            selected,
                                            open_dropdown,
                                            dropdown_pos,
                                            on_toggle: move |value: String| {
                                                if busy() {
                                                    return;
                                                }
                                                let result = toggle_value(
                                                    &mut session.write().filters,
                                                    &column_for_toggle,
                                                    &value,
                                                    &known,
                                                );
                                                if let Err(err) = result {
                                                    warn!(error = %err, "filter selection rejected");
                                                    status.set(err.to_string());
                                                }
                                            },
                                        }
                                    )
                                })}
                            }
                            div {
                                style: "display: flex; gap: 8px; align-items: center;",
                                button {
                                    style: "{button_style(true)}",
                                    disabled: is_busy,
                                    onclick: move |_| {
                                        if busy() {
                                            return;
                                        }
                                        let dashboard = dashboard_for_apply.clone();
                                        spawn(async move {
                                            busy.set(true);
                                            let started_from = session();
                                            let mut working = started_from.clone();
                                            let columns = catalog().columns;
                                            match dashboard.apply_filter(&mut working, &columns, Utc::now()).await {
                                                Ok(outcome) => {
                                                    session.write().absorb_cycle(&started_from, working);
                                                    let notice = if outcome.saved {
                                                        (true, "Filter saved.".to_string())
                                                    } else {
                                                        (false, "Failed to save the filter.".to_string())
                                                    };
                                                    filter_notice.set(Some(notice));
                                                    status.set(format!("{} postings", outcome.page.descriptor.total_rows));
                                                    page.set(Some(outcome.page));
                                                }
                                                Err(err) => {
                                                    warn!(error = %err, "filter not applied");
                                                    filter_notice.set(Some((false, err.to_string())));
                                                }
                                            }
                                            busy.set(false);
                                        });
                                    },
                                    "Apply filter"
                                }
                                button {
                                    style: "{button_style(false)}",
                                    disabled: is_busy,
                                    onclick: move |_| {
                                        if busy() {
                                            return;
                                        }
                                        let dashboard = dashboard_for_reset.clone();
                                        spawn(async move {
                                            busy.set(true);
                                            let started_from = session();
                                            let mut working = started_from.clone();
                                            let loaded = dashboard.reset_filter(&mut working).await;
                                            session.write().absorb_cycle(&started_from, working);
                                            filter_notice.set(None);
                                            status.set(format!("{} postings", loaded.descriptor.total_rows));
                                            page.set(Some(loaded));
                                            busy.set(false);
                                        });
                                    },
                                    "Reset filter"
                                }
                                button {
                                    style: "{button_style(false)}",
                                    disabled: is_busy,
                                    onclick: move |_| {
                                        let dashboard = dashboard_for_forget.clone();
                                        spawn(async move {
                                            debug!(action = "delete_history", "clearing saved filters");
                                            let identity = session().identity;
                                            let notice = if dashboard.history.delete(&identity).await {
                                                session.write().apply_last_filter = false;
                                                (true, "Saved filters cleared.".to_string())
                                            } else {
                                                (false, "Failed to clear saved filters.".to_string())
                                            };
                                            filter_notice.set(Some(notice));
                                        });
                                    },
                                    "Forget saved filters"
                                }
                                if let Some((success, message)) = filter_notice() {
                                    span { style: "{notice_style(success)}", "{message}" }
                                }
                            }
                        }
                    }
                    if let Some(loaded) = loaded_page {
                        Paginator {
                            descriptor: loaded.descriptor,
                            disabled: is_busy,
                            on_page_size: move |rows_per_page: u32| {
                                if busy() {
                                    return;
                                }
                                let dashboard = dashboard_for_page_size.clone();
                                spawn(async move {
                                    busy.set(true);
                                    let started_from = session();
                                    let mut working = started_from.clone();
                                    match dashboard.change_page_size(&mut working, rows_per_page).await {
                                        Ok(loaded) => {
                                            session.write().absorb_cycle(&started_from, working);
                                            page.set(Some(loaded));
                                        }
                                        Err(err) => {
                                            warn!(rows_per_page, error = %err, "page size rejected");
                                            status.set(err.to_string());
                                        }
                                    }
                                    busy.set(false);
                                });
                            },
                            on_page: move |page_index: i64| {
                                if busy() {
                                    return;
                                }
                                let dashboard = dashboard_for_page.clone();
                                spawn(async move {
                                    busy.set(true);
                                    let started_from = session();
                                    let mut working = started_from.clone();
                                    let loaded = dashboard.change_page(&mut working, page_index).await;
                                    session.write().absorb_cycle(&started_from, working);
                                    page.set(Some(loaded));
                                    busy.set(false);
                                });
                            },
                        }
                        ResultList {
                            rows: loaded.rows,
                            visible_columns: visible_columns.clone(),
                            on_detail: move |job: JobSummary| {
                                let dashboard = dashboard_for_detail.clone();
                                spawn(async move {
                                    debug!(action = "detail", pid = ?job.pid, "loading job detail");
                                    let rows = dashboard.queries.load_detail(&job).await;
                                    detail.set(Some(DetailView { job, rows }));
                                });
                            },
                        }
                    } else {
                        p { style: "color: #666;", "Loading data..." }
                    }
                }
            }
            if let Some(view) = detail() {
                DetailDialog {
                    job: view.job,
                    rows: view.rows,
                    on_close: move |_| detail.set(None),
                }
            }
        }
    }
}
