use dioxus::prelude::*;

use crate::domain::entities::job::{JobSummary, Row};
use crate::usecase::services::search_service::SearchHit;
use crate::ui::components::styles::{
    badge_style, button_style, table_cell_style, table_container_style, table_header_cell_style,
};

#[component]
pub fn JobCard(job: JobSummary) -> Element {
    let badges = job.stack_badges();
    let date_label = job.date_label();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px;",
            h3 { style: "margin: 0;", "{job.company_name}" }
            h4 { style: "margin: 0; color: #444;", "{job.job_title}" }
            div {
                for badge in badges {
                    span { style: "{badge_style()}", "{badge}" }
                }
            }
            span { style: "color: #666; font-size: 13px;", "{date_label}" }
        }
    }
}

/// One block per row: the job card, the visible columns, and a details button.
#[component]
pub fn ResultList(
    rows: Vec<Row>,
    visible_columns: Vec<String>,
    on_detail: EventHandler<JobSummary>,
) -> Element {
    if rows.is_empty() {
        return rsx! {
            p { style: "color: #666;", "No data found." }
        };
    }

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px;",
            {rows.iter().enumerate().map(|(row_idx, row)| {
                let job = JobSummary::from_row(row);
                let cells = row.project(&visible_columns);
                let visible_columns = visible_columns.clone();
                let detail_job = job.clone();
                let has_detail = job.pid.is_some() && job.crawl_url.is_some();
                rsx!(
                    div {
                        key: "{row_idx}",
                        style: "display: flex; gap: 12px; padding: 12px; border: 1px solid #ddd; border-radius: 8px; background: #fff;",
                        div {
                            style: "flex: 1; min-width: 0; display: flex; flex-direction: column; gap: 8px;",
                            JobCard { job }
                            if !visible_columns.is_empty() {
                                div {
                                    style: "{table_container_style()}",
                                    table { style: "border-collapse: collapse; width: 100%;",
                                        thead {
                                            tr {
                                                for header in visible_columns.iter() {
                                                    th { style: "{table_header_cell_style()}", "{header}" }
                                                }
                                            }
                                        }
                                        tbody {
                                            tr {
                                                for value in cells.iter() {
                                                    td { style: "{table_cell_style()}", "{value}" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        button {
                            style: "{button_style(false)} align-self: flex-start;",
                            disabled: !has_detail,
                            onclick: move |_| on_detail.call(detail_job.clone()),
                            "Details"
                        }
                    }
                )
            })}
        }
    }
}

#[component]
pub fn SearchResults(hits: Vec<SearchHit>, on_detail: EventHandler<i64>) -> Element {
    if hits.is_empty() {
        return rsx! {
            p { style: "color: #666;", "No postings found." }
        };
    }

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px;",
            for hit in hits {
                div {
                    key: "{hit.job.pid.unwrap_or_default()}",
                    style: "display: flex; gap: 12px; padding: 12px; border: 1px solid #ddd; border-radius: 8px; background: #fff;",
                    div {
                        style: "flex: 1; min-width: 0;",
                        JobCard { job: hit.job.clone() }
                    }
                    if let Some(pid) = hit.job.pid {
                        button {
                            style: "{button_style(false)} align-self: flex-start;",
                            onclick: move |_| on_detail.call(pid),
                            "Details"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn DetailDialog(job: JobSummary, rows: Vec<Row>, on_close: EventHandler<()>) -> Element {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.columns().map(str::to_string).collect())
        .unwrap_or_default();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1500;",
            onclick: move |_| on_close.call(()),
            div {
                style: "background: #fff; border-radius: 10px; padding: 20px; width: min(960px, 92vw); max-height: 85vh; overflow: auto; display: flex; flex-direction: column; gap: 12px;",
                onclick: move |event| event.stop_propagation(),
                div {
                    style: "display: flex; justify-content: space-between; align-items: center;",
                    h2 { style: "margin: 0;", "Detailed Information" }
                    button { style: "{button_style(false)}", onclick: move |_| on_close.call(()), "Close" }
                }
                JobCard { job: job.clone() }
                if rows.is_empty() {
                    p { style: "color: #666;", "No detail rows found." }
                } else {
                    div {
                        style: "{table_container_style()}",
                        table { style: "border-collapse: collapse; width: 100%;",
                            thead {
                                tr {
                                    for header in columns.iter() {
                                        th { style: "{table_header_cell_style()}", "{header}" }
                                    }
                                }
                            }
                            tbody {
                                for (row_idx, row) in rows.iter().enumerate() {
                                    tr { key: "{row_idx}",
                                        for value in row.project(&columns) {
                                            td { style: "{table_cell_style()}", "{value}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
