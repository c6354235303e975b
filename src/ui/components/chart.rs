use dioxus::prelude::*;

use crate::domain::entities::chart::{
    histogram_bins, share_percent, ChartKind, StackCount, HISTOGRAM_BINS,
};
use crate::ui::components::styles::{
    table_cell_style, table_container_style, table_header_cell_style,
};

const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

fn color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

fn conic_gradient(shares: &[f64]) -> String {
    let mut start = 0.0;
    let stops = shares
        .iter()
        .enumerate()
        .map(|(idx, share)| {
            let end = start + share;
            let stop = format!("{} {start:.2}% {end:.2}%", color(idx));
            start = end;
            stop
        })
        .collect::<Vec<_>>();
    if stops.is_empty() {
        return "#eee".to_string();
    }
    format!("conic-gradient({})", stops.join(", "))
}

/// Bar height (or width) as a percentage of the largest value.
fn relative_percent(value: u64, max: u64) -> u64 {
    value * 100 / max.max(1)
}

fn chart_body(kind: ChartKind, counts: &[StackCount], shares: &[f64]) -> Element {
    let max_count = counts.iter().map(|entry| entry.count).max().unwrap_or(0);
    match kind {
        ChartKind::Pie | ChartKind::Donut => {
            let background = conic_gradient(shares);
            let legend = counts
                .iter()
                .zip(shares.iter())
                .enumerate()
                .map(|(idx, (entry, share))| (color(idx), format!("{} ({share:.1}%)", entry.stack)))
                .collect::<Vec<_>>();
            rsx! {
                div {
                    style: "position: relative; width: 280px; height: 280px; border-radius: 50%; background: {background};",
                    if kind == ChartKind::Donut {
                        div { style: "position: absolute; inset: 28%; border-radius: 50%; background: #f6f7f9;" }
                    }
                }
                ul { style: "list-style: none; padding: 0;",
                    for (swatch, text) in legend {
                        li {
                            span { style: "display: inline-block; width: 10px; height: 10px; margin-right: 6px; background: {swatch};" }
                            "{text}"
                        }
                    }
                }
            }
        }
        ChartKind::Bar => rsx! {
            div {
                style: "display: flex; align-items: flex-end; gap: 6px; height: 240px; border-bottom: 1px solid #999;",
                for (idx, entry) in counts.iter().enumerate() {
                    div {
                        title: "{entry.stack}: {entry.count}",
                        style: "width: 28px; height: {relative_percent(entry.count, max_count)}%; background: {color(idx)};",
                    }
                }
            }
            div {
                style: "display: flex; gap: 6px; font-size: 11px;",
                for entry in counts.iter() {
                    span { style: "width: 28px; overflow: hidden; text-overflow: ellipsis;", "{entry.stack}" }
                }
            }
        },
        ChartKind::HorizontalBar => rsx! {
            div {
                style: "display: flex; flex-direction: column; gap: 4px;",
                for (idx, entry) in counts.iter().enumerate() {
                    div {
                        style: "display: flex; align-items: center; gap: 8px;",
                        span { style: "width: 120px; text-align: right;", "{entry.stack}" }
                        div { style: "height: 16px; width: {relative_percent(entry.count, max_count)}%; background: {color(idx)};" }
                        span { "{entry.count}" }
                    }
                }
            }
        },
        ChartKind::Histogram => {
            let values = counts.iter().map(|entry| entry.count).collect::<Vec<_>>();
            let bins = histogram_bins(&values, HISTOGRAM_BINS);
            let max_frequency = bins.iter().map(|bin| bin.frequency).max().unwrap_or(0);
            let bars = bins
                .iter()
                .map(|bin| {
                    (
                        format!("{:.1} - {:.1}: {}", bin.lower, bin.upper, bin.frequency),
                        relative_percent(bin.frequency, max_frequency),
                    )
                })
                .collect::<Vec<_>>();
            rsx! {
                div {
                    style: "display: flex; align-items: flex-end; gap: 2px; height: 240px; border-bottom: 1px solid #999;",
                    for (title, height) in bars {
                        div {
                            title: "{title}",
                            style: "flex: 1; height: {height}%; background: {color(0)};",
                        }
                    }
                }
                div { style: "display: flex; justify-content: space-between; font-size: 12px; color: #555;",
                    span { "Stack Count" }
                    span { "Frequency" }
                }
            }
        }
    }
}

#[component]
pub fn ChartPanel(
    kind: ChartKind,
    counts: Vec<StackCount>,
    on_kind: EventHandler<ChartKind>,
) -> Element {
    let shares = share_percent(&counts);
    let kind_label = kind.label();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 12px;",
            label {
                style: "display: inline-flex; gap: 6px; align-items: center;",
                span { "Select chart type" }
                select {
                    value: "{kind_label}",
                    onchange: move |event| {
                        if let Some(next) = ChartKind::from_label(&event.value()) {
                            on_kind.call(next);
                        }
                    },
                    for option_kind in ChartKind::ALL {
                        option {
                            value: "{option_kind.label()}",
                            selected: option_kind == kind,
                            "{option_kind.label()}"
                        }
                    }
                }
            }
            div {
                style: "display: flex; gap: 24px; align-items: flex-start; flex-wrap: wrap;",
                div {
                    style: "flex: 2; min-width: 320px;",
                    h3 { "Tech Stacks as {kind_label}" }
                    {chart_body(kind, &counts, &shares)}
                }
                div {
                    style: "flex: 1; min-width: 220px;",
                    h3 { "Tech Stack List Top 10" }
                    div {
                        style: "{table_container_style()}",
                        table { style: "border-collapse: collapse; width: 100%;",
                            thead {
                                tr {
                                    th { style: "{table_header_cell_style()}", "Stack" }
                                    th { style: "{table_header_cell_style()}", "Count" }
                                }
                            }
                            tbody {
                                for entry in counts.iter() {
                                    tr {
                                        td { style: "{table_cell_style()}", "{entry.stack}" }
                                        td { style: "{table_cell_style()}", "{entry.count}" }
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
