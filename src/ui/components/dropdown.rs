use dioxus::prelude::*;

use crate::domain::entities::filter::ColumnVisibility;
use crate::ui::components::styles::button_style;
use crate::ui::state::app_state::DropdownId;

const POPUP_STYLE: &str = "position: fixed; min-width: 220px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;";

fn toggle_dropdown(
    id: DropdownId,
    point: (f64, f64),
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
) {
    if open_dropdown() == Some(id) {
        open_dropdown.set(None);
        return;
    }
    dropdown_pos.set(Some((point.0, point.1 + 24.0)));
    open_dropdown.set(Some(id));
}

/// Multiselect over a column's distinct values.
#[component]
pub fn MultiSelect(
    id: DropdownId,
    label: String,
    options: Vec<String>,
    selected: Vec<String>,
    open_dropdown: Signal<Option<DropdownId>>,
    dropdown_pos: Signal<Option<(f64, f64)>>,
    on_toggle: EventHandler<String>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));
    let summary = if selected.is_empty() {
        "(all)".to_string()
    } else {
        selected.join(", ")
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 4px; min-width: 160px;",
            span { style: "font-size: 12px; color: #555;", "{label}" }
            button {
                style: "{button_style(!selected.is_empty())}",
                onclick: move |event| {
                    event.stop_propagation();
                    let point = event.client_coordinates();
                    toggle_dropdown(id, (point.x, point.y), open_dropdown, dropdown_pos);
                },
                "{summary}"
            }
        }

        if is_open {
            div {
                style: "{POPUP_STYLE} left: {left}px; top: {top}px;",
                onclick: move |event| event.stop_propagation(),
                if options.is_empty() {
                    div { style: "padding: 6px 4px; color: #888;", "No values" }
                }
                {options.iter().map(|value| {
                    let checked = selected.contains(value);
                    let value = value.clone();
                    let shown = value.clone();
                    rsx!(
                        label {
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| on_toggle.call(value.clone()),
                            }
                            span { "{shown}" }
                        }
                    )
                })}
            }
        }
    }
}

#[component]
pub fn ColumnVisibilityDropdown(
    columns: Vec<String>,
    visibility: ColumnVisibility,
    open_dropdown: Signal<Option<DropdownId>>,
    dropdown_pos: Signal<Option<(f64, f64)>>,
    on_toggle: EventHandler<(String, bool)>,
    on_show_all: EventHandler<()>,
) -> Element {
    let id = DropdownId::ColumnVisibility;
    let is_open = open_dropdown() == Some(id);
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            button {
                style: "{button_style(false)}",
                onclick: move |event| {
                    event.stop_propagation();
                    let point = event.client_coordinates();
                    toggle_dropdown(id, (point.x, point.y), open_dropdown, dropdown_pos);
                },
                "Columns to display"
            }
        }

        if is_open {
            div {
                style: "{POPUP_STYLE} left: {left}px; top: {top}px;",
                onclick: move |event| event.stop_propagation(),
                button {
                    style: "{button_style(false)} margin-bottom: 4px;",
                    onclick: move |_| on_show_all.call(()),
                    "Show all"
                }
                {columns.iter().map(|column| {
                    let checked = visibility.is_visible(column);
                    let column = column.clone();
                    let shown = column.clone();
                    rsx!(
                        label {
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| on_toggle.call((column.clone(), !checked)),
                            }
                            span { "{shown}" }
                        }
                    )
                })}
            }
        }
    }
}
