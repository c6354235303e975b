use dioxus::prelude::*;

use crate::domain::entities::page::{PageDescriptor, PAGE_SIZE_OPTIONS};
use crate::page_label;

#[component]
pub fn Paginator(
    descriptor: PageDescriptor,
    disabled: bool,
    on_page_size: EventHandler<u32>,
    on_page: EventHandler<i64>,
) -> Element {
    let page_count = descriptor.page_count();
    let current = descriptor.page_index;
    let rows_per_page = descriptor.rows_per_page;

    rsx! {
        div {
            style: "display: flex; gap: 16px; align-items: center; flex-wrap: wrap;",
            label {
                style: "display: inline-flex; gap: 6px; align-items: center;",
                span { "Postings per page" }
                select {
                    disabled: disabled,
                    value: "{rows_per_page}",
                    onchange: move |event| {
                        if let Ok(size) = event.value().parse::<u32>() {
                            on_page_size.call(size);
                        }
                    },
                    for size in PAGE_SIZE_OPTIONS {
                        option {
                            value: "{size}",
                            selected: size == rows_per_page,
                            "{size}"
                        }
                    }
                }
            }
            if page_count > 0 {
                label {
                    style: "display: inline-flex; gap: 6px; align-items: center;",
                    span { "Page" }
                    select {
                        disabled: disabled,
                        value: "{current}",
                        onchange: move |event| {
                            if let Ok(index) = event.value().parse::<i64>() {
                                on_page.call(index);
                            }
                        },
                        for index in 0..page_count {
                            option {
                                value: "{index}",
                                selected: index == current,
                                "{page_label(index)}"
                            }
                        }
                    }
                    span { style: "color: #666;", "of {page_count}" }
                }
            }
        }
    }
}
