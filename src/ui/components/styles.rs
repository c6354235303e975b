pub fn root_container_style() -> &'static str {
    "display: flex; height: 100vh; font-family: sans-serif; background: #f6f7f9;"
}

pub fn sidebar_style() -> &'static str {
    "width: 180px; flex-shrink: 0; padding: 16px 12px; border-right: 1px solid #ddd; background: #fff; display: flex; flex-direction: column; gap: 8px;"
}

pub fn main_panel_style() -> &'static str {
    "flex: 1; min-width: 0; overflow-y: auto; padding: 16px 24px; display: flex; flex-direction: column; gap: 12px;"
}

pub fn table_container_style() -> &'static str {
    "overflow: auto; border: 1px solid #ddd; border-radius: 6px; background: #fff;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 2; background: #f2f2f2; border: 1px solid #bbb; padding: 6px; text-align: left;"
}

pub fn table_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 4px 6px; vertical-align: top;"
}

pub fn button_style(active: bool) -> &'static str {
    if active {
        "border: 1px solid #3367d6; background: #3367d6; color: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
    } else {
        "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
    }
}

pub fn badge_style() -> &'static str {
    "display: inline-block; border: 1px solid #ccc; border-radius: 6px; padding: 2px 8px; margin: 2px; font-size: 12px; background: #fafafa;"
}

pub fn notice_style(success: bool) -> &'static str {
    if success {
        "padding: 6px 10px; border-radius: 6px; background: #e6f4ea; color: #1e7e34;"
    } else {
        "padding: 6px 10px; border-radius: 6px; background: #fdecea; color: #b3261e;"
    }
}
