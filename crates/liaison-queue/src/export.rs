//! Copy-out rendering of the current agenda as a fixed-column table.

use liaison_models::RankedItem;

/// Placeholder for absent optional fields.
const MISSING: &str = "—";

fn cell(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => MISSING,
    }
}

/// Renders the list in current rank order.
///
/// One header line, then one line per item; severity upper-cased,
/// missing optionals as an em-dash. Pure read, no trailing newline.
pub fn render_snapshot(items: &[RankedItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push("#, Severity, Topic, Context, Ask, Owner".to_string());

    for entry in items {
        let item = &entry.item;
        lines.push(format!(
            "{}, {}, {}, {}, {}, {}",
            entry.rank,
            item.severity.as_str().to_uppercase(),
            item.title,
            cell(item.context.as_deref()),
            cell(item.ask.as_deref()),
            cell(item.owner.as_ref().map(|o| o.as_str())),
        ));
    }

    lines.join("\n")
}
