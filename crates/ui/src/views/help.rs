//! Field and command reference, filterable like a shortcut sheet.

use console::style;

use crate::model::{ActionKind, FormField};

type Row = (String, String);

fn section(title: &str, items: &[Row], filter: &str) -> Option<String> {
    let needle = filter.trim().to_lowercase();
    let rows: Vec<&Row> = items
        .iter()
        .filter(|(k, v)| {
            needle.is_empty()
                || k.to_lowercase().contains(&needle)
                || v.to_lowercase().contains(&needle)
        })
        .collect();
    if rows.is_empty() {
        return None;
    }

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = format!("{}\n", style(title).bold());
    for (k, v) in rows {
        out.push_str(&format!("  {}  {v}\n", style(format!("{k:<width$}")).cyan()));
    }
    Some(out)
}

fn action_summary(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Search => "search products by embedding (id, pc, collection, vector-field, embeddings, metric, limit)",
        ActionKind::Insert => "insert the rows in `data` into the collection",
        ActionKind::Delete => "delete rows matching `conditions`",
        ActionKind::CreateCollection => "create the product collection named by `collection`",
        ActionKind::DeleteCollection => "drop the collection named by `collection`",
        ActionKind::GetDetails => "fetch file details for the comma-separated `cids`",
        ActionKind::GetResources => "list resources for `id` and `pc`",
    }
}

/// Render the help sheet, keeping only rows that mention `filter`.
pub fn render_help(filter: &str) -> String {
    let fields: Vec<Row> = FormField::ALL
        .into_iter()
        .map(|f| (format!("set {f} <value>"), f.hint().to_string()))
        .collect();
    let actions: Vec<Row> = ActionKind::ALL
        .into_iter()
        .map(|k| (k.command().to_string(), action_summary(k).to_string()))
        .collect();
    let session: Vec<Row> = [
        ("show", "print every field value"),
        ("results", "print the last search results"),
        ("collections", "print collections created this session"),
        ("help [filter]", "this sheet"),
        ("quit", "leave the shell"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let sections: Vec<String> = [
        section("Fields", &fields, filter),
        section("Actions", &actions, filter),
        section("Session", &session, filter),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sections.is_empty() {
        return format!("No help entries match \"{}\".\n", filter.trim());
    }
    sections.join("\n")
}
