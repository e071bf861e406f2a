use console::style;
use core_types::Product;

fn cell(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{text:<width$}")
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Search results as a fixed-width table.
pub fn render_results(results: &[Product]) -> String {
    if results.is_empty() {
        return format!("{}\n", style("No results.").dim());
    }

    let mut out = format!(
        "{}\n",
        style(format!(
            "{:>6}  {:>10}  {:<24}  {:<40}  {}",
            "id", "similarity", "name", "description", "image"
        ))
        .bold()
    );
    for p in results {
        let id = p.id.map_or_else(|| "-".to_string(), |id| id.to_string());
        let sim = p
            .similarity
            .map_or_else(|| "-".to_string(), |s| format!("{s:.4}"));
        out.push_str(&format!(
            "{id:>6}  {sim:>10}  {}  {}  {}\n",
            cell(&p.name, 24),
            cell(&p.description, 40),
            p.image_url
        ));
    }
    out
}
