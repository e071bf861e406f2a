use console::style;

/// Collections created this session. Duplicates are shown as they are stored.
pub fn render_collections(collections: &[String]) -> String {
    if collections.is_empty() {
        return format!("{}\n", style("No collections created in this session.").dim());
    }
    collections
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>3}. {name}\n", i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_in_creation_order() {
        let text = render_collections(&["b".into(), "a".into(), "b".into()]);
        assert_eq!(text, "  1. b\n  2. a\n  3. b\n");
    }
}
