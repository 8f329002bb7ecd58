//! Display-label cleanup for question text.

/// Strip category decorations (e.g. `"Type:"`) from the front of a label and
/// collapse runs of whitespace.
pub fn normalize_label(label: &str, prefixes: &[String]) -> String {
    let mut cleaned = label.trim();
    while let Some(rest) = strip_any(cleaned, prefixes) {
        cleaned = rest.trim_start();
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_any<'a>(label: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| label.strip_prefix(prefix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["Type:".into(), "Generation:".into(), "Pokédex:".into()]
    }

    #[test]
    fn test_strips_prefix() {
        assert_eq!(normalize_label("Type: Fire", &prefixes()), "Fire");
        assert_eq!(normalize_label("  Generation:Generation  I ", &prefixes()), "Generation I");
    }

    #[test]
    fn test_strips_stacked_prefixes() {
        assert_eq!(normalize_label("Pokédex: Type: Grass", &prefixes()), "Grass");
    }

    #[test]
    fn test_leaves_plain_labels() {
        assert_eq!(normalize_label("Sea\tof  Rocks", &prefixes()), "Sea of Rocks");
        assert_eq!(normalize_label("Mega Type: X", &prefixes()), "Mega Type: X");
        assert_eq!(normalize_label("", &prefixes()), "");
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        let prefixes = vec![String::new(), "Type:".into()];
        assert_eq!(normalize_label("Type: Ice", &prefixes), "Ice");
    }
}
