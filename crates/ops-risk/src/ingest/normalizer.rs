/// Canonical spelling used for tier lookups: invisible characters stripped,
/// whitespace collapsed and every word title-cased (`" navi  MUMBAI"` → `Navi Mumbai`).
pub fn normalize_city_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_title_cases() {
        assert_eq!(normalize_city_name("  navi   MUMBAI "), "Navi Mumbai");
        assert_eq!(normalize_city_name("\u{feff}delhi"), "Delhi");
        assert_eq!(normalize_city_name("bokaro steel city"), "Bokaro Steel City");
        assert_eq!(normalize_city_name("   "), "");
    }
}
