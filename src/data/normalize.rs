// ---------------------------------------------------------------------------
// Value normalizer – raw cell text → numeric value or missing
// ---------------------------------------------------------------------------

/// Normalize a raw textual value field into a number.
///
/// Source files write large dollar amounts with thousands separators
/// (`"4,560"`), so commas are stripped before parsing. Anything that still
/// fails to parse, or parses to a non-finite number, becomes `None`
/// ("missing"). The caller keeps the row either way; this function never
/// fails and never drops data.
pub fn normalize(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(normalize("4.56"), Some(4.56));
        assert_eq!(normalize("100"), Some(100.0));
        assert_eq!(normalize("-3.2"), Some(-3.2));
    }

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(normalize("4,560"), Some(4560.0));
        assert_eq!(normalize("1,234,567.89"), Some(1_234_567.89));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize("  42 "), Some(42.0));
    }

    #[test]
    fn unparseable_input_becomes_missing() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("(D)"), None);
        assert_eq!(normalize("n/a"), None);
        assert_eq!(normalize("12abc"), None);
    }

    #[test]
    fn non_finite_results_become_missing() {
        assert_eq!(normalize("NaN"), None);
        assert_eq!(normalize("inf"), None);
    }
}
