//! Member listing rules: leadership designations and homepage flag parsing.

/// Designations shown on the leadership page, upper-cased.
pub const LEADERSHIP_DESIGNATIONS: &[&str] = &["CHAIRMAN", "CEO & MANAGING DIRECTOR"];

/// Split a comma-separated designation filter into upper-cased entries.
///
/// ```
/// use ajfses_core::member::parse_designations;
///
/// assert_eq!(parse_designations("ceo, , Chairman"), vec!["CEO", "CHAIRMAN"]);
/// ```
pub fn parse_designations(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(|d| d.trim().to_uppercase())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Interpret the form/query flag controlling homepage visibility.
pub fn parse_show_on_home(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn designations_are_trimmed_and_upper_cased() {
        assert_eq!(
            parse_designations(" Chairman ,ceo & managing director"),
            vec!["CHAIRMAN", "CEO & MANAGING DIRECTOR"]
        );
    }

    #[test]
    fn empty_designation_filter_is_empty() {
        assert!(parse_designations("").is_empty());
        assert!(parse_designations(" , ,").is_empty());
    }

    #[test]
    fn show_on_home_truthy_values() {
        for v in ["1", "true", "TRUE", "on", "Yes"] {
            assert!(parse_show_on_home(v), "{v}");
        }
        for v in ["0", "false", "", "off", "maybe"] {
            assert!(!parse_show_on_home(v), "{v}");
        }
    }
}
