//! Shared text normalisation for entity fields.

/// Reason a text field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextViolation {
    Blank,
    TooLong,
}

/// Trim `value` and require it to be non-empty and at most `max` characters.
pub(crate) fn required(value: &str, max: usize) -> Result<String, TextViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TextViolation::Blank);
    }
    if trimmed.chars().count() > max {
        return Err(TextViolation::TooLong);
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional value, mapping blank input to `None`.
pub(crate) fn optional(value: Option<&str>, max: usize) -> Result<Option<String>, TextViolation> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) if v.chars().count() > max => Err(TextViolation::TooLong),
        Some(v) => Ok(Some(v.to_owned())),
    }
}

/// Case-insensitive substring match used by name and title searches.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Dom Casmurro ", 20, Ok("Dom Casmurro".to_owned()))]
    #[case("   ", 20, Err(TextViolation::Blank))]
    #[case("abcdef", 5, Err(TextViolation::TooLong))]
    fn required_trims_and_bounds(
        #[case] input: &str,
        #[case] max: usize,
        #[case] expected: Result<String, TextViolation>,
    ) {
        assert_eq!(required(input, max), expected);
    }

    #[rstest]
    fn optional_maps_blank_to_none() {
        assert_eq!(optional(Some("  "), 5), Ok(None));
        assert_eq!(optional(None, 5), Ok(None));
        assert_eq!(optional(Some("toolong"), 5), Err(TextViolation::TooLong));
    }

    #[rstest]
    fn contains_ignores_case() {
        assert!(contains_ignore_case("Machado de Assis", "ASSIS"));
        assert!(!contains_ignore_case("Machado de Assis", "Lispector"));
    }
}
