//! Small shared helpers for form-shaped input.

/// Trims `value` and drops it entirely when nothing is left. Optional form
/// fields arrive as empty strings, not as absent values.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    match value {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_collapse_to_none() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some("  ada  ")), Some("ada".to_string()));
    }
}
