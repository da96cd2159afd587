//! Folder name sanitizing.
//!
//! Typed names are cut to the character limit and stripped of characters
//! the backend rejects in folder names. Whitespace is left alone; callers
//! trim when they submit.

use serde::{Deserialize, Serialize};

/// Characters that may not appear in a folder name.
pub const RESERVED_CHARACTERS: [char; 9] = ['"', '*', ':', '<', '>', '?', '/', '\\', '|'];

/// Default maximum name length, in characters.
pub const NAME_CHARACTER_LIMIT: usize = 255;

/// Truncate `raw` to `limit` characters, then drop reserved characters.
pub fn sanitize(raw: &str, limit: usize) -> String {
    raw.chars()
        .take(limit)
        .filter(|c| !RESERVED_CHARACTERS.contains(c))
        .collect()
}

/// Whether the create button may be enabled for this input.
///
/// Looks at the raw input only, so `"***"` is submittable even though it
/// sanitizes to nothing. Request construction rejects such names.
pub fn is_submittable(raw: &str) -> bool {
    !raw.is_empty()
}

/// A typed name, kept in both raw and sanitized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceName {
    raw: String,
    sanitized: String,
}

impl ResourceName {
    /// Sanitize `raw` with the default limit.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::with_limit(raw, NAME_CHARACTER_LIMIT)
    }

    /// Sanitize `raw` with an explicit character limit.
    pub fn with_limit(raw: impl Into<String>, limit: usize) -> Self {
        let raw = raw.into();
        let sanitized = sanitize(&raw, limit);
        Self { raw, sanitized }
    }

    /// Text exactly as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Text after truncation and reserved-character removal.
    pub fn sanitized(&self) -> &str {
        &self.sanitized
    }

    /// Sanitized text with surrounding whitespace removed, as submitted.
    pub fn submitted(&self) -> &str {
        self.sanitized.trim()
    }

    /// See [`is_submittable`].
    pub fn is_submittable(&self) -> bool {
        is_submittable(&self.raw)
    }
}

impl Default for ResourceName {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Arbitrary names, with reserved characters mixed in often enough to
    /// matter and lengths well past the limit.
    fn typed_name() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                3 => any::<char>(),
                1 => prop::sample::select(RESERVED_CHARACTERS.to_vec()),
                1 => prop::sample::select(vec![' ', 'é', '日', '🚀', 'A']),
            ],
            0..600,
        )
        .prop_map(|chars| chars.into_iter().collect::<String>())
    }

    proptest! {
        #[test]
        fn sanitized_name_never_contains_reserved(raw in typed_name()) {
            let out = sanitize(&raw, NAME_CHARACTER_LIMIT);
            prop_assert!(!out.chars().any(|c| RESERVED_CHARACTERS.contains(&c)));
        }

        #[test]
        fn sanitized_name_fits_the_limit(raw in typed_name(), limit in 0usize..300) {
            prop_assert!(sanitize(&raw, NAME_CHARACTER_LIMIT).chars().count() <= NAME_CHARACTER_LIMIT);
            prop_assert!(sanitize(&raw, limit).chars().count() <= limit);
        }

        #[test]
        fn submittable_depends_only_on_raw_length(raw in typed_name()) {
            let name = ResourceName::new(raw.as_str());
            prop_assert_eq!(is_submittable(&raw), !raw.is_empty());
            prop_assert_eq!(name.is_submittable(), !raw.is_empty());
        }

        #[test]
        fn sanitizing_twice_changes_nothing(raw in typed_name()) {
            let once = sanitize(&raw, NAME_CHARACTER_LIMIT);
            prop_assert_eq!(sanitize(&once, NAME_CHARACTER_LIMIT), once);
        }
    }

    #[test]
    fn test_removes_reserved_characters() {
        assert_eq!(sanitize(r#"a"b*c:d<e>f?g/h\i|j"#, 255), "abcdefghij");
        assert_eq!(sanitize("Acme Launch", 255), "Acme Launch");
    }

    #[test]
    fn test_never_contains_reserved() {
        let inputs = [
            "",
            "plain",
            r#"""""#,
            "a/b/c",
            "\\\\server\\share",
            "<script>alert('x')</script>",
            "é*ü:ß|",
            "  spaced  ",
        ];
        for input in inputs {
            let out = sanitize(input, NAME_CHARACTER_LIMIT);
            assert!(
                !out.chars().any(|c| RESERVED_CHARACTERS.contains(&c)),
                "{input:?} -> {out:?}"
            );
        }
    }

    #[test]
    fn test_truncates_before_removing() {
        let long = "x".repeat(300);
        assert_eq!(sanitize(&long, 255).chars().count(), 255);

        let mut with_tail = "a".repeat(254);
        with_tail.push_str("*bc");
        assert_eq!(sanitize(&with_tail, 255), "a".repeat(254));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let name = "é".repeat(300);
        assert_eq!(sanitize(&name, 255).chars().count(), 255);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(sanitize("", 255), "");
        assert_eq!(sanitize("  Acme  ", 255), "  Acme  ");
        assert_eq!(ResourceName::new("  Acme  ").submitted(), "Acme");
    }

    #[test]
    fn test_submittable_uses_raw_length() {
        assert!(!is_submittable(""));
        assert!(is_submittable("***"));
        assert_eq!(sanitize("***", 255), "");

        let name = ResourceName::new("***");
        assert!(name.is_submittable());
        assert_eq!(name.sanitized(), "");
        assert_eq!(name.raw(), "***");
    }
}
