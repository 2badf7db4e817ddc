//! Natural-key validation.
//!
//! Lots are addressed by slug, categories and contact channels by code.
//! These are the caller-visible identifiers (the numeric ids never leave the
//! database layer), so their shape is validated at the API boundary before
//! anything touches persistence.

/// Errors produced when a natural key or display field fails validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The field is empty.
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length in characters.
        max: usize,
    },
}

/// The synthetic pseudo-category code meaning "no category filter".
///
/// Never persisted: the seed skips it and the listing filter treats it as
/// absent.
pub const ALL_CATEGORY_CODE: &str = "all";

/// Maximum length of a lot slug.
pub const MAX_SLUG_LENGTH: usize = 128;
/// Maximum length of a category or contact code.
pub const MAX_CODE_LENGTH: usize = 64;
/// Maximum length of a category or contact label.
pub const MAX_LABEL_LENGTH: usize = 128;
/// Maximum length of a lot name.
pub const MAX_NAME_LENGTH: usize = 255;

fn validate_field(value: &str, field: &'static str, max: usize) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(KeyError::TooLong { field, max });
    }
    Ok(())
}

/// Validate a lot slug (1..=128 characters).
///
/// # Errors
///
/// Returns [`KeyError`] if the slug is empty or too long.
pub fn validate_slug(slug: &str) -> Result<(), KeyError> {
    validate_field(slug, "slug", MAX_SLUG_LENGTH)
}

/// Validate a category or contact code (1..=64 characters).
///
/// # Errors
///
/// Returns [`KeyError`] if the code is empty or too long.
pub fn validate_code(code: &str) -> Result<(), KeyError> {
    validate_field(code, "code", MAX_CODE_LENGTH)
}

/// Validate a category or contact label (1..=128 characters).
///
/// # Errors
///
/// Returns [`KeyError`] if the label is empty or too long.
pub fn validate_label(label: &str) -> Result<(), KeyError> {
    validate_field(label, "label", MAX_LABEL_LENGTH)
}

/// Validate a lot name (1..=255 characters).
///
/// # Errors
///
/// Returns [`KeyError`] if the name is empty or too long.
pub fn validate_name(name: &str) -> Result<(), KeyError> {
    validate_field(name, "name", MAX_NAME_LENGTH)
}

impl KeyError {
    /// The field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slug_rejected() {
        assert_eq!(validate_slug(""), Err(KeyError::Empty { field: "slug" }));
    }

    #[test]
    fn slug_at_limit_accepted() {
        let slug = "x".repeat(MAX_SLUG_LENGTH);
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn slug_over_limit_rejected() {
        let slug = "x".repeat(MAX_SLUG_LENGTH + 1);
        assert_eq!(
            validate_slug(&slug),
            Err(KeyError::TooLong {
                field: "slug",
                max: MAX_SLUG_LENGTH
            })
        );
    }

    #[test]
    fn code_limit_is_64() {
        assert!(validate_code(&"c".repeat(64)).is_ok());
        assert!(validate_code(&"c".repeat(65)).is_err());
    }

    #[test]
    fn length_counted_in_chars_not_bytes() {
        // 128 Cyrillic characters are 256 bytes but still a valid slug
        let slug = "ю".repeat(MAX_SLUG_LENGTH);
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn error_message_names_field() {
        let err = validate_name("").unwrap_err();
        assert_eq!(err.to_string(), "name cannot be empty");
        assert_eq!(err.field(), "name");
    }
}
