//! Identity document number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Document`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum DocumentError {
    /// The input string is empty.
    #[error("document cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("document must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("document cannot contain whitespace")]
    ContainsWhitespace,
}

/// A customer's national identity document number.
///
/// Document numbers are globally unique across customers. Formats vary by
/// country, so only structural constraints are enforced here.
///
/// ## Constraints
///
/// - Length: 1-20 characters
/// - No whitespace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Document(String);

impl Document {
    /// Maximum length of a document number.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `Document` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 20 characters,
    /// or contains whitespace.
    pub fn parse(s: &str) -> Result<Self, DocumentError> {
        if s.is_empty() {
            return Err(DocumentError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(DocumentError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(DocumentError::ContainsWhitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the document number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Document` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Document {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Document {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Document {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Document::parse("12345678").is_ok());
        assert!(Document::parse("X-1234567-Z").is_ok());
        assert!(Document::parse("A").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Document::parse(""), Err(DocumentError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "9".repeat(21);
        assert!(matches!(
            Document::parse(&long),
            Err(DocumentError::TooLong { .. })
        ));
        // Exactly at the limit is fine
        assert!(Document::parse(&"9".repeat(20)).is_ok());
    }

    #[test]
    fn test_parse_whitespace() {
        assert!(matches!(
            Document::parse("1234 5678"),
            Err(DocumentError::ContainsWhitespace)
        ));
    }

    #[test]
    fn test_display() {
        let doc = Document::parse("12345678").unwrap();
        assert_eq!(format!("{doc}"), "12345678");
    }
}
