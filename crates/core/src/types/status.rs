//! Order status type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The processing state of an order.
///
/// Statuses are free-form text rather than a closed enum: fulfillment
/// vocabularies grow over time and old orders must keep whatever state they
/// were left in. Well-known states are provided as constants; new orders
/// start as [`OrderStatus::PENDING`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Awaiting payment or processing. The initial state.
    pub const PENDING: &'static str = "Pending";
    /// Payment received.
    pub const PAID: &'static str = "Paid";
    /// Handed to the carrier.
    pub const SHIPPED: &'static str = "Shipped";
    /// Cancelled before fulfillment.
    pub const CANCELLED: &'static str = "Cancelled";

    /// Create a status from arbitrary text.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the initial pending state.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.0 == Self::PENDING
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self(Self::PENDING.to_owned())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        Self(status)
    }
}

impl From<&str> for OrderStatus {
    fn from(status: &str) -> Self {
        Self(status.to_owned())
    }
}

impl AsRef<str> for OrderStatus {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        let status = OrderStatus::default();
        assert!(status.is_pending());
        assert_eq!(status.as_str(), "Pending");
    }

    #[test]
    fn test_free_text_states() {
        let status = OrderStatus::new("AwaitingPickup");
        assert!(!status.is_pending());
        assert_eq!(status.as_str(), "AwaitingPickup");
    }
}
