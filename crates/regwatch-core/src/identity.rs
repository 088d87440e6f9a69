//! # Identifier Newtypes
//!
//! Distinct types for change and source identifiers — a [`ChangeId`] cannot
//! be passed where a [`SourceId`] is expected.
//!
//! Upstream feeds assign their own opaque ids (`"meity-4821"`) and fixture
//! data uses readable slugs (`"src-001"`), so both identifiers wrap strings
//! rather than UUIDs. Locally minted source ids use UUID v4 text.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum accepted identifier length.
const MAX_ID_LEN: usize = 128;

/// Helper macro implementing `Deserialize` for validated string newtypes.
/// Deserializes as a plain `String`, then routes through `new()` so invalid
/// values are rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$doc:meta])* $ty:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = String)]
        pub struct $ty(String);

        impl $ty {
            /// Create a validated identifier. Trims surrounding whitespace;
            /// rejects empty and over-long input.
            pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
                let s = s.into();
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                if trimmed.len() > MAX_ID_LEN {
                    return Err(ValidationError::IdentifierTooLong {
                        kind: $kind,
                        max: MAX_ID_LEN,
                        len: trimmed.len(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Mint a fresh identifier from a random UUID.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Access the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl_validating_deserialize!($ty);
    };
}

string_id!(
    /// Identifier of a detected regulatory change within a result set.
    ChangeId,
    "change"
);

string_id!(
    /// Identifier of a monitored regulatory publication source.
    SourceId,
    "source"
);
