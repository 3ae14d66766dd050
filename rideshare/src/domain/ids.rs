//! Entity identifier types.

use std::fmt;

/// Error returned when an identifier is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id {value}: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    value: i64,
    reason: &'static str,
}

impl InvalidId {
    /// The rejected raw value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The kind of entity the identifier was meant for.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Defines a positive integer identifier newtype.
///
/// Identifiers are always > 0, so a value of the generated type is valid by
/// construction.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Entity kind name used in error messages.
            pub const KIND: &'static str = $kind;

            /// The smallest valid identifier.
            pub const FIRST: Self = Self(1);

            /// Validate a raw identifier.
            ///
            /// Rejects zero, negative values and values above `u32::MAX`.
            pub fn new(raw: i64) -> Result<Self, InvalidId> {
                if raw <= 0 {
                    return Err(InvalidId {
                        kind: $kind,
                        value: raw,
                        reason: "must be positive",
                    });
                }
                u32::try_from(raw).map(Self).map_err(|_| InvalidId {
                    kind: $kind,
                    value: raw,
                    reason: "out of range",
                })
            }

            /// Returns the raw identifier.
            pub fn get(self) -> u32 {
                self.0
            }

            /// The identifier that follows this one, or `None` at `u32::MAX`.
            pub fn next(self) -> Option<Self> {
                self.0.checked_add(1).map(Self)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = InvalidId;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }
    };
}

define_id!(
    /// Unique passenger identifier.
    PassengerId,
    "passenger"
);

define_id!(
    /// Unique driver identifier.
    DriverId,
    "driver"
);

define_id!(
    /// Unique trip identifier. New trips always get the next unused value.
    TripId,
    "trip"
);
