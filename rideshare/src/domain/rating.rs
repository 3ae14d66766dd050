//! Passenger rating of a trip.

use std::fmt;

/// Error returned for a rating outside 1..=5.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rating {0}: must be between 1 and 5")]
pub struct InvalidRating(pub i64);

/// A trip rating from 1 (worst) to 5 (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw rating.
    pub fn new(raw: i64) -> Result<Self, InvalidRating> {
        if !(Self::MIN as i64..=Self::MAX as i64).contains(&raw) {
            return Err(InvalidRating(raw));
        }
        Ok(Rating(raw as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
