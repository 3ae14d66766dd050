//! Vehicle identification number type.

use std::fmt;

/// Length of every valid VIN.
pub const VIN_LEN: usize = 17;

/// Error returned when parsing an invalid VIN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid VIN: {reason}")]
pub struct InvalidVin {
    reason: &'static str,
}

/// A 17-character vehicle identification number.
///
/// VINs are ASCII letters and digits. Lowercase input is accepted and
/// normalised to uppercase.
///
/// # Examples
///
/// ```
/// use rideshare::domain::Vin;
///
/// let vin = Vin::parse("1b9wepxjxdjkyhpab").unwrap();
/// assert_eq!(vin.as_str(), "1B9WEPXJXDJKYHPAB");
///
/// // Wrong length is rejected
/// assert!(Vin::parse("1B9WEPXJX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vin([u8; VIN_LEN]);

impl Vin {
    /// Parse a VIN from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidVin> {
        let bytes = s.as_bytes();

        if bytes.len() != VIN_LEN {
            return Err(InvalidVin {
                reason: "must be exactly 17 characters",
            });
        }

        let mut out = [0u8; VIN_LEN];
        for (slot, &b) in out.iter_mut().zip(bytes) {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidVin {
                    reason: "must be ASCII letters and digits",
                });
            }
            *slot = b.to_ascii_uppercase();
        }

        Ok(Vin(out))
    }

    /// Returns the VIN as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vin({})", self.as_str())
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Vin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_vin() {
        assert!(Vin::parse("12345678901234567").is_ok());
        assert!(Vin::parse("WBWSS52P9NEYLVDE9").is_ok());
    }

    #[test]
    fn normalises_case() {
        let vin = Vin::parse("wbwss52p9neylvde9").unwrap();
        assert_eq!(vin.as_str(), "WBWSS52P9NEYLVDE9");
    }

    #[test]
    fn reject_wrong_length() {
        assert!(Vin::parse("").is_err());
        assert!(Vin::parse("1234567890123456").is_err());
        assert!(Vin::parse("123456789012345678").is_err());
    }

    #[test]
    fn reject_non_alphanumeric() {
        let err = Vin::parse("1234567890123456-").unwrap_err();
        assert_eq!(err.to_string(), "invalid VIN: must be ASCII letters and digits");
        assert!(Vin::parse("12345678 90123456").is_err());
        assert!(Vin::parse("1234567890123456Ö").is_err());
    }

    #[test]
    fn display_and_debug() {
        let vin = Vin::parse("12345678901234567").unwrap();
        assert_eq!(vin.to_string(), "12345678901234567");
        assert_eq!(format!("{:?}", vin), "Vin(12345678901234567)");
    }

    #[test]
    fn serializes_as_string() {
        let vin = Vin::parse("12345678901234567").unwrap();
        assert_eq!(serde_json::to_string(&vin).unwrap(), r#""12345678901234567""#);
    }
}
