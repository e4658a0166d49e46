//! Phone number type with domestic-format normalization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input does not match `+7` followed by exactly ten digits.
    #[error("phone number must be +7 followed by 10 digits")]
    InvalidFormat,
}

/// A phone number in `+7XXXXXXXXXX` form.
///
/// A raw input starting with the domestic prefix `8` is normalized to the
/// international `+7` prefix *before* validation, and the normalized value
/// is what gets stored - `89991234567` parses to `+79991234567`.
///
/// ## Examples
///
/// ```
/// use larek_core::Phone;
///
/// let phone = Phone::parse("89991234567").unwrap();
/// assert_eq!(phone.as_str(), "+79991234567");
///
/// assert!(Phone::parse("+79991234567").is_ok());
/// assert!(Phone::parse("12345").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits expected after the `+7` prefix.
    pub const NATIONAL_DIGITS: usize = 10;

    /// Parse a `Phone` from a string, normalizing a leading `8` to `+7`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, or if (after normalization)
    /// it is not `+7` followed by exactly ten digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        let normalized = match s.strip_prefix('8') {
            Some(rest) => format!("+7{rest}"),
            None => s.to_owned(),
        };

        let national = normalized
            .strip_prefix("+7")
            .ok_or(PhoneError::InvalidFormat)?;

        if national.len() != Self::NATIONAL_DIGITS
            || !national.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PhoneError::InvalidFormat);
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_international() {
        let phone = Phone::parse("+79991234567").unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
    }

    #[test]
    fn test_normalizes_domestic_prefix() {
        let phone = Phone::parse("89991234567").unwrap();
        assert_eq!(phone.as_str(), "+79991234567");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Phone::parse("+7999123456"), // 9 digits
            Err(PhoneError::InvalidFormat)
        ));
        assert!(matches!(
            Phone::parse("+799912345678"), // 11 digits
            Err(PhoneError::InvalidFormat)
        ));
        assert!(matches!(
            Phone::parse("+7999123456a"),
            Err(PhoneError::InvalidFormat)
        ));
        assert!(matches!(
            Phone::parse("12345"),
            Err(PhoneError::InvalidFormat)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("+79991234567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+79991234567\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
