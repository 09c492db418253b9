//! Email address type.
//!
//! Login and signup validate the address client-side before any call goes
//! out, the same shape check the original storefront applied to its signup
//! form: something before the `@`, a dotted domain after it. The backend
//! remains the authority on whether the account exists.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty (after trimming).
    #[error("email address is required")]
    Empty,
    /// The input exceeds the RFC 5321 length limit.
    #[error("email address is too long")]
    TooLong,
    /// The input does not look like `name@domain.tld`.
    #[error("email address must look like name@domain.com")]
    Malformed,
}

/// A structurally valid email address.
///
/// Validation is deliberately shallow - non-empty local part, dotted domain,
/// no whitespace - enough to catch typos before a round-trip without
/// second-guessing the backend. Surrounding whitespace is trimmed.
///
/// Deserialization goes through the same check, so an `Email` in hand is
/// always well-formed, whether it came from user input, the credential file,
/// or an API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is empty, too long, or not shaped
    /// like `name@domain.tld`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(EmailError::Empty);
        }
        if input.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        let well_formed = input.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
                && !input.contains(char::is_whitespace)
        });
        if well_formed {
            Ok(Self(input.to_owned()))
        } else {
            Err(EmailError::Malformed)
        }
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_addresses() {
        for ok in [
            "user@example.com",
            "user.name+tag@example.co.in",
            "a@b.c",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok} should parse");
        }
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let email = Email::parse("  user@example.com \n").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        for bad in [
            "no-at-symbol",
            "@example.com",
            "user@",
            "user@nodot",
            "user@trailing.",
            "user@.leading",
            "user name@example.com",
        ] {
            assert_eq!(Email::parse(bad), Err(EmailError::Malformed), "{bad}");
        }
    }

    #[test]
    fn test_rejects_overlong_input() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong));
    }

    #[test]
    fn test_deserialization_validates() {
        let email: Email = serde_json::from_str("\"user@example.com\"").unwrap();
        assert_eq!(email.as_str(), "user@example.com");

        let result: Result<Email, _> = serde_json::from_str("\"not-an-email\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let email = Email::parse("user@example.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"user@example.com\"");
    }

    #[test]
    fn test_from_str() {
        let email: Email = "user@example.com".parse().unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }
}
