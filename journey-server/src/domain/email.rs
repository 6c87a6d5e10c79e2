//! Waitlist email addresses.

use std::fmt;

/// Error returned when an email address fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid email: {reason}")]
pub struct InvalidEmail {
    reason: &'static str,
}

/// An email address accepted for the waitlist.
///
/// Validation is deliberately loose and matches what the statistics API
/// accepts: the address must contain `@`, and the domain part (up to any
/// further `@`) must contain a dot. Surrounding whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use journey_server::domain::WaitlistEmail;
///
/// let email = WaitlistEmail::parse("  van@example.com ").unwrap();
/// assert_eq!(email.as_str(), "van@example.com");
///
/// assert!(WaitlistEmail::parse("").is_err());
/// assert!(WaitlistEmail::parse("van.example.com").is_err());
/// assert!(WaitlistEmail::parse("van@localhost").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    pub fn parse(s: &str) -> Result<Self, InvalidEmail> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidEmail {
                reason: "email is required",
            });
        }

        let Some((_, rest)) = s.split_once('@') else {
            return Err(InvalidEmail {
                reason: "missing @",
            });
        };

        let domain = rest.split('@').next().unwrap_or_default();
        if !domain.contains('.') {
            return Err(InvalidEmail {
                reason: "domain must contain a dot",
            });
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WaitlistEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WaitlistEmail({})", self.0)
    }
}

impl fmt::Display for WaitlistEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
