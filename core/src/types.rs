//! Shared primitive types used across the tracker.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrackError, TrackResult};

/// Stored in place of owner fields nobody has reported yet.
pub const NOT_AVAILABLE: &str = "Not available";

/// A validated Indian mobile number: exactly 10 ASCII digits, leading digit 6-9.
///
/// The only way to obtain one is [`MobileNumber::parse`], so every holder
/// can rely on the shape without re-checking it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Normalize raw user input and validate it.
    ///
    /// Non-digit characters are stripped first ("+91-98765 43210" is fine).
    /// A 12-digit result starting with the country code "91" loses that prefix.
    pub fn parse(raw: &str) -> TrackResult<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        let candidate = if digits.len() == 12 && digits.starts_with("91") {
            &digits[2..]
        } else {
            digits.as_str()
        };

        if candidate.len() == 10 && candidate.starts_with(['6', '7', '8', '9']) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(TrackError::InvalidNumberFormat {
                input: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `n` digits. `n` is never more than 10 at call sites.
    pub fn prefix(&self, n: usize) -> &str {
        &self.0[..n.min(self.0.len())]
    }

    /// Leading digit, which selects the number series.
    pub fn series(&self) -> char {
        self.0.chars().next().unwrap_or('0')
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
