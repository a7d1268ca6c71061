//! Error status value object
//!
//! Coarse status string carried by operational errors, derived from the
//! HTTP status code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a failure is attributed to the client or to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStatus {
    /// Client-side failure (any 4xx code)
    Fail,
    /// Everything else
    Error,
}

impl ErrorStatus {
    /// Derive the status from an HTTP status code
    ///
    /// `Fail` when the first decimal digit of the code is `4`, else `Error`.
    /// This is the only place the rule lives; every structured error goes
    /// through it.
    #[must_use]
    pub fn from_status_code(status_code: u16) -> Self {
        if status_code.to_string().starts_with('4') {
            Self::Fail
        } else {
            Self::Error
        }
    }

    /// Wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_codes_are_fail() {
        for code in [400, 404, 409, 422, 499] {
            assert_eq!(ErrorStatus::from_status_code(code), ErrorStatus::Fail, "{code}");
        }
    }

    #[test]
    fn server_codes_are_error() {
        for code in [500, 502, 503, 599] {
            assert_eq!(ErrorStatus::from_status_code(code), ErrorStatus::Error, "{code}");
        }
    }

    #[test]
    fn leading_digit_decides_not_range() {
        // 4 and 42 are not HTTP codes but still start with "4"
        assert_eq!(ErrorStatus::from_status_code(4), ErrorStatus::Fail);
        assert_eq!(ErrorStatus::from_status_code(42), ErrorStatus::Fail);
        assert_eq!(ErrorStatus::from_status_code(4000), ErrorStatus::Fail);
        assert_eq!(ErrorStatus::from_status_code(300), ErrorStatus::Error);
        assert_eq!(ErrorStatus::from_status_code(0), ErrorStatus::Error);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ErrorStatus::Fail).unwrap();
        assert_eq!(json, "\"fail\"");
        let json = serde_json::to_string(&ErrorStatus::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(ErrorStatus::Fail.to_string(), "fail");
        assert_eq!(ErrorStatus::Error.to_string(), "error");
    }
}
