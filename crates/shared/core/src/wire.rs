//! Wire Boundary
//!
//! Enumerations are plain tagged enums everywhere inside the engine. Their
//! textual names only exist here: each enum registers one table through
//! [`wire_names!`], which derives `Display`, `FromStr` and the `String`
//! conversions serde uses. Nothing else in the workspace matches on strings.
//!
//! Results crossing a process boundary are wrapped in an [`Envelope`]:
//!
//! ```text
//! {"success": true,  "result": {...}}
//! {"success": false, "error": "Insufficient data: need at least 2 points, got 1"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Bidirectional mapping between an enum and its fixed wire names
pub trait WireName: Sized + Copy + 'static {
    /// Every wire name, in declaration order
    const NAMES: &'static [&'static str];

    /// Wire name for this variant
    fn as_wire(&self) -> &'static str;

    /// Parse a wire name back into a variant
    fn from_wire(name: &str) -> Option<Self>;
}

/// A string that is not in an enum's wire table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} value: {value:?}")]
pub struct UnknownWireName {
    pub kind: &'static str,
    pub value: String,
}

/// Register the wire table for an enum.
///
/// ```ignore
/// wire_names!(DemandStrength {
///     Strong => "STRONG",
///     Moderate => "MODERATE",
///     Weak => "WEAK",
/// });
/// ```
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::wire::WireName for $ty {
            const NAMES: &'static [&'static str] = &[$($name),+];

            fn as_wire(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }

            fn from_wire(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($ty::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(<$ty as $crate::wire::WireName>::as_wire(self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::wire::UnknownWireName;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <$ty as $crate::wire::WireName>::from_wire(s).ok_or_else(|| {
                    $crate::wire::UnknownWireName {
                        kind: stringify!($ty),
                        value: s.to_string(),
                    }
                })
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                <$ty as $crate::wire::WireName>::as_wire(&value).to_string()
            }
        }

        impl TryFrom<String> for $ty {
            type Error = $crate::wire::UnknownWireName;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use wire_names;

/// `{success, result | error}` wrapper for results leaving the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.to_string()),
        }
    }

    /// Wrap an analysis outcome, keeping only the error message on failure
    pub fn from_result<E: fmt::Display>(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(result) => Self::ok(result),
            Err(e) => Self::failure(e),
        }
    }

    /// Unwrap back into a `Result`, for callers on the consuming side
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.result, self.error) {
            (true, Some(result), _) => Ok(result),
            (_, _, Some(error)) => Err(error),
            _ => Err("Malformed envelope".to_string()),
        }
    }
}
