//! Configuration values.

use std::fmt;

use serde::Deserialize;

/// A single configuration value.
///
/// Host settings files may use booleans, integers, or strings. Tags read values
/// through [`ConfigValue::as_text`] and [`ConfigValue::is_truthy`], which follow
/// the same conventions regardless of the stored variant.
///
/// # Example
///
/// ```
/// use lqt_config::ConfigValue;
///
/// assert!(ConfigValue::from(true).is_truthy());
/// assert!(!ConfigValue::from("").is_truthy());
/// assert_eq!(ConfigValue::from(42_i64).as_text(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// String value.
    String(String),
}

impl Default for ConfigValue {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl ConfigValue {
    /// Parse a value given on the command line.
    ///
    /// `true`/`false` become booleans, decimal integers become integers,
    /// anything else is kept as a string.
    #[must_use]
    pub fn parse_literal(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => raw
                .parse::<i64>()
                .map_or_else(|_| Self::String(raw.to_owned()), Self::Integer),
        }
    }

    /// Whether the value counts as enabled.
    ///
    /// `false`, `0` and the empty string are false; everything else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Textual form of the value.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Borrow the value if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
