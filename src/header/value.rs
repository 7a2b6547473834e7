//! Typed header values.

/// The value part of a header record.
#[derive(Clone, PartialEq, Debug)]
pub enum HeaderValue {
    /// Logical value, `T` or `F` in a card
    Logical(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// Character string value
    Text(String),
}

impl HeaderValue {
    /// Returns the integer if this is [`HeaderValue::Integer`]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            HeaderValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number as `f64` for [`HeaderValue::Integer`] and [`HeaderValue::Real`]
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            HeaderValue::Integer(value) => Some(*value as f64),
            HeaderValue::Real(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the flag if this is [`HeaderValue::Logical`]
    #[must_use]
    pub fn as_logical(&self) -> Option<bool> {
        match self {
            HeaderValue::Logical(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string if this is [`HeaderValue::Text`]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Logical(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Integer(value)
    }
}

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        HeaderValue::Real(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

impl std::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeaderValue::Logical(true) => f.write_str("T"),
            HeaderValue::Logical(false) => f.write_str("F"),
            HeaderValue::Integer(value) => write!(f, "{value}"),
            HeaderValue::Real(value) => write!(f, "{value:?}"),
            // quotes inside strings are doubled
            HeaderValue::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
        }
    }
}
