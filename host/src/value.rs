use std::fmt;

/// A value returned across the host/guest boundary.
///
/// The host does not interpret it; it is forwarded to the presenter as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for GuestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestValue::Text(text) => f.write_str(text),
            GuestValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<String> for GuestValue {
    fn from(text: String) -> Self {
        GuestValue::Text(text)
    }
}

impl From<i32> for GuestValue {
    fn from(number: i32) -> Self {
        GuestValue::Number(number.into())
    }
}
