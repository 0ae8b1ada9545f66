use std::fmt;

/// Status of a successful invocation.
pub const OK: u16 = 200;

/// Status of a failed invocation.
pub const ERROR: u16 = 500;

/// Outcome of one invocation, shaped like a ledger peer response.
///
/// A failed response carries the error message and never a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OK
    }

    /// The payload parsed as JSON, if it is non-empty and well formed.
    pub fn json(&self) -> Option<serde_json::Value> {
        if self.payload.is_empty() {
            return None;
        }
        serde_json::from_slice(&self.payload).ok()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            write!(f, "{} OK ({} bytes)", self.status, self.payload.len())
        } else {
            write!(f, "{} {}", self.status, self.message)
        }
    }
}
