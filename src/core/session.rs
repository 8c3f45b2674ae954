//! # Session Identity
//!
//! Opaque per-instance token sent with every request so the service can
//! correlate turns. Generated once when the `App` is built.

use std::fmt;

use chrono::Utc;

/// Length of the random suffix, matching the web client's token shape.
const SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for the title bar.
    pub fn short(&self) -> &str {
        self.0.rsplit('_').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a new session id: `session_<unix millis>_<random suffix>`.
pub fn new_session_id() -> SessionId {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    SessionId(format!("session_{millis}_{suffix}"))
}
