/// User domain type
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account, identified by an opaque per-browser session token.
///
/// There is no registration: a row is created the first time a browser
/// without a valid session cookie talks to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,

    /// Opaque session token stored in the browser cookie
    pub session_id: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}
