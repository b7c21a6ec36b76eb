//! Lifecycle events consumed from the host identity server.

use serde::{Deserialize, Serialize};

/// Event name emitted before a user authenticates
pub const PRE_AUTHENTICATION: &str = "PRE_AUTHENTICATION";

/// Event name emitted after a user has been added to a user store
pub const POST_ADD_USER: &str = "POST_ADD_USER";

/// Role assigned to users created through public self-registration
pub const SELF_SIGNUP_ROLE: &str = "Internal/selfsignup";

/// Kind of lifecycle event delivered to the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    PreAuthentication,
    PostAddUser,
    /// Any event the gate is subscribed to but does not act on
    Other(String),
}

impl EventKind {
    /// Resolve an event kind from the host's event name
    pub fn from_name(name: &str) -> Self {
        match name {
            PRE_AUTHENTICATION => EventKind::PreAuthentication,
            POST_ADD_USER => EventKind::PostAddUser,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EventKind::PreAuthentication => PRE_AUTHENTICATION,
            EventKind::PostAddUser => POST_ADD_USER,
            EventKind::Other(name) => name,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the role list marks a user who registered through self sign-up
pub fn is_self_signup(role_list: &[String]) -> bool {
    role_list.iter().any(|role| role == SELF_SIGNUP_ROLE)
}
