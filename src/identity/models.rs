// Identity data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated identity attached to a request after token verification.
/// This is the canonical shape returned by the identity service's verify
/// endpoint; no alternative response shapes are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
