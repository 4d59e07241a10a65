//! Account role used for access control.

use serde::{Deserialize, Serialize};

/// Trust tier of an account.
///
/// Persisted as a `SMALLINT` (`1` = admin, `2` = user) and serialized in JSON
/// and token claims as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Database representation of the role.
    pub fn as_i16(self) -> i16 {
        match self {
            Role::Admin => 1,
            Role::User => 2,
        }
    }

    /// Parses the database representation; returns `None` for unknown values.
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Role::Admin),
            2 => Some(Role::User),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
