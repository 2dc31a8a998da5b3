//! Caller identity and capability types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Role carried by a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(Error::invalid_input(format!("Unknown role '{}'", other))),
        }
    }
}

/// A verified caller. The core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The one place where the admin role is checked.
    ///
    /// Every administrative operation takes the returned capability as a
    /// parameter, so it cannot be invoked without passing through here.
    pub fn admin_capability(&self) -> Result<AdminCapability> {
        if !self.is_admin() {
            return Err(Error::Forbidden(format!(
                "User '{}' is not an administrator",
                self.username
            )));
        }
        Ok(AdminCapability {
            actor_id: self.id.clone(),
        })
    }
}

/// Proof that the caller is an administrator.
///
/// Only [`Identity::admin_capability`] can construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCapability {
    actor_id: String,
}

impl AdminCapability {
    /// Identity id of the administrator, recorded on stock state changes.
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }
}
