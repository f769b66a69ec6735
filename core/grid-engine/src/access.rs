//! FILENAME: core/grid-engine/src/access.rs
//! PURPOSE: Role-based gating of add/edit/delete affordances.
//! CONTEXT: This is a side-effect-free query used to decide which actions to
//! expose. The role is supplied by the caller; authentication lives elsewhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn permissions(self) -> Permissions {
        Permissions {
            can_write: matches!(self, Role::Admin | Role::Editor),
            can_delete: self == Role::Admin,
        }
    }

    pub fn allows(self, action: Action) -> bool {
        let perms = self.permissions();
        match action {
            Action::Add | Action::Edit => perms.can_write,
            Action::Delete => perms.can_delete,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// What the current role may do to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_write: bool,
    pub can_delete: bool,
}

/// A write operation on a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Add,
    Edit,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}
