//! Account roles and the registration-time role selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access class of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Caregiver,
    Patient,
}

/// Role set granted when no usable registration data exists for a login email.
pub const DEFAULT_ROLES: [Role; 2] = [Role::Caregiver, Role::Patient];

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caregiver => "caregiver",
            Self::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Exact match only; stored values are never case-folded.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "caregiver" => Ok(Self::Caregiver),
            "patient" => Ok(Self::Patient),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Value of the role selector on the registration form.
///
/// `Both` exists only here; it is expanded before anything is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSelection {
    Caregiver,
    Patient,
    Both,
}

impl RoleSelection {
    /// Expands the selection into the ordered role list stored on a record.
    #[must_use]
    pub fn allowed_roles(self) -> Vec<Role> {
        match self {
            Self::Caregiver => vec![Role::Caregiver],
            Self::Patient => vec![Role::Patient],
            Self::Both => DEFAULT_ROLES.to_vec(),
        }
    }
}

impl FromStr for RoleSelection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "caregiver" => Ok(Self::Caregiver),
            "patient" => Ok(Self::Patient),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown role selection: {other}")),
        }
    }
}

/// One entry of a persisted `allowedRoles` list.
///
/// Storage is shared with other writers, so entries that are not a known role
/// are carried verbatim instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRole {
    Known(Role),
    Foreign(serde_json::Value),
}

impl StoredRole {
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Known(role) => Some(*role),
            Self::Foreign(_) => None,
        }
    }
}

impl From<Role> for StoredRole {
    fn from(role: Role) -> Self {
        Self::Known(role)
    }
}
