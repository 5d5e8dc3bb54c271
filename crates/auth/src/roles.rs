//! User roles recognized by the permission gate.

use serde::{Deserialize, Serialize};

/// Closed role set.
///
/// Roles arrive as strings from the gateway; `parse` is fallible and an
/// unknown role simply holds no permissions (the gate denies by default).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    TeamLead,
    TeamMember,
    Finance,
}

impl UserRole {
    pub fn parse(token: &str) -> Option<Self> {
        Some(match token {
            "admin" => Self::Admin,
            "team_lead" => Self::TeamLead,
            "team_member" => Self::TeamMember,
            "finance" => Self::Finance,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::TeamLead => "team_lead",
            Self::TeamMember => "team_member",
            Self::Finance => "finance",
        }
    }
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
