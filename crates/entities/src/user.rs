//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user. Exactly one role per user, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Owns projects and creates tasks.
    Administrator,
    /// Leads teams and reviews completed work.
    Manager,
    /// Belongs to at most one team and executes tasks.
    Employee,
}

impl UserRole {
    /// Converts the role to a string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "administrator" => Some(Self::Administrator),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

/// A user identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address (unique).
    pub email: String,
    /// Credential hash. Hashing itself happens outside this core.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Role, immutable after creation.
    pub role: UserRole,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user.
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Position of an employee inside a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberPosition {
    Programmer,
    Tester,
    Analyst,
}

/// Employee projection of a user, carrying team membership.
///
/// Administrators and managers have no extra state beyond [`UserRole`];
/// employees additionally track the team they belong to (at most one at
/// a time).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Underlying user ID.
    pub user_id: Uuid,
    /// Team the employee currently belongs to, if any.
    pub team_id: Option<Uuid>,
    /// Position inside the team.
    pub position: Option<MemberPosition>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a new employee record for a user.
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            team_id: None,
            position: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the team membership.
    pub fn with_team(mut self, team_id: Uuid) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Sets the position.
    pub fn with_position(mut self, position: MemberPosition) -> Self {
        self.position = Some(position);
        self
    }
}
