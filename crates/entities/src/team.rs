//! Team entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team of employees led by a manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: Uuid,
    /// Team name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Project this team is attached to, if any (at most one at a time).
    pub project_id: Option<Uuid>,
    /// Leading manager's user ID.
    pub manager_id: Uuid,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team led by the given manager.
    pub fn new(name: impl Into<String>, manager_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            project_id: None,
            manager_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches the team to a project.
    pub fn with_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }
}
