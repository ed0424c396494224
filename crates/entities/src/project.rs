//! Project entity definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project owned by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date, if the project has one.
    pub end_date: Option<NaiveDate>,
    /// Owning administrator's user ID.
    pub administrator_id: Uuid,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project owned by the given administrator.
    pub fn new(name: impl Into<String>, administrator_id: Uuid, start_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            start_date,
            end_date: None,
            administrator_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the end date.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Returns true if the project's end date lies strictly before `on`.
    ///
    /// Closed projects do not block mutations; this is informational only.
    pub fn is_closed(&self, on: NaiveDate) -> bool {
        self.end_date.is_some_and(|end| end < on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let admin_id = Uuid::new_v4();
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let project = Project::new("Billing revamp", admin_id, start)
            .with_description("Replace the legacy billing pipeline");

        assert_eq!(project.administrator_id, admin_id);
        assert_eq!(project.start_date, start);
        assert!(project.end_date.is_none());
    }

    #[test]
    fn test_project_closed() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let project = Project::new("Old", Uuid::new_v4(), start).with_end_date(end);

        assert!(project.is_closed(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
        assert!(!project.is_closed(end));
        assert!(!project.is_closed(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }
}
