//! Task entity definitions and the task lifecycle state machine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a task.
///
/// Lifecycle: `New → InProgress → PendingConfirmation → {Completed |
/// NeedsRevision}`, `NeedsRevision → InProgress`, and any non-terminal
/// status may move to `Cancelled`. An assignee may also request
/// confirmation straight from `New`. `Completed` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Freshly created, no work started.
    #[default]
    New,
    /// Assignee is working.
    InProgress,
    /// Work done from the assignee's point of view, awaiting manager review.
    PendingConfirmation,
    /// Manager confirmed completion.
    Completed,
    /// Manager rejected completion, task goes back to the assignee.
    NeedsRevision,
    /// Abandoned before completion.
    Cancelled,
}

impl TaskStatus {
    /// Converts the status to a string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::PendingConfirmation => "pending_confirmation",
            Self::Completed => "completed",
            Self::NeedsRevision => "needs_revision",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "in_progress" => Some(Self::InProgress),
            "pending_confirmation" => Some(Self::PendingConfirmation),
            "completed" => Some(Self::Completed),
            "needs_revision" => Some(Self::NeedsRevision),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no transition out of this status is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if the transition `self → next` is a legal edge.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        match (self, next) {
            (Self::New, Self::InProgress | Self::PendingConfirmation) => true,
            (Self::InProgress, Self::PendingConfirmation) => true,
            (Self::PendingConfirmation, Self::Completed | Self::NeedsRevision) => true,
            (Self::NeedsRevision, Self::InProgress) => true,
            (from, Self::Cancelled) if !from.is_terminal() => true,
            _ => false,
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Outcome of a manager's review of a pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationAction {
    /// Completion confirmed.
    Confirmed,
    /// Completion rejected, revision required.
    Rejected,
}

/// Record of a manager's confirm/reject decision on a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationRecord {
    /// Reviewing manager's user ID.
    pub reviewer_id: Uuid,
    /// Confirm or reject.
    pub action: ConfirmationAction,
    /// Optional comment on confirmation.
    pub comment: Option<String>,
    /// Reason, mandatory on rejection.
    pub reason: Option<String>,
    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
}

impl ConfirmationRecord {
    /// Creates a confirmation record.
    pub fn confirmed(reviewer_id: Uuid, comment: Option<String>) -> Self {
        Self {
            reviewer_id,
            action: ConfirmationAction::Confirmed,
            comment,
            reason: None,
            decided_at: Utc::now(),
        }
    }

    /// Creates a rejection record.
    pub fn rejected(reviewer_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            reviewer_id,
            action: ConfirmationAction::Rejected,
            comment: None,
            reason: Some(reason.into()),
            decided_at: Utc::now(),
        }
    }
}

/// A task belonging to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: Uuid,
    /// Task title.
    pub title: String,
    /// Detailed description.
    pub description: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Deadline.
    pub deadline: NaiveDate,
    /// Creating administrator's user ID.
    pub creator_id: Uuid,
    /// Assigned employee's user ID, if any.
    pub assignee_id: Option<Uuid>,
    /// Project this task belongs to.
    pub project_id: Uuid,
    /// Most recent manager review, if any.
    pub last_review: Option<ConfirmationRecord>,
    /// Optimistic-concurrency version, bumped on every store write.
    pub version: u64,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in status `New`.
    pub fn new(
        title: impl Into<String>,
        project_id: Uuid,
        creator_id: Uuid,
        deadline: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            status: TaskStatus::New,
            priority: TaskPriority::default(),
            deadline,
            creator_id,
            assignee_id: None,
            project_id,
            last_review: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, assignee_id: Uuid) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deadline() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    #[test]
    fn test_task_creation() {
        let project_id = Uuid::new_v4();
        let creator_id = Uuid::new_v4();
        let task = Task::new("Fix login flow", project_id, creator_id, deadline())
            .with_priority(TaskPriority::High);

        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.creator_id, creator_id);
        assert!(task.assignee_id.is_none());
        assert_eq!(task.version, 0);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(TaskStatus::PendingConfirmation.as_str(), "pending_confirmation");
        assert_eq!(TaskStatus::parse("needs_revision"), Some(TaskStatus::NeedsRevision));
        assert_eq!(TaskStatus::parse("unknown"), None);
    }

    #[test]
    fn test_legal_transitions() {
        use TaskStatus::*;

        assert!(New.can_transition_to(InProgress));
        assert!(New.can_transition_to(PendingConfirmation));
        assert!(InProgress.can_transition_to(PendingConfirmation));
        assert!(PendingConfirmation.can_transition_to(Completed));
        assert!(PendingConfirmation.can_transition_to(NeedsRevision));
        assert!(NeedsRevision.can_transition_to(InProgress));

        // Every non-terminal status may be cancelled.
        for from in [New, InProgress, PendingConfirmation, NeedsRevision] {
            assert!(from.can_transition_to(Cancelled));
        }
    }

    #[test]
    fn test_illegal_transitions() {
        use TaskStatus::*;

        assert!(!New.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Completed));
        assert!(!NeedsRevision.can_transition_to(Completed));
        assert!(!NeedsRevision.can_transition_to(PendingConfirmation));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(New));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(!TaskStatus::PendingConfirmation.is_terminal());
    }
}
