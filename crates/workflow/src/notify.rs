//! Notification sink.
//!
//! Notifications are fire-and-forget: the engine logs a failed dispatch
//! and moves on; a notifier error never rolls back the business
//! transaction that triggered it.

use std::env;
use std::sync::Mutex;

use async_trait::async_trait;
use entities::{Task, User};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a notification transport.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Delivery failed.
    #[error("notification transport failed: {0}")]
    Transport(String),

    /// Transport misconfigured.
    #[error("notification configuration error: {0}")]
    Config(String),
}

/// Kind of task update being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskUpdateKind {
    /// Task completion was confirmed.
    Completed,
    /// Task completion was rejected, revision required.
    RevisionRequested,
    /// Task was cancelled.
    Cancelled,
}

impl TaskUpdateKind {
    /// Human-readable label for message bodies and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::RevisionRequested => "revision_requested",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Sink for workflow notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tells an employee they were assigned a task.
    async fn notify_assignee(&self, task: &Task, assignee: &User) -> Result<(), NotifyError>;

    /// Tells the assignee their task changed.
    async fn notify_task_update(
        &self,
        task: &Task,
        assignee: &User,
        update: TaskUpdateKind,
    ) -> Result<(), NotifyError>;

    /// Tells a manager a task awaits their confirmation.
    async fn notify_confirmation_needed(
        &self,
        task: &Task,
        manager: &User,
    ) -> Result<(), NotifyError>;
}

/// Notifier that writes structured log lines instead of sending mail.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates a new log notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_assignee(&self, task: &Task, assignee: &User) -> Result<(), NotifyError> {
        tracing::info!(task_id = %task.id, recipient = %assignee.email, "task assigned");
        Ok(())
    }

    async fn notify_task_update(
        &self,
        task: &Task,
        assignee: &User,
        update: TaskUpdateKind,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            task_id = %task.id,
            recipient = %assignee.email,
            update = update.as_str(),
            "task updated"
        );
        Ok(())
    }

    async fn notify_confirmation_needed(
        &self,
        task: &Task,
        manager: &User,
    ) -> Result<(), NotifyError> {
        tracing::info!(task_id = %task.id, recipient = %manager.email, "confirmation needed");
        Ok(())
    }
}

/// SMTP transport settings for a mail-based notifier living outside
/// this core.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SmtpSettings {
    /// SMTP host.
    pub host: String,
    /// SMTP port.
    pub port: u16,
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Whether to use TLS.
    pub use_ssl: bool,
    /// Sender address.
    pub from_email: String,
}

impl SmtpSettings {
    /// Loads settings from `TASKTRACKER_SMTP_*` environment variables.
    pub fn from_env() -> Result<Self, NotifyError> {
        let require = |key: &str| {
            env::var(key).map_err(|_| NotifyError::Config(format!("{key} is required")))
        };

        Ok(Self {
            host: require("TASKTRACKER_SMTP_HOST")?,
            port: env::var("TASKTRACKER_SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .map_err(|_| NotifyError::Config("TASKTRACKER_SMTP_PORT must be a port".into()))?,
            username: require("TASKTRACKER_SMTP_USERNAME")?,
            password: require("TASKTRACKER_SMTP_PASSWORD")?,
            use_ssl: env::var("TASKTRACKER_SMTP_USE_SSL")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(true),
            from_email: require("TASKTRACKER_SMTP_FROM")?,
        })
    }
}

/// A recorded notification, for assertions in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// An employee was told about a new assignment.
    Assigned { task_id: Uuid, user_id: Uuid },
    /// The assignee was told about a task update.
    Updated {
        task_id: Uuid,
        user_id: Uuid,
        update: TaskUpdateKind,
    },
    /// A manager was asked to confirm a task.
    ConfirmationNeeded { task_id: Uuid, user_id: Uuid },
}

/// In-memory notifier for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    events: Mutex<Vec<NotificationEvent>>,
}

impl MemoryNotifier {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events recorded so far.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn notify_assignee(&self, task: &Task, assignee: &User) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotificationEvent::Assigned {
            task_id: task.id,
            user_id: assignee.id,
        });
        Ok(())
    }

    async fn notify_task_update(
        &self,
        task: &Task,
        assignee: &User,
        update: TaskUpdateKind,
    ) -> Result<(), NotifyError> {
        self.events.lock().unwrap().push(NotificationEvent::Updated {
            task_id: task.id,
            user_id: assignee.id,
            update,
        });
        Ok(())
    }

    async fn notify_confirmation_needed(
        &self,
        task: &Task,
        manager: &User,
    ) -> Result<(), NotifyError> {
        self.events
            .lock()
            .unwrap()
            .push(NotificationEvent::ConfirmationNeeded {
                task_id: task.id,
                user_id: manager.id,
            });
        Ok(())
    }
}

/// Notifier whose every dispatch fails, for failure-isolation tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingNotifier;

#[cfg(test)]
#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_assignee(&self, _task: &Task, _assignee: &User) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp unreachable".into()))
    }

    async fn notify_task_update(
        &self,
        _task: &Task,
        _assignee: &User,
        _update: TaskUpdateKind,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp unreachable".into()))
    }

    async fn notify_confirmation_needed(
        &self,
        _task: &Task,
        _manager: &User,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp unreachable".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use entities::UserRole;

    #[tokio::test]
    async fn test_memory_notifier_records_events() {
        let notifier = MemoryNotifier::new();
        let task = Task::new(
            "Task",
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        );
        let user = User::new("e@example.com", "hash", "Eve", UserRole::Employee);

        notifier.notify_assignee(&task, &user).await.unwrap();
        notifier
            .notify_task_update(&task, &user, TaskUpdateKind::Completed)
            .await
            .unwrap();

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            NotificationEvent::Assigned {
                task_id: task.id,
                user_id: user.id
            }
        );
    }

    #[test]
    fn test_smtp_settings_from_env_requires_host() {
        env::remove_var("TASKTRACKER_SMTP_HOST");
        assert!(matches!(
            SmtpSettings::from_env(),
            Err(NotifyError::Config(_))
        ));
    }
}
