//! Task lifecycle engine.
//!
//! Every transition is an atomic read-modify-write: begin a transaction,
//! re-fetch the task (never act on cached status), check the actor's role
//! and the relevant access predicate, validate the status edge, write,
//! commit. Any failure rolls the whole operation back. Notifications are
//! dispatched only after a successful commit.

use std::sync::Arc;

use chrono::NaiveDate;
use entities::{ConfirmationRecord, Task, TaskPriority, TaskStatus, User, UserRole};
use org_store::OrgStore;
use uuid::Uuid;

use crate::tx::settle;
use crate::{
    AccessControl, Notifier, OwnershipResolver, TaskUpdateKind, WorkflowError, WorkflowResult,
};

/// Parameters for creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title.
    pub title: String,
    /// Detailed description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Deadline.
    pub deadline: NaiveDate,
    /// Project the task belongs to.
    pub project_id: Uuid,
}

/// Drives a task through its lifecycle, gated by the access control
/// engine.
pub struct TaskLifecycle {
    store: Arc<dyn OrgStore>,
    access: AccessControl,
    notifier: Arc<dyn Notifier>,
}

impl TaskLifecycle {
    /// Creates a lifecycle engine over the given store and notifier.
    pub fn new(store: Arc<dyn OrgStore>, notifier: Arc<dyn Notifier>) -> Self {
        let access = AccessControl::new(OwnershipResolver::new(store.clone()));
        Self {
            store,
            access,
            notifier,
        }
    }

    /// Creates a task in status `New`. Administrator only; the actor must
    /// have standing over the target project and becomes the creator.
    pub async fn create_task(&self, actor_id: Uuid, new_task: NewTask) -> WorkflowResult<Task> {
        if new_task.title.trim().is_empty() {
            return Err(WorkflowError::invalid("task title must not be empty"));
        }

        let tx = self.store.begin().await?;
        let result = self.create_task_in_tx(actor_id, new_task).await;
        let task = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, project_id = %task.project_id, "task created");
        Ok(task)
    }

    async fn create_task_in_tx(&self, actor_id: Uuid, new_task: NewTask) -> WorkflowResult<Task> {
        self.access
            .require_role(actor_id, UserRole::Administrator)
            .await?;
        if !self
            .access
            .has_project_access(actor_id, new_task.project_id)
            .await?
        {
            return Err(WorkflowError::forbidden("no standing over this project"));
        }

        let mut task = Task::new(new_task.title, new_task.project_id, actor_id, new_task.deadline)
            .with_priority(new_task.priority);
        task.description = new_task.description;

        Ok(self.store.create_task(task).await?)
    }

    /// Assigns an employee as the task's responsible. Administrator only;
    /// the employee must belong to a team attached to the task's project.
    /// Status is unchanged and must still be `New` or `InProgress`.
    pub async fn assign_responsible(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        employee_id: Uuid,
    ) -> WorkflowResult<Task> {
        let tx = self.store.begin().await?;
        let result = self
            .assign_responsible_in_tx(actor_id, task_id, employee_id)
            .await;
        let (task, assignee) = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, assignee_id = %employee_id, "task assigned");
        if let Err(err) = self.notifier.notify_assignee(&task, &assignee).await {
            tracing::warn!(task_id = %task.id, error = %err, "assignee notification failed");
        }
        Ok(task)
    }

    async fn assign_responsible_in_tx(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        employee_id: Uuid,
    ) -> WorkflowResult<(Task, User)> {
        self.access
            .require_role(actor_id, UserRole::Administrator)
            .await?;
        let task = self.require_task(task_id).await?;
        if !self
            .access
            .has_project_access(actor_id, task.project_id)
            .await?
        {
            return Err(WorkflowError::forbidden("no standing over this project"));
        }
        if !matches!(task.status, TaskStatus::New | TaskStatus::InProgress) {
            return Err(WorkflowError::conflict(format!(
                "task cannot be assigned in status {}",
                task.status.as_str()
            )));
        }

        let assignee = self.access.require_user(employee_id).await?;
        if assignee.role != UserRole::Employee {
            return Err(WorkflowError::invalid("target user is not an employee"));
        }
        let employee = self
            .store
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Employee", employee_id))?;
        let ownership = self
            .access
            .resolver()
            .project_ownership(task.project_id)
            .await?;
        if !employee.team_id.is_some_and(|id| ownership.has_team(id)) {
            return Err(WorkflowError::invalid(
                "employee does not belong to a team on this project",
            ));
        }

        let mut task = task;
        task.assignee_id = Some(employee_id);
        let task = self.store.update_task(task).await?;
        Ok((task, assignee))
    }

    /// Moves a task to `InProgress`. Employee only; the actor must own
    /// the task. Legal from `New` and from `NeedsRevision` (resuming
    /// after a rejected confirmation).
    pub async fn start_progress(&self, actor_id: Uuid, task_id: Uuid) -> WorkflowResult<Task> {
        let tx = self.store.begin().await?;
        let result = self
            .transition_as_owner(actor_id, task_id, TaskStatus::InProgress)
            .await;
        let task = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, "task started");
        Ok(task)
    }

    /// Moves a task to `PendingConfirmation`. Employee only; the actor
    /// must own the task; legal from `New` or `InProgress`. Managers of
    /// teams on the task's project are notified.
    pub async fn request_confirmation(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
    ) -> WorkflowResult<Task> {
        let tx = self.store.begin().await?;
        let result = self
            .transition_as_owner(actor_id, task_id, TaskStatus::PendingConfirmation)
            .await;
        let task = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, "confirmation requested");
        self.dispatch_confirmation_needed(&task).await;
        Ok(task)
    }

    async fn transition_as_owner(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        next: TaskStatus,
    ) -> WorkflowResult<Task> {
        self.access.require_role(actor_id, UserRole::Employee).await?;
        let task = self.require_task(task_id).await?;
        if !self.access.owns_task(actor_id, task_id).await? {
            return Err(WorkflowError::forbidden(
                "actor is neither creator nor assignee of this task",
            ));
        }
        ensure_transition(&task, next)?;

        let mut task = task;
        task.status = next;
        Ok(self.store.update_task(task).await?)
    }

    /// Confirms completion: `PendingConfirmation → Completed`. Manager
    /// only; the actor must lead a team attached to the task's project.
    /// The optional comment is recorded on the task.
    pub async fn confirm_completion(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        comment: Option<String>,
    ) -> WorkflowResult<Task> {
        let tx = self.store.begin().await?;
        let result = self
            .review_in_tx(actor_id, task_id, TaskStatus::Completed, |task| {
                task.last_review = Some(ConfirmationRecord::confirmed(actor_id, comment));
            })
            .await;
        let task = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, reviewer_id = %actor_id, "task completion confirmed");
        self.dispatch_update(&task, TaskUpdateKind::Completed).await;
        Ok(task)
    }

    /// Rejects completion: `PendingConfirmation → NeedsRevision`. Manager
    /// only, same gate as confirmation. The reason is mandatory and is
    /// recorded on the task.
    pub async fn reject_completion(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        reason: impl Into<String>,
    ) -> WorkflowResult<Task> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(WorkflowError::invalid("rejection reason must not be empty"));
        }

        let tx = self.store.begin().await?;
        let result = self
            .review_in_tx(actor_id, task_id, TaskStatus::NeedsRevision, |task| {
                task.last_review = Some(ConfirmationRecord::rejected(actor_id, reason));
            })
            .await;
        let task = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, reviewer_id = %actor_id, "task completion rejected");
        self.dispatch_update(&task, TaskUpdateKind::RevisionRequested)
            .await;
        Ok(task)
    }

    async fn review_in_tx(
        &self,
        actor_id: Uuid,
        task_id: Uuid,
        next: TaskStatus,
        record: impl FnOnce(&mut Task) + Send,
    ) -> WorkflowResult<Task> {
        self.access.require_role(actor_id, UserRole::Manager).await?;
        let task = self.require_task(task_id).await?;
        let ownership = self
            .access
            .resolver()
            .project_ownership(task.project_id)
            .await?;
        if !ownership.has_manager(actor_id) {
            return Err(WorkflowError::forbidden(
                "manager of a team on this project required",
            ));
        }
        ensure_transition(&task, next)?;

        let mut task = task;
        task.status = next;
        record(&mut task);
        Ok(self.store.update_task(task).await?)
    }

    /// Cancels a task. Administrator only; legal from any non-terminal
    /// status. A cancelled task accepts no further transitions.
    pub async fn cancel_task(&self, actor_id: Uuid, task_id: Uuid) -> WorkflowResult<Task> {
        let tx = self.store.begin().await?;
        let result = self.cancel_task_in_tx(actor_id, task_id).await;
        let task = settle(tx, result).await?;

        tracing::info!(task_id = %task.id, "task cancelled");
        self.dispatch_update(&task, TaskUpdateKind::Cancelled).await;
        Ok(task)
    }

    async fn cancel_task_in_tx(&self, actor_id: Uuid, task_id: Uuid) -> WorkflowResult<Task> {
        self.access
            .require_role(actor_id, UserRole::Administrator)
            .await?;
        let task = self.require_task(task_id).await?;
        if !self
            .access
            .has_project_access(actor_id, task.project_id)
            .await?
        {
            return Err(WorkflowError::forbidden("no standing over this project"));
        }
        ensure_transition(&task, TaskStatus::Cancelled)?;

        let mut task = task;
        task.status = TaskStatus::Cancelled;
        Ok(self.store.update_task(task).await?)
    }

    /// Lists tasks assigned to the given employee.
    pub async fn tasks_for_assignee(&self, employee_id: Uuid) -> WorkflowResult<Vec<Task>> {
        self.access.require_user(employee_id).await?;
        Ok(self.store.get_tasks_by_assignee(employee_id).await?)
    }

    /// Lists tasks awaiting confirmation on projects whose teams the
    /// given manager leads.
    pub async fn pending_confirmations(&self, manager_id: Uuid) -> WorkflowResult<Vec<Task>> {
        self.access
            .require_role(manager_id, UserRole::Manager)
            .await?;

        let teams = self.store.get_teams_by_manager(manager_id).await?;
        let mut project_ids: Vec<Uuid> = teams.into_iter().filter_map(|t| t.project_id).collect();
        project_ids.sort_unstable();
        project_ids.dedup();

        let mut pending = Vec::new();
        for project_id in project_ids {
            let tasks = self.store.get_tasks_by_project(project_id).await?;
            pending.extend(
                tasks
                    .into_iter()
                    .filter(|t| t.status == TaskStatus::PendingConfirmation),
            );
        }
        Ok(pending)
    }

    async fn require_task(&self, task_id: Uuid) -> WorkflowResult<Task> {
        self.store
            .get_task(task_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Task", task_id))
    }

    /// Notifies the assignee about a task update. Failures are logged,
    /// never propagated.
    async fn dispatch_update(&self, task: &Task, update: TaskUpdateKind) {
        let Some(assignee_id) = task.assignee_id else {
            return;
        };
        match self.store.get_user(assignee_id).await {
            Ok(Some(assignee)) => {
                if let Err(err) = self
                    .notifier
                    .notify_task_update(task, &assignee, update)
                    .await
                {
                    tracing::warn!(task_id = %task.id, error = %err, "update notification failed");
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(task_id = %task.id, error = %err, "assignee lookup failed");
            }
        }
    }

    /// Notifies every manager leading a team on the task's project.
    async fn dispatch_confirmation_needed(&self, task: &Task) {
        let teams = match self.store.get_teams_by_project(task.project_id).await {
            Ok(teams) => teams,
            Err(err) => {
                tracing::warn!(task_id = %task.id, error = %err, "team lookup failed");
                return;
            }
        };
        for team in teams {
            match self.store.get_user(team.manager_id).await {
                Ok(Some(manager)) => {
                    if let Err(err) = self
                        .notifier
                        .notify_confirmation_needed(task, &manager)
                        .await
                    {
                        tracing::warn!(
                            task_id = %task.id,
                            manager_id = %manager.id,
                            error = %err,
                            "confirmation notification failed"
                        );
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(task_id = %task.id, error = %err, "manager lookup failed");
                }
            }
        }
    }
}

/// Validates the status edge, rejecting terminal sources and any edge
/// outside the transition table.
fn ensure_transition(task: &Task, next: TaskStatus) -> WorkflowResult<()> {
    if !task.status.can_transition_to(next) {
        return Err(WorkflowError::InvalidTransition {
            from: task.status,
            to: next,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use entities::{ConfirmationAction, TaskStatus};
    use org_store::OrgStore;
    use uuid::Uuid;

    use crate::notify::FailingNotifier;
    use crate::testutil::fixture;
    use crate::{NotificationEvent, TaskUpdateKind, WorkflowError};

    // Scenario A: administrator creates a task in their own project.
    #[tokio::test]
    async fn test_create_task() {
        let fx = fixture().await;
        let task = fx
            .lifecycle()
            .create_task(fx.admin.id, fx.new_task("Implement invoice export"))
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::New);
        assert_eq!(task.creator_id, fx.admin.id);
        assert_eq!(task.project_id, fx.project.id);
        assert!(task.assignee_id.is_none());
    }

    #[tokio::test]
    async fn test_create_task_requires_administrator() {
        let fx = fixture().await;

        let err = fx
            .lifecycle()
            .create_task(fx.manager.id, fx.new_task("Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_task_requires_project_standing() {
        let fx = fixture().await;

        // An administrator who does not own the project has no standing.
        let err = fx
            .lifecycle()
            .create_task(fx.other_admin.id, fx.new_task("Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_task_missing_project_is_not_found() {
        let fx = fixture().await;
        let mut new_task = fx.new_task("Orphan");
        new_task.project_id = Uuid::new_v4();

        let err = fx
            .lifecycle()
            .create_task(fx.admin.id, new_task)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_task_empty_title_is_invalid() {
        let fx = fixture().await;

        let err = fx
            .lifecycle()
            .create_task(fx.admin.id, fx.new_task("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_assign_responsible_notifies_assignee() {
        let fx = fixture().await;
        let task = fx.task().await;

        let task = fx
            .lifecycle()
            .assign_responsible(fx.admin.id, task.id, fx.employee.id)
            .await
            .unwrap();

        assert_eq!(task.assignee_id, Some(fx.employee.id));
        assert_eq!(task.status, TaskStatus::New);
        assert!(fx.notifier.events().contains(&NotificationEvent::Assigned {
            task_id: task.id,
            user_id: fx.employee.id,
        }));
    }

    #[tokio::test]
    async fn test_assign_responsible_requires_team_on_project() {
        let fx = fixture().await;
        let task = fx.task().await;

        // Employee without a team on this project cannot be assigned.
        let err = fx
            .lifecycle()
            .assign_responsible(fx.admin.id, task.id, fx.loner.id)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Invalid(_)));

        // A manager is not an assignable employee.
        let err = fx
            .lifecycle()
            .assign_responsible(fx.admin.id, task.id, fx.manager.id)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Invalid(_)));
    }

    // Scenario B: the assignee requests confirmation.
    #[tokio::test]
    async fn test_request_confirmation() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;

        let task = fx
            .lifecycle()
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::PendingConfirmation);
        // The team's manager was asked to review.
        assert!(fx
            .notifier
            .events()
            .contains(&NotificationEvent::ConfirmationNeeded {
                task_id: task.id,
                user_id: fx.manager.id,
            }));
    }

    #[tokio::test]
    async fn test_request_confirmation_requires_ownership() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;

        let err = fx
            .lifecycle()
            .request_confirmation(fx.loner.id, task.id)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden(_)));

        let unchanged = fx.store.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, TaskStatus::New);
    }

    #[tokio::test]
    async fn test_request_confirmation_twice_is_conflict() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();
        let err = lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    // Scenario C: a manager leading no team on the project is rejected.
    #[tokio::test]
    async fn test_confirm_requires_team_on_project() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();

        let err = lifecycle
            .confirm_completion(fx.outside_manager.id, task.id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden(_)));

        let err = lifecycle
            .reject_completion(fx.outside_manager.id, task.id, "not good enough")
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Forbidden(_)));

        let unchanged = fx.store.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, TaskStatus::PendingConfirmation);
    }

    #[tokio::test]
    async fn test_confirm_completion() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();
        let task = lifecycle
            .confirm_completion(fx.manager.id, task.id, Some("well done".into()))
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::Completed);
        let review = task.last_review.unwrap();
        assert_eq!(review.action, ConfirmationAction::Confirmed);
        assert_eq!(review.reviewer_id, fx.manager.id);
        assert_eq!(review.comment.as_deref(), Some("well done"));

        assert!(fx.notifier.events().contains(&NotificationEvent::Updated {
            task_id: task.id,
            user_id: fx.employee.id,
            update: TaskUpdateKind::Completed,
        }));
    }

    // Scenario D: rejection moves the task to NeedsRevision; confirming
    // again without going back through InProgress/PendingConfirmation is
    // a conflict.
    #[tokio::test]
    async fn test_reject_then_confirm_is_conflict() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();
        let task = lifecycle
            .reject_completion(fx.manager.id, task.id, "incomplete")
            .await
            .unwrap();

        assert_eq!(task.status, TaskStatus::NeedsRevision);
        let review = task.last_review.clone().unwrap();
        assert_eq!(review.action, ConfirmationAction::Rejected);
        assert_eq!(review.reason.as_deref(), Some("incomplete"));

        let err = lifecycle
            .confirm_completion(fx.manager.id, task.id, None)
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // The full revision cycle: resume, request again, confirm.
        let task = lifecycle
            .start_progress(fx.employee.id, task.id)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();
        let task = lifecycle
            .confirm_completion(fx.manager.id, task.id, None)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();
        let err = lifecycle
            .reject_completion(fx.manager.id, task.id, "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_confirm_from_wrong_state_is_conflict() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;

        // Still `New`, nothing to confirm.
        let err = fx
            .lifecycle()
            .confirm_completion(fx.manager.id, task.id, None)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_terminal_tasks_reject_all_transitions() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        let task = lifecycle.cancel_task(fx.admin.id, task.id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Cancelled);

        let err = lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let err = lifecycle.cancel_task(fx.admin.id, task.id).await.unwrap_err();
        assert!(err.is_conflict());

        let err = lifecycle
            .assign_responsible(fx.admin.id, task.id, fx.employee.id)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_roll_back() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle_with(Arc::new(FailingNotifier));

        let task = lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::PendingConfirmation);

        let stored = fx.store.get_task(task.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::PendingConfirmation);
    }

    #[tokio::test]
    async fn test_pending_confirmations_scoped_to_manager() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;
        let lifecycle = fx.lifecycle();

        lifecycle
            .request_confirmation(fx.employee.id, task.id)
            .await
            .unwrap();

        let pending = lifecycle.pending_confirmations(fx.manager.id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, task.id);

        // A manager with no team on the project sees nothing.
        let pending = lifecycle
            .pending_confirmations(fx.outside_manager.id)
            .await
            .unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn test_tasks_for_assignee() {
        let fx = fixture().await;
        let task = fx.assigned_task().await;

        let tasks = fx.lifecycle().tasks_for_assignee(fx.employee.id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);

        let tasks = fx.lifecycle().tasks_for_assignee(fx.loner.id).await.unwrap();
        assert!(tasks.is_empty());
    }
}
