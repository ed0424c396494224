//! Store trait definitions.

use async_trait::async_trait;
use entities::{Employee, Project, Task, Team, User};
use uuid::Uuid;

use crate::StoreResult;

/// An open transaction against the store.
///
/// Engine operations wrap their read-authorize-write sequence in one
/// transaction so that concurrent transition attempts on the same entity
/// serialize rather than interleave. The original's separate `SaveChanges`
/// flush is folded into [`commit`](StoreTransaction::commit). Dropping an
/// uncommitted transaction rolls it back.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Flushes and commits the transaction.
    async fn commit(self: Box<Self>) -> StoreResult<()>;

    /// Discards all writes made since the transaction began.
    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}

/// Trait for organizational storage operations.
#[async_trait]
pub trait OrgStore: Send + Sync {
    // =========================================================================
    // Transaction boundary
    // =========================================================================

    /// Begins a transaction. Writers serialize on this.
    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>>;

    // =========================================================================
    // User operations (identity & role directory)
    // =========================================================================

    /// Creates a new user.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Gets a user by email.
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Updates a user.
    async fn update_user(&self, user: User) -> StoreResult<User>;

    // =========================================================================
    // Employee operations
    // =========================================================================

    /// Creates a new employee record.
    async fn create_employee(&self, employee: Employee) -> StoreResult<Employee>;

    /// Gets an employee record by user ID.
    async fn get_employee(&self, user_id: Uuid) -> StoreResult<Option<Employee>>;

    /// Updates an employee record.
    async fn update_employee(&self, employee: Employee) -> StoreResult<Employee>;

    /// Lists employees belonging to a team.
    async fn get_employees_by_team(&self, team_id: Uuid) -> StoreResult<Vec<Employee>>;

    // =========================================================================
    // Project operations
    // =========================================================================

    /// Creates a new project.
    async fn create_project(&self, project: Project) -> StoreResult<Project>;

    /// Gets a project by ID.
    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Lists all projects.
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    /// Updates a project.
    async fn update_project(&self, project: Project) -> StoreResult<Project>;

    /// Deletes a project.
    async fn delete_project(&self, id: Uuid) -> StoreResult<()>;

    // =========================================================================
    // Team operations
    // =========================================================================

    /// Creates a new team.
    async fn create_team(&self, team: Team) -> StoreResult<Team>;

    /// Gets a team by ID.
    async fn get_team(&self, id: Uuid) -> StoreResult<Option<Team>>;

    /// Updates a team.
    async fn update_team(&self, team: Team) -> StoreResult<Team>;

    /// Deletes a team.
    async fn delete_team(&self, id: Uuid) -> StoreResult<()>;

    /// Lists teams attached to a project.
    async fn get_teams_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Team>>;

    /// Lists teams led by a manager.
    async fn get_teams_by_manager(&self, manager_id: Uuid) -> StoreResult<Vec<Team>>;

    // =========================================================================
    // Task operations
    // =========================================================================

    /// Creates a new task.
    async fn create_task(&self, task: Task) -> StoreResult<Task>;

    /// Gets a task by ID.
    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Updates a task.
    ///
    /// The write is optimistic: the stored version must match the version
    /// the caller read, otherwise `VersionConflict` is returned and
    /// nothing is written. On success the stored version is bumped.
    async fn update_task(&self, task: Task) -> StoreResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: Uuid) -> StoreResult<()>;

    /// Lists tasks belonging to a project.
    async fn get_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Lists tasks assigned to an employee.
    async fn get_tasks_by_assignee(&self, assignee_id: Uuid) -> StoreResult<Vec<Task>>;
}
