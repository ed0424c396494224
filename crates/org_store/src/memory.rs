//! In-memory store implementation for testing.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use chrono::Utc;
use entities::{Employee, Project, Task, Team, User};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{OrgStore, StoreError, StoreResult, StoreTransaction};

#[derive(Debug, Default, Clone)]
struct Tables {
    users: HashMap<Uuid, User>,
    employees: HashMap<Uuid, Employee>,
    projects: HashMap<Uuid, Project>,
    teams: HashMap<Uuid, Team>,
    tasks: HashMap<Uuid, Task>,
}

/// In-memory store for testing purposes.
///
/// Transactions serialize on a single lock; [`MemoryOrgStore::begin`]
/// snapshots the tables so rollback (explicit or via drop) restores the
/// pre-transaction state.
#[derive(Debug, Default)]
pub struct MemoryOrgStore {
    tables: Arc<RwLock<Tables>>,
    tx_lock: Arc<Mutex<()>>,
}

impl MemoryOrgStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

struct MemoryTransaction {
    tables: Arc<RwLock<Tables>>,
    snapshot: Option<Tables>,
    _guard: OwnedMutexGuard<()>,
}

impl MemoryTransaction {
    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.tables.write().unwrap() = snapshot;
        }
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn commit(self: Box<Self>) -> StoreResult<()> {
        let mut this = self;
        this.snapshot = None;
        tracing::debug!("transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StoreResult<()> {
        let mut this = self;
        this.restore();
        tracing::debug!("transaction rolled back");
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        // Uncommitted transaction: implicit rollback.
        self.restore();
    }
}

#[async_trait]
impl OrgStore for MemoryOrgStore {
    // =========================================================================
    // Transaction boundary
    // =========================================================================

    async fn begin(&self) -> StoreResult<Box<dyn StoreTransaction>> {
        let guard = self.tx_lock.clone().lock_owned().await;
        let snapshot = self.tables.read().unwrap().clone();
        tracing::debug!("transaction started");
        Ok(Box::new(MemoryTransaction {
            tables: self.tables.clone(),
            snapshot: Some(snapshot),
            _guard: guard,
        }))
    }

    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut tables = self.tables.write().unwrap();
        if tables.users.contains_key(&user.id) {
            return Err(StoreError::already_exists("User", user.id.to_string()));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::already_exists("User", user.email.clone()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut tables = self.tables.write().unwrap();
        if !tables.users.contains_key(&user.id) {
            return Err(StoreError::not_found("User", user.id.to_string()));
        }
        let mut user = user;
        user.updated_at = Utc::now();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    // =========================================================================
    // Employee operations
    // =========================================================================

    async fn create_employee(&self, employee: Employee) -> StoreResult<Employee> {
        let mut tables = self.tables.write().unwrap();
        if tables.employees.contains_key(&employee.user_id) {
            return Err(StoreError::already_exists(
                "Employee",
                employee.user_id.to_string(),
            ));
        }
        tables.employees.insert(employee.user_id, employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, user_id: Uuid) -> StoreResult<Option<Employee>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.employees.get(&user_id).cloned())
    }

    async fn update_employee(&self, employee: Employee) -> StoreResult<Employee> {
        let mut tables = self.tables.write().unwrap();
        if !tables.employees.contains_key(&employee.user_id) {
            return Err(StoreError::not_found(
                "Employee",
                employee.user_id.to_string(),
            ));
        }
        let mut employee = employee;
        employee.updated_at = Utc::now();
        tables.employees.insert(employee.user_id, employee.clone());
        Ok(employee)
    }

    async fn get_employees_by_team(&self, team_id: Uuid) -> StoreResult<Vec<Employee>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .employees
            .values()
            .filter(|e| e.team_id == Some(team_id))
            .cloned()
            .collect())
    }

    // =========================================================================
    // Project operations
    // =========================================================================

    async fn create_project(&self, project: Project) -> StoreResult<Project> {
        let mut tables = self.tables.write().unwrap();
        if tables.projects.contains_key(&project.id) {
            return Err(StoreError::already_exists(
                "Project",
                project.id.to_string(),
            ));
        }
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let tables = self.tables.read().unwrap();
        let mut projects: Vec<Project> = tables.projects.values().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn update_project(&self, project: Project) -> StoreResult<Project> {
        let mut tables = self.tables.write().unwrap();
        if !tables.projects.contains_key(&project.id) {
            return Err(StoreError::not_found("Project", project.id.to_string()));
        }
        let mut project = project;
        project.updated_at = Utc::now();
        tables.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap();
        if tables.projects.remove(&id).is_none() {
            return Err(StoreError::not_found("Project", id.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Team operations
    // =========================================================================

    async fn create_team(&self, team: Team) -> StoreResult<Team> {
        let mut tables = self.tables.write().unwrap();
        if tables.teams.contains_key(&team.id) {
            return Err(StoreError::already_exists("Team", team.id.to_string()));
        }
        tables.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn get_team(&self, id: Uuid) -> StoreResult<Option<Team>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.teams.get(&id).cloned())
    }

    async fn update_team(&self, team: Team) -> StoreResult<Team> {
        let mut tables = self.tables.write().unwrap();
        if !tables.teams.contains_key(&team.id) {
            return Err(StoreError::not_found("Team", team.id.to_string()));
        }
        let mut team = team;
        team.updated_at = Utc::now();
        tables.teams.insert(team.id, team.clone());
        Ok(team)
    }

    async fn delete_team(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap();
        if tables.teams.remove(&id).is_none() {
            return Err(StoreError::not_found("Team", id.to_string()));
        }
        Ok(())
    }

    async fn get_teams_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Team>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .teams
            .values()
            .filter(|t| t.project_id == Some(project_id))
            .cloned()
            .collect())
    }

    async fn get_teams_by_manager(&self, manager_id: Uuid) -> StoreResult<Vec<Team>> {
        let tables = self.tables.read().unwrap();
        Ok(tables
            .teams
            .values()
            .filter(|t| t.manager_id == manager_id)
            .cloned()
            .collect())
    }

    // =========================================================================
    // Task operations
    // =========================================================================

    async fn create_task(&self, task: Task) -> StoreResult<Task> {
        let mut tables = self.tables.write().unwrap();
        if tables.tasks.contains_key(&task.id) {
            return Err(StoreError::already_exists("Task", task.id.to_string()));
        }
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tables = self.tables.read().unwrap();
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn update_task(&self, task: Task) -> StoreResult<Task> {
        let mut tables = self.tables.write().unwrap();
        let stored = tables
            .tasks
            .get(&task.id)
            .ok_or_else(|| StoreError::not_found("Task", task.id.to_string()))?;
        if stored.version != task.version {
            return Err(StoreError::version_conflict("Task", task.id.to_string()));
        }
        let mut task = task;
        task.version += 1;
        task.updated_at = Utc::now();
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap();
        if tables.tasks.remove(&id).is_none() {
            return Err(StoreError::not_found("Task", id.to_string()));
        }
        Ok(())
    }

    async fn get_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().unwrap();
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn get_tasks_by_assignee(&self, assignee_id: Uuid) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().unwrap();
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| t.assignee_id == Some(assignee_id))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }
}
