//! Project and team administration.
//!
//! Projects are mutated only by their owning administrator, teams only
//! by their leading manager. Compound operations (deleting a project or
//! a team detaches everything that references it first) run in a single
//! transaction.

use std::sync::Arc;

use chrono::NaiveDate;
use entities::{Project, Team, UserRole};
use org_store::OrgStore;
use uuid::Uuid;

use crate::tx::settle;
use crate::{AccessControl, OwnershipResolver, WorkflowError, WorkflowResult};

/// Parameters for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Start date.
    pub start_date: NaiveDate,
    /// Optional end date; a past end date marks the project closed.
    pub end_date: Option<NaiveDate>,
}

/// Fields of a project that may be edited after creation. `None` leaves
/// the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub end_date: Option<NaiveDate>,
}

/// Administers projects and their team attachments.
pub struct ProjectManagement {
    store: Arc<dyn OrgStore>,
    access: AccessControl,
}

impl ProjectManagement {
    /// Creates a project management engine over the given store.
    pub fn new(store: Arc<dyn OrgStore>) -> Self {
        let access = AccessControl::new(OwnershipResolver::new(store.clone()));
        Self { store, access }
    }

    /// Creates a project owned by the acting administrator.
    pub async fn create_project(
        &self,
        actor_id: Uuid,
        new_project: NewProject,
    ) -> WorkflowResult<Project> {
        if new_project.name.trim().is_empty() {
            return Err(WorkflowError::invalid("project name must not be empty"));
        }

        let tx = self.store.begin().await?;
        let result = self.create_project_in_tx(actor_id, new_project).await;
        let project = settle(tx, result).await?;

        tracing::info!(project_id = %project.id, administrator_id = %actor_id, "project created");
        Ok(project)
    }

    async fn create_project_in_tx(
        &self,
        actor_id: Uuid,
        new_project: NewProject,
    ) -> WorkflowResult<Project> {
        self.access
            .require_role(actor_id, UserRole::Administrator)
            .await?;

        let mut project = Project::new(new_project.name, actor_id, new_project.start_date);
        project.description = new_project.description;
        project.end_date = new_project.end_date;

        Ok(self.store.create_project(project).await?)
    }

    /// Edits a project. Only its owning administrator may do so.
    pub async fn update_project(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        update: ProjectUpdate,
    ) -> WorkflowResult<Project> {
        let tx = self.store.begin().await?;
        let result = self.update_project_in_tx(actor_id, project_id, update).await;
        let project = settle(tx, result).await?;

        tracing::info!(project_id = %project.id, "project updated");
        Ok(project)
    }

    async fn update_project_in_tx(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        update: ProjectUpdate,
    ) -> WorkflowResult<Project> {
        let mut project = self.require_owned_project(actor_id, project_id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(WorkflowError::invalid("project name must not be empty"));
            }
            project.name = name;
        }
        if let Some(description) = update.description {
            project.description = Some(description);
        }
        if let Some(end_date) = update.end_date {
            project.end_date = Some(end_date);
        }

        Ok(self.store.update_project(project).await?)
    }

    /// Attaches a team to a project. Only the owning administrator may
    /// attach; a team already attached somewhere must be detached first.
    pub async fn assign_team_to_project(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        team_id: Uuid,
    ) -> WorkflowResult<Team> {
        let tx = self.store.begin().await?;
        let result = self
            .assign_team_in_tx(actor_id, project_id, team_id)
            .await;
        let team = settle(tx, result).await?;

        tracing::info!(project_id = %project_id, team_id = %team.id, "team attached to project");
        Ok(team)
    }

    async fn assign_team_in_tx(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
        team_id: Uuid,
    ) -> WorkflowResult<Team> {
        self.require_owned_project(actor_id, project_id).await?;

        let mut team = self
            .store
            .get_team(team_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Team", team_id))?;
        if team.project_id.is_some() {
            return Err(WorkflowError::conflict(
                "team is already attached to a project",
            ));
        }

        team.project_id = Some(project_id);
        Ok(self.store.update_team(team).await?)
    }

    /// Deletes a project after detaching every attached team. Rejected
    /// while the project still has tasks in a non-terminal status;
    /// finished tasks are removed along with the project.
    pub async fn delete_project(&self, actor_id: Uuid, project_id: Uuid) -> WorkflowResult<()> {
        let tx = self.store.begin().await?;
        let result = self.delete_project_in_tx(actor_id, project_id).await;
        settle(tx, result).await?;

        tracing::info!(project_id = %project_id, "project deleted");
        Ok(())
    }

    async fn delete_project_in_tx(&self, actor_id: Uuid, project_id: Uuid) -> WorkflowResult<()> {
        self.require_owned_project(actor_id, project_id).await?;

        let tasks = self.store.get_tasks_by_project(project_id).await?;
        if tasks.iter().any(|t| !t.status.is_terminal()) {
            return Err(WorkflowError::conflict(
                "project still has unfinished tasks",
            ));
        }
        for task in tasks {
            self.store.delete_task(task.id).await?;
        }
        for mut team in self.store.get_teams_by_project(project_id).await? {
            team.project_id = None;
            self.store.update_team(team).await?;
        }
        self.store.delete_project(project_id).await?;
        Ok(())
    }

    async fn require_owned_project(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
    ) -> WorkflowResult<Project> {
        self.access
            .require_role(actor_id, UserRole::Administrator)
            .await?;
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Project", project_id))?;
        if project.administrator_id != actor_id {
            return Err(WorkflowError::forbidden(
                "only the owning administrator may manage this project",
            ));
        }
        Ok(project)
    }
}

/// Parameters for creating a team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    /// Team name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Fields of a team that may be edited after creation.
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Administers teams and their membership.
pub struct TeamManagement {
    store: Arc<dyn OrgStore>,
    access: AccessControl,
}

impl TeamManagement {
    /// Creates a team management engine over the given store.
    pub fn new(store: Arc<dyn OrgStore>) -> Self {
        let access = AccessControl::new(OwnershipResolver::new(store.clone()));
        Self { store, access }
    }

    /// Creates a team led by the acting manager.
    pub async fn create_team(&self, actor_id: Uuid, new_team: NewTeam) -> WorkflowResult<Team> {
        if new_team.name.trim().is_empty() {
            return Err(WorkflowError::invalid("team name must not be empty"));
        }

        let tx = self.store.begin().await?;
        let result = self.create_team_in_tx(actor_id, new_team).await;
        let team = settle(tx, result).await?;

        tracing::info!(team_id = %team.id, manager_id = %actor_id, "team created");
        Ok(team)
    }

    async fn create_team_in_tx(&self, actor_id: Uuid, new_team: NewTeam) -> WorkflowResult<Team> {
        self.access.require_role(actor_id, UserRole::Manager).await?;

        let mut team = Team::new(new_team.name, actor_id);
        team.description = new_team.description;

        Ok(self.store.create_team(team).await?)
    }

    /// Edits a team. Only its leading manager may do so.
    pub async fn update_team(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        update: TeamUpdate,
    ) -> WorkflowResult<Team> {
        let tx = self.store.begin().await?;
        let result = self.update_team_in_tx(actor_id, team_id, update).await;
        let team = settle(tx, result).await?;

        tracing::info!(team_id = %team.id, "team updated");
        Ok(team)
    }

    async fn update_team_in_tx(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        update: TeamUpdate,
    ) -> WorkflowResult<Team> {
        let mut team = self.require_managed_team(actor_id, team_id).await?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(WorkflowError::invalid("team name must not be empty"));
            }
            team.name = name;
        }
        if let Some(description) = update.description {
            team.description = Some(description);
        }

        Ok(self.store.update_team(team).await?)
    }

    /// Hands the team over to another manager.
    pub async fn reassign_manager(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        new_manager_id: Uuid,
    ) -> WorkflowResult<Team> {
        let tx = self.store.begin().await?;
        let result = self
            .reassign_manager_in_tx(actor_id, team_id, new_manager_id)
            .await;
        let team = settle(tx, result).await?;

        tracing::info!(team_id = %team.id, manager_id = %new_manager_id, "team manager reassigned");
        Ok(team)
    }

    async fn reassign_manager_in_tx(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        new_manager_id: Uuid,
    ) -> WorkflowResult<Team> {
        let mut team = self.require_managed_team(actor_id, team_id).await?;

        let successor = self.access.require_user(new_manager_id).await?;
        if successor.role != UserRole::Manager {
            return Err(WorkflowError::invalid("target user is not a manager"));
        }

        team.manager_id = new_manager_id;
        Ok(self.store.update_team(team).await?)
    }

    /// Adds an employee to the team. An employee belongs to at most one
    /// team at a time.
    pub async fn add_member(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
    ) -> WorkflowResult<()> {
        let tx = self.store.begin().await?;
        let result = self.add_member_in_tx(actor_id, team_id, user_id).await;
        settle(tx, result).await?;

        tracing::info!(team_id = %team_id, user_id = %user_id, "member added to team");
        Ok(())
    }

    async fn add_member_in_tx(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
    ) -> WorkflowResult<()> {
        self.require_managed_team(actor_id, team_id).await?;

        let user = self.access.require_user(user_id).await?;
        if user.role != UserRole::Employee {
            return Err(WorkflowError::invalid("target user is not an employee"));
        }
        let mut employee = self
            .store
            .get_employee(user_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Employee", user_id))?;
        match employee.team_id {
            Some(current) if current == team_id => {
                return Err(WorkflowError::conflict("employee is already in this team"));
            }
            Some(_) => {
                return Err(WorkflowError::conflict(
                    "employee already belongs to another team",
                ));
            }
            None => {}
        }

        employee.team_id = Some(team_id);
        self.store.update_employee(employee).await?;
        Ok(())
    }

    /// Removes an employee from the team.
    pub async fn remove_member(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
    ) -> WorkflowResult<()> {
        let tx = self.store.begin().await?;
        let result = self.remove_member_in_tx(actor_id, team_id, user_id).await;
        settle(tx, result).await?;

        tracing::info!(team_id = %team_id, user_id = %user_id, "member removed from team");
        Ok(())
    }

    async fn remove_member_in_tx(
        &self,
        actor_id: Uuid,
        team_id: Uuid,
        user_id: Uuid,
    ) -> WorkflowResult<()> {
        self.require_managed_team(actor_id, team_id).await?;

        let mut employee = self
            .store
            .get_employee(user_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Employee", user_id))?;
        if employee.team_id != Some(team_id) {
            return Err(WorkflowError::not_found("TeamMember", user_id));
        }

        employee.team_id = None;
        self.store.update_employee(employee).await?;
        Ok(())
    }

    /// Deletes a team after detaching every member.
    pub async fn delete_team(&self, actor_id: Uuid, team_id: Uuid) -> WorkflowResult<()> {
        let tx = self.store.begin().await?;
        let result = self.delete_team_in_tx(actor_id, team_id).await;
        settle(tx, result).await?;

        tracing::info!(team_id = %team_id, "team deleted");
        Ok(())
    }

    async fn delete_team_in_tx(&self, actor_id: Uuid, team_id: Uuid) -> WorkflowResult<()> {
        self.require_managed_team(actor_id, team_id).await?;

        for mut employee in self.store.get_employees_by_team(team_id).await? {
            employee.team_id = None;
            self.store.update_employee(employee).await?;
        }
        self.store.delete_team(team_id).await?;
        Ok(())
    }

    async fn require_managed_team(&self, actor_id: Uuid, team_id: Uuid) -> WorkflowResult<Team> {
        self.access.require_role(actor_id, UserRole::Manager).await?;
        let team = self
            .store
            .get_team(team_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Team", team_id))?;
        if team.manager_id != actor_id {
            return Err(WorkflowError::forbidden(
                "only the leading manager may manage this team",
            ));
        }
        Ok(team)
    }
}
