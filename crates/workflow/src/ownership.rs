//! Ownership graph resolver.
//!
//! Read-only projections answering "who stands over this entity": a
//! project resolves to its administrator and attached teams, a team to
//! its manager and members, a task to its project, creator and assignee.
//! Lookup misses surface as `NotFound`; there are no silent defaults.
//! All lookups are idempotent reads with no side effects.

use std::sync::Arc;

use entities::Team;
use org_store::OrgStore;
use uuid::Uuid;

use crate::{WorkflowError, WorkflowResult};

/// Ownership projection of a project.
#[derive(Debug, Clone)]
pub struct ProjectOwnership {
    /// Owning administrator's user ID.
    pub administrator_id: Uuid,
    /// Teams currently attached to the project.
    pub teams: Vec<Team>,
}

impl ProjectOwnership {
    /// Returns true if the given user manages any attached team.
    pub fn has_manager(&self, user_id: Uuid) -> bool {
        self.teams.iter().any(|t| t.manager_id == user_id)
    }

    /// Returns true if the given team is attached to the project.
    pub fn has_team(&self, team_id: Uuid) -> bool {
        self.teams.iter().any(|t| t.id == team_id)
    }
}

/// Ownership projection of a team.
#[derive(Debug, Clone)]
pub struct TeamOwnership {
    /// Leading manager's user ID.
    pub manager_id: Uuid,
    /// User IDs of member employees.
    pub member_ids: Vec<Uuid>,
}

/// Ownership projection of a task.
#[derive(Debug, Clone)]
pub struct TaskOwnership {
    /// Project the task belongs to.
    pub project_id: Uuid,
    /// Creating administrator's user ID.
    pub creator_id: Uuid,
    /// Assigned employee's user ID, if any.
    pub assignee_id: Option<Uuid>,
}

/// Resolves the project→teams→employees and task→project chains.
#[derive(Clone)]
pub struct OwnershipResolver {
    store: Arc<dyn OrgStore>,
}

impl OwnershipResolver {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<dyn OrgStore>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &Arc<dyn OrgStore> {
        &self.store
    }

    /// Resolves a project's administrator and attached teams.
    pub async fn project_ownership(&self, project_id: Uuid) -> WorkflowResult<ProjectOwnership> {
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Project", project_id))?;
        let teams = self.store.get_teams_by_project(project_id).await?;
        Ok(ProjectOwnership {
            administrator_id: project.administrator_id,
            teams,
        })
    }

    /// Resolves a team's manager and member employees.
    pub async fn team_ownership(&self, team_id: Uuid) -> WorkflowResult<TeamOwnership> {
        let team = self
            .store
            .get_team(team_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Team", team_id))?;
        let members = self.store.get_employees_by_team(team_id).await?;
        Ok(TeamOwnership {
            manager_id: team.manager_id,
            member_ids: members.into_iter().map(|e| e.user_id).collect(),
        })
    }

    /// Resolves a task's project, creator and assignee.
    pub async fn task_ownership(&self, task_id: Uuid) -> WorkflowResult<TaskOwnership> {
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Task", task_id))?;
        Ok(TaskOwnership {
            project_id: task.project_id,
            creator_id: task.creator_id,
            assignee_id: task.assignee_id,
        })
    }
}
