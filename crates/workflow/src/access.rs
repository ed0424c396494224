//! Access control engine.
//!
//! Three predicates sit in front of every mutating operation: project
//! standing, task ownership and team management. Centralizing them gives
//! a single auditable authorization surface instead of ad hoc checks
//! scattered per operation. A predicate returns `false` for denial and
//! errors only on malformed input, such as a non-existent target.

use entities::{User, UserRole};
use org_store::OrgStore;
use uuid::Uuid;

use crate::{OwnershipResolver, WorkflowError, WorkflowResult};

/// Pure authorization decisions over the ownership graph.
#[derive(Clone)]
pub struct AccessControl {
    resolver: OwnershipResolver,
}

impl AccessControl {
    /// Creates an access control engine over the given resolver.
    pub fn new(resolver: OwnershipResolver) -> Self {
        Self { resolver }
    }

    /// Returns the underlying resolver.
    pub fn resolver(&self) -> &OwnershipResolver {
        &self.resolver
    }

    /// True iff the actor is the project's administrator, manages a team
    /// attached to the project, or belongs to such a team as an employee.
    pub async fn has_project_access(
        &self,
        actor_id: Uuid,
        project_id: Uuid,
    ) -> WorkflowResult<bool> {
        let ownership = self.resolver.project_ownership(project_id).await?;
        if ownership.administrator_id == actor_id || ownership.has_manager(actor_id) {
            return Ok(true);
        }
        if let Some(employee) = self.resolver.store().get_employee(actor_id).await? {
            if let Some(team_id) = employee.team_id {
                return Ok(ownership.has_team(team_id));
            }
        }
        Ok(false)
    }

    /// True iff the actor created the task or is its current assignee.
    pub async fn owns_task(&self, actor_id: Uuid, task_id: Uuid) -> WorkflowResult<bool> {
        let ownership = self.resolver.task_ownership(task_id).await?;
        Ok(ownership.creator_id == actor_id || ownership.assignee_id == Some(actor_id))
    }

    /// True iff the actor is the team's manager.
    pub async fn manages_team(&self, actor_id: Uuid, team_id: Uuid) -> WorkflowResult<bool> {
        let ownership = self.resolver.team_ownership(team_id).await?;
        Ok(ownership.manager_id == actor_id)
    }

    /// Fetches a user, mapping absence to `NotFound`.
    pub(crate) async fn require_user(&self, user_id: Uuid) -> WorkflowResult<User> {
        self.resolver
            .store()
            .get_user(user_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("User", user_id))
    }

    /// Fetches a user and requires the given role, mapping a mismatch to
    /// `Forbidden`.
    pub(crate) async fn require_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> WorkflowResult<User> {
        let user = self.require_user(user_id).await?;
        if user.role != role {
            return Err(WorkflowError::forbidden(format!(
                "{} role required",
                role.as_str()
            )));
        }
        Ok(user)
    }
}
