//! Shared test fixture: a small organization with one project, one
//! attached team, and users in every role on both sides of the access
//! boundary.

use std::sync::Arc;

use chrono::NaiveDate;
use entities::{Employee, Project, Task, TaskPriority, Team, User, UserRole};
use org_store::{MemoryOrgStore, OrgStore};

use crate::{
    AccessControl, MemoryNotifier, NewTask, Notifier, OwnershipResolver, ProjectManagement,
    TaskLifecycle, TeamManagement,
};

pub(crate) struct Fixture {
    pub store: Arc<MemoryOrgStore>,
    pub notifier: Arc<MemoryNotifier>,
    /// Administrator owning `project`.
    pub admin: User,
    /// Administrator owning nothing.
    pub other_admin: User,
    /// Manager leading `team`.
    pub manager: User,
    /// Manager leading `outside_team`, which is not attached to `project`.
    pub outside_manager: User,
    /// Employee belonging to `team`.
    pub employee: User,
    /// Employee belonging to no team.
    pub loner: User,
    pub project: Project,
    pub team: Team,
    pub outside_team: Team,
}

pub(crate) async fn fixture() -> Fixture {
    let store = Arc::new(MemoryOrgStore::new());

    let admin = store
        .create_user(User::new(
            "alice@corp.test",
            "hash",
            "Alice Admin",
            UserRole::Administrator,
        ))
        .await
        .unwrap();
    let other_admin = store
        .create_user(User::new(
            "oscar@corp.test",
            "hash",
            "Oscar Admin",
            UserRole::Administrator,
        ))
        .await
        .unwrap();
    let manager = store
        .create_user(User::new(
            "mara@corp.test",
            "hash",
            "Mara Manager",
            UserRole::Manager,
        ))
        .await
        .unwrap();
    let outside_manager = store
        .create_user(User::new(
            "oleg@corp.test",
            "hash",
            "Oleg Manager",
            UserRole::Manager,
        ))
        .await
        .unwrap();
    let employee = store
        .create_user(User::new(
            "eve@corp.test",
            "hash",
            "Eve Employee",
            UserRole::Employee,
        ))
        .await
        .unwrap();
    let loner = store
        .create_user(User::new(
            "liam@corp.test",
            "hash",
            "Liam Loner",
            UserRole::Employee,
        ))
        .await
        .unwrap();

    let project = store
        .create_project(Project::new(
            "Billing revamp",
            admin.id,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        ))
        .await
        .unwrap();
    let team = store
        .create_team(Team::new("Backend", manager.id).with_project(project.id))
        .await
        .unwrap();
    let outside_team = store
        .create_team(Team::new("Platform", outside_manager.id))
        .await
        .unwrap();

    store
        .create_employee(Employee::new(employee.id).with_team(team.id))
        .await
        .unwrap();
    store.create_employee(Employee::new(loner.id)).await.unwrap();

    Fixture {
        store,
        notifier: Arc::new(MemoryNotifier::new()),
        admin,
        other_admin,
        manager,
        outside_manager,
        employee,
        loner,
        project,
        team,
        outside_team,
    }
}

impl Fixture {
    pub fn resolver(&self) -> OwnershipResolver {
        OwnershipResolver::new(self.store.clone())
    }

    pub fn access(&self) -> AccessControl {
        AccessControl::new(self.resolver())
    }

    pub fn lifecycle(&self) -> TaskLifecycle {
        TaskLifecycle::new(self.store.clone(), self.notifier.clone())
    }

    pub fn lifecycle_with(&self, notifier: Arc<dyn Notifier>) -> TaskLifecycle {
        TaskLifecycle::new(self.store.clone(), notifier)
    }

    pub fn projects(&self) -> ProjectManagement {
        ProjectManagement::new(self.store.clone())
    }

    pub fn teams(&self) -> TeamManagement {
        TeamManagement::new(self.store.clone())
    }

    pub fn new_task(&self, title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
            priority: TaskPriority::Medium,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            project_id: self.project.id,
        }
    }

    /// A fresh task created by `admin` in `project`, still unassigned.
    pub async fn task(&self) -> Task {
        self.lifecycle()
            .create_task(self.admin.id, self.new_task("Implement invoice export"))
            .await
            .unwrap()
    }

    /// A fresh task with `employee` as the responsible.
    pub async fn assigned_task(&self) -> Task {
        let task = self.task().await;
        self.lifecycle()
            .assign_responsible(self.admin.id, task.id, self.employee.id)
            .await
            .unwrap()
    }
}
