//! Core entity definitions for TaskTracker.
//!
//! This crate defines the data types shared across the TaskTracker
//! workspace: users and their role projections, projects, teams, and
//! tasks with their lifecycle status.

mod project;
mod task;
mod team;
mod user;

pub use project::*;
pub use task::*;
pub use team::*;
pub use user::*;
