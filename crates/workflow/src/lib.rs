//! Authorization and task-lifecycle engine for TaskTracker.
//!
//! The engine decides which role may act on which entity and drives the
//! task confirmation workflow. It is written against the [`org_store`]
//! seams only; any persistence layer or transport can sit behind it.
//!
//! Every operation takes an explicit actor ID. There is no ambient
//! "current user" anywhere in this crate.

mod access;
mod error;
mod lifecycle;
mod management;
mod notify;
mod ownership;
mod tx;

#[cfg(test)]
pub(crate) mod testutil;

pub use access::*;
pub use error::*;
pub use lifecycle::*;
pub use management::*;
pub use notify::*;
pub use ownership::*;
