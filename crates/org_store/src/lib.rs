//! Storage abstraction for TaskTracker.
//!
//! This crate defines the [`OrgStore`] trait the workflow engine is
//! written against, the [`StoreTransaction`] boundary that makes each
//! engine operation an atomic read-modify-write, and an in-memory
//! implementation used by tests.

mod error;
mod memory;
mod traits;

pub use error::*;
pub use memory::*;
pub use traits::*;
