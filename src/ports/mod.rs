//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the resource logic and an
//! external system (the Gerrit REST API, the git CLI). Implementations
//! live in `src/adapters/`; tests substitute in-memory fakes so that the
//! handlers never depend on process-global state.

pub mod gerrit;
pub mod git;

pub use gerrit::ReviewService;
pub use git::{GitExecutor, GitOutput};
