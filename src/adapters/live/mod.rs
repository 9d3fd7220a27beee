//! Live adapters talking to the real Gerrit instance and git CLI.

pub mod gerrit;
pub mod git;

pub use gerrit::GerritClient;
pub use git::LiveGitExecutor;
