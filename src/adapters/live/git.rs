//! Live git adapter shelling out to the `git` CLI.

use std::process::Command;

use crate::error::{Error, Result};
use crate::ports::{GitExecutor, GitOutput};

/// Runs real `git` subprocesses, blocking until they exit.
pub struct LiveGitExecutor;

impl GitExecutor for LiveGitExecutor {
    fn run(&self, args: &[String]) -> Result<GitOutput> {
        let output = Command::new("git")
            .args(args)
            .output()
            .map_err(|err| Error::Git(format!("failed to spawn git: {err}")))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(GitOutput { exit_code: output.status.code().unwrap_or(-1), output: combined })
    }
}
