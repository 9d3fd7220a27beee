//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `gerrit-resource`.
#[derive(Debug, Parser)]
#[command(name = "gerrit-resource", version, about = "Concourse resource for Gerrit changes")]
pub struct Cli {
    /// The resource operation to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// The three operations of the resource contract.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report versions newer than the supplied cursor.
    Check,
    /// Fetch a change revision into a destination directory.
    In {
        /// Directory to materialize the revision into.
        destination: PathBuf,
    },
    /// Post a review for a previously fetched revision.
    Out {
        /// Directory containing the build's input resources.
        sources: PathBuf,
    },
}
