//! Command line surface
//!
//! - This module - clap argument model
//! - `orchestration` - Dispatch of a parsed command to the version workflow

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::BumpAxis;

pub mod orchestration;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "git-semver",
    version,
    about = "Manage the semantic version of a git repository in a dedicated semver branch"
)]
pub struct Cli {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    /// Without a command the current version is printed
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the initial semantic version
    Init {
        #[arg(long, default_value = "0.0.0", help = "Semantic version to set as the initial")]
        version: String,

        #[arg(
            long,
            help = "Force set the semantic version - required if a semantic version is already set"
        )]
        force: bool,
    },

    /// Increment the current semantic version
    Bump {
        #[command(subcommand)]
        axis: BumpCommand,
    },

    /// Create tag at HEAD of the current branch with the current semantic version prefixed with 'v'
    Tag {
        #[arg(
            long,
            help = "Force set the tag - required if HEAD on the current branch is already tagged"
        )]
        force: bool,
    },

    /// Push the semver branch commits and all version tags to the remote
    Push,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BumpCommand {
    /// Increment the MAJOR version
    Major,
    /// Increment the MINOR version
    Minor,
    /// Increment the PATCH version
    Patch,
    /// Drop the PRERELEASE, keeping MAJOR.MINOR.PATCH
    Final,
    /// Increment the PRERELEASE version
    Pre {
        #[arg(long, env = "SEMVER_PRE_PREFIX", help = "PRERELEASE prefix [default: pre]")]
        prefix: Option<String>,
    },
}

impl BumpCommand {
    pub fn axis(&self) -> BumpAxis {
        match self {
            BumpCommand::Major => BumpAxis::Major,
            BumpCommand::Minor => BumpAxis::Minor,
            BumpCommand::Patch => BumpAxis::Patch,
            BumpCommand::Final => BumpAxis::Final,
            BumpCommand::Pre { .. } => BumpAxis::Pre,
        }
    }

    /// Prefix given on the command line (or through its environment variable)
    pub fn prefix(&self) -> Option<&str> {
        match self {
            BumpCommand::Pre { prefix } => prefix.as_deref().filter(|p| !p.is_empty()),
            _ => None,
        }
    }
}
