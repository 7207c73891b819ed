//! Main workflow orchestration logic
//!
//! Resolves settings once, dispatches the parsed command and reads back the
//! stored version, which is what every successful invocation prints.

use tracing::{debug, info};

use crate::cli::{BumpCommand, Cli, Command};
use crate::config::{self, FileConfig, Settings};
use crate::domain::{self, BumpAxis};
use crate::error::{Result, SemverError};
use crate::git::{Git2Repository, Repository};
use crate::{lifecycle, store, sync, tagging};

/// Run `cli` against the repository containing the current directory
///
/// # Returns
/// * `Ok(String)` - Stored version after the command
pub fn run(cli: &Cli) -> Result<String> {
    let cwd = std::env::current_dir()?;
    let project =
        Git2Repository::discover(&cwd).map_err(|_| SemverError::InvalidRepo(cwd.clone()))?;
    let file = config::load_config(cli.config.as_deref(), project.workdir()?)?;

    execute(&project, cli.command.as_ref(), &file, config::env_lookup)
}

/// Run one command against `project`
///
/// # Arguments
/// * `project` - Project repository
/// * `command` - Parsed command; `None` only reads the version
/// * `file` - Configuration file contents
/// * `lookup` - Environment accessor used for settings resolution
pub fn execute<R, F>(
    project: &R,
    command: Option<&Command>,
    file: &FileConfig,
    lookup: F,
) -> Result<String>
where
    R: Repository + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    let settings = Settings::resolve(lookup, file, project)?;
    debug!(?settings, ?command, "resolved settings");

    match command {
        None => {}
        Some(Command::Init { version, force }) => {
            lifecycle::run_init(project, version, *force, &settings)?;
        }
        Some(Command::Bump { axis }) => {
            let worktree = store::open_worktree(&settings)?;
            run_bump(&worktree, &settings, axis)?;
        }
        Some(Command::Tag { force }) => {
            tagging::run_tag(project, *force, &settings)?;
        }
        Some(Command::Push) => {
            let worktree = store::open_worktree(&settings)?;
            sync::push(project, &worktree, &settings)?;
        }
    }

    store::read(&settings)
}

/// `bump`: derive the next version and store it on `worktree`
///
/// `pre` without `--prefix` uses the configured default prefix.
///
/// # Returns
/// * `Ok(String)` - The bumped version
pub fn run_bump<W: Repository + ?Sized>(
    worktree: &W,
    settings: &Settings,
    command: &BumpCommand,
) -> Result<String> {
    let axis = command.axis();
    let prefix = match axis {
        BumpAxis::Pre => Some(command.prefix().unwrap_or(settings.pre_prefix.as_str())),
        _ => None,
    };
    debug!(%axis, ?prefix, "bump");

    let current = domain::parse(&store::read(settings)?)?;
    let next = domain::bump(&current, axis, prefix)?.to_string();
    store::write(worktree, settings, &next, true)?;

    info!(from = %current, to = %next, "bumped");
    Ok(next)
}
