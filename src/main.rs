use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use git_semver::cli::{orchestration, Cli};
use git_semver::config::env_lookup;
use git_semver::logging::LogConfig;
use git_semver::ui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = LogConfig::from_env(env_lookup, dirs::home_dir().as_deref()).init();

    match run(&cli) {
        Ok(version) => {
            ui::display_version(&version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ui::display_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    tracing::debug!(?cli, "starting");
    Ok(orchestration::run(cli)?)
}
