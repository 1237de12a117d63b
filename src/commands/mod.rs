//! Command implementations for landing-crew.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the loading steps they share.

mod cache;
mod develop;
mod extract;
mod run;
mod topics;


use crate::agent::AgentsConfig;
use crate::cli::{CacheAction, CacheCommand, Command};
use crate::config::Config;
use crate::error::{CrewError, Result};
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config_path: &Path) -> Result<()> {
    match command {
        Command::Run(args) => run::cmd_run(args, config_path),
        Command::Develop(args) => develop::cmd_develop(args, config_path),
        Command::Extract(args) => extract::cmd_extract(args, config_path),
        Command::Cache(cache_cmd) => dispatch_cache(cache_cmd, config_path),
        Command::Topics => topics::cmd_topics(),
    }
}

/// Dispatch cache subcommands.
fn dispatch_cache(cache_cmd: CacheCommand, config_path: &Path) -> Result<()> {
    match cache_cmd.action {
        CacheAction::Show(args) => cache::cmd_cache_show(args, config_path),
        CacheAction::Clear(args) => cache::cmd_cache_clear(args, config_path),
    }
}

/// Load `crew.yaml`, falling back to defaults when the file is absent.
fn load_config(config_path: &Path) -> Result<Config> {
    Config::load_or_default(config_path)
}

/// Load the agents file named by `config`; it must exist.
fn load_agents(config: &Config) -> Result<AgentsConfig> {
    AgentsConfig::load(&config.agents_file)?.ok_or_else(|| {
        CrewError::UserError(format!(
            "agents file '{}' not found.\n\n\
             Fix: create it with an entry (role, goal, backstory, command) for each of\n\
             product_manager, ui_ux_designer and frontend_engineer.",
            config.agents_file.display()
        ))
    })
}

/// Trimmed topic, rejecting blank input. Topics outside the catalogue are
/// allowed with a warning.
fn resolve_topic(topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(CrewError::UserError(
            "topic cannot be empty.\n\nUse `landing-crew topics` to list the built-in topics."
                .to_string(),
        ));
    }
    if !crate::topics::is_known(topic) {
        tracing::warn!(topic, "topic is not in the built-in catalogue");
    }
    Ok(topic.to_string())
}
