//! Implementation of the `landing-crew run` command.

use super::{load_agents, load_config, resolve_topic};
use crate::agent::CommandRuntime;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::pipeline::{Pipeline, RunOptions};
use std::path::Path;

/// Execute the `landing-crew run` command.
///
/// Runs every stage for the topic, reusing cached stages unless `--fresh`
/// is set, then writes the landing page.
pub fn cmd_run(args: RunArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let topic = resolve_topic(&args.topic.topic)?;
    let agents = load_agents(&config)?;
    let runtime = CommandRuntime::new(config.run_dir(&topic));

    let pipeline = Pipeline::new(config, agents, &topic, runtime)?;
    let summary = pipeline.run(RunOptions { fresh: args.fresh })?;

    for role in &summary.skipped {
        println!("Reused cached {} output", role);
    }
    for role in &summary.ran {
        println!("Ran {}", role);
    }
    println!();
    println!("Landing page for '{}':", topic);
    for file in &summary.files {
        println!("  {}", file.display());
    }

    Ok(())
}
