//! Implementation of the `landing-crew develop` command.

use super::{load_agents, load_config, resolve_topic};
use crate::agent::CommandRuntime;
use crate::cli::TopicArgs;
use crate::error::Result;
use crate::pipeline::Pipeline;
use std::path::Path;

/// Execute the `landing-crew develop` command.
///
/// Re-runs the frontend engineer against the cached design and rewrites the
/// landing page. Fails if the design stage has not been run.
pub fn cmd_develop(args: TopicArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let topic = resolve_topic(&args.topic)?;
    let agents = load_agents(&config)?;
    let runtime = CommandRuntime::new(config.run_dir(&topic));

    let pipeline = Pipeline::new(config, agents, &topic, runtime)?;
    let files = pipeline.develop()?;

    println!("Landing page for '{}':", topic);
    for file in &files {
        println!("  {}", file.display());
    }

    Ok(())
}
