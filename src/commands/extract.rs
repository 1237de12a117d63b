//! Implementation of the `landing-crew extract` command.

use super::{load_config, resolve_topic};
use crate::cli::ExtractArgs;
use crate::error::{CrewError, Result};
use crate::events::{Event, EventAction, RunLog};
use crate::pipeline::publish_artifacts;
use serde_json::json;
use std::path::Path;

/// Execute the `landing-crew extract` command.
///
/// Parses a saved frontend engineer answer and writes the landing page
/// without invoking any agent.
pub fn cmd_extract(args: ExtractArgs, config_path: &Path) -> Result<()> {
    let mut config = load_config(config_path)?;
    let topic = resolve_topic(&args.topic.topic)?;
    if args.no_template {
        config.use_template = false;
    }

    let text = std::fs::read_to_string(&args.file).map_err(|e| {
        CrewError::UserError(format!(
            "failed to read '{}': {}",
            args.file.display(),
            e
        ))
    })?;

    let files = publish_artifacts(&config, &topic, &text)?;
    RunLog::new(&config.events_file).record(
        Event::new(EventAction::ArtifactsWritten, &topic)
            .with_details(json!({ "source": &args.file, "files": &files })),
    );

    println!("Landing page for '{}':", topic);
    for file in &files {
        println!("  {}", file.display());
    }

    Ok(())
}
