//! Implementation of the `landing-crew cache` commands.

use super::{load_config, resolve_topic};
use crate::cache::TopicCache;
use crate::cli::TopicArgs;
use crate::error::{CrewError, Result};
use crate::events::{Event, EventAction, RunLog};
use std::path::Path;

/// Execute the `landing-crew cache show` command.
///
/// Prints each cached stage with its length and the first 100 characters.
pub fn cmd_cache_show(args: TopicArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let topic = resolve_topic(&args.topic)?;
    let cache = TopicCache::open(&config.cache_dir, &topic)?;

    let summary = cache.summary().ok_or_else(|| {
        CrewError::CacheError(format!(
            "cannot read '{}'; run `landing-crew cache clear --topic \"{}\"` to reset it",
            cache.path().display(),
            topic
        ))
    })?;

    println!("Cache for '{}' ({})", topic, cache.path().display());
    if summary.is_empty() {
        println!();
        println!("  (empty)");
        return Ok(());
    }

    for entry in &summary {
        println!();
        println!("{}: {} characters", entry.role, entry.chars);
        println!("  {}", entry.preview.replace('\n', "\n  "));
    }

    Ok(())
}

/// Execute the `landing-crew cache clear` command.
pub fn cmd_cache_clear(args: TopicArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let topic = resolve_topic(&args.topic)?;
    let cache = TopicCache::open(&config.cache_dir, &topic)?;

    if !cache.clear() {
        return Err(CrewError::CacheError(format!(
            "failed to clear '{}'",
            cache.path().display()
        )));
    }
    RunLog::new(&config.events_file).record(Event::new(EventAction::CacheClear, &topic));

    println!("Cleared cache for '{}'", topic);
    Ok(())
}
