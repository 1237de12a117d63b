//! CLI argument parsing for landing-crew.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::topics::DEFAULT_TOPIC;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// landing-crew: generate a landing page with a crew of agents.
///
/// A product manager writes requirements, a UI/UX designer turns them into a
/// design, and a frontend engineer implements it. Each stage's output is
/// cached per topic, and the engineer's code blocks are written as
/// index.html, a stylesheet and a script.
#[derive(Parser, Debug)]
#[command(name = "landing-crew")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the crew configuration file (defaults apply if it is absent).
    #[arg(long, global = true, default_value = "crew.yaml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for landing-crew.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full crew and write the landing page.
    ///
    /// Stages whose output is already cached are skipped unless `--fresh`
    /// is given.
    Run(RunArgs),

    /// Re-run only the frontend engineer against the cached design.
    Develop(TopicArgs),

    /// Write a landing page from a saved frontend engineer answer.
    ///
    /// No agent is invoked.
    Extract(ExtractArgs),

    /// Inspect or reset a topic's cache.
    Cache(CacheCommand),

    /// List the built-in topics.
    Topics,
}

/// Topic selection shared by several commands.
#[derive(Args, Debug, Clone)]
pub struct TopicArgs {
    /// Topic of the landing page.
    #[arg(short, long, default_value = DEFAULT_TOPIC)]
    pub topic: String,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub topic: TopicArgs,

    /// Clear the topic's cache first so every stage runs again.
    #[arg(long)]
    pub fresh: bool,
}

/// Arguments for the `extract` command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File containing the frontend engineer's answer.
    pub file: PathBuf,

    #[command(flatten)]
    pub topic: TopicArgs,

    /// Write the extracted HTML as-is instead of wrapping it in the page template.
    #[arg(long)]
    pub no_template: bool,
}

/// Cache subcommand wrapper.
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Available cache actions.
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show each cached stage's length and a preview.
    Show(TopicArgs),

    /// Remove every cached stage for the topic.
    Clear(TopicArgs),
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
