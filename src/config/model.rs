//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a crew run.
///
/// This struct represents the contents of `crew.yaml`. Relative paths are
/// resolved against the working directory. Unknown fields in the YAML are
/// ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Locations
    // =========================================================================
    /// Directory holding the per-topic cache documents.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Directory the `{topic}_landing_page` folders are created in.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Agent profiles and tasks.
    #[serde(default = "default_agents_file")]
    pub agents_file: PathBuf,

    /// Prompts and agent logs, one subdirectory per topic.
    #[serde(default = "default_runs_dir")]
    pub runs_dir: PathBuf,

    /// NDJSON run log.
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    // =========================================================================
    // Page output
    // =========================================================================
    /// Page template with `{title}` and `{body}`; the built-in shell if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Whether generated HTML is wrapped in the page template.
    #[serde(default = "default_true")]
    pub use_template: bool,

    /// Page title, rendered with `{topic}`.
    #[serde(default = "default_title_format")]
    pub title_format: String,

    /// File name of the generated stylesheet.
    #[serde(default = "default_stylesheet_name")]
    pub stylesheet_name: String,

    /// File name of the generated script.
    #[serde(default = "default_script_name")]
    pub script_name: String,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".cache")
}
fn default_output_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_agents_file() -> PathBuf {
    PathBuf::from("agents.yaml")
}
fn default_runs_dir() -> PathBuf {
    PathBuf::from(".cache/runs")
}
fn default_events_file() -> PathBuf {
    PathBuf::from(".cache/events.ndjson")
}
fn default_true() -> bool {
    true
}
fn default_title_format() -> String {
    "{topic} Homepage".to_string()
}
fn default_stylesheet_name() -> String {
    "styles.css".to_string()
}
fn default_script_name() -> String {
    "script.js".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            output_root: default_output_root(),
            agents_file: default_agents_file(),
            runs_dir: default_runs_dir(),
            events_file: default_events_file(),
            template: None,
            use_template: default_true(),
            title_format: default_title_format(),
            stylesheet_name: default_stylesheet_name(),
            script_name: default_script_name(),
        }
    }
}
