//! Run log for landing-crew.
//!
//! Every stage and cache action is appended to an NDJSON file (one JSON
//! object per line), `.cache/events.ndjson` by default.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (stage_start, stage_complete, ...)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `topic`: the topic the action belongs to
//! - `role`: optional role key for stage events
//! - `details`: freeform object with action-specific details

use crate::agent::Role;
use crate::error::{CrewError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Topic cache reset
    CacheClear,
    /// Agent stage started
    StageStart,
    /// Agent stage finished and cached
    StageComplete,
    /// Agent stage skipped, cached output reused
    StageSkipped,
    /// Landing page files written
    ArtifactsWritten,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::CacheClear => write!(f, "cache_clear"),
            EventAction::StageStart => write!(f, "stage_start"),
            EventAction::StageComplete => write!(f, "stage_complete"),
            EventAction::StageSkipped => write!(f, "stage_skipped"),
            EventAction::ArtifactsWritten => write!(f, "artifacts_written"),
        }
    }
}

/// A run log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Topic being generated.
    pub topic: String,

    /// Role for stage events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event for `topic`, stamped now with the current actor.
    pub fn new(action: EventAction, topic: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            topic: topic.into(),
            role: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CrewError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append-only writer for the run log file.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `event`, creating the file and its directory if needed.
    pub fn append(&self, event: &Event) -> Result<()> {
        append_event(&self.path, event)
    }

    /// Append `event`; failures are logged at warn level and otherwise ignored.
    pub fn record(&self, event: Event) {
        if let Err(e) = self.append(&event) {
            tracing::warn!(action = %event.action, error = %e, "failed to append run log event");
        }
    }
}

/// Append an event as one line to the NDJSON file at `path`.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            CrewError::UserError(format!(
                "failed to create events directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            CrewError::UserError(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        CrewError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        CrewError::UserError(format!(
            "failed to sync events file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read every event from the NDJSON file at `path`.
///
/// A missing file yields an empty list.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(CrewError::UserError(format!(
                "failed to read events file '{}': {}",
                path.display(),
                e
            )));
        }
    };

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                CrewError::UserError(format!(
                    "malformed event in '{}': {}",
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::CacheClear, "Books");

        assert_eq!(event.action, EventAction::CacheClear);
        assert_eq!(event.topic, "Books");
        assert!(!event.actor.is_empty());
        assert!(event.role.is_none());
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn test_event_with_role_and_details() {
        let event = Event::new(EventAction::StageComplete, "Books")
            .with_role(Role::UiUxDesigner)
            .with_details(json!({"chars": 42}));

        assert_eq!(event.role, Some(Role::UiUxDesigner));
        assert_eq!(event.details["chars"], 42);
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::new(EventAction::StageStart, "Travel").with_role(Role::ProductManager);

        let json_line = event.to_ndjson_line().unwrap();

        assert!(!json_line.contains('\n'));
        assert!(json_line.contains("\"stage_start\""));
        assert!(json_line.contains("\"product_manager\""));

        let parsed: Event = serde_json::from_str(&json_line).unwrap();
        assert_eq!(parsed.action, EventAction::StageStart);
        assert_eq!(parsed.topic, "Travel");
    }

    #[test]
    fn test_event_without_role_omits_field() {
        let event = Event::new(EventAction::ArtifactsWritten, "Books");
        let parsed: Value = serde_json::from_str(&event.to_ndjson_line().unwrap()).unwrap();
        assert!(parsed.get("role").is_none());
    }

    #[test]
    fn test_action_display_matches_serde() {
        for action in [
            EventAction::CacheClear,
            EventAction::StageStart,
            EventAction::StageComplete,
            EventAction::StageSkipped,
            EventAction::ArtifactsWritten,
        ] {
            let serialized = serde_json::to_string(&action).unwrap();
            assert_eq!(serialized, format!("\"{}\"", action));
        }
    }

    #[test]
    fn test_append_event_creates_file_and_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("events.ndjson");

        append_event(&path, &Event::new(EventAction::CacheClear, "Books")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_run_log_appends_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let log = RunLog::new(temp_dir.path().join("events.ndjson"));

        log.record(Event::new(EventAction::StageStart, "Books").with_role(Role::ProductManager));
        log.record(Event::new(EventAction::StageComplete, "Books").with_role(Role::ProductManager));

        let events = read_events(log.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, EventAction::StageStart);
        assert_eq!(events[1].action, EventAction::StageComplete);
    }

    #[test]
    fn test_record_swallows_errors() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file").unwrap();
        let log = RunLog::new(blocker.join("events.ndjson"));

        log.record(Event::new(EventAction::CacheClear, "Books"));

        assert!(log.append(&Event::new(EventAction::CacheClear, "Books")).is_err());
    }

    #[test]
    fn test_read_events_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let events = read_events(&temp_dir.path().join("none.ndjson")).unwrap();
        assert!(events.is_empty());
    }
}
