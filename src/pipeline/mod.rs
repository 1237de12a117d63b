//! Pipeline driver.
//!
//! Runs the crew for one topic: product manager, then UI/UX designer, then
//! frontend engineer. Each stage reads the previous stage's output from the
//! topic cache and stores its own output there, so an interrupted run can
//! resume where it stopped. The engineer's output is parsed into sections
//! and written as the landing page.


use crate::agent::prompt::{StageContext, render_prompt};
use crate::agent::{AgentRequest, AgentRuntime, AgentsConfig, Role};
use crate::cache::TopicCache;
use crate::config::Config;
use crate::error::{CrewError, Result};
use crate::events::{Event, EventAction, RunLog};
use crate::sections;
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for [`Pipeline::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Clear the topic cache before running, so every stage runs again.
    pub fresh: bool,
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Stages that invoked their agent.
    pub ran: Vec<Role>,
    /// Stages answered from the cache.
    pub skipped: Vec<Role>,
    /// Landing page files written.
    pub files: Vec<PathBuf>,
}

/// Drives the crew for a single topic.
pub struct Pipeline<R: AgentRuntime> {
    config: Config,
    agents: AgentsConfig,
    cache: TopicCache,
    runtime: R,
    log: RunLog,
}

impl<R: AgentRuntime> Pipeline<R> {
    /// Open the topic cache and assemble a pipeline for `topic`.
    pub fn new(config: Config, agents: AgentsConfig, topic: &str, runtime: R) -> Result<Self> {
        let cache = TopicCache::open(&config.cache_dir, topic)?;
        let log = RunLog::new(&config.events_file);
        Ok(Self {
            config,
            agents,
            cache,
            runtime,
            log,
        })
    }

    pub fn topic(&self) -> &str {
        self.cache.topic()
    }

    pub fn cache(&self) -> &TopicCache {
        &self.cache
    }

    /// Run one stage and cache its output.
    ///
    /// Fails with [`CrewError::MissingUpstreamOutput`] if the role's upstream
    /// stage has no cached output. Agent failures are not retried.
    pub fn run_stage(&self, role: Role) -> Result<String> {
        let context = match role.upstream() {
            Some(upstream) => Some(
                self.cache
                    .get(upstream.as_str())
                    .ok_or(CrewError::MissingUpstreamOutput(upstream))?,
            ),
            None => None,
        };

        let profile = self.agents.profile(role)?;
        let task = self.agents.task(role);
        let stage = StageContext::new(role, self.topic(), profile, &task, context).map_err(|e| {
            CrewError::UserError(format!("agents.yaml entry for '{}' is invalid: {}", role, e))
        })?;
        let prompt = render_prompt(&self.agents, &stage)?;

        self.log
            .record(Event::new(EventAction::StageStart, self.topic()).with_role(role));
        info!(topic = %self.topic(), role = %role, "running stage");

        let request = AgentRequest {
            role,
            topic: self.topic(),
            profile,
            prompt: &prompt,
            timeout_seconds: profile.effective_timeout(&self.agents.defaults),
        };
        let output = self.runtime.run(&request)?;

        if !self.cache.put(role.as_str(), &output) {
            return Err(CrewError::CacheError(format!(
                "failed to store {} output in '{}'",
                role,
                self.cache.path().display()
            )));
        }

        self.log.record(
            Event::new(EventAction::StageComplete, self.topic())
                .with_role(role)
                .with_details(json!({ "chars": output.chars().count() })),
        );
        info!(topic = %self.topic(), role = %role, chars = output.chars().count(), "stage complete");

        Ok(output)
    }

    /// Run every stage in order and publish the engineer's output.
    ///
    /// Without `fresh`, stages whose output is already cached are skipped.
    pub fn run(&self, options: RunOptions) -> Result<RunSummary> {
        if options.fresh {
            if !self.cache.clear() {
                return Err(CrewError::CacheError(format!(
                    "failed to clear '{}'",
                    self.cache.path().display()
                )));
            }
            self.log
                .record(Event::new(EventAction::CacheClear, self.topic()));
        }

        let mut summary = RunSummary::default();
        let mut last_output = String::new();

        for role in Role::ALL {
            if !options.fresh
                && let Some(cached) = self.cache.get(role.as_str())
            {
                debug!(topic = %self.topic(), role = %role, "reusing cached output");
                self.log
                    .record(Event::new(EventAction::StageSkipped, self.topic()).with_role(role));
                summary.skipped.push(role);
                last_output = cached;
                continue;
            }

            last_output = self.run_stage(role)?;
            summary.ran.push(role);
        }

        summary.files = self.publish(&last_output)?;
        Ok(summary)
    }

    /// Re-run only the frontend engineer stage and publish its output.
    ///
    /// The UI/UX designer's output must already be cached.
    pub fn develop(&self) -> Result<Vec<PathBuf>> {
        let output = self.run_stage(Role::FrontendEngineer)?;
        self.publish(&output)
    }

    /// Parse `engineer_output` and write the landing page for this topic.
    pub fn publish(&self, engineer_output: &str) -> Result<Vec<PathBuf>> {
        let files = publish_artifacts(&self.config, self.topic(), engineer_output)?;
        self.log.record(
            Event::new(EventAction::ArtifactsWritten, self.topic())
                .with_details(json!({ "files": &files })),
        );
        Ok(files)
    }
}

/// Parse `engineer_output` and write its sections under the topic's landing
/// directory, wrapping the HTML in the configured page template.
///
/// Fails if no section was found or a file could not be written. Files
/// written before a failure are left in place.
pub fn publish_artifacts(config: &Config, topic: &str, engineer_output: &str) -> Result<Vec<PathBuf>> {
    let parsed = sections::parse(engineer_output);
    if parsed.is_empty() {
        return Err(CrewError::WriteError(
            "no html, css or js code blocks found in the frontend engineer output".to_string(),
        ));
    }

    let template = config.html_template(&parsed)?;
    let title = config.page_title(topic);
    let directory = config.landing_dir(topic);

    let files = config
        .writer()
        .write_files(&parsed, &directory, template.as_ref(), Some(&title))?;

    info!(topic, directory = %directory.display(), files = files.len(), "landing page written");
    Ok(files)
}
