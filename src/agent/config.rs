//! Agent configuration schema.
//!
//! This module defines the `agents.yaml` file, which describes every role in
//! the crew, the task each role performs, and how the agent is invoked.
//!
//! # File Format
//!
//! ```yaml
//! agents:
//!   product_manager:
//!     role: "Product Manager"
//!     goal: "Define clear requirements for a {topic} landing page"
//!     backstory: "You have shipped dozens of consumer landing pages."
//!     command: "llm -f {prompt_file}"
//!     timeout_seconds: 300
//!
//!   frontend_engineer:
//!     role: "Frontend Engineer"
//!     goal: "Implement the design in HTML, CSS and JavaScript"
//!     command: "llm -f {prompt_file}"
//!
//! tasks:
//!   development_task:
//!     description: "Build the {topic} landing page from the design."
//!     expected_output: "Fenced html, css and js code blocks."
//!
//! defaults:
//!   timeout_seconds: 600
//!
//! prompt_templates:
//!   terse: |
//!     {description}
//!     {context}
//! ```
//!
//! # Command Placeholders
//!
//! - `{prompt_file}` - Absolute path to the rendered prompt
//! - `{role}` - Role key (e.g., "ui_ux_designer")
//! - `{topic}` - Topic of the landing page

use super::role::Role;
use crate::error::{CrewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Default timeout for agent execution in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 600;

/// Configuration for the whole crew, loaded from `agents.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Agent profiles keyed by role key.
    pub agents: BTreeMap<String, AgentProfile>,

    /// Task definitions keyed by task key.
    pub tasks: BTreeMap<String, TaskDefinition>,

    /// Default settings applied to all agents.
    pub defaults: AgentDefaults,

    /// Prompt templates keyed by name.
    pub prompt_templates: BTreeMap<String, String>,
}

/// Default settings for agent execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDefaults {
    /// Default timeout in seconds.
    pub timeout_seconds: u64,

    /// Default prompt template name.
    pub prompt_template: String,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            prompt_template: "default".to_string(),
        }
    }
}

/// Profile for a single agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Human-readable title, e.g. "UI/UX Designer".
    #[serde(default)]
    pub role: String,

    /// What the agent is trying to achieve. May reference `{topic}`.
    #[serde(default)]
    pub goal: String,

    /// Persona background. May reference `{topic}`.
    #[serde(default)]
    pub backstory: String,

    /// Command template run to invoke the agent.
    pub command: String,

    /// Timeout in seconds (overrides default if set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Environment variables to set for the agent process.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environment: HashMap<String, String>,

    /// Prompt template to use (overrides default if set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

impl AgentProfile {
    /// Get the effective timeout for this agent.
    pub fn effective_timeout(&self, defaults: &AgentDefaults) -> u64 {
        self.timeout_seconds.unwrap_or(defaults.timeout_seconds)
    }

    /// Get the effective prompt template name for this agent.
    pub fn effective_prompt_template<'a>(&'a self, defaults: &'a AgentDefaults) -> &'a str {
        self.prompt_template
            .as_deref()
            .unwrap_or(&defaults.prompt_template)
    }
}

/// What a role is asked to produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Task instructions. May reference `{topic}`.
    #[serde(default)]
    pub description: String,

    /// Shape of the expected answer. May reference `{topic}`.
    #[serde(default)]
    pub expected_output: String,
}

impl TaskDefinition {
    /// Built-in task used when `agents.yaml` does not define one for `role`.
    pub fn builtin(role: Role) -> Self {
        let (description, expected_output) = match role {
            Role::ProductManager => (
                "Write the product requirements for a landing page about {topic}. \
                 Cover the audience, the value proposition, the page sections and \
                 the primary call to action.",
                "A structured requirements document in markdown.",
            ),
            Role::UiUxDesigner => (
                "Design the {topic} landing page from the product requirements. \
                 Describe layout, typography, colour palette and each section's \
                 content and interactions.",
                "A design specification in markdown a frontend engineer can implement.",
            ),
            Role::FrontendEngineer => (
                "Implement the {topic} landing page from the design specification \
                 using plain HTML, CSS and JavaScript.",
                "Three fenced code blocks: ```html (page body), ```css and ```javascript.",
            ),
        };
        Self {
            description: description.to_string(),
            expected_output: expected_output.to_string(),
        }
    }
}

impl AgentsConfig {
    /// Load agents config from a YAML file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CrewError::UserError(format!(
                "failed to read agents config '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml(&content)?;
        Ok(Some(config))
    }

    /// Parse agents config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AgentsConfig = serde_yaml::from_str(yaml)
            .map_err(|e| CrewError::UserError(format!("failed to parse agents.yaml: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the agents configuration.
    ///
    /// Validation rules:
    /// - Agent keys must be known role keys
    /// - Task keys must be known task keys
    /// - Command templates must not be empty
    /// - Timeouts must be positive
    /// - Prompt template references must resolve
    pub fn validate(&self) -> Result<()> {
        if self.defaults.timeout_seconds == 0 {
            return Err(CrewError::UserError(
                "agents.yaml validation failed: defaults.timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        for (key, agent) in &self.agents {
            if Role::from_str(key).is_none() {
                return Err(CrewError::UserError(format!(
                    "agents.yaml validation failed: unknown agent '{}' (expected one of: {})",
                    key,
                    role_keys()
                )));
            }

            if agent.command.trim().is_empty() {
                return Err(CrewError::UserError(format!(
                    "agents.yaml validation failed: agent '{}' has empty command",
                    key
                )));
            }

            if agent.timeout_seconds == Some(0) {
                return Err(CrewError::UserError(format!(
                    "agents.yaml validation failed: agent '{}' has timeout_seconds of 0",
                    key
                )));
            }

            let template = agent.effective_prompt_template(&self.defaults);
            if template != "default" && !self.prompt_templates.contains_key(template) {
                return Err(CrewError::UserError(format!(
                    "agents.yaml validation failed: agent '{}' references unknown prompt_template '{}'",
                    key, template
                )));
            }
        }

        for key in self.tasks.keys() {
            if !Role::ALL.iter().any(|r| r.task_key() == key) {
                return Err(CrewError::UserError(format!(
                    "agents.yaml validation failed: unknown task '{}'",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Profile for `role`, or a user error naming the missing entry.
    pub fn profile(&self, role: Role) -> Result<&AgentProfile> {
        self.agents.get(role.as_str()).ok_or_else(|| {
            CrewError::UserError(format!(
                "agents.yaml has no agent '{}'.\n\
                 Configured agents: {}",
                role,
                if self.agents.is_empty() {
                    "(none)".to_string()
                } else {
                    self.agents.keys().cloned().collect::<Vec<_>>().join(", ")
                }
            ))
        })
    }

    /// Task for `role`: the configured one, or the built-in default.
    pub fn task(&self, role: Role) -> TaskDefinition {
        self.tasks
            .get(role.task_key())
            .cloned()
            .unwrap_or_else(|| TaskDefinition::builtin(role))
    }

    /// Prompt template text for `profile`.
    pub fn prompt_template_for(&self, profile: &AgentProfile) -> &str {
        let name = profile.effective_prompt_template(&self.defaults);
        self.prompt_templates
            .get(name)
            .map(String::as_str)
            .unwrap_or(default_prompt_template_content())
    }
}

fn role_keys() -> String {
    Role::ALL
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Default prompt template content.
pub fn default_prompt_template_content() -> &'static str {
    r#"You are the {agent_role} on a small web team building a landing page about {topic}.

Goal: {goal}

{backstory}

# Task
{description}

# Expected output
{expected_output}

# Input from the previous stage
{context}
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_YAML: &str = r#"
agents:
  product_manager:
    role: "Product Manager"
    goal: "Define requirements for {topic}"
    command: "llm -f {prompt_file}"
  ui_ux_designer:
    role: "UI/UX Designer"
    command: "llm -f {prompt_file}"
    timeout_seconds: 120
    prompt_template: terse
  frontend_engineer:
    role: "Frontend Engineer"
    command: "llm -f {prompt_file}"
    environment:
      LLM_MODEL: "large"
tasks:
  design_task:
    description: "Design a {topic} page"
    expected_output: "Markdown"
defaults:
  timeout_seconds: 300
prompt_templates:
  terse: "{description}\n{context}"
"#;

    #[test]
    fn parses_full_config() {
        let config = AgentsConfig::from_yaml(FULL_YAML).unwrap();

        assert_eq!(config.agents.len(), 3);
        let designer = config.profile(Role::UiUxDesigner).unwrap();
        assert_eq!(designer.role, "UI/UX Designer");
        assert_eq!(designer.effective_timeout(&config.defaults), 120);
        assert_eq!(
            config.prompt_template_for(designer),
            "{description}\n{context}"
        );

        let engineer = config.profile(Role::FrontendEngineer).unwrap();
        assert_eq!(engineer.effective_timeout(&config.defaults), 300);
        assert_eq!(engineer.environment.get("LLM_MODEL").unwrap(), "large");
        assert_eq!(
            config.prompt_template_for(engineer),
            default_prompt_template_content()
        );
    }

    #[test]
    fn configured_task_overrides_builtin() {
        let config = AgentsConfig::from_yaml(FULL_YAML).unwrap();

        assert_eq!(config.task(Role::UiUxDesigner).description, "Design a {topic} page");
        assert_eq!(
            config.task(Role::ProductManager),
            TaskDefinition::builtin(Role::ProductManager)
        );
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = AgentsConfig::from_yaml("").unwrap();

        assert!(config.agents.is_empty());
        assert_eq!(config.defaults.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.defaults.prompt_template, "default");
    }

    #[test]
    fn rejects_unknown_agent() {
        let yaml = "agents:\n  architect:\n    command: \"echo hi\"\n";
        let err = AgentsConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown agent 'architect'"));
    }

    #[test]
    fn rejects_empty_command() {
        let yaml = "agents:\n  product_manager:\n    command: \"  \"\n";
        let err = AgentsConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("empty command"));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let yaml = "agents:\n  product_manager:\n    command: \"x\"\n    timeout_seconds: 0\n";
        assert!(AgentsConfig::from_yaml(yaml).is_err());

        let yaml = "defaults:\n  timeout_seconds: 0\n";
        assert!(AgentsConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn rejects_unknown_prompt_template() {
        let yaml = "agents:\n  product_manager:\n    command: \"x\"\n    prompt_template: missing\n";
        let err = AgentsConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown prompt_template 'missing'"));
    }

    #[test]
    fn rejects_unknown_task() {
        let yaml = "tasks:\n  deploy_task:\n    description: \"ship it\"\n";
        let err = AgentsConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown task 'deploy_task'"));
    }

    #[test]
    fn missing_profile_is_user_error() {
        let config = AgentsConfig::default();
        let err = config.profile(Role::FrontendEngineer).unwrap_err();
        assert!(err.to_string().contains("no agent 'frontend_engineer'"));
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn load_missing_file_is_none() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let loaded = AgentsConfig::load(temp_dir.path().join("agents.yaml")).unwrap();
        assert!(loaded.is_none());
    }
}
