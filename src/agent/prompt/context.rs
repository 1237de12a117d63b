//! Stage context for prompt generation.
//!
//! Collects everything one stage's prompt can reference: the topic, the
//! agent's persona, the task text and the upstream stage's output.

use super::template::{TemplateError, render_template, vars};
use crate::agent::config::{AgentProfile, TaskDefinition};
use crate::agent::role::Role;
use std::collections::HashMap;

/// Shown in place of upstream output for the first stage.
const NO_CONTEXT: &str = "(none, this is the first stage)";

/// Inputs for one stage's prompt.
#[derive(Debug, Clone)]
pub struct StageContext {
    pub role: Role,
    pub topic: String,
    /// Persona title, e.g. "Product Manager".
    pub agent_role: String,
    pub goal: String,
    pub backstory: String,
    pub description: String,
    pub expected_output: String,
    /// Output of the upstream stage, if the role has one.
    pub context: Option<String>,
}

impl StageContext {
    /// Build the context, resolving `{topic}` inside the profile and task text.
    pub fn new(
        role: Role,
        topic: &str,
        profile: &AgentProfile,
        task: &TaskDefinition,
        context: Option<String>,
    ) -> Result<Self, TemplateError> {
        let topic_vars = vars([("topic", topic)]);
        let expand = |text: &str| render_template(text, &topic_vars);

        let agent_role = if profile.role.is_empty() {
            role.as_str().replace('_', " ")
        } else {
            expand(&profile.role)?
        };

        Ok(Self {
            role,
            topic: topic.to_string(),
            agent_role,
            goal: expand(&profile.goal)?,
            backstory: expand(&profile.backstory)?,
            description: expand(&task.description)?,
            expected_output: expand(&task.expected_output)?,
            context,
        })
    }

    /// Variables available to prompt templates.
    pub fn to_template_vars(&self) -> HashMap<String, String> {
        vars([
            ("role", self.role.as_str().to_string()),
            ("topic", self.topic.clone()),
            ("agent_role", self.agent_role.clone()),
            ("goal", self.goal.clone()),
            ("backstory", self.backstory.clone()),
            ("description", self.description.clone()),
            ("expected_output", self.expected_output.clone()),
            (
                "context",
                self.context.clone().unwrap_or_else(|| NO_CONTEXT.to_string()),
            ),
        ])
    }
}
