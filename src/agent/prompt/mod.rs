//! Prompt generation for agent stages.
//!
//! - **Template**: `{variable}` substitution engine
//! - **Context**: the values one stage's prompt can reference
//!
//! Available prompt variables: `{role}`, `{topic}`, `{agent_role}`, `{goal}`,
//! `{backstory}`, `{description}`, `{expected_output}`, `{context}`.
//! Use `{{` and `}}` for literal braces.

mod context;
mod template;

pub use context::StageContext;
pub use template::{TemplateError, render_template, vars};

use crate::agent::config::AgentsConfig;
use crate::error::{CrewError, Result};

/// Render the full prompt for a stage using the agent's prompt template.
pub fn render_prompt(config: &AgentsConfig, stage: &StageContext) -> Result<String> {
    let profile = config.profile(stage.role)?;
    let template = config.prompt_template_for(profile);

    render_template(template, &stage.to_template_vars()).map_err(|e| {
        CrewError::UserError(format!(
            "prompt template '{}' for agent '{}' is invalid: {}",
            profile.effective_prompt_template(&config.defaults),
            stage.role,
            e
        ))
    })
}
