//! The fixed, ordered set of pipeline roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pipeline stage, identified by the agent that performs it.
///
/// Roles run in declaration order; each one after the first reads the
/// previous role's cached output as context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProductManager,
    UiUxDesigner,
    FrontendEngineer,
}

impl Role {
    /// All roles in pipeline order.
    pub const ALL: [Role; 3] = [Role::ProductManager, Role::UiUxDesigner, Role::FrontendEngineer];

    /// Cache and config key for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::ProductManager => "product_manager",
            Role::UiUxDesigner => "ui_ux_designer",
            Role::FrontendEngineer => "frontend_engineer",
        }
    }

    /// Key of the task this role performs in `agents.yaml`.
    pub fn task_key(self) -> &'static str {
        match self {
            Role::ProductManager => "product_requirements_task",
            Role::UiUxDesigner => "design_task",
            Role::FrontendEngineer => "development_task",
        }
    }

    /// The role whose output this role consumes, if any.
    pub fn upstream(self) -> Option<Role> {
        match self {
            Role::ProductManager => None,
            Role::UiUxDesigner => Some(Role::ProductManager),
            Role::FrontendEngineer => Some(Role::UiUxDesigner),
        }
    }

    /// Parse a role key.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
