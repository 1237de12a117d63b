//! Agent subsystem.
//!
//! - **Role**: the three pipeline stages and how they chain
//! - **Config**: agent profiles and task definitions (`agents.yaml`)
//! - **Prompt**: prompt rendering from stage context
//! - **Runtime**: the `AgentRuntime` boundary and its subprocess implementation
//!
//! Agents are any CLI that reads a prompt file and prints its answer on
//! stdout. The pipeline never depends on how an agent produces text.

mod config;
pub mod prompt;
mod role;
mod runtime;

pub use config::{AgentDefaults, AgentProfile, AgentsConfig, TaskDefinition};
pub use role::Role;
pub use runtime::{AgentRequest, AgentRuntime, CommandRuntime};
