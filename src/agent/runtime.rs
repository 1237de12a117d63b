//! Agent runtime boundary.
//!
//! The pipeline only needs one capability from an agent: given a role's
//! configuration and a rendered prompt, return the agent's text answer.
//! [`AgentRuntime`] is that capability; [`CommandRuntime`] implements it by
//! running the profile's command template as a subprocess.
//!
//! # Command execution
//!
//! 1. The prompt is written to `{run_dir}/{role}/prompt.md`
//! 2. `{prompt_file}`, `{role}` and `{topic}` are substituted into the command
//! 3. The command is split with shell-words and spawned (no shell)
//! 4. stdout/stderr go to `stdout.log`/`stderr.log` next to the prompt
//! 5. The process is killed if it outlives the timeout
//! 6. A zero exit with non-blank stdout is the agent's answer

use super::config::AgentProfile;
use super::prompt::{TemplateError, render_template, vars};
use super::role::Role;
use crate::error::{CrewError, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One agent invocation.
#[derive(Debug, Clone, Copy)]
pub struct AgentRequest<'a> {
    pub role: Role,
    pub topic: &'a str,
    pub profile: &'a AgentProfile,
    /// Fully rendered prompt, including upstream context.
    pub prompt: &'a str,
    pub timeout_seconds: u64,
}

/// Something that can answer an agent request with free text.
pub trait AgentRuntime {
    fn run(&self, request: &AgentRequest<'_>) -> Result<String>;
}

/// Runs each agent as a subprocess built from its command template.
#[derive(Debug, Clone)]
pub struct CommandRuntime {
    run_dir: PathBuf,
}

impl CommandRuntime {
    /// Prompts and logs are kept under `run_dir`, one subdirectory per role.
    pub fn new<P: Into<PathBuf>>(run_dir: P) -> Self {
        Self {
            run_dir: run_dir.into(),
        }
    }

    fn role_dir(&self, role: Role) -> PathBuf {
        self.run_dir.join(role.as_str())
    }
}

impl AgentRuntime for CommandRuntime {
    fn run(&self, request: &AgentRequest<'_>) -> Result<String> {
        let role_dir = self.role_dir(request.role);
        let prompt_path = role_dir.join("prompt.md");
        crate::fs::atomic_write_file(&prompt_path, request.prompt).map_err(|e| {
            CrewError::AgentError(format!(
                "failed to write prompt file '{}': {}",
                prompt_path.display(),
                e
            ))
        })?;

        let command_vars = vars([
            ("prompt_file", absolute(&prompt_path).to_string_lossy().to_string()),
            ("role", request.role.as_str().to_string()),
            ("topic", request.topic.to_string()),
        ]);
        let command_str = render_template(&request.profile.command, &command_vars)
            .map_err(|e| command_template_error(request.role, &request.profile.command, e))?;

        let args = shell_words::split(&command_str).map_err(|e| {
            CrewError::UserError(format!(
                "failed to parse agent command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command_str, e
            ))
        })?;
        let Some((program, program_args)) = args.split_first() else {
            return Err(CrewError::UserError(format!(
                "agent command for '{}' is empty after parsing",
                request.role
            )));
        };

        let stdout_path = role_dir.join("stdout.log");
        let stderr_path = role_dir.join("stderr.log");
        let stdout_file = create_log(&stdout_path)?;
        let stderr_file = create_log(&stderr_path)?;

        let mut command = Command::new(program);
        command
            .args(program_args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_file))
            .stderr(Stdio::from(stderr_file));
        for (key, value) in &request.profile.environment {
            command.env(key, value);
        }

        info!(role = %request.role, command = %command_str, "dispatching agent");
        let start = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            CrewError::AgentError(format!(
                "failed to execute agent command '{}': {}\n\
                 Fix: ensure the command is installed and in PATH.",
                program, e
            ))
        })?;

        let timeout = Duration::from_secs(request.timeout_seconds);
        let exit = wait_with_timeout(&mut child, timeout)?;
        let elapsed = start.elapsed();

        let Some(code) = exit else {
            warn!(role = %request.role, timeout_seconds = request.timeout_seconds, "agent timed out");
            return Err(CrewError::AgentError(format!(
                "{} did not finish within {}s (logs: {})",
                request.role,
                request.timeout_seconds,
                role_dir.display()
            )));
        };

        if code != Some(0) {
            let stderr_tail = tail(&stderr_path, 10);
            return Err(CrewError::AgentError(format!(
                "{} exited with {}{}",
                request.role,
                code.map(|c| format!("code {}", c))
                    .unwrap_or_else(|| "a signal".to_string()),
                if stderr_tail.is_empty() {
                    String::new()
                } else {
                    format!("\nstderr:\n{}", stderr_tail)
                }
            )));
        }

        let output = std::fs::read_to_string(&stdout_path).map_err(|e| {
            CrewError::AgentError(format!(
                "failed to read agent output '{}': {}",
                stdout_path.display(),
                e
            ))
        })?;

        if output.trim().is_empty() {
            return Err(CrewError::AgentError(format!(
                "{} produced no output",
                request.role
            )));
        }

        debug!(
            role = %request.role,
            duration_ms = elapsed.as_millis() as u64,
            chars = output.chars().count(),
            "agent finished"
        );
        Ok(output)
    }
}

fn command_template_error(role: Role, command: &str, err: TemplateError) -> CrewError {
    match err {
        TemplateError::UndefinedVariable { name, .. } => CrewError::UserError(format!(
            "agent command for '{}' references undefined variable '{}'\n\
             Command: {}\n\
             Available variables: prompt_file, role, topic",
            role, name, command
        )),
        other => CrewError::UserError(format!(
            "agent command for '{}' is malformed: {}",
            role, other
        )),
    }
}

fn create_log(path: &Path) -> Result<std::fs::File> {
    std::fs::File::create(path).map_err(|e| {
        CrewError::AgentError(format!(
            "failed to create agent log '{}': {}",
            path.display(),
            e
        ))
    })
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Wait for the child, killing it after `timeout`.
///
/// `Ok(None)` means it was killed; `Ok(Some(code))` carries the exit code,
/// which is itself `None` when the process died from a signal.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<Option<i32>>> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status.code())),
            Ok(None) if start.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => {
                return Err(CrewError::AgentError(format!(
                    "failed to check agent process status: {}",
                    e
                )));
            }
        }
    }
}

/// Last `n` lines of a log file, best effort.
fn tail(path: &Path, n: usize) -> String {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    let lines: Vec<&str> = content.lines().collect();
    lines[lines.len().saturating_sub(n)..].join("\n")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile(command: &str) -> AgentProfile {
        AgentProfile {
            role: "Tester".to_string(),
            command: command.to_string(),
            ..Default::default()
        }
    }

    fn request<'a>(profile: &'a AgentProfile, prompt: &'a str, timeout: u64) -> AgentRequest<'a> {
        AgentRequest {
            role: Role::ProductManager,
            topic: "Books",
            profile,
            prompt,
            timeout_seconds: timeout,
        }
    }

    #[test]
    fn echoes_prompt_through_cat() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("cat {prompt_file}");

        let output = runtime.run(&request(&profile, "Write requirements", 10)).unwrap();

        assert_eq!(output, "Write requirements");
        assert!(temp_dir.path().join("product_manager/prompt.md").exists());
        assert!(temp_dir.path().join("product_manager/stdout.log").exists());
    }

    #[test]
    fn substitutes_role_and_topic() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("echo {role} {topic}");

        let output = runtime.run(&request(&profile, "ignored", 10)).unwrap();

        assert_eq!(output.trim(), "product_manager Books");
    }

    #[test]
    fn passes_environment() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let mut profile = profile("sh -c 'echo $CREW_MODEL'");
        profile
            .environment
            .insert("CREW_MODEL".to_string(), "tiny".to_string());

        let output = runtime.run(&request(&profile, "x", 10)).unwrap();

        assert_eq!(output.trim(), "tiny");
    }

    #[test]
    fn nonzero_exit_is_agent_error() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("sh -c 'echo boom >&2; exit 3'");

        let err = runtime.run(&request(&profile, "x", 10)).unwrap_err();

        assert!(matches!(err, CrewError::AgentError(_)));
        assert!(err.to_string().contains("code 3"));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn blank_output_is_agent_error() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("true");

        let err = runtime.run(&request(&profile, "x", 10)).unwrap_err();

        assert!(err.to_string().contains("produced no output"));
    }

    #[test]
    fn timeout_kills_process() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("sleep 30");

        let start = Instant::now();
        let err = runtime.run(&request(&profile, "x", 1)).unwrap_err();

        assert!(start.elapsed() < Duration::from_secs(10));
        assert!(err.to_string().contains("did not finish within 1s"));
    }

    #[test]
    fn missing_program_is_agent_error() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("definitely-not-a-real-agent-binary {prompt_file}");

        let err = runtime.run(&request(&profile, "x", 10)).unwrap_err();

        assert!(matches!(err, CrewError::AgentError(_)));
        assert!(err.to_string().contains("ensure the command is installed"));
    }

    #[test]
    fn undefined_command_variable_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let runtime = CommandRuntime::new(temp_dir.path());
        let profile = profile("llm --model {model}");

        let err = runtime.run(&request(&profile, "x", 10)).unwrap_err();

        assert!(matches!(err, CrewError::UserError(_)));
        assert!(err.to_string().contains("undefined variable 'model'"));
    }
}
