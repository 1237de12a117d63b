//! Config loading, validation, and derived values.

use super::model::Config;
use crate::agent::prompt::{render_template, vars};
use crate::error::{CrewError, Result};
use crate::output::{HTML_FILE_NAME, HtmlTemplate, OutputWriter, landing_dir};
use crate::sections::{ParsedSections, Section};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CrewError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| CrewError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CrewError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `title_format` may only reference `{topic}`
    /// - file names must be bare, distinct names without braces
    pub fn validate(&self) -> Result<()> {
        render_template(&self.title_format, &vars([("topic", "")])).map_err(|e| {
            CrewError::UserError(format!(
                "config validation failed: title_format '{}': {}",
                self.title_format, e
            ))
        })?;

        for (key, name) in [
            ("stylesheet_name", &self.stylesheet_name),
            ("script_name", &self.script_name),
        ] {
            if name.is_empty()
                || name.contains(['/', '\\', '{', '}'])
                || name == "."
                || name == ".."
            {
                return Err(CrewError::UserError(format!(
                    "config validation failed: {} must be a plain file name (found '{}')",
                    key, name
                )));
            }
            if name == HTML_FILE_NAME {
                return Err(CrewError::UserError(format!(
                    "config validation failed: {} cannot be '{}'",
                    key, HTML_FILE_NAME
                )));
            }
        }

        if self.stylesheet_name == self.script_name {
            return Err(CrewError::UserError(
                "config validation failed: stylesheet_name and script_name must differ"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Page title for `topic`.
    pub fn page_title(&self, topic: &str) -> String {
        // validate() guarantees the format only references {topic}.
        render_template(&self.title_format, &vars([("topic", topic)]))
            .unwrap_or_else(|_| self.title_format.clone())
    }

    /// Output directory for `topic`.
    pub fn landing_dir(&self, topic: &str) -> PathBuf {
        landing_dir(&self.output_root, topic)
    }

    /// Prompt and log directory for `topic`.
    pub fn run_dir(&self, topic: &str) -> PathBuf {
        self.runs_dir.join(crate::output::topic_slug(topic))
    }

    /// Writer configured with this config's file names.
    pub fn writer(&self) -> OutputWriter {
        OutputWriter::new(&self.stylesheet_name, &self.script_name)
    }

    /// Page template to apply, or `None` when templating is disabled.
    ///
    /// The built-in shell only links the stylesheet and script when
    /// `sections` has css and js to write.
    pub fn html_template(&self, sections: &ParsedSections) -> Result<Option<HtmlTemplate>> {
        if !self.use_template {
            return Ok(None);
        }
        match &self.template {
            Some(path) => HtmlTemplate::load(path).map(Some),
            None => Ok(Some(HtmlTemplate::builtin(
                (!sections.get(Section::Css).is_empty()).then_some(self.stylesheet_name.as_str()),
                (!sections.get(Section::Js).is_empty()).then_some(self.script_name.as_str()),
            ))),
        }
    }
}
