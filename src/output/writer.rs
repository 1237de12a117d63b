//! Writes parsed sections to disk.

use super::template::HtmlTemplate;
use crate::error::{CrewError, Result};
use crate::sections::{ParsedSections, Section};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Name of the HTML file inside the landing directory.
pub const HTML_FILE_NAME: &str = "index.html";

/// Writes the html, css and js sections of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputWriter {
    stylesheet_name: String,
    script_name: String,
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new("styles.css", "script.js")
    }
}

impl OutputWriter {
    pub fn new(stylesheet_name: impl Into<String>, script_name: impl Into<String>) -> Self {
        Self {
            stylesheet_name: stylesheet_name.into(),
            script_name: script_name.into(),
        }
    }

    /// File name used for `section`.
    pub fn file_name(&self, section: Section) -> &str {
        match section {
            Section::Html => HTML_FILE_NAME,
            Section::Css => &self.stylesheet_name,
            Section::Js => &self.script_name,
        }
    }

    /// Write every non-empty section into `directory`.
    ///
    /// With both `template` and `title`, the HTML is wrapped in the template;
    /// otherwise it is written as extracted. Returns false on the first
    /// failure; files written before it are left in place.
    pub fn write(
        &self,
        sections: &ParsedSections,
        directory: &Path,
        template: Option<&HtmlTemplate>,
        title: Option<&str>,
    ) -> bool {
        match self.write_files(sections, directory, template, title) {
            Ok(_) => true,
            Err(e) => {
                error!(directory = %directory.display(), error = %e, "failed to write output files");
                false
            }
        }
    }

    /// Like [`OutputWriter::write`], returning the written paths or the cause.
    pub fn write_files(
        &self,
        sections: &ParsedSections,
        directory: &Path,
        template: Option<&HtmlTemplate>,
        title: Option<&str>,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(directory).map_err(|e| {
            CrewError::WriteError(format!(
                "failed to create output directory '{}': {}",
                directory.display(),
                e
            ))
        })?;

        let mut written = Vec::new();

        for section in Section::ALL {
            let Some(mut content) = sections.joined(section) else {
                continue;
            };

            if section == Section::Html
                && let (Some(template), Some(title)) = (template, title)
            {
                content = template.process(&content, title)?;
            }

            let path = directory.join(self.file_name(section));
            crate::fs::atomic_write_file(&path, &content).map_err(|e| {
                CrewError::WriteError(format!("failed to write '{}': {}", path.display(), e))
            })?;

            info!(section = %section, path = %path.display(), "wrote output file");
            written.push(path);
        }

        Ok(written)
    }
}
