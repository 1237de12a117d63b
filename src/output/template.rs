//! Page shell the generated HTML body is wrapped in.

use crate::agent::prompt::{render_template, vars};
use crate::error::{CrewError, Result};
use std::path::Path;

const BODY_OPEN: &str = "<body>";
const BODY_CLOSE: &str = "</body>";

/// Built-in shell. `{stylesheet_link}` and `{script_tag}` are filled in once by
/// [`HtmlTemplate::builtin`]; the escaped title/body placeholders survive that
/// pass.
const BUILTIN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
{stylesheet_link}</head>
<body>
{{body}}
{script_tag}</body>
</html>
"#;

/// HTML document with `{title}` and `{body}` placeholders.
///
/// Literal braces in the template (inline CSS, for instance) must be written
/// as `{{` and `}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTemplate {
    source: String,
}

impl Default for HtmlTemplate {
    fn default() -> Self {
        Self::builtin(Some("styles.css"), Some("script.js"))
    }
}

impl HtmlTemplate {
    /// Built-in page shell linking `stylesheet` and `script`.
    ///
    /// A `None` name leaves its tag out, so the page never references a file
    /// that was not written.
    pub fn builtin(stylesheet: Option<&str>, script: Option<&str>) -> Self {
        let stylesheet_link = stylesheet
            .map(|name| format!("    <link rel=\"stylesheet\" href=\"{}\">\n", name))
            .unwrap_or_default();
        let script_tag = script
            .map(|name| format!("    <script src=\"{}\"></script>\n", name))
            .unwrap_or_default();
        let linked = vars([("stylesheet_link", stylesheet_link), ("script_tag", script_tag)]);
        // The shell only references the two variables supplied above.
        let source = render_template(BUILTIN_TEMPLATE, &linked)
            .unwrap_or_else(|_| BUILTIN_TEMPLATE.to_string());
        Self { source }
    }

    /// Use `source` as the template text, checking it renders.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let template = Self {
            source: source.into(),
        };
        template.render("", "")?;
        Ok(template)
    }

    /// Read a template file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            CrewError::UserError(format!(
                "failed to read HTML template '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::new(source).map_err(|e| {
            CrewError::UserError(format!("HTML template '{}': {}", path.display(), e))
        })
    }

    /// Wrap `html` in the template.
    ///
    /// When `html` contains both `<body>` and `</body>`, only the text between
    /// the first of each is used as the body.
    pub fn process(&self, html: &str, title: &str) -> Result<String> {
        self.render(title, extract_body(html))
    }

    fn render(&self, title: &str, body: &str) -> Result<String> {
        render_template(&self.source, &vars([("title", title), ("body", body)]))
            .map_err(|e| CrewError::UserError(format!("invalid HTML template: {}", e)))
    }
}

/// Inner content of the first `<body>...</body>` pair, or all of `html`.
pub fn extract_body(html: &str) -> &str {
    match (html.find(BODY_OPEN), html.find(BODY_CLOSE)) {
        (Some(open), Some(close)) if open + BODY_OPEN.len() <= close => {
            &html[open + BODY_OPEN.len()..close]
        }
        (Some(_), Some(_)) => "",
        _ => html,
    }
}
