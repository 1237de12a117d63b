//! `{variable}` substitution engine.
//!
//! Used for agent prompts, agent command lines, `{topic}` references inside
//! goals and task descriptions, and the `{title}`/`{body}` page template.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Undefined variables are an error rather than an empty substitution, so a
//! typo in a template surfaces immediately. Substituted values are inserted
//! verbatim and never re-scanned.

use std::collections::HashMap;
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    /// An empty variable name was found (e.g., `{}`).
    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },
}

/// Render `template`, substituting every `{name}` from `variables`.
///
/// ```
/// use std::collections::HashMap;
/// use landing_crew::agent::prompt::render_template;
///
/// let mut vars = HashMap::new();
/// vars.insert("topic".to_string(), "Books".to_string());
///
/// let title = render_template("{topic} Homepage", &vars).unwrap();
/// assert_eq!(title, "Books Homepage");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                result.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                }

                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }

                let name = name.trim();
                match variables.get(name) {
                    Some(value) => result.push_str(value),
                    None => {
                        return Err(TemplateError::UndefinedVariable {
                            name: name.to_string(),
                            position: pos,
                        });
                    }
                }
            }
            '}' => {
                // `}}` collapses to one brace; a lone `}` passes through.
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                result.push('}');
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

/// Build a variables map from key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
