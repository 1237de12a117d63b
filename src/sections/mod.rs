//! Section extraction from free-text agent output.
//!
//! The frontend engineer answers in prose with the page source embedded as
//! fenced code blocks. [`parse`] scans that text line by line and buckets the
//! fenced lines into html, css and js streams:
//!
//! ````text
//! Here is the landing page.
//! ```html
//! <div>Hi</div>
//! ```
//! ```css
//! body{color:red}
//! ```
//! ````
//!
//! yields `html = ["<div>Hi</div>"]`, `css = ["body{color:red}"]`, `js = []`.
//!
//! Markers are matched by substring containment, so a prose line that happens
//! to contain `html:` or ```` ```js ```` also switches sections. That behavior
//! is kept.
//!
//! Kept lines are stored exactly as written, including the trailing `\r` of
//! CRLF input.

mod parser;


pub use parser::parse;

use std::fmt;

/// One of the three kinds of page source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Html,
    Css,
    Js,
}

impl Section {
    /// All sections in output order.
    pub const ALL: [Section; 3] = [Section::Html, Section::Css, Section::Js];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Html => "html",
            Section::Css => "css",
            Section::Js => "js",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lines extracted from one document, grouped by section.
///
/// Each line is stored exactly as it appeared in the input; blank lines and
/// marker lines are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSections {
    pub html: Vec<String>,
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl ParsedSections {
    /// Lines collected for `section`.
    pub fn get(&self, section: Section) -> &[String] {
        match section {
            Section::Html => &self.html,
            Section::Css => &self.css,
            Section::Js => &self.js,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut Vec<String> {
        match section {
            Section::Html => &mut self.html,
            Section::Css => &mut self.css,
            Section::Js => &mut self.js,
        }
    }

    /// Lines of `section` joined with `\n`, or `None` if the section is empty.
    pub fn joined(&self, section: Section) -> Option<String> {
        let lines = self.get(section);
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// True when no section collected any line.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }
}
