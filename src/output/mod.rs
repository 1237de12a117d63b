//! Landing page output.
//!
//! Turns [`ParsedSections`](crate::sections::ParsedSections) into files:
//!
//! ```text
//! {output_root}/{slug}_landing_page/
//!     index.html    html section, optionally wrapped in the page template
//!     styles.css    css section
//!     script.js     js section
//! ```
//!
//! Empty sections produce no file. Every run overwrites the previous files.

mod template;
mod writer;


pub use template::{HtmlTemplate, extract_body};
pub use writer::{HTML_FILE_NAME, OutputWriter};

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}_]").expect("slug pattern is valid"));

/// Lower-cased `topic` with every character that is neither alphanumeric nor
/// `_` replaced by `_`. Non-ASCII letters and digits are kept.
pub fn topic_slug(topic: &str) -> String {
    NON_SLUG_CHARS
        .replace_all(&topic.to_lowercase(), "_")
        .into_owned()
}

/// Directory the landing page for `topic` is written to.
pub fn landing_dir<P: AsRef<Path>>(output_root: P, topic: &str) -> PathBuf {
    output_root
        .as_ref()
        .join(format!("{}_landing_page", topic_slug(topic)))
}
