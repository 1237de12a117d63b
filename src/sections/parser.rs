//! Line scanner that drives section transitions.

use super::{ParsedSections, Section};

/// Bare code fence; closes whatever section is open.
const FENCE: &str = "```";

/// Open markers per section, matched against the trimmed, lower-cased line.
const OPEN_MARKERS: [(Section, &[&str]); 3] = [
    (Section::Html, &["```html", "html:"]),
    (Section::Css, &["```css", "css:"]),
    (Section::Js, &["```javascript", "```js", "javascript:", "js:"]),
];

/// What a single line means to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Open(Section),
    Close,
}

/// Classify a line. Html wins over css, css over js, any open marker over a
/// bare fence.
fn classify(line: &str) -> Option<Marker> {
    let probe = line.trim().to_lowercase();

    for (section, markers) in OPEN_MARKERS {
        if markers.iter().any(|m| probe.contains(m)) {
            return Some(Marker::Open(section));
        }
    }

    if probe.contains(FENCE) {
        return Some(Marker::Close);
    }

    None
}

/// Split `document` into html, css and js lines.
///
/// Never fails. Text outside any section is dropped, blank lines are dropped
/// everywhere, and an unterminated section keeps whatever it collected.
/// Lines are split on `\n` only, so a CRLF line keeps its trailing `\r`.
pub fn parse(document: &str) -> ParsedSections {
    let mut sections = ParsedSections::default();
    let mut current: Option<Section> = None;

    for line in document.split('\n') {
        match classify(line) {
            Some(Marker::Open(section)) => {
                current = Some(section);
                continue;
            }
            Some(Marker::Close) => {
                current = None;
                continue;
            }
            None => {}
        }

        if let Some(section) = current
            && !line.trim().is_empty()
        {
            sections.get_mut(section).push(line.to_string());
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_fenced_openers() {
        assert_eq!(classify("```html"), Some(Marker::Open(Section::Html)));
        assert_eq!(classify("```CSS"), Some(Marker::Open(Section::Css)));
        assert_eq!(classify("  ```js  "), Some(Marker::Open(Section::Js)));
        assert_eq!(classify("```javascript"), Some(Marker::Open(Section::Js)));
    }

    #[test]
    fn classify_labeled_openers() {
        assert_eq!(classify("HTML:"), Some(Marker::Open(Section::Html)));
        assert_eq!(classify("css:"), Some(Marker::Open(Section::Css)));
        assert_eq!(classify("JavaScript:"), Some(Marker::Open(Section::Js)));
        assert_eq!(classify("js:"), Some(Marker::Open(Section::Js)));
    }

    #[test]
    fn classify_bare_fence_closes() {
        assert_eq!(classify("```"), Some(Marker::Close));
        assert_eq!(classify("   ```   "), Some(Marker::Close));
        assert_eq!(classify("```text"), Some(Marker::Close));
    }

    #[test]
    fn classify_plain_lines() {
        assert_eq!(classify("<div>Hi</div>"), None);
        assert_eq!(classify("body { color: red; }"), None);
        assert_eq!(classify(""), None);
    }
}
