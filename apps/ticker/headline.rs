use crate::config::TopicId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A single-level markdown heading: one `#`, whitespace, then content.
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.+)$").unwrap());

/// Characters that end a line: `\n`, `\r`, vertical tab, form feed, the
/// file/group/record separators, NEL, and the Unicode line and paragraph
/// separators. `\r\n` yields an empty piece between the two, which never
/// matches.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Returns the text of the first `# heading` line in `raw`, trimmed.
///
/// Lines are trimmed before matching, so indented headings count. `## x` and
/// `#x` do not.
pub fn extract_headline(raw: &str) -> Option<&str> {
    raw.split(LINE_BREAKS)
        .filter_map(|line| HEADING.captures(line.trim()))
        .find_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// One published ticker entry: an HTML link to the post carrying the headline.
///
/// Equality is byte equality of the rendered anchor, so the same title on two
/// different posts yields two distinct items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeadlineItem(String);

impl HeadlineItem {
    pub fn new(base_url: &str, topic: &TopicId, post_number: u64, title: &str) -> Self {
        // `|` separates entries in the marquee setting and is not escaped there.
        if title.contains('|') {
            warn!(%topic, post_number, title, "Headline contains '|', the ticker will split it");
        }
        Self(format!(r#"<a href="{base_url}/t/{topic}/{post_number}">{title}</a>"#))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for HeadlineItem {
    fn from(rendered: String) -> Self {
        Self(rendered)
    }
}

impl fmt::Display for HeadlineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
