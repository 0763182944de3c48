//! Tag marker scanning.
//!
//! A marker is any `{% ... %}` span. The body may span lines and is matched
//! non-greedily, so `{% a %}{% b %}` is two markers.

use std::sync::LazyLock;

use regex::Regex;

static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{%.*?%\}").unwrap());

/// A `{% ... %}` span in document text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagMarker<'a> {
    /// Byte offset of the opening `{%`.
    pub start: usize,
    /// Byte offset just past the closing `%}`.
    pub end: usize,
    /// Line of the opening `{%` (1-indexed).
    pub line: usize,
    /// Full marker text, delimiters included.
    pub text: &'a str,
}

impl<'a> TagMarker<'a> {
    /// Body between the delimiters, untrimmed.
    #[must_use]
    pub fn body(&self) -> &'a str {
        &self.text[2..self.text.len() - 2]
    }

    /// Split the body into tag name and argument string.
    ///
    /// Returns `None` for an empty or whitespace-only body.
    ///
    /// # Example
    ///
    /// ```
    /// use lqt_engine::find_markers;
    ///
    /// let markers = find_markers("{% img left /a.png  150 %}");
    /// let invocation = markers[0].invocation().unwrap();
    /// assert_eq!(invocation.name, "img");
    /// assert_eq!(invocation.markup, "left /a.png  150");
    /// ```
    #[must_use]
    pub fn invocation(&self) -> Option<TagInvocation<'a>> {
        let body = self.body().trim_start();
        if body.is_empty() {
            return None;
        }

        let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
        Some(TagInvocation {
            name: &body[..name_end],
            markup: body[name_end..].trim(),
        })
    }
}

/// Tag name and argument string extracted from a marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagInvocation<'a> {
    /// First whitespace-delimited token of the body.
    pub name: &'a str,
    /// Remainder of the body, trimmed.
    pub markup: &'a str,
}

/// Find all markers in `text`, left to right.
#[must_use]
pub fn find_markers(text: &str) -> Vec<TagMarker<'_>> {
    let mut markers = Vec::new();
    let mut line = 1;
    let mut counted_to = 0;

    for m in MARKER_PATTERN.find_iter(text) {
        line += text[counted_to..m.start()].matches('\n').count();
        counted_to = m.start();

        markers.push(TagMarker {
            start: m.start(),
            end: m.end(),
            line,
            text: m.as_str(),
        });
    }

    markers
}
