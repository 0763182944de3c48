//! Placeholder stash for generated HTML.
//!
//! Handler output can be parked in the stash while the host runs its own
//! transformations (e.g. Markdown rendering), then restored in one pass.
//!
//! Placeholders look like `<!--lqt-stash-K:N-->`, where `N` is the fragment
//! index and `K` is a key chosen so that the document being preprocessed never
//! contains the placeholder prefix. Text that merely resembles a placeholder
//! is therefore left alone.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--lqt-stash-(\d+):(\d+)-->").unwrap());

const PLACEHOLDER_START: &str = "<!--lqt-stash-";

/// Store of HTML fragments keyed by placeholder.
///
/// # Example
///
/// ```
/// use lqt_engine::HtmlStash;
///
/// let mut stash = HtmlStash::new();
/// let placeholder = stash.store("<img src=\"/a.png\">");
///
/// let mut html = format!("<p>{placeholder}</p>");
/// stash.restore(&mut html);
/// assert_eq!(html, "<p><img src=\"/a.png\"></p>");
/// ```
#[derive(Debug, Default)]
pub struct HtmlStash {
    fragments: Vec<String>,
    key: u32,
}

impl HtmlStash {
    /// Create an empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a placeholder key that does not occur in `document`.
    ///
    /// Has no effect once fragments are stored, since their placeholders are
    /// already handed out.
    pub fn prepare(&mut self, document: &str) {
        if !self.fragments.is_empty() {
            return;
        }
        while document.contains(&self.prefix()) {
            self.key += 1;
        }
    }

    /// Store a fragment and return the placeholder that stands for it.
    pub fn store(&mut self, html: impl Into<String>) -> String {
        let index = self.fragments.len();
        self.fragments.push(html.into());
        format!("{}{index}-->", self.prefix())
    }

    /// Replace every placeholder of this stash in `html` with its fragment.
    ///
    /// Placeholders with another key or an unknown index are left as they are.
    pub fn restore(&self, html: &mut String) {
        let restored = match self.restore_str(html) {
            Cow::Borrowed(_) => return,
            Cow::Owned(restored) => restored,
        };
        *html = restored;
    }

    /// Like [`restore`](Self::restore), borrowing `text` when nothing changes.
    ///
    /// Hosts that escape text (code spans, code blocks) should call this on
    /// the raw text before escaping it, so fragments there come out escaped
    /// exactly as unprotected output would.
    #[must_use]
    pub fn restore_str<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.fragments.is_empty() || !text.contains(PLACEHOLDER_START) {
            return Cow::Borrowed(text);
        }

        PLACEHOLDER_PATTERN.replace_all(text, |caps: &Captures| {
            self.fragment(&caps[1], &caps[2])
                .map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
    }

    /// Number of stored fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the stash is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn fragment(&self, key: &str, index: &str) -> Option<&str> {
        if key.parse::<u32>().ok()? != self.key {
            return None;
        }
        let index = index.parse::<usize>().ok()?;
        self.fragments.get(index).map(String::as_str)
    }

    fn prefix(&self) -> String {
        format!("{PLACEHOLDER_START}{}:", self.key)
    }
}
