//! Attribute handling shared by the `img` and `b64img` tags.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Splits a `"title" "alt"` pair. Either string may be empty.
static TITLE_ALT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:"|')(?P<title>[^"']+)?(?:"|')\s+(?:"|')(?P<alt>[^"']+)?(?:"|')"#).unwrap()
});

/// Attributes of a generated `<img>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ImageAttrs {
    pub class: Option<String>,
    pub src: String,
    pub loading: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub title: Option<String>,
    pub alt: Option<String>,
}

impl ImageAttrs {
    /// Build attributes from a grammar match.
    ///
    /// Groups are trimmed; groups that are missing or blank are absent.
    /// The title group is split into title and alt text.
    pub fn from_captures(caps: &Captures<'_>) -> Self {
        let group = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().trim())
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        let mut attrs = Self {
            class: group("class"),
            src: group("src").unwrap_or_default(),
            loading: group("loading"),
            width: group("width"),
            height: group("height"),
            title: group("title"),
            alt: None,
        };
        attrs.split_title_alt();
        attrs
    }

    fn split_title_alt(&mut self) {
        let Some(title) = self.title.take() else {
            return;
        };

        if let Some(caps) = TITLE_ALT_PATTERN.captures(&title) {
            self.title = caps.name("title").map(|m| m.as_str().to_owned());
            self.alt = caps.name("alt").map(|m| m.as_str().to_owned());
        } else {
            self.title = Some(unquote(&title).to_owned());
        }

        if self.alt.is_none() {
            self.alt.clone_from(&self.title);
        }
    }

    /// Render as an `<img>` element.
    ///
    /// Attribute order is fixed: class, src, loading, width, height, title, alt.
    pub fn to_html(&self) -> String {
        let attrs = [
            ("class", self.class.as_deref()),
            ("src", Some(self.src.as_str())),
            ("loading", self.loading.as_deref()),
            ("width", self.width.as_deref()),
            ("height", self.height.as_deref()),
            ("title", self.title.as_deref()),
            ("alt", self.alt.as_deref()),
        ];

        let mut html = String::from("<img");
        for (name, value) in attrs {
            if let Some(value) = value {
                let _ = write!(html, " {name}=\"{value}\"");
            }
        }
        html.push('>');
        html
    }
}

/// Strip one pair of matching enclosing quotes.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            if !inner.is_empty() {
                return inner;
            }
        }
    }
    text
}
