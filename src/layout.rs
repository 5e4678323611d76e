// =============================================================================
// LAYOUT MODULE
// =============================================================================
// The page layout wrapper: static children first, then whatever the matched
// route rendered (the "outlet"), inside one container.
//
// Both inputs are already-rendered HTML. The layout never escapes, reorders,
// or otherwise touches them. The outlet is an explicit argument; the router
// decides what goes in it (see `handlers::render_page`).
// =============================================================================

use std::fmt;

/// Opening tag of the layout container
const CONTAINER_OPEN: &str = r#"<div class="layout">"#;
const CONTAINER_CLOSE: &str = "</div>";

/// A pre-rendered chunk of HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Fragment containing `text` with HTML special characters escaped
    pub fn text(text: &str) -> Self {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        Self(escaped)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compose `children` and `outlet` into the layout container, children first.
///
/// Absent or empty children render nothing; an absent outlet (no route
/// matched) leaves only the children.
pub fn render_layout(children: Option<&Fragment>, outlet: Option<&Fragment>) -> Fragment {
    let parts = [children, outlet];
    let body_len: usize = parts.iter().flatten().map(|f| f.as_str().len()).sum();

    let mut html = String::with_capacity(CONTAINER_OPEN.len() + body_len + CONTAINER_CLOSE.len());
    html.push_str(CONTAINER_OPEN);
    for part in parts.into_iter().flatten() {
        html.push_str(part.as_str());
    }
    html.push_str(CONTAINER_CLOSE);

    Fragment(html)
}
