//! The whole-document path: instead of scanning the markup ourselves, wrap it in a small HTML
//! document with the theme style sheet and let a platform HTML renderer deal with it.

use crate::resolver::BASE_SCOPE;

/// A platform converter from an HTML document to some rich text type.
///
/// If the platform requires running on a given thread, implementations are the ones
/// dispatching to it.
pub trait DocumentRenderer {
    type Output;

    /// Returns `None` if the platform could not render the document.
    fn render_document(&self, html: &str) -> Option<Self::Output>;
}

/// Wraps highlighter markup in a document styled by `theme_css`.
pub fn wrap_document(markup: &str, theme_css: &str) -> String {
    format!(r#"<style>{theme_css}</style><pre><code class="{BASE_SCOPE}">{markup}</code></pre>"#)
}
