//! Scanner for the span markup emitted by highlight.js style highlighters.
//!
//! The grammar is tiny: text, `<span class="SCOPE">`, `</span>` and character references
//! inside the text. Anything else starting with `<` is kept as a literal `<`.

use crate::entities::decode_entities;
use crate::resolver::{BASE_SCOPE, StyleResolver};
use crate::styled::StyledText;

const TAG_START: char = '<';
const SPAN_START: &str = "span class=\"";
const SPAN_START_CLOSE: &str = "\">";
const SPAN_END: &str = "/span>";

/// The scopes currently open, outermost first. Never empty: the base scope can't be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeStack<'a> {
    scopes: Vec<&'a str>,
}

impl Default for ScopeStack<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScopeStack<'a> {
    pub fn new() -> Self {
        Self {
            scopes: vec![BASE_SCOPE],
        }
    }

    pub fn push(&mut self, scope: &'a str) {
        self.scopes.push(scope);
    }

    /// Pops the innermost scope. Returns `false` and leaves the stack alone if only the base
    /// scope is left.
    pub fn pop(&mut self) -> bool {
        if self.scopes.len() == 1 {
            log::warn!("Unbalanced </span> in markup, ignoring it");
            return false;
        }
        self.scopes.pop();
        true
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.scopes
    }
}

/// Converts highlighter markup into styled text, decoding character references.
///
/// The whole markup is scanned first and references are only decoded afterwards so a
/// decoded `<` can never be mistaken for the start of a tag.
pub fn convert<S, R>(markup: &str, resolver: &R) -> StyledText<S>
where
    R: StyleResolver<S> + ?Sized,
{
    decode_entities(scan(markup, resolver))
}

/// Scans the markup into styled runs without touching character references.
pub fn scan<S, R>(markup: &str, resolver: &R) -> StyledText<S>
where
    R: StyleResolver<S> + ?Sized,
{
    let (text, _) = scan_with_stack(markup, resolver);
    text
}

fn scan_with_stack<'a, S, R>(markup: &'a str, resolver: &R) -> (StyledText<S>, ScopeStack<'a>)
where
    R: StyleResolver<S> + ?Sized,
{
    let mut out = StyledText::new();
    let mut stack = ScopeStack::new();
    let mut pos = 0;

    while pos < markup.len() {
        let rest = &markup[pos..];
        let text_end = rest.find(TAG_START).unwrap_or(rest.len());
        if text_end > 0 {
            out.push(resolver.resolve(&rest[..text_end], stack.as_slice()));
        }
        pos += text_end;
        if pos >= markup.len() {
            break;
        }

        // Skip the `<`
        pos += TAG_START.len_utf8();
        let after = &markup[pos..];

        if let Some(class_start) = after.strip_prefix(SPAN_START)
            && let Some(class_len) = class_attribute_len(class_start)
        {
            stack.push(&class_start[..class_len]);
            pos += SPAN_START.len() + class_len + SPAN_START_CLOSE.len();
        } else if after.starts_with(SPAN_END) {
            stack.pop();
            pos += SPAN_END.len();
        } else {
            if after.starts_with(SPAN_START) {
                log::debug!("Unterminated span tag at byte {}, keeping it as text", pos - 1);
            }
            out.push(resolver.resolve("<", stack.as_slice()));
        }
    }

    (out, stack)
}

/// Length of the class attribute value. It can't run past the next tag.
fn class_attribute_len(class_start: &str) -> Option<usize> {
    let tag_end = class_start.find(TAG_START).unwrap_or(class_start.len());
    class_start[..tag_end].find(SPAN_START_CLOSE)
}
