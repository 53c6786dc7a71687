use crate::styled::StyledRun;

/// The scope every document starts in, mirroring the `hljs` class on the `<code>` block.
pub const BASE_SCOPE: &str = "hljs";

/// Turns a text run and the scopes enclosing it into a styled run.
///
/// `scopes` is the whole stack, outermost first, so the resolver can cascade.
/// It is called once per text run, never per character.
pub trait StyleResolver<S> {
    fn resolve(&self, text: &str, scopes: &[&str]) -> StyledRun<S>;
}

impl<S, F> StyleResolver<S> for F
where
    F: Fn(&str, &[&str]) -> StyledRun<S>,
{
    fn resolve(&self, text: &str, scopes: &[&str]) -> StyledRun<S> {
        self(text, scopes)
    }
}
