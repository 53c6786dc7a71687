//! CSS class selectors as used by highlight.js themes, matched against a scope stack.

/// One compound selector: every class in it has to be on the same scope, eg `.hljs-title.function_`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSet {
    classes: Vec<String>,
}

impl ClassSet {
    /// Parses `.a.b`. Anything that isn't only classes (elements, pseudo classes, ids...)
    /// gives `None`.
    fn parse(input: &str) -> Option<Self> {
        let rest = input.strip_prefix('.')?;
        let mut classes = Vec::new();
        for class in rest.split('.') {
            let valid = !class.is_empty()
                && class
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return None;
            }
            classes.push(class.to_string());
        }
        Some(Self { classes })
    }

    /// A scope from the markup can hold several classes separated by whitespace
    /// like `hljs-title function_`.
    fn matches(&self, scope: &str) -> bool {
        self.classes
            .iter()
            .all(|c| scope.split_whitespace().any(|s| s == c.as_str()))
    }

    fn len(&self) -> usize {
        self.classes.len()
    }
}

/// Represents a parent requirement in a theme selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    /// Descendant combinator: `.a .b`, there can be scopes in between
    Anywhere(ClassSet),
    /// Child combinator `.a > .b`: must be the immediate parent
    Direct(ClassSet),
}

/// A parsed selector that is used to match against scope stacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelector {
    /// Has to match the innermost scope (rightmost in the selector string)
    pub target: ClassSet,
    /// Required parents, from right to left of the selector
    pub parents: Vec<Parent>,
}

impl ThemeSelector {
    pub fn new(target: ClassSet, parents: Vec<Parent>) -> Self {
        Self { target, parents }
    }

    /// Number of classes in the selector, the only kind of specificity themes use
    pub fn specificity(&self) -> usize {
        self.target.len()
            + self
                .parents
                .iter()
                .map(|p| match p {
                    Parent::Anywhere(c) | Parent::Direct(c) => c.len(),
                })
                .sum::<usize>()
    }

    /// Checks if this selector matches the given scope stack.
    ///
    /// The target has to match the last scope. Parents are then looked up walking up the
    /// stack, `Direct` ones have to be the immediate next scope.
    pub fn matches(&self, scope_stack: &[&str]) -> bool {
        let Some((last, mut rest)) = scope_stack.split_last() else {
            return false;
        };
        if !self.target.matches(last) {
            return false;
        }

        for parent in &self.parents {
            match parent {
                Parent::Direct(set) => match rest.split_last() {
                    Some((last, r)) if set.matches(last) => rest = r,
                    _ => return false,
                },
                Parent::Anywhere(set) => match rest.iter().rposition(|s| set.matches(s)) {
                    Some(pos) => rest = &rest[..pos],
                    None => return false,
                },
            }
        }

        true
    }
}

/// Parses a single selector (no commas) like `.hljs-doctag .hljs-keyword` or `.a > .b`.
///
/// Returns `None` if the selector is empty or uses anything other than classes
/// and the descendant/child combinators.
pub fn parse_selector(input: &str) -> Option<ThemeSelector> {
    let spaced = input.replace('>', " > ");
    let parts: Vec<&str> = spaced.split_whitespace().collect();

    let (last, rest) = parts.split_last()?;
    if *last == ">" {
        return None;
    }
    let target = ClassSet::parse(last)?;

    let mut parents = Vec::new();
    let mut is_direct = false;
    for part in rest.iter().rev() {
        if *part == ">" {
            if is_direct {
                return None;
            }
            is_direct = true;
            continue;
        }
        let set = ClassSet::parse(part)?;
        parents.push(if is_direct {
            Parent::Direct(set)
        } else {
            Parent::Anywhere(set)
        });
        is_direct = false;
    }
    if is_direct {
        return None;
    }

    Some(ThemeSelector::new(target, parents))
}
