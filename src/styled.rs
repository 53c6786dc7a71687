use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A piece of text with the style resolved for the scopes enclosing it.
///
/// The style type is whatever the resolver produces, the scanner only ever moves it around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun<S> {
    pub text: String,
    pub style: S,
}

impl<S> StyledRun<S> {
    pub fn new(text: impl Into<String>, style: S) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// An ordered list of styled runs forming one document.
///
/// Lengths and offsets are in bytes of the concatenated plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText<S> {
    runs: Vec<StyledRun<S>>,
}

impl<S> Default for StyledText<S> {
    fn default() -> Self {
        Self { runs: Vec::new() }
    }
}

impl<S> StyledText<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a run at the end. Empty runs carry nothing and are dropped.
    pub fn push(&mut self, run: StyledRun<S>) {
        if !run.text.is_empty() {
            self.runs.push(run);
        }
    }

    /// Total length of the plain text, in bytes.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.text.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn runs(&self) -> &[StyledRun<S>] {
        &self.runs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyledRun<S>> {
        self.runs.iter()
    }

    pub fn into_runs(self) -> Vec<StyledRun<S>> {
        self.runs
    }

    /// The concatenated text of every run, without any styling.
    pub fn plain_text(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for run in &self.runs {
            out.push_str(&run.text);
        }
        out
    }

    /// Replaces a byte range of the plain text view, starting the run lookup at `from`.
    ///
    /// The replacement keeps the style of the run where `range` starts. Whatever part of the
    /// range falls into following runs is removed from them. `range` can't start before
    /// `from`. Runs emptied this way are kept until [`StyledText::drop_empty_runs`].
    ///
    /// Returns the cursor of the run holding the replacement: later ranges can resume there.
    pub(crate) fn replace_range(
        &mut self,
        from: RunCursor,
        range: Range<usize>,
        replacement: &str,
    ) -> RunCursor {
        let RunCursor {
            mut index,
            start: mut run_start,
        } = from;
        let mut landed = None;

        while let Some(run) = self.runs.get_mut(index) {
            let run_end = run_start + run.text.len();
            if run_end <= range.start {
                run_start = run_end;
                index += 1;
                continue;
            }
            if run_start >= range.end {
                break;
            }

            let local_start = range.start.saturating_sub(run_start);
            let local_end = (range.end - run_start).min(run.text.len());
            if landed.is_some() {
                run.text.replace_range(local_start..local_end, "");
            } else {
                run.text.replace_range(local_start..local_end, replacement);
                landed = Some(RunCursor {
                    index,
                    start: run_start,
                });
            }
            run_start = run_end;
            index += 1;
        }

        landed.unwrap_or(RunCursor {
            index,
            start: run_start,
        })
    }

    /// Removes the runs left empty by [`StyledText::replace_range`].
    pub(crate) fn drop_empty_runs(&mut self) {
        self.runs.retain(|r| !r.text.is_empty());
    }
}

/// Position of a run in a [`StyledText`]: its index and the byte offset where it starts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunCursor {
    index: usize,
    start: usize,
}

impl<S> FromIterator<StyledRun<S>> for StyledText<S> {
    fn from_iter<I: IntoIterator<Item = StyledRun<S>>>(iter: I) -> Self {
        let mut text = StyledText::new();
        for run in iter {
            text.push(run);
        }
        text
    }
}

impl<'a, S> IntoIterator for &'a StyledText<S> {
    type Item = &'a StyledRun<S>;
    type IntoIter = std::slice::Iter<'a, StyledRun<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}
