use crate::error::{LcError, Result};
use std::ops::Range;

/// Which instances of a project take part in a run.
///
/// Bounds follow slice semantics: `lower..upper`, negative values count from
/// the end, out-of-range values clamp. `include` and `exclude` hold indices
/// into the full instance list, not into the slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub lower: Option<isize>,
    pub upper: Option<isize>,
    pub exclude: Vec<usize>,
    pub include: Vec<usize>,
}

impl Selection {
    /// `include` and `exclude` cannot be combined.
    pub fn validate(&self) -> Result<()> {
        if !self.include.is_empty() && !self.exclude.is_empty() {
            return Err(LcError::ConflictingSelection);
        }
        Ok(())
    }

    /// Apply the selection, returning `(original index, name)` pairs in list order.
    ///
    /// When `include` is non-empty, `exclude` is ignored.
    pub fn apply<'a>(&self, instances: &'a [String]) -> Vec<(usize, &'a str)> {
        let range = slice_range(instances.len(), self.lower, self.upper);
        let start = range.start;
        instances[range]
            .iter()
            .enumerate()
            .map(|(offset, name)| (start + offset, name.as_str()))
            .filter(|(index, _)| {
                if self.include.is_empty() {
                    !self.exclude.contains(index)
                } else {
                    self.include.contains(index)
                }
            })
            .collect()
    }
}

fn clamp_bound(len: usize, bound: isize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        (bound as usize).min(len)
    }
}

fn slice_range(len: usize, lower: Option<isize>, upper: Option<isize>) -> Range<usize> {
    let start = lower.map_or(0, |b| clamp_bound(len, b));
    let end = upper.map_or(len, |b| clamp_bound(len, b));
    if start >= end {
        return start..start;
    }
    start..end
}
