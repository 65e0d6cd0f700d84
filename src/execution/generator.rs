//! Deterministic walk over an accepted action sequence.

use crate::core::types::Action;
use std::iter::FusedIterator;
use std::slice;

/// Lazy traversal returned by [`generate`].
///
/// Yields each action once, in order, by reference. Dropping it before the
/// end is a normal way to stop. Cloning gives an independent traversal that
/// resumes from the same position.
#[derive(Debug, Clone)]
pub struct Generate<'a> {
    inner: slice::Iter<'a, Action>,
}

impl<'a> Iterator for Generate<'a> {
    type Item = &'a Action;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Generate<'_> {}

impl FusedIterator for Generate<'_> {}

/// Walk `actions` in their original order.
///
/// Performs no validation; run `validate_pipeline` first. Each call starts a
/// fresh traversal and never affects the source or other traversals.
pub fn generate(actions: &[Action]) -> Generate<'_> {
    Generate {
        inner: actions.iter(),
    }
}
