//! Round-robin selection over a fixed set of elements.

use std::sync::{Mutex, PoisonError};

use super::errors::SelectorError;

/// Cycles through a fixed, non-empty list, wrapping to the start after
/// the last element.
///
/// # Thread Safety
///
/// The cursor sits behind a `Mutex` so that reading the current position
/// and advancing it happen as one step. Concurrent callers never see the
/// same position twice within a cycle and never skip one.
#[derive(Debug)]
pub struct RoundRobinSelector<T> {
    elements: Vec<T>,
    cursor: Mutex<usize>,
}

impl<T> RoundRobinSelector<T> {
    /// Creates a selector positioned at the first element.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::EmptyCollection`] if `elements` is empty.
    pub fn new(elements: Vec<T>) -> Result<Self, SelectorError> {
        if elements.is_empty() {
            return Err(SelectorError::EmptyCollection);
        }
        Ok(Self {
            elements,
            cursor: Mutex::new(0),
        })
    }

    /// Returns the element at the cursor and advances it by one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> &T {
        // The guarded value is a plain index, so a poisoned lock is still usable.
        let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        let index = *cursor;
        *cursor = (index + 1) % self.elements.len();
        &self.elements[index]
    }

    /// Number of elements being cycled.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// All elements in cycle order.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }
}
