//! Bounded undo history.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::{EditError, Image};

/// Ordered record of image states with a cursor on the current one.
///
/// Entries are shared `Arc`s, so the history and the session's current
/// image point at the same buffer. Holds at most `max_depth` entries; the
/// oldest is evicted first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Arc<Image>>,
    cursor: usize,
    max_depth: usize,
}

impl History {
    /// Create an empty history. A `max_depth` of zero is treated as one.
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            entries: VecDeque::with_capacity(max_depth),
            cursor: 0,
            max_depth,
        }
    }

    /// Append `image` as the newest state and move the cursor onto it.
    ///
    /// Entries are never dropped except by eviction: states that were undone
    /// stay in the history, so undoing after an edit made from an older state
    /// walks back through them. Returns the evicted entry, if any.
    pub fn push(&mut self, image: Arc<Image>) -> Option<Arc<Image>> {
        self.entries.push_back(image);

        let evicted = if self.entries.len() > self.max_depth {
            let oldest = self.entries.pop_front();
            debug!(max_depth = self.max_depth, "history full, evicted oldest entry");
            oldest
        } else {
            None
        };

        self.cursor = self.entries.len() - 1;
        evicted
    }

    /// Step back one entry and return the new current image.
    ///
    /// # Errors
    ///
    /// `NoOpPossible` when the cursor is already on the oldest entry (or the
    /// history is empty). The cursor is left unchanged.
    pub fn undo(&mut self) -> Result<Arc<Image>, EditError> {
        if self.cursor == 0 {
            return Err(EditError::NoOpPossible);
        }
        self.cursor -= 1;
        self.entries
            .get(self.cursor)
            .cloned()
            .ok_or(EditError::NoOpPossible)
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&Arc<Image>> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// After N pushes: len = min(N, depth), cursor = len - 1.
        #[test]
        fn prop_len_and_cursor_after_pushes(n in 1usize..40, depth in 1usize..15) {
            let mut history = History::new(depth);
            for i in 0..n {
                history.push(Arc::new(Image::filled(1, 1, [i as u8, 0, 0, 255])));
            }
            prop_assert_eq!(history.len(), n.min(depth));
            prop_assert_eq!(history.cursor(), history.len() - 1);
            prop_assert_eq!(history.current().unwrap().pixel(0, 0)[0], (n - 1) as u8);
        }

        /// Undo succeeds exactly len - 1 times.
        #[test]
        fn prop_undo_count(n in 1usize..25) {
            let mut history = History::new(10);
            for _ in 0..n {
                history.push(Arc::new(Image::filled(1, 1, [0, 0, 0, 255])));
            }
            let mut undos = 0;
            while history.undo().is_ok() {
                undos += 1;
            }
            prop_assert_eq!(undos, n.min(10) - 1);
            prop_assert_eq!(history.cursor(), 0);
        }
    }
}
