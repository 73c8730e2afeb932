//! Bounded sample history
//!
//! Fixed-capacity FIFO used for point and direction windows.

use std::collections::VecDeque;
use tracing::warn;

/// Smallest window any filter may use
pub const MIN_DEPTH: usize = 2;

/// FIFO that evicts its oldest entry once full
#[derive(Debug, Clone)]
pub struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Create a window; `capacity` below [`MIN_DEPTH`] is raised to it
    pub fn new(capacity: usize) -> Self {
        let capacity = clamp_depth(capacity);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append, evicting the oldest entry first if the window is full
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Resize; excess oldest entries are dropped immediately
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = clamp_depth(capacity);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no entries are stored
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn clamp_depth(depth: usize) -> usize {
    if depth < MIN_DEPTH {
        warn!("Window depth {} below minimum, using {}", depth, MIN_DEPTH);
        MIN_DEPTH
    } else {
        depth
    }
}
