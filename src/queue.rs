// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! FIFO queue primitive.
//!
//! Checkout lines only need two operations from their storage: append at the
//! tail and remove from the head. [`Queue`] captures exactly that (plus a
//! length for reports) so that the configuration layer can pick the backing
//! implementation.

use crossbeam::queue::SegQueue;
use std::fmt;

/// Append-at-tail, remove-from-head container.
pub trait Queue<T> {
    /// Appends `item` to the tail.
    fn enqueue(&self, item: T);

    /// Removes the head, or returns `None` when the queue is empty.
    fn dequeue(&self) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A FIFO queue backed by a lock-free [`SegQueue`].
///
/// Operations take `&self`, so a slice of lines can be borrowed immutably
/// while shoppers are enqueued into one of them.
pub struct FifoQueue<T> {
    items: SegQueue<T>,
}

impl<T> FifoQueue<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            items: SegQueue::new(),
        }
    }
}

impl<T> Queue<T> for FifoQueue<T> {
    fn enqueue(&self, item: T) {
        self.items.push(item);
    }

    fn dequeue(&self) -> Option<T> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FifoQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoQueue")
            .field("len", &self.items.len())
            .finish()
    }
}
