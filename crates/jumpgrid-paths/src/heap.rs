//! Indexed binary min-heap used as the open set.
//!
//! The heap stores cell ids; the per-run node table stores, for each cell,
//! its current heap slot. Membership tests and decrease-key are therefore
//! O(1) lookups plus an O(log n) sift, with no searching.
//!
//! Ordering is by `f = g + h` ascending, ties broken by `h` ascending, so
//! that among equally promising cells the one closer to the goal comes
//! first.

use crate::error::PathError;
use crate::finder::{NO_SLOT, Node};

/// `a` sorts strictly before `b`.
#[inline]
fn less(a: &Node, b: &Node) -> bool {
    let (fa, fb) = (a.f(), b.f());
    fa < fb || (fa == fb && a.h < b.h)
}

/// Array-backed min-heap of cell ids with a fixed capacity.
///
/// Every cell can be open at most once, so a capacity equal to the grid's
/// cell count never runs out.
#[derive(Debug, Clone)]
pub(crate) struct OpenSet {
    items: Vec<usize>,
    len: usize,
}

impl OpenSet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: vec![0; capacity],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Forget every entry. Slots recorded on nodes become stale, which
    /// [`contains`](Self::contains) detects.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    /// The minimum entry, if any.
    #[inline]
    pub(crate) fn peek(&self) -> Option<usize> {
        (self.len > 0).then(|| self.items[0])
    }

    /// Whether `id` is currently in the heap.
    #[inline]
    pub(crate) fn contains(&self, nodes: &[Node], id: usize) -> bool {
        let slot = nodes[id].slot;
        slot < self.len && self.items[slot] == id
    }

    /// Add `id`, whose costs must already be set.
    pub(crate) fn insert(&mut self, nodes: &mut [Node], id: usize) {
        debug_assert!(!self.contains(nodes, id), "cell {id} inserted twice");
        debug_assert!(self.len < self.items.len(), "open set over capacity");
        let slot = self.len;
        self.items[slot] = id;
        nodes[id].slot = slot;
        self.len += 1;
        self.sift_up(nodes, slot);
    }

    /// Remove and return the minimum entry.
    pub(crate) fn extract_min(&mut self, nodes: &mut [Node]) -> Result<usize, PathError> {
        if self.len == 0 {
            return Err(PathError::EmptyHeap);
        }
        let min = self.items[0];
        self.len -= 1;
        if self.len > 0 {
            let last = self.items[self.len];
            self.items[0] = last;
            nodes[last].slot = 0;
            self.sift_down(nodes, 0);
        }
        nodes[min].slot = NO_SLOT;
        Ok(min)
    }

    /// Restore heap order after the costs of open cell `id` were lowered.
    ///
    /// Only moves the entry towards the root: calling this for a cell whose
    /// key did not decrease leaves the heap unchanged.
    pub(crate) fn decrease_key(&mut self, nodes: &mut [Node], id: usize) {
        if self.contains(nodes, id) {
            let slot = nodes[id].slot;
            self.sift_up(nodes, slot);
        }
    }

    fn sift_up(&mut self, nodes: &mut [Node], mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if less(&nodes[self.items[slot]], &nodes[self.items[parent]]) {
                self.swap(nodes, slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, nodes: &mut [Node], mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.len && less(&nodes[self.items[left]], &nodes[self.items[smallest]]) {
                smallest = left;
            }
            if right < self.len && less(&nodes[self.items[right]], &nodes[self.items[smallest]])
            {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(nodes, slot, smallest);
            slot = smallest;
        }
    }

    #[inline]
    fn swap(&mut self, nodes: &mut [Node], a: usize, b: usize) {
        self.items.swap(a, b);
        nodes[self.items[a]].slot = a;
        nodes[self.items[b]].slot = b;
    }

    /// Check the heap property and slot bookkeeping.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self, nodes: &[Node]) -> bool {
        (0..self.len).all(|slot| {
            let id = self.items[slot];
            let ordered = slot == 0 || !less(&nodes[id], &nodes[self.items[(slot - 1) / 2]]);
            ordered && nodes[id].slot == slot
        })
    }
}
