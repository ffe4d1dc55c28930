//! Bounded min-heap over accumulator slots
//!
//! Tracks the `top_k` strongest documents during a posting scan. Entries are
//! doc ids ("slots") into the accumulator cell array; the ordering key is the
//! cell value with the slot index as tie-break, which makes the order total
//! and deterministic. The root is the weakest tracked document - the current
//! eviction candidate.
//!
//! The heap is fixed capacity and supports the three operations the scan
//! needs: a bottom-up `build` once the tracked set fills, an in-place
//! `promote` when a tracked document's score grows, and `replace_root` when
//! an untracked document overtakes the eviction candidate. Entries never
//! duplicate: membership is decided by the engine before any of these are
//! called.

use std::cmp::Ordering;

use crate::DocId;
use crate::error::Result;
use crate::structures::Accumulator;

/// Total order on accumulator slots: cell value first, slot index as the
/// tie-break, so of two documents with equal scores the higher doc id ranks
/// higher.
#[inline]
pub fn slot_cmp<A: Accumulator>(cells: &[A], a: DocId, b: DocId) -> Ordering {
    cells[a as usize]
        .cmp(&cells[b as usize])
        .then_with(|| a.cmp(&b))
}

/// Fixed-capacity min-heap of accumulator slots.
///
/// The cell array is borrowed per call rather than owned: the engine holds
/// both structures and passes its table's cells into each operation.
pub struct TopKHeap {
    slots: Box<[DocId]>,
    len: usize,
}

impl TopKHeap {
    /// Create a heap with room for `top_k` slots.
    pub fn new(top_k: usize) -> Result<Self> {
        let mut slots: Vec<DocId> = Vec::new();
        slots.try_reserve_exact(top_k)?;
        slots.resize(top_k, 0);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            len: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The weakest tracked slot. Only meaningful once `build` has run.
    #[inline]
    pub fn root(&self) -> DocId {
        debug_assert!(self.len > 0, "root of an empty heap");
        self.slots[0]
    }

    /// Append a slot without sifting. Legal only below capacity, during the
    /// fill phase before `build`.
    #[inline]
    pub fn append(&mut self, slot: DocId) {
        debug_assert!(self.len < self.slots.len(), "append past capacity");
        self.slots[self.len] = slot;
        self.len += 1;
    }

    /// Forget all entries. O(1); slot contents are dead, not zeroed.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Bottom-up heapify of the current entries. O(len).
    pub fn build<A: Accumulator>(&mut self, cells: &[A]) {
        for idx in (0..self.len / 2).rev() {
            self.sift_down(cells, idx);
        }
    }

    /// Restore heap order after the cell for `slot` grew. The key can only
    /// have increased, so the entry can only sink; a single sift-down from
    /// its current position suffices.
    ///
    /// The slot is located by linear scan, which is fine at the small
    /// capacities top-k tracking uses.
    pub fn promote<A: Accumulator>(&mut self, cells: &[A], slot: DocId) {
        let position = self.slots[..self.len].iter().position(|&s| s == slot);
        debug_assert!(position.is_some(), "promote of an untracked slot");
        if let Some(position) = position {
            self.sift_down(cells, position);
        }
    }

    /// Evict the root in favour of `slot` and sift it down. The caller has
    /// already established that `slot` outranks the root.
    pub fn replace_root<A: Accumulator>(&mut self, cells: &[A], slot: DocId) {
        debug_assert!(self.len > 0, "replace_root of an empty heap");
        self.slots[0] = slot;
        self.sift_down(cells, 0);
    }

    /// The live entries, root first. Heap-ordered between `build` and the
    /// final sort; sorted descending after the sort.
    #[inline]
    pub fn slots(&self) -> &[DocId] {
        &self.slots[..self.len]
    }

    /// Mutable view of the live entries, for the results-time partial sort.
    #[inline]
    pub fn slots_mut(&mut self) -> &mut [DocId] {
        &mut self.slots[..self.len]
    }

    fn sift_down<A: Accumulator>(&mut self, cells: &[A], mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < self.len
                && slot_cmp(cells, self.slots[left], self.slots[smallest]) == Ordering::Less
            {
                smallest = left;
            }
            if right < self.len
                && slot_cmp(cells, self.slots[right], self.slots[smallest]) == Ordering::Less
            {
                smallest = right;
            }

            if smallest == idx {
                break;
            }
            self.slots.swap(idx, smallest);
            idx = smallest;
        }
    }
}
