//! The accumulator-and-heap ranking engine
//!
//! One `Ranker` per worker thread. Per query the collaborating posting
//! decoder drives the lifecycle: `rewind()`, then `add_rsv(doc_id, impact)`
//! for every posting of every matching term, then `results()` to walk the
//! top-k in descending rank order. `add_rsv` is the hot path - no bounds
//! checks beyond debug assertions, no allocation, no branching beyond the
//! three-way tracked-set classification.
//!
//! The final top-k is a deterministic function of the multiset of
//! `(doc_id, score)` pairs fed in: addition is associative and saturating,
//! and the slot order is total (score, then doc id), so arrival order never
//! shows through.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::DocId;
use crate::error::{Error, Result};
use crate::index::PrimaryKeys;
use crate::memory::Arena;
use crate::structures::{Accumulator, AccumulatorTable, TopKHeap, slot_cmp, sort_top_k};

/// Scratch capacity handed to the query-text pipeline, per engine.
const SCRATCH_CAPACITY: usize = 64 * 1024;

/// Top-k ranking engine over a strip-partitioned accumulator table.
///
/// Generic over the accumulator width; `u16` is the conventional width for
/// impact-ordered indexes, where per-term impacts are small capped integers.
pub struct Ranker<A: Accumulator = u16> {
    accumulators: AccumulatorTable<A>,
    tracked: TopKHeap,
    primary_keys: Arc<PrimaryKeys>,
    scratch: Arena,
    documents: usize,
    top_k: usize,
    finalised: bool,
}

impl<A: Accumulator> Ranker<A> {
    /// Build an engine for `documents` docs tracking the `top_k` strongest.
    ///
    /// The accumulator grid, dirty flags, and slot array are allocated here,
    /// once; no query ever allocates. `primary_keys` must cover every valid
    /// doc id so results can always hand out a key.
    pub fn new(primary_keys: Arc<PrimaryKeys>, documents: usize, top_k: usize) -> Result<Self> {
        if documents == 0 {
            return Err(Error::InvalidParameter("documents must be at least 1".into()));
        }
        if top_k == 0 {
            return Err(Error::InvalidParameter("top_k must be at least 1".into()));
        }
        if top_k > documents {
            return Err(Error::InvalidParameter(format!(
                "top_k ({}) exceeds document count ({})",
                top_k, documents
            )));
        }
        if primary_keys.len() < documents {
            return Err(Error::InvalidParameter(format!(
                "primary key table holds {} keys for {} documents",
                primary_keys.len(),
                documents
            )));
        }

        let accumulators = AccumulatorTable::new(documents)?;
        let tracked = TopKHeap::new(top_k)?;
        let scratch = Arena::with_capacity(SCRATCH_CAPACITY)?;
        log::debug!(
            "ranker: {} documents, top_k {}, accumulator grid {}x{} (shift {})",
            documents,
            top_k,
            accumulators.width(),
            accumulators.height(),
            accumulators.shift(),
        );

        Ok(Self {
            accumulators,
            tracked,
            primary_keys,
            scratch,
            documents,
            top_k,
            finalised: false,
        })
    }

    #[inline]
    pub fn documents(&self) -> usize {
        self.documents
    }

    #[inline]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Add `score` to `doc_id`'s accumulator and keep the tracked set
    /// current. Infallible; `doc_id` must be in `[0, documents)` and the
    /// engine must not have been finalised since the last `rewind`.
    #[inline]
    pub fn add_rsv(&mut self, doc_id: DocId, score: A) {
        debug_assert!((doc_id as usize) < self.documents, "doc_id out of range");
        debug_assert!(!self.finalised, "add_rsv after results() without rewind()");

        self.accumulators.touch(doc_id);

        if self.tracked.len() < self.top_k {
            // Tracked set still filling: every first-seen document enters.
            let old = self.accumulators.add(doc_id, score);
            if old == A::ZERO {
                self.tracked.append(doc_id);
                if self.tracked.len() == self.top_k {
                    self.tracked.build(self.accumulators.cells());
                }
            }
        } else if slot_cmp(self.accumulators.cells(), doc_id, self.tracked.root())
            != Ordering::Less
        {
            // At or above the root before the update means already tracked
            // (every heap entry outranks or equals the root, and slots are
            // unique). The score only grew, so the entry can only sink.
            self.accumulators.add(doc_id, score);
            self.tracked.promote(self.accumulators.cells(), doc_id);
        } else {
            // Untracked; the update may push it past the eviction candidate.
            self.accumulators.add(doc_id, score);
            if slot_cmp(self.accumulators.cells(), doc_id, self.tracked.root())
                == Ordering::Greater
            {
                self.tracked.replace_root(self.accumulators.cells(), doc_id);
            }
        }
    }

    /// Reset for the next query: forget the tracked set and mark every
    /// accumulator strip clean. O(height), never O(documents). Idempotent.
    pub fn rewind(&mut self) {
        self.tracked.clear();
        self.accumulators.clear();
        self.finalised = false;
    }

    /// Sort the tracked set and iterate it in descending rank order.
    ///
    /// Yields at most `top_k` results; ties are broken by doc id, higher
    /// first. Repeated calls re-run the sort and yield the same sequence.
    /// The borrow keeps the engine locked while results are being read, so
    /// the next `add_rsv` or `rewind` is only reachable after the iterator
    /// is dropped.
    pub fn results(&mut self) -> Results<'_, A> {
        self.finalised = true;
        let returned = self.tracked.len().min(self.top_k);
        sort_top_k(
            self.accumulators.cells(),
            self.tracked.slots_mut(),
            self.top_k,
        );
        Results {
            cells: self.accumulators.cells(),
            keys: self.primary_keys.as_ref(),
            slots: &self.tracked.slots()[..returned],
            position: 0,
        }
    }

    /// Per-engine scratch arena for the surrounding query-text pipeline.
    /// Allocation takes `&self`; resetting it is [`Ranker::scratch_mut`] plus
    /// [`Arena::rewind`], owned by the pipeline, not by [`Ranker::rewind`].
    #[inline]
    pub fn scratch(&self) -> &Arena {
        &self.scratch
    }

    #[inline]
    pub fn scratch_mut(&mut self) -> &mut Arena {
        &mut self.scratch
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> &TopKHeap {
        &self.tracked
    }

    #[cfg(test)]
    pub(crate) fn accumulators(&self) -> &AccumulatorTable<A> {
        &self.accumulators
    }
}

/// One ranked result: internal doc id, external primary key, final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RankedDoc<'a, A> {
    pub doc_id: DocId,
    pub key: &'a str,
    pub score: A,
}

/// Iterator over the final top-k, strongest first.
///
/// Finite, forward-only; borrows the engine, so it is invalidated (at
/// compile time) by the next `add_rsv` or `rewind`.
pub struct Results<'a, A> {
    cells: &'a [A],
    keys: &'a PrimaryKeys,
    slots: &'a [DocId],
    position: usize,
}

impl<'a, A: Accumulator> Iterator for Results<'a, A> {
    type Item = RankedDoc<'a, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = *self.slots.get(self.position)?;
        self.position += 1;
        Some(RankedDoc {
            doc_id: slot,
            key: self
                .keys
                .get(slot)
                .expect("key table covers every document"),
            score: self.cells[slot as usize],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slots.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<'a, A: Accumulator> ExactSizeIterator for Results<'a, A> {}
