//! Top-k partial sort of accumulator slots
//!
//! Runs once per query, after the posting scan: the heap's slot array is
//! reordered so its first `min(len, top_k)` entries are in descending rank
//! order. When the array is longer than `top_k`, quickselect places the
//! `top_k`-th strongest slot first and only the winning prefix is sorted;
//! the remainder is left in unspecified order.

use crate::DocId;
use crate::structures::{Accumulator, slot_cmp};

/// Sort `slots[..min(len, top_k)]` into descending rank order: strongest
/// score first, score ties won by the higher doc id. In place, O(len)
/// expected via introselect.
pub fn sort_top_k<A: Accumulator>(cells: &[A], slots: &mut [DocId], top_k: usize) {
    debug_assert!(top_k > 0, "top_k must be at least 1");
    let descending = |a: &DocId, b: &DocId| slot_cmp(cells, *b, *a);
    if slots.len() > top_k {
        slots.select_nth_unstable_by(top_k - 1, descending);
        slots[..top_k].sort_unstable_by(descending);
    } else {
        slots.sort_unstable_by(descending);
    }
}
