mod accumulators;
mod partial_sort;
mod top_k_heap;

pub use accumulators::{Accumulator, AccumulatorTable};
pub use partial_sort::sort_top_k;
pub use top_k_heap::{TopKHeap, slot_cmp};
