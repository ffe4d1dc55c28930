//! Tern - an accumulator-and-heap ranking core for inverted-index search
//!
//! This library provides the innermost loop of disjunctive top-k retrieval:
//! - Strip-partitioned accumulator table with lazy per-strip zeroing, so a
//!   query never pays O(documents) to reset its scores
//! - Bounded min-heap over accumulator slots with in-place promotion and
//!   replace-min, tracking the strongest `top_k` documents during the scan
//! - Quickselect-based partial sort that materialises results in descending
//!   score order with deterministic doc-id tie-breaking
//! - Bump arenas (fixed and chained) for collaborator scratch memory
//!
//! Posting decoding, tokenisation, and index loading are external
//! collaborators: they feed `Ranker::add_rsv` and consume `Ranker::results`.

pub mod error;
pub mod index;
pub mod memory;
pub mod query;
pub mod structures;

// Re-exports from error
pub use error::{Error, Result};

// Re-exports from index
pub use index::PrimaryKeys;

// Re-exports from memory
pub use memory::{Arena, ChainedArena};

// Re-exports from query
pub use query::{RankedDoc, Ranker, Results};

// Re-exports from structures
pub use structures::{Accumulator, AccumulatorTable, TopKHeap, slot_cmp, sort_top_k};

/// Internal document identifier, dense in `[0, documents)`.
pub type DocId = u32;
