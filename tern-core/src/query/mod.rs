//! Query execution: the ranking engine and its results

mod engine;

pub use engine::{RankedDoc, Ranker, Results};
