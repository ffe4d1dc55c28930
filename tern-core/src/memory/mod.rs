//! Bump allocation for per-query scratch memory
//!
//! Two variants: [`Arena`] bumps through one fixed preallocated buffer with
//! an atomic cursor, [`ChainedArena`] grows by chaining chunks when a buffer
//! runs out. Neither runs destructors; memory is reclaimed wholesale by
//! `rewind`.

mod arena;
mod chained;

pub use arena::Arena;
pub use chained::ChainedArena;
