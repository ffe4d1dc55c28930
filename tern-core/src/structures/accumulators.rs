//! Strip-partitioned accumulator table with lazy zeroing
//!
//! The table is a flat `width * height` array of score cells viewed as
//! `height` strips of `width = 2^shift` cells, with `shift` chosen so a strip
//! is about `sqrt(documents)` wide. A per-strip dirty flag says whether the
//! strip's cells are meaningful for the current query; a clean strip is
//! logically zero no matter what its memory holds. Clearing the table between
//! queries is therefore O(height) flag writes, and each strip is zeroed at
//! most once per query, on first touch.

use crate::DocId;
use crate::error::Result;

/// Unsigned score cell for the accumulator table.
///
/// Accumulation is saturating: for non-negative deltas the running sum is
/// monotone, so the final value is `min(true_sum, MAX)` under any arrival
/// order and the engine's determinism guarantee survives overflow.
pub trait Accumulator: Copy + Ord + Default + std::fmt::Debug {
    const ZERO: Self;
    const MAX: Self;

    fn saturating_add(self, rhs: Self) -> Self;
}

macro_rules! impl_accumulator {
    ($($ty:ty),*) => {
        $(
            impl Accumulator for $ty {
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$ty>::saturating_add(self, rhs)
                }
            }
        )*
    };
}

impl_accumulator!(u8, u16, u32, u64);

/// Per-document partial-score table for one engine instance.
///
/// Built once per engine and reused across queries; `clear` resets it in
/// O(height) without touching the cells.
pub struct AccumulatorTable<A> {
    cells: Box<[A]>,
    dirty: Box<[bool]>,
    shift: u32,
    width: usize,
    height: usize,
}

impl<A: Accumulator> AccumulatorTable<A> {
    /// Build a table covering doc ids `[0, documents)`.
    ///
    /// The strip width is the power of two nearest below `sqrt(documents)`,
    /// and the strip count is `(documents + width) / width` - the extra strip
    /// keeps `doc_id >> shift` in range when `documents` is not a multiple of
    /// the width.
    pub fn new(documents: usize) -> Result<Self> {
        debug_assert!(documents > 0, "document count must be at least 1");
        let shift = (documents as f64).sqrt().log2().floor() as u32;
        let width = 1usize << shift;
        let height = (documents + width) / width;
        Ok(Self {
            cells: try_alloc_slice(width * height)?,
            dirty: try_alloc_slice(height)?,
            shift,
            width,
            height,
        })
    }

    /// Strip containing `doc_id`.
    #[inline]
    pub fn strip_of(&self, doc_id: DocId) -> usize {
        (doc_id >> self.shift) as usize
    }

    /// Make the cell for `doc_id` readable: zero its strip if this is the
    /// strip's first touch since the last `clear`. O(width) worst case,
    /// amortised O(1) over a query.
    #[inline]
    pub fn touch(&mut self, doc_id: DocId) {
        let strip = self.strip_of(doc_id);
        if !self.dirty[strip] {
            self.dirty[strip] = true;
            let start = strip << self.shift;
            self.cells[start..start + self.width].fill(A::ZERO);
        }
    }

    /// Saturating-add `delta` into the cell for `doc_id`, returning the
    /// previous value. The strip must already be dirty.
    #[inline]
    pub fn add(&mut self, doc_id: DocId, delta: A) -> A {
        debug_assert!(
            self.dirty[self.strip_of(doc_id)],
            "cell read before its strip was touched"
        );
        let cell = &mut self.cells[doc_id as usize];
        let old = *cell;
        *cell = old.saturating_add(delta);
        old
    }

    /// Current value of the cell for `doc_id`. Meaningful only while the
    /// containing strip is dirty.
    #[inline]
    pub fn get(&self, doc_id: DocId) -> A {
        self.cells[doc_id as usize]
    }

    /// Reset all dirty flags. Cell contents are left behind; they are dead
    /// until the next `touch` of their strip.
    pub fn clear(&mut self) {
        self.dirty.fill(false);
    }

    /// Whether the strip containing `doc_id` holds live values.
    #[inline]
    pub fn is_dirty(&self, doc_id: DocId) -> bool {
        self.dirty[self.strip_of(doc_id)]
    }

    /// The flat cell array, indexed by doc id.
    #[inline]
    pub fn cells(&self) -> &[A] {
        &self.cells
    }

    #[inline]
    pub fn shift(&self) -> u32 {
        self.shift
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}

fn try_alloc_slice<T: Copy + Default>(len: usize) -> Result<Box<[T]>> {
    let mut buffer: Vec<T> = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, T::default());
    Ok(buffer.into_boxed_slice())
}
