//! Character categories and pool construction.
//!
//! The selectable character universe is built from four fixed,
//! disjoint alphabets. The pool is derived on demand from a set of
//! category flags and never stored.

mod pool;

pub use pool::{build_pool, pool_size, Category, CategoryFlags};
