//! Run-length compressed ordered arrays.
//!
//! A [`RunArray`] stores a logical array over a contiguous integer index
//! domain `[min_index, max_index)` as a sorted map of *breakpoints*: the index
//! where each maximal run of equal values begins. Memory and most operation
//! costs scale with the number of runs rather than the number of indices, so
//! sparse or piecewise-constant data over huge domains stays cheap.
//!
//! ## Core idea
//! 1. Every index takes the value of the greatest breakpoint at or below it,
//!    or the array's background value if there is none.
//! 2. The breakpoint map is kept canonical after every operation: no two
//!    adjacent breakpoints hold equal values and the last breakpoint caps the
//!    final run. Equality of arrays is therefore structural.
//! 3. Range operations clamp their arguments to the domain; an empty or
//!    out-of-domain range is a silent no-op.
//!
//! ## Quick start
//! ```
//! use run_array::RunArray;
//!
//! let mut a: RunArray<i64, i64> = RunArray::with_bounds(0, 10, 0).unwrap();
//! a.assign_value(2, 5, 7);
//! a.assign_value(4, 8, 7);
//! assert_eq!(a.to_string(), "0 | (0, 2), (7, 6), (0, 2) | 10");
//!
//! a.erase(2, 8, false);
//! assert_eq!(a.bounds(), (0, 4));
//! assert_eq!(a.breakpoint_count(), 0);
//! ```
//!
//! ## Modules
//! - [`store`]: the canonical representation and bound management,
//! - [`query`]: lookups, range decomposition and reductions,
//! - [`mutation`]: range assignment, structural edits and reordering,
//! - [`compress`]: construction from slices, readers and files,
//! - [`render`]: compact and expanded text output,
//! - [`shared`]: a lock-protected wrapper for concurrent use,
//! - [`extension`]: cross-structure operations without a settled contract.
//!
//! ## Features
//! - `parallel`: min/max reductions over many runs use rayon.
//! - `tracing`: mutations enter trace spans; file construction logs at debug.
//! - `heavy`: enables the large stress tests.

pub mod builder;
pub mod compress;
pub mod error;
pub mod extension;
pub mod mutation;
pub mod query;
pub mod render;
pub mod run;
pub mod shared;
pub mod store;
pub mod traits;
pub mod utils;

pub use crate::builder::RunArrayBuilder;
pub use crate::error::{Error, Result};
pub use crate::query::Runs;
pub use crate::run::Run;
pub use crate::shared::SharedRunArray;
pub use crate::store::RunArray;
pub use crate::traits::{Arithmetic, Key, OverflowPolicy, Saturating, Wrapping};
