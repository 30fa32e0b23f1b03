//! In-place mutations.
//!
//! Every operation here clamps its range with
//! [`valid_range`](crate::RunArray::valid_range) first and is a silent no-op
//! when nothing remains. The edits are expressed as run lists handed to the
//! store's splice primitive, so canonical form holds on return and the cost is
//! proportional to the number of runs touched:
//! - [`assign`]     : range overwrite with one value or a run list.
//! - [`structural`] : insertion, append/prepend, erasure and domain shifts.
//! - [`reorder`]    : reversal, clustering sort, substitution, per-run transforms.

pub mod assign;
pub mod reorder;
pub mod structural;
