//! Error type shared by constructors, the text façade and the extension surface.

use thiserror::Error;

/// Errors returned by fallible [`RunArray`](crate::RunArray) operations.
///
/// Range operations never fail: a range that clamps to nothing is a no-op.
#[derive(Error, Debug)]
pub enum Error {
    #[error("empty domain: min index must be strictly below max index")]
    EmptyDomain,
    #[error("no values to compress")]
    EmptyInput,
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error("failed to parse token {token:?} at position {index}: {reason}")]
    Parse {
        index: usize,
        token: String,
        reason: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
