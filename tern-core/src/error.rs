//! Error types for tern

use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;
