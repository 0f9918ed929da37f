//! Feed error types.

use basis_core::Instrument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("stale snapshot for {instrument}: sequence {got} <= last {last}")]
    StaleSequence {
        instrument: Instrument,
        last: u64,
        got: u64,
    },
}

pub type FeedResult<T> = Result<T, FeedError>;
