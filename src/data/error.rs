//! Error type definition.

use thiserror::Error;

/// Error type for data.
#[derive(Error, Debug)]
pub enum Error {
    #[error("UTA Postgres access error")]
    UtaPostgresError(#[from] postgres::Error),
    #[error("UTA connection is unusable after a panic in another thread")]
    ConnectionPoisoned,
    #[error("invalid exon span {1:?} for tx_ac={0}")]
    InvalidExonSpan(String, String),
    #[error("invalid alt_strand value {0}")]
    InvalidStrand(i16),
}
