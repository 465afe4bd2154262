//! Access to the transcript alignment store.

pub mod error;
pub mod interface;
#[cfg(test)]
pub mod test_helpers;
pub mod uta;

pub use error::Error;
pub use interface::{
    AltAcAlignmentRecord, Boundary, ExonSpan, Provider, Strand, TxExonsRecord,
    TxMappingOptionsRecord,
};
