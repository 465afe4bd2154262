//! Error type definition.

use thiserror::Error;

/// Coarse classification of resolution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transcript, exon, or alignment has no data.
    NotFound,
    /// Exon range or positions are unusable.
    InvalidRange,
    /// The two boundaries disagree on genomic accession or strand.
    Inconsistent,
    /// The transcript database raised an error.
    Upstream,
}

/// Error type for coordinate resolution.
#[derive(Error, Debug)]
pub enum Error {
    #[error("must provide a transcript accession")]
    MissingTranscript,
    #[error("must provide a genomic start or end position")]
    MissingPosition,
    #[error("genomic position {0} must not be negative")]
    NegativePosition(i32),
    #[error("unable to get exons for {0}")]
    TranscriptNotFound(String),
    #[error("start exon {0} is greater than end exon {1}")]
    InvalidExonRange(u32, u32),
    #[error("exon {exon} does not exist on {tx_ac} which has {count} exons")]
    ExonOutOfBounds {
        tx_ac: String,
        exon: u32,
        count: usize,
    },
    #[error("unable to find a genomic alignment for {tx_ac} at transcript position {tx_pos}")]
    NoAlignment { tx_ac: String, tx_pos: i32 },
    #[error("unable to find exons of {tx_ac} on {alt_ac}")]
    NoExonsOnAccession { tx_ac: String, alt_ac: String },
    #[error("unable to find a primary chromosome alignment for {0}")]
    NoPrimaryAlignment(String),
    #[error("unknown chromosome {0}")]
    UnknownChromosome(String),
    #[error("gene {gene} does not match {tx_ac} alignment gene {found}")]
    GeneMismatch {
        tx_ac: String,
        gene: String,
        found: String,
    },
    #[error("inconsistent genomic context for {tx_ac}: accessions {start} and {end} differ")]
    InconsistentAccession {
        tx_ac: String,
        start: String,
        end: String,
    },
    #[error("inconsistent genomic context for {0}: exon strands differ")]
    InconsistentStrand(String),
    #[error("offset {offset} moves position {pos} out of range")]
    OffsetOutOfRange { pos: i32, offset: i32 },
    #[error("unable to get exons for {tx_ac}")]
    Upstream {
        tx_ac: String,
        #[source]
        source: crate::data::Error,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingTranscript
            | Error::MissingPosition
            | Error::NegativePosition(_)
            | Error::InvalidExonRange(..)
            | Error::OffsetOutOfRange { .. } => ErrorKind::InvalidRange,
            Error::TranscriptNotFound(_)
            | Error::ExonOutOfBounds { .. }
            | Error::NoAlignment { .. }
            | Error::NoExonsOnAccession { .. }
            | Error::NoPrimaryAlignment(_)
            | Error::UnknownChromosome(_)
            | Error::GeneMismatch { .. } => ErrorKind::NotFound,
            Error::InconsistentAccession { .. } | Error::InconsistentStrand(_) => {
                ErrorKind::Inconsistent
            }
            Error::Upstream { .. } => ErrorKind::Upstream,
        }
    }
}
