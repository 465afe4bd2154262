//! Definition of the interface for accessing the transcript alignment store.

use serde::{Deserialize, Serialize};

use crate::data::error::Error;

/// Alignment method whose transcript-to-genome alignments are trusted.
pub const ALT_ALN_METHOD: &str = "splign";

/// Accession prefix of RefSeq primary chromosome sequences.
pub const PRIMARY_CHROM_AC_PREFIX: &str = "NC_00";

/// Transcript-local `[tx_start_i, tx_end_i)` span of one exon.
///
/// Parsed from one `start,end` item of the semicolon-separated `cds_se_i`
/// aggregate of CDS exons, e.g., `"0,234;234,310;..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExonSpan {
    pub tx_start_i: i32,
    pub tx_end_i: i32,
}

impl ExonSpan {
    /// Parse the `cds_se_i` aggregate of `tx_ac` into its exon spans.
    pub fn parse_list(tx_ac: &str, cds_se_i: &str) -> Result<Vec<Self>, Error> {
        cds_se_i
            .split(';')
            .filter(|item| !item.trim().is_empty())
            .map(|item| {
                let invalid = || Error::InvalidExonSpan(tx_ac.to_string(), item.to_string());
                let (start, end) = item.split_once(',').ok_or_else(invalid)?;
                let tx_start_i = start.trim().parse::<i32>().map_err(|_| invalid())?;
                let tx_end_i = end.trim().parse::<i32>().map_err(|_| invalid())?;
                if tx_start_i > tx_end_i {
                    return Err(invalid());
                }
                Ok(Self {
                    tx_start_i,
                    tx_end_i,
                })
            })
            .collect()
    }
}

/// Orientation of a transcript relative to the genome's forward strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl TryFrom<i16> for Strand {
    type Error = Error;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Strand::Plus),
            -1 => Ok(Strand::Minus),
            _ => Err(Error::InvalidStrand(value)),
        }
    }
}

impl Strand {
    /// Genomic position of the 5' end (in transcript orientation) of `[start, end]`.
    pub fn five_prime(&self, start: i32, end: i32) -> i32 {
        match self {
            Strand::Plus => start,
            Strand::Minus => end,
        }
    }

    /// Genomic position of the 3' end (in transcript orientation) of `[start, end]`.
    pub fn three_prime(&self, start: i32, end: i32) -> i32 {
        match self {
            Strand::Plus => end,
            Strand::Minus => start,
        }
    }
}

/// Which exon boundary a transcript coordinate was taken from.
///
/// Adjacent exons share their boundary value in transcript coordinates, so
/// the containment test must know whether the coordinate is an exon end
/// (start boundary of a segment) or an exon start (end boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The coordinate is the end of an exon span; matched by `tx_start_i < pos <= tx_end_i`.
    Start,
    /// The coordinate is the start of an exon span; matched by `tx_start_i <= pos < tx_end_i`.
    End,
}

impl Boundary {
    /// Whether the transcript interval `[tx_start_i, tx_end_i]` contains `pos`.
    pub fn contains(&self, tx_start_i: i32, tx_end_i: i32, pos: i32) -> bool {
        match self {
            Boundary::Start => tx_start_i < pos && pos <= tx_end_i,
            Boundary::End => tx_start_i <= pos && pos < tx_end_i,
        }
    }
}

/// Genomic alignment of the exon containing a transcript position.
///
/// ```text
/// hgnc        | TPM3
/// alt_ac      | NC_000001.11
/// alt_start_i | 154191901
/// alt_end_i   | 154192135
/// alt_strand  | -1
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltAcAlignmentRecord {
    pub hgnc: String,
    pub alt_ac: String,
    pub alt_start_i: i32,
    pub alt_end_i: i32,
    pub alt_strand: Strand,
}

///```text
/// hgnc           | TPM3
/// tx_ac          | NM_152263.3
/// alt_ac         | NC_000001.11
/// alt_aln_method | splign
/// alt_strand     | -1
/// ord            | 0
/// tx_start_i     | 0
/// tx_end_i       | 234
/// alt_start_i    | 154191901
/// alt_end_i      | 154192135
///```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxExonsRecord {
    pub hgnc: String,
    pub tx_ac: String,
    pub alt_ac: String,
    pub alt_aln_method: String,
    pub alt_strand: Strand,
    pub ord: i32,
    pub tx_start_i: i32,
    pub tx_end_i: i32,
    pub alt_start_i: i32,
    pub alt_end_i: i32,
}

/// ```text
/// tx_ac          | NM_152263.3
/// alt_ac         | NC_000001.11
/// alt_aln_method | splign
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxMappingOptionsRecord {
    pub tx_ac: String,
    pub alt_ac: String,
    pub alt_aln_method: String,
}

/// Interface for data providers.
pub trait Provider {
    /// Return the data version, e.g., `uta_20210129`.
    fn data_version(&self) -> &str;

    /// Return the schema version, e.g., `"1.1"`.
    fn schema_version(&self) -> &str;

    /// Return the ordered exon spans of a transcript, or an empty `Vec` if
    /// the transcript is unknown.
    ///
    /// # Arguments
    ///
    /// * `tx_ac` -- transcript accession with version (e.g., 'NM_152263.3')
    fn get_tx_exon_spans(&self, tx_ac: &str) -> Result<Vec<ExonSpan>, Error>;

    /// Return the genomic alignment of the exon containing a transcript
    /// position, or `None` if there is none.
    ///
    /// Only alignments of `ALT_ALN_METHOD` against primary chromosome
    /// accessions are considered.  Among several, the highest accession wins.
    ///
    /// # Arguments
    ///
    /// * `tx_ac` -- transcript accession with version (e.g., 'NM_152263.3')
    /// * `tx_pos` -- transcript-local exon boundary coordinate
    /// * `boundary` -- which kind of exon boundary `tx_pos` is
    /// * `gene` -- optional gene symbol the alignment must be tagged with
    fn get_alt_ac_start_or_end(
        &self,
        tx_ac: &str,
        tx_pos: i32,
        boundary: Boundary,
        gene: Option<&str>,
    ) -> Result<Option<AltAcAlignmentRecord>, Error>;

    /// Return the `ALT_ALN_METHOD` exon alignments of a transcript on `alt_ac`
    /// ordered by exon ordinal, or an empty `Vec` if there are none.
    ///
    /// # Arguments
    ///
    /// * `tx_ac` -- transcript accession with version (e.g., 'NM_152263.3')
    /// * `alt_ac` -- specific genomic sequence (e.g., NC_000001.11)
    fn get_tx_exons(&self, tx_ac: &str, alt_ac: &str) -> Result<Vec<TxExonsRecord>, Error>;

    /// Return all transcript alignment sets for a given transcript accession.
    ///
    /// Returns empty list if transcript does not exist.
    ///
    /// # Arguments
    ///
    /// * `tx_ac` -- transcript accession with version (e.g., 'NM_152263.3')
    fn get_tx_mapping_options(&self, tx_ac: &str) -> Result<Vec<TxMappingOptionsRecord>, Error>;

    /// Return the sequence identifier recorded for a sequence accession.
    ///
    /// # Arguments
    ///
    /// * `ac` -- sequence accession (e.g., 'NC_000001.11')
    fn get_seq_id(&self, ac: &str) -> Result<Option<String>, Error>;
}
