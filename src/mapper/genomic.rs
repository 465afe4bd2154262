//! Resolution of genomic positions to transcript exons and offsets.

use serde::{Deserialize, Serialize};

use crate::{
    common::{accession_sort_key, clean_accession, clean_gene_symbol},
    data::{
        interface::{ALT_ALN_METHOD, PRIMARY_CHROM_AC_PREFIX},
        Boundary, Strand, TxExonsRecord,
    },
    mapper::{Error, ExonRangeRequest, Mapper, Outcome},
    static_data::chrom_name,
};

/// Genomic positions to place on the exons of a transcript.
///
/// `chromosome` may be a RefSeq accession or a chromosome name of the
/// configured assembly.  If missing, the transcript's highest primary
/// chromosome alignment is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenomicPosRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub gene: Option<String>,
    #[serde(default)]
    pub chromosome: Option<String>,
    /// Genomic position of the segment's 5' end.
    #[serde(default)]
    pub start: Option<i32>,
    /// Genomic position of the segment's 3' end.
    #[serde(default)]
    pub end: Option<i32>,
}

/// Exons and offsets resolved for genomic positions.
///
/// Each `start`/`end` related field is present only if the position was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExonCoords {
    /// The transcript accession.
    pub transcript: String,
    /// Gene symbol of the alignment.
    pub gene: String,
    /// Genomic accession the positions were placed on.
    pub chr: String,
    /// Chromosome name, if `chr` is a known primary accession.
    pub chromosome: Option<String>,
    /// Strand of the alignment.
    pub strand: Strand,
    /// The requested 5' position.
    pub start: Option<i32>,
    /// Exon (1-based) whose 5' end is nearest to `start`.
    pub exon_start: Option<u32>,
    /// Distance of `start` from that exon's 5' end, in transcript orientation.
    pub exon_start_offset: Option<i32>,
    /// The requested 3' position.
    pub end: Option<i32>,
    /// Exon (1-based) whose 3' end is nearest to `end`.
    pub exon_end: Option<u32>,
    /// Distance of `end` from that exon's 3' end, in transcript orientation.
    pub exon_end_offset: Option<i32>,
}

impl ExonCoords {
    /// Express these coordinates as an exon range request.
    pub fn to_exon_range_request(&self) -> ExonRangeRequest {
        ExonRangeRequest {
            transcript: self.transcript.clone(),
            gene: Some(self.gene.clone()),
            exon_start: self.exon_start.unwrap_or_default(),
            exon_end: self.exon_end.unwrap_or_default(),
            exon_start_offset: self.exon_start_offset.unwrap_or_default(),
            exon_end_offset: self.exon_end_offset.unwrap_or_default(),
        }
    }
}

/// Place `pos` on the exon boundary of kind `boundary` closest to it.
///
/// Exons containing `pos` win over exons that do not.  Returns the 1-based
/// exon number and the offset in transcript orientation.
fn locate(exons: &[TxExonsRecord], strand: Strand, pos: i32, boundary: Boundary) -> (u32, i32) {
    exons
        .iter()
        .map(|record| {
            let anchor = match boundary {
                Boundary::Start => strand.five_prime(record.alt_start_i, record.alt_end_i),
                Boundary::End => strand.three_prime(record.alt_start_i, record.alt_end_i),
            };
            let offset = match strand {
                Strand::Plus => pos - anchor,
                Strand::Minus => anchor - pos,
            };
            let contains = record.alt_start_i <= pos && pos <= record.alt_end_i;
            (!contains, offset.abs(), record.ord, offset)
        })
        .min()
        .map(|(_, _, ord, offset)| (ord as u32 + 1, offset))
        .unwrap_or_default()
}

impl Mapper {
    /// Resolve genomic positions to exons and offsets of a transcript.
    ///
    /// Failures are logged and returned as `Outcome::Failed`.
    pub fn genomic_to_exon(&self, request: &GenomicPosRequest) -> Outcome<ExonCoords> {
        Outcome::from_result(self.try_genomic_to_exon(request))
    }

    fn try_genomic_to_exon(&self, request: &GenomicPosRequest) -> Result<ExonCoords, Error> {
        let tx_ac = clean_accession(&request.transcript);
        if tx_ac.is_empty() {
            return Err(Error::MissingTranscript);
        }
        if request.start.is_none() && request.end.is_none() {
            return Err(Error::MissingPosition);
        }
        if let Some(pos) = [request.start, request.end].into_iter().flatten().find(|p| *p < 0) {
            return Err(Error::NegativePosition(pos));
        }
        let gene = clean_gene_symbol(request.gene.as_deref());

        let alt_ac = self.genomic_accession(tx_ac, request.chromosome.as_deref())?;
        let exons = self
            .provider
            .get_tx_exons(tx_ac, &alt_ac)
            .map_err(|source| Error::Upstream {
                tx_ac: tx_ac.to_string(),
                source,
            })?;
        let first = exons.first().ok_or_else(|| Error::NoExonsOnAccession {
            tx_ac: tx_ac.to_string(),
            alt_ac: alt_ac.clone(),
        })?;
        if let Some(gene) = gene.as_ref() {
            if let Some(record) = exons.iter().find(|record| &record.hgnc != gene) {
                return Err(Error::GeneMismatch {
                    tx_ac: tx_ac.to_string(),
                    gene: gene.clone(),
                    found: record.hgnc.clone(),
                });
            }
        }
        let strand = first.alt_strand;
        if exons.iter().any(|record| record.alt_strand != strand) {
            return Err(Error::InconsistentStrand(tx_ac.to_string()));
        }

        let start = request
            .start
            .map(|pos| locate(&exons, strand, pos, Boundary::Start));
        let end = request
            .end
            .map(|pos| locate(&exons, strand, pos, Boundary::End));

        Ok(ExonCoords {
            transcript: tx_ac.to_string(),
            gene: first.hgnc.clone(),
            chromosome: chrom_name(&alt_ac).map(str::to_string),
            chr: alt_ac,
            strand,
            start: request.start,
            exon_start: start.map(|(exon, _)| exon),
            exon_start_offset: start.map(|(_, offset)| offset),
            end: request.end,
            exon_end: end.map(|(exon, _)| exon),
            exon_end_offset: end.map(|(_, offset)| offset),
        })
    }

    /// Determine the genomic accession to place positions on.
    fn genomic_accession(&self, tx_ac: &str, chromosome: Option<&str>) -> Result<String, Error> {
        match chromosome.map(str::trim).filter(|chrom| !chrom.is_empty()) {
            Some(chrom) if chrom.to_ascii_uppercase().starts_with("NC_") => {
                Ok(chrom.to_ascii_uppercase())
            }
            Some(chrom) => self
                .config
                .assembly
                .accession_for(chrom)
                .map(str::to_string)
                .ok_or_else(|| Error::UnknownChromosome(chrom.to_string())),
            None => self
                .provider
                .get_tx_mapping_options(tx_ac)
                .map_err(|source| Error::Upstream {
                    tx_ac: tx_ac.to_string(),
                    source,
                })?
                .into_iter()
                .filter(|option| option.alt_aln_method == ALT_ALN_METHOD)
                .filter(|option| option.alt_ac.starts_with(PRIMARY_CHROM_AC_PREFIX))
                .map(|option| option.alt_ac)
                .max_by(|a, b| accession_sort_key(a).cmp(&accession_sort_key(b)))
                .ok_or_else(|| Error::NoPrimaryAlignment(tx_ac.to_string())),
        }
    }
}
