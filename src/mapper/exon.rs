//! Resolution of transcript exon ranges to genomic coordinates.

use serde::{Deserialize, Serialize};

use crate::{
    common::{clean_accession, clean_gene_symbol},
    data::{AltAcAlignmentRecord, Boundary, ExonSpan, Strand},
    mapper::{Error, Mapper, Outcome},
    static_data::chrom_name,
};

/// Exon range on a transcript to resolve to genomic coordinates.
///
/// Exon numbers are 1-based; `0` selects the first exon for `exon_start` and
/// the last exon for `exon_end`.  Offsets count bases in transcript
/// orientation from the respective exon boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExonRangeRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub gene: Option<String>,
    #[serde(default)]
    pub exon_start: u32,
    #[serde(default)]
    pub exon_end: u32,
    #[serde(default)]
    pub exon_start_offset: i32,
    #[serde(default)]
    pub exon_end_offset: i32,
}

/// Genomic coordinates resolved for an exon range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomicCoords {
    /// The transcript accession.
    pub transcript: String,
    /// Gene symbol of the alignment.
    pub gene: String,
    /// Genomic accession, e.g., `NC_000001.11`.
    pub chr: String,
    /// Chromosome name, if `chr` is a known primary accession.
    pub chromosome: Option<String>,
    /// Strand of the alignment.
    pub strand: Strand,
    /// Genomic position of the range's 5' end, offset applied.
    pub start: i32,
    /// Genomic position of the range's 3' end, offset applied.
    pub end: i32,
    /// First exon (1-based) after applying defaults.
    pub exon_start: u32,
    /// Offset from the first exon's boundary, as requested.
    pub exon_start_offset: i32,
    /// Last exon (1-based) after applying defaults.
    pub exon_end: u32,
    /// Offset from the last exon's boundary, as requested.
    pub exon_end_offset: i32,
}

/// Return the 1-based `exon` of `spans`.
fn exon_span(spans: &[ExonSpan], tx_ac: &str, exon: u32) -> Result<ExonSpan, Error> {
    (exon as usize)
        .checked_sub(1)
        .and_then(|idx| spans.get(idx))
        .copied()
        .ok_or_else(|| Error::ExonOutOfBounds {
            tx_ac: tx_ac.to_string(),
            exon,
            count: spans.len(),
        })
}

/// Shift a genomic position by an offset given in transcript orientation.
pub(crate) fn apply_offset(strand: Strand, pos: i32, offset: i32) -> Result<i32, Error> {
    let out_of_range = || Error::OffsetOutOfRange { pos, offset };
    let offset = match strand {
        Strand::Plus => offset,
        Strand::Minus => offset.checked_neg().ok_or_else(out_of_range)?,
    };
    pos.checked_add(offset).ok_or_else(out_of_range)
}

impl Mapper {
    /// Resolve an exon range of a transcript to genomic coordinates.
    ///
    /// Failures are logged and returned as `Outcome::Failed`.
    pub fn exon_to_genomic(&self, request: &ExonRangeRequest) -> Outcome<GenomicCoords> {
        Outcome::from_result(self.try_exon_to_genomic(request))
    }

    fn try_exon_to_genomic(&self, request: &ExonRangeRequest) -> Result<GenomicCoords, Error> {
        let tx_ac = clean_accession(&request.transcript);
        if tx_ac.is_empty() {
            return Err(Error::MissingTranscript);
        }
        let gene = clean_gene_symbol(request.gene.as_deref());

        let (exon_start, exon_end) = (request.exon_start, request.exon_end);
        if exon_start != 0 && exon_end != 0 && exon_start > exon_end {
            return Err(Error::InvalidExonRange(exon_start, exon_end));
        }

        let spans = self
            .provider
            .get_tx_exon_spans(tx_ac)
            .map_err(|source| Error::Upstream {
                tx_ac: tx_ac.to_string(),
                source,
            })?;
        if spans.is_empty() {
            return Err(Error::TranscriptNotFound(tx_ac.to_string()));
        }

        let exon_start = if exon_start == 0 { 1 } else { exon_start };
        let exon_end = if exon_end == 0 {
            spans.len() as u32
        } else {
            exon_end
        };
        if exon_start > exon_end {
            return Err(Error::InvalidExonRange(exon_start, exon_end));
        }

        // The segment runs from the end of the start exon's span to the start
        // of the end exon's span.
        let tx_exon_start = exon_span(&spans, tx_ac, exon_start)?;
        let tx_exon_end = exon_span(&spans, tx_ac, exon_end)?;
        let aln_start = self.alignment_at(
            tx_ac,
            tx_exon_start.tx_end_i,
            Boundary::Start,
            gene.as_deref(),
        )?;
        let aln_end = self.alignment_at(
            tx_ac,
            tx_exon_end.tx_start_i,
            Boundary::End,
            gene.as_deref(),
        )?;

        if aln_start.alt_ac != aln_end.alt_ac {
            return Err(Error::InconsistentAccession {
                tx_ac: tx_ac.to_string(),
                start: aln_start.alt_ac,
                end: aln_end.alt_ac,
            });
        }
        if aln_start.alt_strand != aln_end.alt_strand {
            return Err(Error::InconsistentStrand(tx_ac.to_string()));
        }
        let strand = aln_start.alt_strand;

        let start = strand.five_prime(aln_start.alt_start_i, aln_start.alt_end_i);
        let end = strand.three_prime(aln_end.alt_start_i, aln_end.alt_end_i);
        let start = apply_offset(strand, start, request.exon_start_offset)?;
        let end = apply_offset(strand, end, request.exon_end_offset)?;

        Ok(GenomicCoords {
            transcript: tx_ac.to_string(),
            gene: aln_start.hgnc,
            chromosome: chrom_name(&aln_start.alt_ac).map(str::to_string),
            chr: aln_start.alt_ac,
            strand,
            start,
            end,
            exon_start,
            exon_start_offset: request.exon_start_offset,
            exon_end,
            exon_end_offset: request.exon_end_offset,
        })
    }

    fn alignment_at(
        &self,
        tx_ac: &str,
        tx_pos: i32,
        boundary: Boundary,
        gene: Option<&str>,
    ) -> Result<AltAcAlignmentRecord, Error> {
        self.provider
            .get_alt_ac_start_or_end(tx_ac, tx_pos, boundary, gene)
            .map_err(|source| Error::Upstream {
                tx_ac: tx_ac.to_string(),
                source,
            })?
            .ok_or_else(|| Error::NoAlignment {
                tx_ac: tx_ac.to_string(),
                tx_pos,
            })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        data::{
            test_helpers::{build_provider, TPM3_CDS},
            Provider as _, Strand,
        },
        mapper::{Config, Error, Mapper},
    };

    use super::{apply_offset, ExonRangeRequest, GenomicCoords};

    fn build_mapper() -> Mapper {
        Mapper::new(&Config::default(), build_provider())
    }

    fn request(transcript: &str, exon_start: u32, exon_end: u32) -> ExonRangeRequest {
        ExonRangeRequest {
            transcript: transcript.to_string(),
            exon_start,
            exon_end,
            ..Default::default()
        }
    }

    #[test_log::test]
    fn tpm3_first_eight_exons() {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request("NM_152263.3", 0, 8));

        assert_eq!(
            outcome.resolved(),
            Some(&GenomicCoords {
                transcript: "NM_152263.3".to_string(),
                gene: "TPM3".to_string(),
                chr: "NC_000001.11".to_string(),
                chromosome: Some("1".to_string()),
                strand: Strand::Minus,
                start: 154192135,
                end: 154170399,
                exon_start: 1,
                exon_start_offset: 0,
                exon_end: 8,
                exon_end_offset: 0,
            })
        );
    }

    #[test]
    fn defaults_span_first_to_last_exon() {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request("NM_152263.3", 0, 0));
        let coords = outcome.resolved().expect("should resolve");

        assert_eq!((coords.exon_start, coords.exon_end), (1, 10));
        assert_eq!((coords.start, coords.end), (154192135, 154161000));
    }

    #[rstest]
    #[case::exon_out_of_bounds("NM_152263.3", 0, 22)]
    #[case::start_out_of_bounds("NM_152263.3", 22, 0)]
    #[case::inverted_range("NM_152263.3", 8, 1)]
    #[case::unknown_transcript("NM_12345.6", 0, 0)]
    #[case::unknown_transcript_with_exons("NM_12345.6", 1, 2)]
    #[case::blank_transcript("  ", 1, 2)]
    #[case::no_alignment("NM_000001.1", 0, 0)]
    #[case::inconsistent_accession("NM_000000.1", 0, 0)]
    #[case::inconsistent_strand("NM_000002.1", 0, 0)]
    #[case::upstream_error("NM_999999.9", 0, 0)]
    fn unresolvable(#[case] transcript: &str, #[case] exon_start: u32, #[case] exon_end: u32) {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request(transcript, exon_start, exon_end));

        assert!(!outcome.is_resolved());
        assert_eq!(outcome.warnings().len(), 1);
    }

    #[test]
    fn inverted_range_fails_before_querying() {
        // The failing transcript would yield a different warning if queried.
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request("NM_999999.9", 3, 2));

        assert_eq!(
            outcome.warnings(),
            &["start exon 3 is greater than end exon 2".to_string()]
        );
    }

    #[test]
    fn inconsistent_context_is_reported() {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request("NM_000000.1", 0, 0));

        assert_eq!(
            outcome.warnings(),
            &["inconsistent genomic context for NM_000000.1: accessions \
               NC_000002.12 and NC_000003.12 differ"
                .to_string()]
        );
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(10)]
    fn single_exon(#[case] exon: u32) {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request("NM_152263.3", exon, exon));
        let coords = outcome.resolved().expect("should resolve");

        assert_eq!((coords.exon_start, coords.exon_end), (exon, exon));
        // Minus strand: the exon's 5' end lies downstream of its 3' end.
        assert!(coords.start > coords.end);
    }

    #[test]
    fn cds_clipped_terminal_exons() -> Result<(), anyhow::Error> {
        let provider = build_provider();
        let spans = provider.get_tx_exon_spans("NM_152263.3")?;
        assert_eq!(spans.first().map(|s| s.tx_start_i), Some(TPM3_CDS.0));
        assert_eq!(spans.last().map(|s| s.tx_end_i), Some(TPM3_CDS.1));

        let mapper = Mapper::new(&Config::default(), provider);
        for (exon, expected) in [(1, (154192135, 154191901)), (10, (154162431, 154161000))] {
            let coords = mapper
                .exon_to_genomic(&request("NM_152263.3", exon, exon))
                .resolved()
                .cloned()
                .expect("should resolve");
            assert_eq!((coords.start, coords.end), expected);
        }

        Ok(())
    }

    #[test]
    fn boundaries_use_span_end_for_start_and_span_start_for_end() {
        let mapper = build_mapper();

        // Exon 2 spans [100, 250) and shares 100 with exon 1 and 250 with
        // exon 3; both lookups must land on exon 2 itself.
        let coords = mapper
            .exon_to_genomic(&request("NM_005243.4", 2, 2))
            .resolved()
            .cloned()
            .expect("should resolve");

        assert_eq!((coords.start, coords.end), (29272000, 29272150));

        let coords = mapper
            .exon_to_genomic(&request("NM_005243.4", 1, 2))
            .resolved()
            .cloned()
            .expect("should resolve");

        assert_eq!((coords.start, coords.end), (29268009, 29272150));
    }

    #[rstest]
    #[case::plus_strand("NM_005243.4", 29287150, 29287155)]
    #[case::minus_strand("NM_152263.3", 154170399, 154170394)]
    fn end_offset_sign_follows_strand(
        #[case] transcript: &str,
        #[case] end_without: i32,
        #[case] end_with: i32,
    ) {
        let mapper = build_mapper();
        let exon_end = if transcript == "NM_152263.3" { 8 } else { 3 };

        let base = request(transcript, 1, exon_end);
        let shifted = ExonRangeRequest {
            exon_end_offset: 5,
            ..base.clone()
        };

        let base = mapper.exon_to_genomic(&base);
        let shifted = mapper.exon_to_genomic(&shifted);

        assert_eq!(base.resolved().map(|c| c.end), Some(end_without));
        assert_eq!(shifted.resolved().map(|c| c.end), Some(end_with));
        assert_eq!(shifted.resolved().map(|c| c.exon_end_offset), Some(5));
    }

    #[test]
    fn start_offset_sign_follows_strand() {
        let mapper = build_mapper();

        let plus = mapper.exon_to_genomic(&ExonRangeRequest {
            exon_start_offset: -3,
            ..request("NM_005243.4", 1, 3)
        });
        let minus = mapper.exon_to_genomic(&ExonRangeRequest {
            exon_start_offset: -3,
            ..request("NM_152263.3", 1, 8)
        });

        assert_eq!(plus.resolved().map(|c| c.start), Some(29268006));
        assert_eq!(minus.resolved().map(|c| c.start), Some(154192138));
    }

    #[rstest]
    #[case(Some("tpm3 "), true)]
    #[case(Some("TPM3"), true)]
    #[case(Some(""), true)]
    #[case(Some("BRAF"), false)]
    fn gene_filter(#[case] gene: Option<&str>, #[case] resolves: bool) {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&ExonRangeRequest {
            gene: gene.map(str::to_string),
            ..request("NM_152263.3", 1, 8)
        });

        assert_eq!(outcome.is_resolved(), resolves);
    }

    #[test]
    fn transcript_is_trimmed() {
        let mapper = build_mapper();

        let outcome = mapper.exon_to_genomic(&request(" NM_152263.3\t", 0, 8));

        assert_eq!(
            outcome.resolved().map(|c| c.transcript.as_str()),
            Some("NM_152263.3")
        );
    }

    #[test]
    fn idempotent() {
        let mapper = build_mapper();
        let request = ExonRangeRequest {
            exon_start_offset: 2,
            exon_end_offset: -4,
            ..request("NM_152263.3", 2, 7)
        };

        assert_eq!(
            mapper.exon_to_genomic(&request),
            mapper.exon_to_genomic(&request)
        );
    }

    #[test]
    fn offsets() -> Result<(), Error> {
        assert_eq!(apply_offset(Strand::Plus, 100, 5)?, 105);
        assert_eq!(apply_offset(Strand::Minus, 100, 5)?, 95);
        assert!(apply_offset(Strand::Minus, 100, i32::MIN).is_err());
        assert!(apply_offset(Strand::Plus, i32::MAX, 1).is_err());

        Ok(())
    }
}
