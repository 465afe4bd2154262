//! In-memory provider for testing code on top of `data::Provider` without a database.

use std::sync::Arc;

use crate::common::accession_sort_key;

use super::{
    error::Error,
    interface::{ALT_ALN_METHOD, PRIMARY_CHROM_AC_PREFIX},
    AltAcAlignmentRecord, Boundary, ExonSpan, Provider, Strand, TxExonsRecord,
    TxMappingOptionsRecord,
};

/// Provider answering from in-memory tables, mirroring the UTA query semantics.
#[derive(Debug, Default)]
pub struct MemProvider {
    /// Exon structure per transcript as `(tx_ac, cds_se_i)`.
    pub exon_structures: Vec<(String, String)>,
    /// Aligned exons of all transcripts.
    pub tx_exons: Vec<TxExonsRecord>,
    /// Sequence identifiers as `(ac, seq_id)`.
    pub seq_ids: Vec<(String, String)>,
    /// Transcripts for which every query fails with a driver-level error.
    pub failing: Vec<String>,
}

impl MemProvider {
    fn check_failing(&self, tx_ac: &str) -> Result<(), Error> {
        if self.failing.iter().any(|ac| ac == tx_ac) {
            Err(Error::ConnectionPoisoned)
        } else {
            Ok(())
        }
    }

    /// Register a transcript aligned to `alt_ac` with the given exons as
    /// `(tx_start_i, tx_end_i, alt_start_i, alt_end_i)`.
    pub fn add_transcript(
        &mut self,
        hgnc: &str,
        tx_ac: &str,
        alt_ac: &str,
        alt_strand: Strand,
        exons: &[(i32, i32, i32, i32)],
    ) {
        if !self.exon_structures.iter().any(|(ac, _)| ac == tx_ac) {
            let cds_se_i = exons
                .iter()
                .map(|(s, e, _, _)| format!("{s},{e}"))
                .collect::<Vec<_>>()
                .join(";");
            self.exon_structures.push((tx_ac.to_string(), cds_se_i));
        }
        self.add_alignment(hgnc, tx_ac, alt_ac, ALT_ALN_METHOD, alt_strand, exons);
    }

    /// Clip the first and last exon spans of `tx_ac` to its CDS, as UTA's
    /// `cds_se_i` aggregate does.
    pub fn clip_to_cds(&mut self, tx_ac: &str, cds_start_i: i32, cds_end_i: i32) {
        for (ac, cds_se_i) in self.exon_structures.iter_mut().filter(|(ac, _)| ac == tx_ac) {
            let mut spans = ExonSpan::parse_list(ac, cds_se_i).unwrap_or_default();
            if let Some(first) = spans.first_mut() {
                first.tx_start_i = cds_start_i;
            }
            if let Some(last) = spans.last_mut() {
                last.tx_end_i = cds_end_i;
            }
            *cds_se_i = spans
                .iter()
                .map(|span| format!("{},{}", span.tx_start_i, span.tx_end_i))
                .collect::<Vec<_>>()
                .join(";");
        }
    }

    /// Register an additional alignment of an already known transcript.
    pub fn add_alignment(
        &mut self,
        hgnc: &str,
        tx_ac: &str,
        alt_ac: &str,
        alt_aln_method: &str,
        alt_strand: Strand,
        exons: &[(i32, i32, i32, i32)],
    ) {
        for (ord, (tx_start_i, tx_end_i, alt_start_i, alt_end_i)) in exons.iter().enumerate() {
            self.tx_exons.push(TxExonsRecord {
                hgnc: hgnc.to_string(),
                tx_ac: tx_ac.to_string(),
                alt_ac: alt_ac.to_string(),
                alt_aln_method: alt_aln_method.to_string(),
                alt_strand,
                ord: ord as i32,
                tx_start_i: *tx_start_i,
                tx_end_i: *tx_end_i,
                alt_start_i: *alt_start_i,
                alt_end_i: *alt_end_i,
            });
        }
    }
}

impl Provider for MemProvider {
    fn data_version(&self) -> &str {
        "uta_test"
    }

    fn schema_version(&self) -> &str {
        "1.1"
    }

    fn get_tx_exon_spans(&self, tx_ac: &str) -> Result<Vec<ExonSpan>, Error> {
        self.check_failing(tx_ac)?;
        match self.exon_structures.iter().find(|(ac, _)| ac == tx_ac) {
            Some((_, cds_se_i)) => ExonSpan::parse_list(tx_ac, cds_se_i),
            None => Ok(Vec::new()),
        }
    }

    fn get_alt_ac_start_or_end(
        &self,
        tx_ac: &str,
        tx_pos: i32,
        boundary: Boundary,
        gene: Option<&str>,
    ) -> Result<Option<AltAcAlignmentRecord>, Error> {
        self.check_failing(tx_ac)?;
        Ok(self
            .tx_exons
            .iter()
            .filter(|r| r.tx_ac == tx_ac)
            .filter(|r| r.alt_aln_method == ALT_ALN_METHOD)
            .filter(|r| r.alt_ac.starts_with(PRIMARY_CHROM_AC_PREFIX))
            .filter(|r| boundary.contains(r.tx_start_i, r.tx_end_i, tx_pos))
            .filter(|r| gene.map(|gene| r.hgnc == gene).unwrap_or(true))
            .max_by(|a, b| accession_sort_key(&a.alt_ac).cmp(&accession_sort_key(&b.alt_ac)))
            .map(|r| AltAcAlignmentRecord {
                hgnc: r.hgnc.clone(),
                alt_ac: r.alt_ac.clone(),
                alt_start_i: r.alt_start_i,
                alt_end_i: r.alt_end_i,
                alt_strand: r.alt_strand,
            }))
    }

    fn get_tx_exons(&self, tx_ac: &str, alt_ac: &str) -> Result<Vec<TxExonsRecord>, Error> {
        self.check_failing(tx_ac)?;
        let mut result = self
            .tx_exons
            .iter()
            .filter(|r| r.tx_ac == tx_ac && r.alt_ac == alt_ac)
            .filter(|r| r.alt_aln_method == ALT_ALN_METHOD)
            .cloned()
            .collect::<Vec<_>>();
        result.sort_by_key(|r| r.ord);
        Ok(result)
    }

    fn get_tx_mapping_options(&self, tx_ac: &str) -> Result<Vec<TxMappingOptionsRecord>, Error> {
        self.check_failing(tx_ac)?;
        let mut result: Vec<TxMappingOptionsRecord> = Vec::new();
        for r in self.tx_exons.iter().filter(|r| r.tx_ac == tx_ac) {
            let record = TxMappingOptionsRecord {
                tx_ac: r.tx_ac.clone(),
                alt_ac: r.alt_ac.clone(),
                alt_aln_method: r.alt_aln_method.clone(),
            };
            if !result.contains(&record) {
                result.push(record);
            }
        }
        Ok(result)
    }

    fn get_seq_id(&self, ac: &str) -> Result<Option<String>, Error> {
        Ok(self
            .seq_ids
            .iter()
            .find(|(key, _)| key == ac)
            .map(|(_, seq_id)| seq_id.clone()))
    }
}

/// TPM3 `NM_152263.3` exons on GRCh38 (minus strand), as
/// `(tx_start_i, tx_end_i, alt_start_i, alt_end_i)`.
pub const TPM3_EXONS: &[(i32, i32, i32, i32)] = &[
    (0, 234, 154191901, 154192135),
    (234, 310, 154184774, 154184850),
    (310, 436, 154180600, 154180726),
    (436, 499, 154179100, 154179163),
    (499, 571, 154177500, 154177572),
    (571, 648, 154175100, 154175177),
    (648, 750, 154173500, 154173602),
    (750, 811, 154170399, 154170460),
    (811, 869, 154169300, 154169358),
    (869, 2300, 154161000, 154162431),
];

/// CDS start and end of `NM_152263.3` in transcript coordinates.
pub const TPM3_CDS: (i32, i32) = (120, 975);

/// The same exons on GRCh37.
pub const TPM3_EXONS_GRCH37: &[(i32, i32, i32, i32)] = &[
    (0, 234, 154164377, 154164611),
    (234, 310, 154157250, 154157326),
    (310, 436, 154153076, 154153202),
    (436, 499, 154151576, 154151639),
    (499, 571, 154149976, 154150048),
    (571, 648, 154147576, 154147653),
    (648, 750, 154145976, 154146078),
    (750, 811, 154142875, 154142936),
    (811, 869, 154141776, 154141834),
    (869, 2300, 154133476, 154134907),
];

/// EWSR1 `NM_005243.4` exons on GRCh38 (plus strand).
pub const EWSR1_EXONS: &[(i32, i32, i32, i32)] = &[
    (0, 100, 29268009, 29268109),
    (100, 250, 29272000, 29272150),
    (250, 400, 29287000, 29287150),
];

/// Build the provider used throughout the tests.
///
/// * `NM_152263.3` (TPM3, minus strand) with CDS-clipped exon spans, aligned
///   to GRCh38 and GRCh37, plus a `blat` alignment and an alternate locus
///   alignment that must be ignored.
/// * `NM_005243.4` (EWSR1, plus strand) aligned to GRCh38.
/// * `NM_000000.1` whose last exon only aligns to another chromosome.
/// * `NM_000002.1` whose last exon aligns to the other strand.
/// * `NM_000001.1` whose transcript structure has no alignment at all.
/// * `NM_999999.9` for which every query fails.
pub fn build_provider() -> Arc<MemProvider> {
    let mut provider = MemProvider::default();
    provider.add_transcript("TPM3", "NM_152263.3", "NC_000001.11", Strand::Minus, TPM3_EXONS);
    provider.clip_to_cds("NM_152263.3", TPM3_CDS.0, TPM3_CDS.1);
    provider.add_alignment(
        "TPM3",
        "NM_152263.3",
        "NC_000001.10",
        ALT_ALN_METHOD,
        Strand::Minus,
        TPM3_EXONS_GRCH37,
    );
    provider.add_alignment(
        "TPM3",
        "NM_152263.3",
        "NC_000001.11",
        "blat",
        Strand::Minus,
        &[(0, 234, 1, 235)],
    );
    provider.add_alignment(
        "TPM3",
        "NM_152263.3",
        "NW_025791756.1",
        ALT_ALN_METHOD,
        Strand::Plus,
        &[(0, 234, 1000, 1234)],
    );
    provider.add_transcript("EWSR1", "NM_005243.4", "NC_000022.11", Strand::Plus, EWSR1_EXONS);
    provider.add_transcript(
        "ABC1",
        "NM_000000.1",
        "NC_000002.12",
        Strand::Plus,
        &[(0, 100, 5000, 5100), (100, 200, 6000, 6100)],
    );
    provider.tx_exons.retain(|r| !(r.tx_ac == "NM_000000.1" && r.ord == 1));
    provider.add_alignment(
        "ABC1",
        "NM_000000.1",
        "NC_000003.12",
        ALT_ALN_METHOD,
        Strand::Plus,
        &[(0, 100, 9000, 9100), (100, 200, 9200, 9300)],
    );
    provider
        .tx_exons
        .retain(|r| !(r.tx_ac == "NM_000000.1" && r.alt_ac == "NC_000003.12" && r.ord == 0));
    provider.add_transcript(
        "DEF2",
        "NM_000002.1",
        "NC_000004.12",
        Strand::Plus,
        &[(0, 100, 7000, 7100), (100, 200, 8000, 8100)],
    );
    for record in provider.tx_exons.iter_mut() {
        if record.tx_ac == "NM_000002.1" && record.ord == 1 {
            record.alt_strand = Strand::Minus;
        }
    }
    provider
        .exon_structures
        .push(("NM_000001.1".to_string(), "0,100;100,200".to_string()));
    provider.failing.push("NM_999999.9".to_string());
    provider
        .seq_ids
        .push(("NC_000001.11".to_string(), "Ya6Rs7DHhDeg7YaOSg1EoNi3U_nQ9SvO".to_string()));
    Arc::new(provider)
}
