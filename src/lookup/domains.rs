//! Protein domains per gene.

use std::{collections::HashMap, path::Path, time::Instant};

use serde::{Deserialize, Serialize};

use super::{read_tsv, Error};

/// One row of the domain table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub concept_id: String,
    pub interpro_id: String,
    pub domain_name: String,
    pub protein_ac: String,
}

/// Domains keyed by lower-cased gene concept identifier.
#[derive(Debug, Default)]
pub struct DomainTable {
    by_concept: HashMap<String, Vec<DomainRecord>>,
}

impl DomainTable {
    pub fn from_records(records: Vec<DomainRecord>) -> Self {
        let mut by_concept: HashMap<String, Vec<DomainRecord>> = HashMap::new();
        for record in records {
            by_concept
                .entry(record.concept_id.trim().to_lowercase())
                .or_default()
                .push(record);
        }
        Self { by_concept }
    }

    /// Load table from a TSV file, optionally gzip compressed.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        tracing::info!("loading domain table from {:?}...", path);
        let before_loading = Instant::now();
        let result = Self::from_records(read_tsv(path)?);
        tracing::info!(
            "... done loading domains of {} genes in {:?}",
            result.by_concept.len(),
            before_loading.elapsed()
        );
        Ok(result)
    }

    /// Domains of the gene `concept_id` in table order.
    pub fn lookup(&self, concept_id: &str) -> &[DomainRecord] {
        self.by_concept
            .get(&concept_id.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
