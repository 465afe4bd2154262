//! Gene lookup and term completion.

use std::{path::Path, time::Instant};

use enum_map::{Enum, EnumMap};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{read_tsv, Error};

/// Default number of suggestions per match kind.
pub const DEFAULT_SUGGEST_LIMIT: usize = 50;

/// How a term refers to a gene, in order of precedence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Symbol,
    PrevSymbol,
    Alias,
}

/// One row of the gene table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub term: String,
    pub kind: MatchKind,
    pub concept_id: String,
    pub symbol: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Result of `GeneTable::lookup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneMatch {
    pub concept_id: String,
    pub symbol: String,
    pub match_kind: MatchKind,
    pub location: Option<String>,
}

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub term: String,
    pub concept_id: String,
    pub symbol: String,
}

/// Result of `GeneTable::suggest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub term: String,
    pub matches: EnumMap<MatchKind, Vec<Suggestion>>,
    /// Number of matching terms before truncation.
    pub count: usize,
    pub warnings: Vec<String>,
}

/// Gene table indexed by lower-cased term.
#[derive(Debug, Default)]
pub struct GeneTable {
    records: Vec<Record>,
    by_term: IndexMap<String, Vec<usize>>,
}

impl GeneTable {
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut by_term: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_term
                .entry(record.term.trim().to_lowercase())
                .or_default()
                .push(idx);
        }
        Self { records, by_term }
    }

    /// Load table from a TSV file, optionally gzip compressed.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        tracing::info!("loading gene table from {:?}...", path);
        let before_loading = Instant::now();
        let result = Self::from_records(read_tsv(path)?);
        tracing::info!(
            "... done loading {} gene terms in {:?}",
            result.len(),
            before_loading.elapsed()
        );
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve `term` case-insensitively.
    ///
    /// An approved symbol wins over a previous symbol which wins over an
    /// alias; among equal kinds the first row of the table wins.
    pub fn lookup(&self, term: &str) -> Option<GeneMatch> {
        self.by_term
            .get(&term.trim().to_lowercase())?
            .iter()
            .map(|idx| &self.records[*idx])
            .min_by_key(|record| record.kind)
            .map(|record| GeneMatch {
                concept_id: record.concept_id.clone(),
                symbol: record.symbol.clone(),
                match_kind: record.kind,
                location: record.location.clone(),
            })
    }

    /// Collect terms starting with `prefix`, grouped by match kind.
    ///
    /// Each group is ordered by term length and then term, and truncated to
    /// `limit` entries.
    pub fn suggest(&self, prefix: &str, limit: usize) -> Suggestions {
        let term = prefix.trim().to_string();
        let mut matches: EnumMap<MatchKind, Vec<Suggestion>> = EnumMap::default();
        let mut warnings = Vec::new();
        if term.is_empty() {
            warnings.push("must provide a term to complete".to_string());
            return Suggestions {
                term,
                matches,
                count: 0,
                warnings,
            };
        }

        let needle = term.to_lowercase();
        for (key, idxs) in self.by_term.iter() {
            if !key.starts_with(&needle) {
                continue;
            }
            for record in idxs.iter().map(|idx| &self.records[*idx]) {
                matches[record.kind].push(Suggestion {
                    term: record.term.clone(),
                    concept_id: record.concept_id.clone(),
                    symbol: record.symbol.clone(),
                });
            }
        }

        let count = matches.values().map(Vec::len).sum::<usize>();
        if count > limit {
            let warning = format!(
                "exceeds max matches: got {} possible matches for {} (limit: {})",
                count, term, limit
            );
            tracing::warn!("{}", &warning);
            warnings.push(warning);
        }
        for group in matches.values_mut() {
            group.sort_by(|a, b| {
                (a.term.len(), &a.term).cmp(&(b.term.len(), &b.term))
            });
            group.truncate(limit);
        }

        Suggestions {
            term,
            matches,
            count,
            warnings,
        }
    }
}
