//! Code supporting resolution between transcript exon and genomic coordinates.

mod error;
pub mod exon;
pub mod genomic;

use std::sync::Arc;

use serde::Serialize;

pub use error::{Error, ErrorKind};
pub use exon::{ExonRangeRequest, GenomicCoords};
pub use genomic::{ExonCoords, GenomicPosRequest};

use crate::{data::Provider, static_data::Assembly};

/// Configuration for `Mapper`.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Config {
    /// Assembly used for translating chromosome names to accessions.
    pub assembly: Assembly,
}

/// Resolves exon ranges and genomic positions against a `data::Provider`.
pub struct Mapper {
    config: Config,
    provider: Arc<dyn Provider + Send + Sync>,
}

impl Mapper {
    pub fn new(config: &Config, provider: Arc<dyn Provider + Send + Sync>) -> Mapper {
        Mapper {
            config: config.clone(),
            provider,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return a copy of the internal provider.
    pub fn provider(&self) -> Arc<dyn Provider + Send + Sync> {
        self.provider.clone()
    }
}

/// Result of a resolution: either the resolved value or the reasons it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Resolved(T),
    Failed { warnings: Vec<String> },
}

impl<T> Outcome<T> {
    /// Absorb a resolution error into a `Failed` outcome, logging it.
    pub fn from_result(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Outcome::Resolved(value),
            Err(err) => {
                match &err {
                    Error::Upstream { source, .. } => {
                        tracing::warn!("{} (database error: {:?})", &err, source)
                    }
                    _ => tracing::warn!("{}", &err),
                }
                Outcome::Failed {
                    warnings: vec![err.to_string()],
                }
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Outcome::Resolved(value) => Some(value),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Outcome::Resolved(_) => &[],
            Outcome::Failed { warnings } => warnings,
        }
    }
}
