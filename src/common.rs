//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::data::uta;

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Command line arguments for connecting to the UTA database.
#[derive(Parser, Debug, Clone)]
pub struct DbArgs {
    /// Postgres connection URL of the UTA database.
    #[arg(long, env = "UTA_DB_URL")]
    pub db_url: String,
    /// UTA schema to use, corresponds to the data version.
    #[arg(long, env = "UTA_DB_SCHEMA", default_value = "uta_20210129")]
    pub db_schema: String,
}

impl From<&DbArgs> for uta::Config {
    fn from(args: &DbArgs) -> Self {
        uta::Config {
            db_url: args.db_url.clone(),
            db_schema: args.db_schema.clone(),
        }
    }
}

/// Trim a user-provided accession.
pub fn clean_accession(ac: &str) -> &str {
    ac.trim()
}

/// Trim and upper-case a user-provided gene symbol; blank symbols count as missing.
pub fn clean_gene_symbol(gene: Option<&str>) -> Option<String> {
    gene.map(|g| g.trim().to_uppercase())
        .filter(|g| !g.is_empty())
}

/// Sort key for versioned accessions such as `NC_000001.11`.
///
/// Compares the stem lexicographically and the version numerically so that
/// `NC_000001.11` sorts after `NC_000001.9`.
pub fn accession_sort_key(ac: &str) -> (&str, u32) {
    match ac.rsplit_once('.') {
        Some((stem, version)) => (stem, version.parse().unwrap_or(0)),
        None => (ac, 0),
    }
}
