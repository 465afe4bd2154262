//! Code supporting the `tables build-genes` sub command.

use std::{path::Path, time::Instant};

use clap::Parser;
use serde::Deserialize;
use tracing::info;

use super::{
    genes::{MatchKind, Record},
    read_tsv, Error,
};

/// Command line arguments for `tables build-genes` sub command.
#[derive(Parser, Debug)]
#[command(about = "Build gene table from HGNC complete set", long_about = None)]
pub struct Args {
    /// Path to the HGNC complete set TSV file, optionally gzip compressed.
    #[arg(long, required = true)]
    pub path_hgnc_tsv: String,
    /// Path to the gene table to write.
    #[arg(long, required = true)]
    pub path_out: String,
}

/// The columns of the HGNC complete set used for the gene table.
#[derive(Debug, Clone, Deserialize)]
struct HgncRecord {
    hgnc_id: String,
    symbol: String,
    status: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    alias_symbol: Option<String>,
    #[serde(default)]
    prev_symbol: Option<String>,
}

fn split_symbols(value: &Option<String>) -> impl Iterator<Item = &str> {
    value
        .as_deref()
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Normalize `HGNC:1097` to `hgnc:1097`.
fn concept_id(hgnc_id: &str) -> String {
    let hgnc_id = hgnc_id.trim();
    match hgnc_id.split_once(':') {
        Some((prefix, local)) if prefix.eq_ignore_ascii_case("hgnc") => format!("hgnc:{}", local),
        _ => format!("hgnc:{}", hgnc_id),
    }
}

/// Convert approved HGNC records into gene table rows.
fn build_records(hgnc_records: &[HgncRecord]) -> Vec<Record> {
    let mut result = Vec::new();
    for hgnc in hgnc_records.iter().filter(|r| r.status.trim() == "Approved") {
        let concept_id = concept_id(&hgnc.hgnc_id);
        let symbol = hgnc.symbol.trim();
        if symbol.is_empty() {
            continue;
        }
        let location = hgnc
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let terms = std::iter::once((symbol, MatchKind::Symbol))
            .chain(split_symbols(&hgnc.prev_symbol).map(|t| (t, MatchKind::PrevSymbol)))
            .chain(split_symbols(&hgnc.alias_symbol).map(|t| (t, MatchKind::Alias)));
        for (term, kind) in terms {
            result.push(Record {
                term: term.to_string(),
                kind,
                concept_id: concept_id.clone(),
                symbol: symbol.to_string(),
                location: location.clone(),
            });
        }
    }
    result
}

fn write_records(path: &Path, records: &[Record]) -> Result<(), Error> {
    let to_err = |e| Error::Csv(path.display().to_string(), e);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(to_err)?;
    for record in records {
        writer.serialize(record).map_err(to_err)?;
    }
    writer
        .flush()
        .map_err(|e| Error::Io(path.display().to_string(), e))
}

/// Main entry point for `tables build-genes` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let before = Instant::now();
    info!("Reading HGNC records from {}...", &args.path_hgnc_tsv);
    let hgnc_records: Vec<HgncRecord> = read_tsv(&args.path_hgnc_tsv)?;
    let records = build_records(&hgnc_records);
    info!(
        "... converted {} HGNC records into {} gene terms",
        hgnc_records.len(),
        records.len()
    );

    write_records(Path::new(&args.path_out), &records)?;
    info!(
        "Wrote gene table to {} in {:?}",
        &args.path_out,
        before.elapsed()
    );

    Ok(())
}
