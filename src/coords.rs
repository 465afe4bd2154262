//! Code supporting the `coords *` sub commands.

use std::{io::Write, sync::Arc};

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::{
    common::DbArgs,
    data::uta,
    mapper::{self, ExonRangeRequest, GenomicPosRequest, Mapper, Outcome},
    static_data::Assembly,
};

/// Command line arguments for `coords exon-to-genomic` sub command.
#[derive(Parser, Debug)]
#[command(about = "Resolve an exon range to genomic coordinates", long_about = None)]
pub struct ExonToGenomicArgs {
    #[command(flatten)]
    pub db: DbArgs,
    /// Transcript accession, e.g., `NM_152263.3`.
    #[arg(long)]
    pub transcript: String,
    /// Gene symbol the alignment must belong to.
    #[arg(long)]
    pub gene: Option<String>,
    /// First exon (1-based), 0 for the first exon of the transcript.
    #[arg(long, default_value_t = 0)]
    pub exon_start: u32,
    /// Last exon (1-based), 0 for the last exon of the transcript.
    #[arg(long, default_value_t = 0)]
    pub exon_end: u32,
    /// Offset from the first exon's boundary, in transcript orientation.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub exon_start_offset: i32,
    /// Offset from the last exon's boundary, in transcript orientation.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub exon_end_offset: i32,
}

impl From<&ExonToGenomicArgs> for ExonRangeRequest {
    fn from(args: &ExonToGenomicArgs) -> Self {
        ExonRangeRequest {
            transcript: args.transcript.clone(),
            gene: args.gene.clone(),
            exon_start: args.exon_start,
            exon_end: args.exon_end,
            exon_start_offset: args.exon_start_offset,
            exon_end_offset: args.exon_end_offset,
        }
    }
}

/// Command line arguments for `coords genomic-to-exon` sub command.
#[derive(Parser, Debug)]
#[command(about = "Resolve genomic positions to exons and offsets", long_about = None)]
pub struct GenomicToExonArgs {
    #[command(flatten)]
    pub db: DbArgs,
    /// Assembly for resolving chromosome names.
    #[arg(long, value_enum, default_value_t = Assembly::Grch38)]
    pub assembly: Assembly,
    /// Transcript accession, e.g., `NM_152263.3`.
    #[arg(long)]
    pub transcript: String,
    /// Gene symbol the alignment must belong to.
    #[arg(long)]
    pub gene: Option<String>,
    /// Chromosome name or RefSeq accession.
    #[arg(long)]
    pub chromosome: Option<String>,
    /// Genomic position of the segment's 5' end.
    #[arg(long)]
    pub start: Option<i32>,
    /// Genomic position of the segment's 3' end.
    #[arg(long)]
    pub end: Option<i32>,
}

impl From<&GenomicToExonArgs> for GenomicPosRequest {
    fn from(args: &GenomicToExonArgs) -> Self {
        GenomicPosRequest {
            transcript: args.transcript.clone(),
            gene: args.gene.clone(),
            chromosome: args.chromosome.clone(),
            start: args.start,
            end: args.end,
        }
    }
}

fn connect(db: &DbArgs, assembly: Assembly) -> Result<Mapper, anyhow::Error> {
    info!("Connecting to UTA database...");
    let provider = uta::Provider::with_config(&db.into())?;
    Ok(Mapper::new(&mapper::Config { assembly }, Arc::new(provider)))
}

fn write_outcome<W, T>(out: &mut W, outcome: &Outcome<T>) -> Result<(), anyhow::Error>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *out, outcome)?;
    writeln!(out)?;
    Ok(())
}

/// Main entry point for `coords exon-to-genomic` sub command.
pub fn run_exon_to_genomic(
    args_common: &crate::common::Args,
    args: &ExonToGenomicArgs,
) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let mapper = connect(&args.db, Assembly::default())?;
    let outcome = mapper.exon_to_genomic(&args.into());
    write_outcome(&mut std::io::stdout().lock(), &outcome)
}

/// Main entry point for `coords genomic-to-exon` sub command.
pub fn run_genomic_to_exon(
    args_common: &crate::common::Args,
    args: &GenomicToExonArgs,
) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    let mapper = connect(&args.db, args.assembly)?;
    let outcome = mapper.genomic_to_exon(&args.into());
    write_outcome(&mut std::io::stdout().lock(), &outcome)
}
