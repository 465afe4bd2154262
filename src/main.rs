//! Fusion curation service main executable

use clap::{Args, Parser, Subcommand};

use fusion_curation::{common, coords, lookup, server};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Fusion curation service",
    long_about = "Gene lookups and exon/genomic coordinate resolution backed by UTA"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Server related commands.
    Server(Server),
    /// Lookup table related commands.
    Tables(Tables),
    /// Coordinate resolution on the command line.
    Coords(Coords),
}

/// Parsing of "server *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Server {
    /// The sub command to run
    #[command(subcommand)]
    command: ServerCommands,
}

/// Enum supporting the parsing of "server *" sub commands.
#[derive(Debug, Subcommand)]
enum ServerCommands {
    Run(server::Args),
}

/// Parsing of "tables *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Tables {
    /// The sub command to run
    #[command(subcommand)]
    command: TablesCommands,
}

/// Enum supporting the parsing of "tables *" sub commands.
#[derive(Debug, Subcommand)]
enum TablesCommands {
    BuildGenes(lookup::build::Args),
}

/// Parsing of "coords *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Coords {
    /// The sub command to run
    #[command(subcommand)]
    command: CoordsCommands,
}

/// Enum supporting the parsing of "coords *" sub commands.
#[derive(Debug, Subcommand)]
enum CoordsCommands {
    ExonToGenomic(coords::ExonToGenomicArgs),
    GenomicToExon(coords::GenomicToExonArgs),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Install a global subscriber so that the server's worker threads log as well.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    match &cli.command {
        Commands::Server(server) => match &server.command {
            ServerCommands::Run(args) => server::run(&cli.common, args)?,
        },
        Commands::Tables(tables) => match &tables.command {
            TablesCommands::BuildGenes(args) => lookup::build::run(&cli.common, args)?,
        },
        Commands::Coords(coords) => match &coords.command {
            CoordsCommands::ExonToGenomic(args) => coords::run_exon_to_genomic(&cli.common, args)?,
            CoordsCommands::GenomicToExon(args) => coords::run_genomic_to_exon(&cli.common, args)?,
        },
    }

    Ok(())
}
