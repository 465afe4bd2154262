//! Code supporting the `server run` sub command.

pub mod actix_server;

use std::{path::Path, sync::Arc, time::Instant};

use actix_web::web::Data;
use clap::Parser;
use tracing::{info, warn};

use crate::{
    common::DbArgs,
    data::{uta, Provider as _},
    lookup::{DomainTable, GeneTable},
    mapper::{self, Mapper},
    static_data::Assembly,
};

/// Version of the crate, reported by `/service_info`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared state of the HTTP handlers.
pub struct WebServerData {
    pub mapper: Mapper,
    pub genes: GeneTable,
    pub domains: DomainTable,
    pub data_version: String,
    pub schema_version: String,
}

/// Command line arguments for `server run` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run fusion curation REST API server", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub db: DbArgs,
    /// Path to the gene table built with `tables build-genes`.
    #[arg(long, required = true)]
    pub path_gene_table: String,
    /// Path to the protein domain table.
    #[arg(long)]
    pub path_domain_table: Option<String>,
    /// Assembly for resolving chromosome names.
    #[arg(long, value_enum, default_value_t = Assembly::Grch38)]
    pub assembly: Assembly,
    /// IP to listen on.
    #[arg(long, default_value = "127.0.0.1")]
    pub listen_host: String,
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub listen_port: u16,
}

/// Load the domain table, falling back to an empty one if no path is given.
fn load_domains(path: Option<&str>) -> Result<DomainTable, anyhow::Error> {
    match path {
        Some(path) => Ok(DomainTable::from_path(Path::new(path))?),
        None => {
            warn!("No domain table given, domain lookups will return nothing");
            Ok(DomainTable::default())
        }
    }
}

/// Main entry point for `server run` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    info!("args_common = {:?}", &args_common);
    info!("args = {:?}", &args);

    info!("Connecting to UTA database...");
    let before_loading = Instant::now();
    let provider = Arc::new(uta::Provider::with_config(&(&args.db).into())?);
    let data_version = provider.data_version().to_string();
    let schema_version = provider.schema_version().to_string();
    info!(
        "... connected to {} (schema version {})",
        &data_version, &schema_version
    );

    info!("Loading lookup tables...");
    let genes = GeneTable::from_path(Path::new(&args.path_gene_table))?;
    let domains = load_domains(args.path_domain_table.as_deref())?;
    info!("... done loading in {:?}", before_loading.elapsed());

    let mapper = Mapper::new(
        &mapper::Config {
            assembly: args.assembly,
        },
        provider,
    );
    let data = Data::new(WebServerData {
        mapper,
        genes,
        domains,
        data_version,
        schema_version,
    });

    info!(
        "Launching server on http://{}:{} ...",
        &args.listen_host, args.listen_port
    );
    // The database connection must be dropped outside of the server's runtime,
    // so keep a handle here.
    actix_server::main(args, data.clone())?;
    drop(data);

    info!("All done. Have a nice day!");
    Ok(())
}
