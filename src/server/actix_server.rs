//! Implementation of the actix server.

use actix_web::{
    get,
    middleware::Logger,
    web::{self, Data, Json},
    App, HttpServer, Responder, ResponseError,
};
use serde::{Deserialize, Serialize};

use crate::{
    data::Provider as _,
    lookup::{genes::DEFAULT_SUGGEST_LIMIT, DomainRecord, MatchKind},
    mapper::{ExonRangeRequest, GenomicPosRequest},
};

use super::{Args, WebServerData, VERSION};

#[derive(Debug)]
struct CustomError {
    err: anyhow::Error,
}

impl std::fmt::Display for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.err)
    }
}

impl CustomError {
    fn new(err: anyhow::Error) -> Self {
        CustomError { err }
    }
}

impl ResponseError for CustomError {}

/// Result type of "/service_info".
#[derive(Serialize, Debug)]
struct ServiceInfo {
    version: String,
    data_version: String,
    schema_version: String,
}

#[get("/service_info")]
async fn service_info(data: Data<WebServerData>) -> actix_web::Result<impl Responder, CustomError> {
    Ok(Json(ServiceInfo {
        version: VERSION.to_string(),
        data_version: data.data_version.clone(),
        schema_version: data.schema_version.clone(),
    }))
}

/// Parameters for `lookup_gene`.
#[derive(Deserialize, Debug, Clone)]
struct GeneLookupQuery {
    #[serde(default)]
    term: String,
}

/// Result type of "/lookup/gene".
#[derive(Serialize, Debug)]
struct GeneLookupResponse {
    term: String,
    concept_id: Option<String>,
    symbol: Option<String>,
    match_kind: Option<MatchKind>,
    warnings: Vec<String>,
}

/// Normalize a gene term.
#[get("/lookup/gene")]
async fn lookup_gene(
    data: Data<WebServerData>,
    query: web::Query<GeneLookupQuery>,
) -> actix_web::Result<impl Responder, CustomError> {
    let term = query.term.trim().to_string();
    let found = data.genes.lookup(&term);
    let mut warnings = Vec::new();
    if found.is_none() {
        let warning = format!("lookup of gene term {} failed", &term);
        tracing::warn!("{}", &warning);
        warnings.push(warning);
    }
    Ok(Json(GeneLookupResponse {
        concept_id: found.as_ref().map(|m| m.concept_id.clone()),
        symbol: found.as_ref().map(|m| m.symbol.clone()),
        match_kind: found.map(|m| m.match_kind),
        term,
        warnings,
    }))
}

/// Parameters for `complete_gene`.
#[derive(Deserialize, Debug, Clone)]
struct GeneCompleteQuery {
    #[serde(default)]
    term: String,
    limit: Option<usize>,
}

/// Suggest gene terms starting with the given prefix.
#[get("/complete/gene")]
async fn complete_gene(
    data: Data<WebServerData>,
    query: web::Query<GeneCompleteQuery>,
) -> actix_web::Result<impl Responder, CustomError> {
    Ok(Json(data.genes.suggest(
        &query.term,
        query.limit.unwrap_or(DEFAULT_SUGGEST_LIMIT),
    )))
}

/// Parameters for `lookup_domain`.
#[derive(Deserialize, Debug, Clone)]
struct DomainLookupQuery {
    #[serde(default)]
    gene_id: String,
}

/// Result type of "/lookup/domain".
#[derive(Serialize, Debug)]
struct DomainLookupResponse {
    gene_id: String,
    domains: Vec<DomainRecord>,
    warnings: Vec<String>,
}

/// List the protein domains of a gene.
#[get("/lookup/domain")]
async fn lookup_domain(
    data: Data<WebServerData>,
    query: web::Query<DomainLookupQuery>,
) -> actix_web::Result<impl Responder, CustomError> {
    let gene_id = query.gene_id.trim().to_string();
    let domains = data.domains.lookup(&gene_id).to_vec();
    let mut warnings = Vec::new();
    if domains.is_empty() {
        let warning = format!("no domains found for gene {}", &gene_id);
        tracing::warn!("{}", &warning);
        warnings.push(warning);
    }
    Ok(Json(DomainLookupResponse {
        gene_id,
        domains,
        warnings,
    }))
}

/// Resolve an exon range to genomic coordinates.
#[get("/utilities/exon_to_genomic")]
async fn exon_to_genomic(
    data: Data<WebServerData>,
    query: web::Query<ExonRangeRequest>,
) -> actix_web::Result<impl Responder, CustomError> {
    let request = query.into_inner();
    let outcome = web::block(move || data.mapper.exon_to_genomic(&request))
        .await
        .map_err(|e| CustomError::new(e.into()))?;
    Ok(Json(outcome))
}

/// Resolve genomic positions to exons and offsets.
#[get("/utilities/genomic_to_exon")]
async fn genomic_to_exon(
    data: Data<WebServerData>,
    query: web::Query<GenomicPosRequest>,
) -> actix_web::Result<impl Responder, CustomError> {
    let request = query.into_inner();
    let outcome = web::block(move || data.mapper.genomic_to_exon(&request))
        .await
        .map_err(|e| CustomError::new(e.into()))?;
    Ok(Json(outcome))
}

/// Parameters for `sequence_id`.
#[derive(Deserialize, Debug, Clone)]
struct SequenceIdQuery {
    #[serde(default)]
    accession: String,
}

/// Result type of "/utilities/sequence_id".
#[derive(Serialize, Debug)]
struct SequenceIdResponse {
    accession: String,
    sequence_id: Option<String>,
    warnings: Vec<String>,
}

/// Translate an accession into its sequence digest identifier.
#[get("/utilities/sequence_id")]
async fn sequence_id(
    data: Data<WebServerData>,
    query: web::Query<SequenceIdQuery>,
) -> actix_web::Result<impl Responder, CustomError> {
    let accession = query.accession.trim().to_string();
    let provider = data.mapper.provider();
    let ac = accession.clone();
    let result = web::block(move || provider.get_seq_id(&ac))
        .await
        .map_err(|e| CustomError::new(e.into()))?;

    let (sequence_id, warning) = match result {
        Ok(Some(seq_id)) => (Some(seq_id), None),
        Ok(None) => (None, Some(format!("no sequence identifier for {}", &accession))),
        Err(e) => {
            tracing::warn!("sequence identifier query failed: {:?}", &e);
            (
                None,
                Some(format!("unable to get sequence identifier for {}", &accession)),
            )
        }
    };
    if let Some(warning) = warning.as_ref() {
        tracing::warn!("{}", warning);
    }
    Ok(Json(SequenceIdResponse {
        accession,
        sequence_id,
        warnings: warning.into_iter().collect(),
    }))
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(service_info)
        .service(lookup_gene)
        .service(complete_gene)
        .service(lookup_domain)
        .service(exon_to_genomic)
        .service(genomic_to_exon)
        .service(sequence_id);
}

#[actix_web::main]
pub async fn main(args: &Args, data: Data<WebServerData>) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(configure)
            .wrap(Logger::default())
    })
    .bind((args.listen_host.as_str(), args.listen_port))?
    .run()
    .await
}
