//! Static lookup tables for genes and protein domains.

pub mod build;
pub mod domains;
pub mod genes;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::bufread::MultiGzDecoder;

pub use domains::{DomainRecord, DomainTable};
pub use genes::{GeneMatch, GeneTable, MatchKind, Suggestions};

/// Error type for loading and writing lookup tables.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("problem accessing table file {0}")]
    Io(String, #[source] std::io::Error),
    #[error("problem parsing table file {0}")]
    Csv(String, #[source] csv::Error),
}

/// Transparently open a file with gzip decoder.
pub fn open_read_maybe_gz<P>(path: P) -> Result<Box<dyn BufRead>, Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::Io(path.display().to_string(), e))?;
    if path.extension().map(|s| s.to_str()) == Some(Some("gz")) {
        tracing::trace!("Opening {:?} as gzip for reading", path);
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(
            file,
        )))))
    } else {
        tracing::trace!("Opening {:?} as plain text for reading", path);
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read all records of a headered TSV file.
pub(crate) fn read_tsv<T, P>(path: P) -> Result<Vec<T>, Error>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(open_read_maybe_gz(path)?);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| Error::Csv(path.display().to_string(), e))
}
