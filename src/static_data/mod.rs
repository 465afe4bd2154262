//! Static data.

use enum_map::{enum_map, Enum, EnumMap};
use serde::{Deserialize, Serialize};

/// Primary chromosome RefSeq accessions of GRCh37, in chromosome order.
const GRCH37_PRIMARY: &[(&str, &str)] = &[
    ("1", "NC_000001.10"),
    ("2", "NC_000002.11"),
    ("3", "NC_000003.11"),
    ("4", "NC_000004.11"),
    ("5", "NC_000005.9"),
    ("6", "NC_000006.11"),
    ("7", "NC_000007.13"),
    ("8", "NC_000008.10"),
    ("9", "NC_000009.11"),
    ("10", "NC_000010.10"),
    ("11", "NC_000011.9"),
    ("12", "NC_000012.11"),
    ("13", "NC_000013.10"),
    ("14", "NC_000014.8"),
    ("15", "NC_000015.9"),
    ("16", "NC_000016.9"),
    ("17", "NC_000017.10"),
    ("18", "NC_000018.9"),
    ("19", "NC_000019.9"),
    ("20", "NC_000020.10"),
    ("21", "NC_000021.8"),
    ("22", "NC_000022.10"),
    ("X", "NC_000023.10"),
    ("Y", "NC_000024.9"),
    ("MT", "NC_012920.1"),
];

/// Primary chromosome RefSeq accessions of GRCh38, in chromosome order.
const GRCH38_PRIMARY: &[(&str, &str)] = &[
    ("1", "NC_000001.11"),
    ("2", "NC_000002.12"),
    ("3", "NC_000003.12"),
    ("4", "NC_000004.12"),
    ("5", "NC_000005.10"),
    ("6", "NC_000006.12"),
    ("7", "NC_000007.14"),
    ("8", "NC_000008.11"),
    ("9", "NC_000009.12"),
    ("10", "NC_000010.11"),
    ("11", "NC_000011.10"),
    ("12", "NC_000012.12"),
    ("13", "NC_000013.11"),
    ("14", "NC_000014.9"),
    ("15", "NC_000015.10"),
    ("16", "NC_000016.10"),
    ("17", "NC_000017.11"),
    ("18", "NC_000018.10"),
    ("19", "NC_000019.10"),
    ("20", "NC_000020.11"),
    ("21", "NC_000021.9"),
    ("22", "NC_000022.11"),
    ("X", "NC_000023.11"),
    ("Y", "NC_000024.10"),
    ("MT", "NC_012920.1"),
];

#[derive(
    Debug,
    Default,
    Serialize,
    Deserialize,
    Enum,
    Clone,
    Copy,
    PartialEq,
    Eq,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Assembly {
    Grch37,
    #[default]
    Grch38,
}

impl Assembly {
    fn load_assembly_info(&self) -> AssemblyInfo {
        let (name, table) = match self {
            Assembly::Grch37 => ("GRCh37", GRCH37_PRIMARY),
            Assembly::Grch38 => ("GRCh38", GRCH38_PRIMARY),
        };
        AssemblyInfo {
            name: name.to_string(),
            sequences: table
                .iter()
                .map(|(name, refseq_ac)| Sequence {
                    name: name.to_string(),
                    refseq_ac: refseq_ac.to_string(),
                })
                .collect(),
        }
    }

    /// Return the primary RefSeq accession for a chromosome name.
    ///
    /// Accepts names with or without `chr` prefix, case-insensitively, and
    /// `M` as an alias for `MT`.
    pub fn accession_for(&self, chrom: &str) -> Option<&'static str> {
        let name = chrom.trim();
        let name = match name.get(..3) {
            Some(prefix) if name.len() > 3 && prefix.eq_ignore_ascii_case("chr") => &name[3..],
            _ => name,
        };
        let name = if name.eq_ignore_ascii_case("M") {
            "MT"
        } else {
            name
        };
        ASSEMBLY_INFOS[*self]
            .sequences
            .iter()
            .find(|seq| seq.name.eq_ignore_ascii_case(name))
            .map(|seq| seq.refseq_ac.as_str())
    }
}

#[derive(Debug)]
pub struct Sequence {
    pub name: String,
    pub refseq_ac: String,
}

#[derive(Debug)]
pub struct AssemblyInfo {
    pub name: String,
    pub sequences: Vec<Sequence>,
}

lazy_static::lazy_static! {
    /// Provide information about the assemblies.
    pub static ref ASSEMBLY_INFOS: EnumMap<Assembly, AssemblyInfo> = enum_map! {
        Assembly::Grch37 => Assembly::Grch37.load_assembly_info(),
        Assembly::Grch38 => Assembly::Grch38.load_assembly_info(),
    };
}

/// Return the chromosome name for a primary RefSeq accession of any known assembly.
pub fn chrom_name(refseq_ac: &str) -> Option<&'static str> {
    ASSEMBLY_INFOS
        .values()
        .flat_map(|info| info.sequences.iter())
        .find(|seq| seq.refseq_ac == refseq_ac)
        .map(|seq| seq.name.as_str())
}
