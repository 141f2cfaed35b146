use super::cif::CifFile;
use super::pdb::PdbFile;
use super::source::{InputSource, SourceError};
use super::traits::StructureFile;
use crate::core::metadata::raw::RawMetadata;
use crate::core::models::structure::Structure;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// The format a structure was eventually decoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Cif,
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureFormat::Pdb => write!(f, "PDB"),
            StructureFormat::Cif => write!(f, "mmCIF"),
        }
    }
}

/// Why one decoding attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RungFailure {
    #[error("malformed ({0})")]
    Malformed(String),
    #[error("no chains found")]
    NoChains,
}

/// Both decoding attempts failed; the status of each is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized format of '{input}': as PDB {pdb}; as mmCIF {cif}")]
pub struct FormatUnrecognized {
    pub input: String,
    pub pdb: RungFailure,
    pub cif: RungFailure,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    FormatUnrecognized(#[from] FormatUnrecognized),
}

#[derive(Debug, Clone)]
pub struct ParsedStructure {
    pub structure: Structure,
    pub metadata: RawMetadata,
    pub format: StructureFormat,
}

/// Runs one decoder over a freshly opened stream.
///
/// Failing to open the source is returned as the outer error since it would
/// fail every rung alike; decoding problems and empty results are rung failures.
fn attempt<F: StructureFile>(
    source: &InputSource,
) -> Result<Result<(Structure, F::Metadata), RungFailure>, SourceError> {
    let mut reader = source.open()?;
    Ok(match F::read_from(&mut reader) {
        Ok((structure, _)) if structure.chain_count() == 0 => Err(RungFailure::NoChains),
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(RungFailure::Malformed(e.to_string())),
    })
}

/// Decodes a structure, trying PDB first and mmCIF second.
///
/// Each rung gets its own handle and decompression layer. A rung fails when
/// decoding errors or when the result has no chain at all.
///
/// # Errors
///
/// Returns [`ReadError::Source`] when the input cannot be opened and
/// [`ReadError::FormatUnrecognized`] when both rungs fail.
pub fn read_structure(source: &InputSource) -> Result<ParsedStructure, ReadError> {
    let pdb = match attempt::<PdbFile>(source)? {
        Ok((structure, header)) => {
            debug!("Read {} as PDB ({} chains).", source, structure.chain_count());
            return Ok(ParsedStructure {
                structure,
                metadata: RawMetadata::Pdb(header),
                format: StructureFormat::Pdb,
            });
        }
        Err(failure) => failure,
    };
    info!("{} is not usable as PDB ({}); trying mmCIF.", source, pdb);

    let cif = match attempt::<CifFile>(source)? {
        Ok((structure, dict)) => {
            debug!("Read {} as mmCIF ({} chains).", source, structure.chain_count());
            return Ok(ParsedStructure {
                structure,
                metadata: RawMetadata::Cif(dict),
                format: StructureFormat::Cif,
            });
        }
        Err(failure) => failure,
    };

    Err(FormatUnrecognized {
        input: source.to_string(),
        pdb,
        cif,
    }
    .into())
}
