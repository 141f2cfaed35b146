use thiserror::Error;

use super::selection::SelectionError;
use crate::core::io::ladder::ReadError;
use crate::core::io::pdb::PdbError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Failed to write output: {0}")]
    Write(#[from] PdbError),

    #[error("Cannot create output file '{}': {source}", path.display())]
    OutputCreate {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
