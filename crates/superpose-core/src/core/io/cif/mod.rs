//! mmCIF (STAR) reading.
//!
//! The document is tokenized, folded into a flat [`CifDictionary`] that doubles
//! as the raw metadata, and the `_atom_site` category is then turned into a
//! structure.
//!
//! [`CifDictionary`]: crate::core::metadata::raw::CifDictionary

use std::io;
use thiserror::Error;

pub mod lexer;
mod reader;

pub use reader::{CifFile, parse_dictionary};

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Syntax error on line {line}")]
    Syntax { line: usize },
    #[error("Text field opened on line {line} is never closed")]
    UnterminatedTextField { line: usize },
    #[error("Data name '{name}' on line {line} has no value")]
    MissingValue { name: String, line: usize },
    #[error("Value '{value}' on line {line} is outside any data item or loop")]
    UnexpectedValue { value: String, line: usize },
    #[error("Loop on line {line} has {values} values for {columns} columns")]
    LoopArity {
        line: usize,
        columns: usize,
        values: usize,
    },
    #[error("Mandatory column '{0}' is missing from _atom_site")]
    MissingColumn(&'static str),
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Invalid number in column '{column}', row {row} (value: '{value}')")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },
}
