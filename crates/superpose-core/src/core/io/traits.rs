use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for decoding a structure file format.
///
/// Implementors handle format-specific parsing and return the schema-specific
/// metadata they found alongside the structure.
pub trait StructureFile {
    /// The type of metadata associated with the file format.
    type Metadata;

    /// The error type for decoding.
    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed structure and its metadata. A structure without any
    /// chain is a valid return value; callers decide whether it is acceptable.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error>;

    /// Reads a structure from an uncompressed file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Structure, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for serializing a structure's coordinate records.
///
/// Only the body is produced: descriptive header records are the
/// responsibility of the caller.
pub trait StructureWriter {
    /// The error type for serialization.
    type Error: Error + From<io::Error>;

    /// Writes every frame, chain and atom of `structure` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_structure_to(structure: &Structure, writer: &mut impl Write)
    -> Result<(), Self::Error>;

    /// Writes a structure body to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_structure_to_path<P: AsRef<Path>>(
        structure: &Structure,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_structure_to(structure, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
