//! Provides input/output functionality for structure file formats.
//!
//! Inputs are addressed through [`source::InputSource`] (plain files, gzip
//! files and tar members) and decoded by [`ladder::read_structure`], which
//! tries the PDB reader before the mmCIF reader. Output goes through
//! [`header::FixedWidthWriter`], which lays the normalized metadata out in
//! fixed columns and appends the coordinate body produced by [`pdb::PdbFile`].

pub mod cif;
pub mod header;
pub mod ladder;
pub mod pdb;
pub mod source;
pub mod traits;
