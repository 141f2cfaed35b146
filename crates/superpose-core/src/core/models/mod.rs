//! # Core Models Module
//!
//! This module contains the data structures used to represent parsed
//! macromolecular structures, independent of the file format they came from.
//!
//! ## Overview
//!
//! A [`structure::Structure`] is an ordered list of model frames; each
//! [`structure::ModelFrame`] owns its chains, each [`chain::Chain`] owns its
//! residues and each [`residue::Residue`] owns its atoms. Ownership is strictly
//! hierarchical, so cloning a chain yields a deep copy that shares nothing with
//! the structure it was taken from.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom name, element and single-precision coordinates
//! - [`residue`] - Residue-type code, sequence position and standard/hetero flag
//! - [`chain`] - Ordered residues under one chain identifier
//! - [`structure`] - Model frames and the structure root
//! - [`builder`] - Incremental construction from atom records in file order
//!
//! ## Usage
//!
//! ```ignore
//! use superpose::core::models::builder::{ResidueSite, StructureBuilder};
//!
//! let mut builder = StructureBuilder::new();
//! builder.add_atom(&site, Atom::new("CA", "C", Point3::new(0.0, 0.0, 0.0)));
//! let structure = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod residue;
pub mod structure;
