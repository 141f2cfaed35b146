//! # Core Module
//!
//! This module provides the format-independent building blocks of the
//! superposition writer: the structure model, file I/O, metadata
//! normalization and coordinate geometry.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Frames, chains, residues and atoms
//! - **File I/O** ([`io`]) - Input addressing, the PDB-then-mmCIF decode ladder and fixed-width output
//! - **Descriptive Metadata** ([`metadata`]) - Raw schema-specific metadata and its normalization
//! - **Geometry** ([`utils::geometry`]) - Rigid-body transforms at single precision

pub mod io;
pub mod metadata;
pub mod models;
pub mod utils;
