//! # Header Metadata Module
//!
//! Normalizes the descriptive metadata of the two supported source schemas into
//! one set of header fields.
//!
//! ## Overview
//!
//! Readers hand back their metadata untouched as a [`raw::RawMetadata`] tagged
//! union. Every normalized field is described by a fixed, ordered list of
//! [`raw::MetadataKey`] candidates spanning both schemas; the first candidate
//! that yields a non-empty value wins.
//!
//! ## Key Components
//!
//! - [`raw`] - Schema-specific containers and ordered candidate lookup
//! - [`normalize`] - Candidate tables, date conversion and [`normalize::HeaderFields`]

pub mod normalize;
pub mod raw;
