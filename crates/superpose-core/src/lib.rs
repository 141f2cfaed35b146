//! # Superpose Core Library
//!
//! Writes the superposition of two macromolecular chains as a single legacy
//! coordinate file, optionally moving one of them by a rigid transform first.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Chain`),
//!   format readers with a PDB-then-mmCIF fallback, header metadata
//!   normalization, the fixed-width header writer and single-precision geometry.
//!
//! - **[`engine`]: The Steps.** Up-front argument validation
//!   (`SuperposeConfigBuilder`), model/chain selection and the assembly of the
//!   selected chains into one renamed structure.
//!
//! - **[`workflows`]: The Public API.** Runs a complete superposition from a
//!   validated configuration to a written output file.

pub mod core;
pub mod engine;
pub mod workflows;
