//! # Engine Module
//!
//! The stateless steps that sit between reading two structures and writing
//! their superposition.
//!
//! ## Overview
//!
//! A run is described by a validated [`config::SuperposeConfig`]. The engine
//! picks one chain from each parsed structure ([`selection`]), and merges the
//! chains into a single synthetic structure with canonical identifiers
//! ([`assembly`]). The rigid transform itself lives with the other geometry in
//! [`crate::core::utils::geometry`].
//!
//! ## Key Components
//!
//! - **Configuration** ([`config`]) - Builder that performs every argument check up front
//! - **Selection** ([`selection`]) - Model and chain lookup with first-frame fallback
//! - **Assembly** ([`assembly`]) - Renaming to `A`/`B` in a single frame
//! - **Error Handling** ([`error`]) - Errors surfaced by a superposition run

pub mod assembly;
pub mod config;
pub mod error;
pub mod selection;
