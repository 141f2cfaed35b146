//! # Workflows Module
//!
//! High-level entry points that run a complete procedure from validated
//! configuration to written output.
//!
//! ## Overview
//!
//! A workflow ties the `core` readers and writers to the `engine` steps. The
//! superposition workflow ([`superpose`]) reads one or two structures through
//! the format fallback, selects a chain from each, optionally applies a rigid
//! transform, and writes the merged chains under a header taken from the second
//! input. It returns a summary of what was selected and written.

pub mod superpose;
