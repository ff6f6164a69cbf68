//! Ingestion pipeline for the trilingual dictionary store.
//!
//! The parsers, ranking heuristics, store and sentence linker live in
//! `tridict-core`; this crate wires them into a full rebuild and installs the
//! log subscriber.

pub mod pipeline;
pub mod trace_init;

pub use pipeline::{build, staging_path, BuildOptions, BuildReport, PipelineError, SourcePaths};
