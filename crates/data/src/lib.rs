//! Data ingestion and logo enrichment.
//!
//! This crate provides the stateful, I/O-facing parts of the pipeline:
//! - Feed message decoding and pool normalization
//! - A pool store publishing copy-on-write snapshots at most once per frame
//! - Block timing telemetry
//! - Asynchronous, rate-limited logo lookups behind a synchronous cache
//! - Environment-driven configuration

/// Prelude module for convenient imports.
pub mod prelude;

/// Configuration.
pub mod config;
/// Error types.
pub mod error;
/// Pool feed ingestion.
pub mod feed;
/// Token logo resolution.
pub mod logos;
