//! Core domain types for the liquidity-pool graph explorer.
//!
//! This crate provides the shared vocabulary used by every pipeline stage:
//! - Tokens and their native-asset normalization
//! - Wire-format and normalized pools
//! - Versioned, copy-on-write pool snapshots
//! - Protocol metadata (display names, colors, fee encodings)
//! - Chain-specific external links
//! - Fee parsing and display formatting
//! - Token logo placeholders and CDN URL mapping

/// Prelude module for convenient imports.
pub mod prelude;

/// Chains and explorer links.
pub mod chain;
/// Domain errors.
pub mod error;
/// Fee parsing.
pub mod fees;
/// Display formatting helpers.
pub mod format;
/// Token logo sources.
pub mod logo;
/// Pool types.
pub mod pool;
/// Protocol metadata.
pub mod protocol;
/// Versioned pool snapshots.
pub mod snapshot;
/// Token types.
pub mod token;
