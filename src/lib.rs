//! # gifcatalog
//!
//! Structural GIF metadata extraction with a persistent, editable catalog:
//! - Signature and logical screen descriptor parsing
//! - Data-stream scan for frame counts and comments, no pixel decoding
//! - Recursive folder scans appended to the catalog in one batch
//! - Atomic catalog writes; a corrupt catalog is reported, never discarded
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Engine::scan_folder                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │  Discovery  │          │   Timestamps │
//!   │  (walkdir)  │          │   (chrono)   │
//!   └──────┬──────┘          └──────┬───────┘
//!          │ paths                  │
//!          ▼                        │
//!   ┌─────────────────────────┐     │
//!   │ format: ByteCursor →    │     │
//!   │ header → GCT skip →     │     │
//!   │ BlockScanner            │     │
//!   └──────┬──────────────────┘     │
//!          ▼                        ▼
//!   ┌─────────────────────────────────────┐
//!   │        metadata::assemble           │
//!   └──────────────────┬──────────────────┘
//!                      ▼
//!              ┌──────────────┐
//!              │ CatalogStore │ ──▶ catalog JSON (tmp + rename)
//!              └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod metadata;
pub mod catalog;
pub mod discovery;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CatalogError, Result};
pub use config::Config;
pub use catalog::{CatalogRecord, CatalogStore};
pub use engine::{Engine, ScanFailure, ScanReport};
pub use format::{parse_gif, ParsedGif, ScanMode};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gifcatalog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
