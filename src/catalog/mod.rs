//! Catalog Module
//!
//! The persisted, ordered collection of extracted records.
//!
//! ## File Format
//! A single JSON array, one object per record, in insertion order:
//! ```text
//! [
//!     {
//!         "path": "/pics/cat.gif",
//!         "version": "GIF89a",
//!         "width": 320,
//!         ...
//!         "image_count": 12,
//!         "comments": ["made with love"],
//!         "extra_fields": { "title": "Cat" }     (only when edited)
//!     },
//!     ...
//! ]
//! ```

mod record;
mod store;

pub use record::{CatalogRecord, COMPRESSION_TYPE, NUMERIC_FORMAT};
pub use store::CatalogStore;
