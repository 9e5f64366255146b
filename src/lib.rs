//! riskdex - a risk-aware lexical search engine for banking documents.
//!
//! riskdex indexes JSON document corpora, annotating each document with a
//! risk classification, banking vocabulary terms, and referenced compliance
//! frameworks, then serves typo-tolerant keyword search via
//! [Tantivy](https://github.com/quickwit-oss/tantivy) with domain-aware
//! synonym expansion and risk-based re-ranking.
//!
//! # Quick start
//!
//! ```no_run
//! use riskdex::{Document, DocumentIndex, Facets, query};
//!
//! let mut index = DocumentIndex::new().unwrap();
//! index
//!     .ingest(Document {
//!         id: "basel-2024".to_string(),
//!         title: "Basel III Capital Requirements".to_string(),
//!         content: "Tier 1 capital adequacy ratios and buffers.".to_string(),
//!         ..Document::default()
//!     })
//!     .unwrap();
//!
//! let results = query::search(&index, "capital adequacy", &Facets::default())
//!     .unwrap();
//! for r in &results {
//!     println!("{} [{}] (score: {:.3})", r.document.title, r.document.risk_level, r.score);
//! }
//! ```

pub mod cli;
pub mod compliance;
pub mod document;
pub mod error;
pub mod index;
pub mod insights;
pub mod query;
pub mod risk;
pub mod tantivy_index;
pub mod terms;

pub use compliance::Framework;
pub use document::{Document, IndexedDocument};
pub use error::{Error, Result};
pub use index::DocumentIndex;
pub use query::{Facets, SearchResult};
pub use risk::RiskLevel;
