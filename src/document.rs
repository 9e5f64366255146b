//! Document records and ingest-time annotation.

use serde::{Deserialize, Serialize};

use crate::{
    compliance::{self, Framework},
    risk::{self, RiskLevel},
    terms,
};

/// A raw document supplied by the host application.
///
/// Only `id` and `title` are required; every other field defaults when
/// absent, so loosely shaped JSON corpora parse without errors. The engine
/// stores a derived copy and never mutates the caller's record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A document after ingest, carrying the derived risk metadata.
///
/// `risk_terms`, `risk_level` and `compliance` are pure functions of
/// `content` at the time of ingest; re-ingesting the same id recomputes
/// them, so no stale risk data survives an update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub description: String,
    pub tags: String,
    pub category: String,
    pub file_name: String,
    pub file_size: Option<u64>,
    pub created_at: Option<String>,
    pub risk_terms: Vec<&'static str>,
    pub risk_level: RiskLevel,
    pub compliance: Vec<Framework>,
}

impl IndexedDocument {
    /// Annotate a raw document: extract vocabulary terms, classify the risk
    /// level, and detect referenced frameworks, all from `content`.
    pub fn annotate(doc: Document) -> Self {
        let risk_terms = terms::extract(&doc.content);
        let risk_level = risk::classify(&doc.content);
        let compliance = compliance::detect(&doc.content);

        Self {
            id: doc.id,
            title: doc.title,
            content: doc.content,
            description: doc.description,
            tags: doc.tags,
            category: doc.category,
            file_name: doc.file_name,
            file_size: doc.file_size,
            created_at: doc.created_at,
            risk_terms,
            risk_level,
            compliance,
        }
    }

    /// The space-joined risk terms, as fed to the search index.
    pub fn risk_terms_text(&self) -> String {
        self.risk_terms.join(" ")
    }
}
