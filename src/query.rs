//! Query execution: synonym expansion, faceting, risk-aware re-ranking.
//!
//! The fuzzy index returns id/distance pairs; everything domain-specific
//! happens here. Distances live in `(0, 1]` and re-rank boosts multiply
//! them down, so the final score `1 - distance` stays inside `[0, 1)`.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::{
    compliance::Framework,
    document::IndexedDocument,
    error::Result,
    index::DocumentIndex,
    insights::{self, RiskCategory, RiskInsights},
    risk::RiskLevel,
};

/// Domain synonym table, applied whole-query: if the raw query mentions the
/// key anywhere, every synonym is appended to the expanded query.
const SYNONYMS: [(&str, &[&str]); 6] = [
    ("risk", &["exposure", "threat", "vulnerability", "hazard"]),
    ("compliance", &["regulatory", "requirement", "mandate", "obligation"]),
    ("capital", &["tier 1", "tier 2", "buffer", "reserves"]),
    ("liquidity", &["cash", "funding", "liquid assets"]),
    ("credit", &["loan", "lending", "borrowing", "debt"]),
    ("audit", &["review", "examination", "assessment", "inspection"]),
];

/// Queries carrying these words get the `risk_relevance` flag on results.
const RISK_RELEVANCE_KEYWORDS: [&str; 6] = [
    "risk",
    "compliance",
    "capital",
    "liquidity",
    "audit",
    "regulatory",
];

static URGENCY_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)urgent|critical|immediate|asap|emergency|breach").unwrap()
});

static COMPLIANCE_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)compliance|regulatory|audit|sox|basel|gdpr|aml").unwrap()
});

static CAPITAL_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)capital|tier\s*1|adequacy|buffer").unwrap()
});

/// Optional result filters. `date_range` is accepted for interface
/// stability but not applied; documents carry no parsed timestamps.
#[derive(Debug, Clone, Default)]
pub struct Facets {
    pub risk_level: Option<RiskLevel>,
    pub compliance: Option<Framework>,
    pub date_range: Option<String>,
}

/// One ranked search result with its derived risk view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub document: IndexedDocument,
    pub risk_scores: BTreeMap<RiskCategory, f64>,
    /// Relevance in `[0, 1)`, higher is better.
    pub score: f64,
    pub risk_relevance: bool,
    pub risk_insights: RiskInsights,
}

/// Append domain synonyms to a query. Matching is whole-query substring
/// lookup, case-insensitive; expansion is not recursive.
pub fn expand_query(query: &str) -> String {
    let lower = query.to_lowercase();
    let mut expanded = query.to_string();
    for (key, synonyms) in SYNONYMS {
        if lower.contains(key) {
            for synonym in synonyms {
                expanded.push(' ');
                expanded.push_str(synonym);
            }
        }
    }
    expanded
}

/// Run a search: expand, match, facet-filter, re-rank, annotate.
///
/// Boost intent is always detected against the raw query, not the expanded
/// one, so synonym expansion cannot manufacture urgency or capital intent.
/// Re-ranking multiplies distances (urgency x0.5 for CRITICAL / x0.7 for
/// HIGH, compliance match x0.6, capital term match x0.7), then results are
/// stably sorted by descending score.
pub fn search(
    index: &DocumentIndex,
    query: &str,
    facets: &Facets,
) -> Result<Vec<SearchResult>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    if facets.date_range.is_some() {
        debug!("date_range facet is accepted but not applied");
    }

    let expanded = expand_query(query);
    debug!(%query, %expanded, "executing search");

    let query_lower = query.to_lowercase();
    let urgency = URGENCY_INTENT.is_match(query);
    let compliance_intent = COMPLIANCE_INTENT.is_match(query);
    let capital_intent = CAPITAL_INTENT.is_match(query);
    let risk_relevance = RISK_RELEVANCE_KEYWORDS
        .iter()
        .any(|kw| query_lower.contains(kw));

    let mut results = Vec::new();
    for hit in index.fuzzy_hits(&expanded)? {
        let Some(doc) = index.get(&hit.id) else {
            continue;
        };

        if let Some(level) = facets.risk_level
            && doc.risk_level != level
        {
            continue;
        }
        if let Some(framework) = facets.compliance
            && !doc.compliance.contains(&framework)
        {
            continue;
        }

        let mut distance = hit.distance;
        if urgency {
            match doc.risk_level {
                RiskLevel::Critical => distance *= 0.5,
                RiskLevel::High => distance *= 0.7,
                _ => {}
            }
        }
        if compliance_intent
            && doc
                .compliance
                .iter()
                .any(|fw| query_lower.contains(&fw.as_str().to_lowercase()))
        {
            distance *= 0.6;
        }
        if capital_intent && doc.risk_terms.iter().any(|t| t.contains("capital"))
        {
            distance *= 0.7;
        }

        results.push(SearchResult {
            risk_scores: insights::risk_scores(doc),
            score: 1.0 - distance,
            risk_relevance,
            risk_insights: insights::insights(doc),
            document: doc.clone(),
        });
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(count = results.len(), "search complete");
    Ok(results)
}
