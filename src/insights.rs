//! Risk insight aggregation over documents and result sets.
//!
//! Per-document category scores and compliance gaps are recomputed on
//! demand from content; nothing here is cached on the document. Summaries
//! and alerts are read-only views over a ranked result set.

use std::{collections::BTreeMap, fmt, fmt::Write};

use serde::Serialize;

use crate::{
    compliance::Framework,
    document::IndexedDocument,
    query::SearchResult,
    risk::RiskLevel,
};

/// The five scored risk categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    CreditRisk,
    MarketRisk,
    OperationalRisk,
    LiquidityRisk,
    ComplianceRisk,
}

pub const ALL_CATEGORIES: [RiskCategory; 5] = [
    RiskCategory::CreditRisk,
    RiskCategory::MarketRisk,
    RiskCategory::OperationalRisk,
    RiskCategory::LiquidityRisk,
    RiskCategory::ComplianceRisk,
];

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::CreditRisk => "credit_risk",
            RiskCategory::MarketRisk => "market_risk",
            RiskCategory::OperationalRisk => "operational_risk",
            RiskCategory::LiquidityRisk => "liquidity_risk",
            RiskCategory::ComplianceRisk => "compliance_risk",
        }
    }

    /// Human-readable name, e.g. "credit risk".
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            RiskCategory::CreditRisk => {
                &["credit", "default", "loan", "exposure", "counterparty"]
            }
            RiskCategory::MarketRisk => {
                &["market", "trading", "volatility", "var", "derivative"]
            }
            RiskCategory::OperationalRisk => {
                &["operational", "process", "system", "fraud", "error"]
            }
            RiskCategory::LiquidityRisk => {
                &["liquidity", "cash", "funding", "lcr", "nsfr"]
            }
            RiskCategory::ComplianceRisk => {
                &["compliance", "regulatory", "audit", "violation", "breach"]
            }
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived insights attached to each search result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskInsights {
    pub top_risks: Vec<String>,
    /// Frameworks the content implies are required but the document does
    /// not reference. `None` (omitted in JSON) when there is no gap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_gaps: Option<Vec<Framework>>,
}

/// An alert derived from a result set. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAlert {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub severity: RiskLevel,
    pub description: String,
}

/// Score each risk category for a document.
///
/// A category's score is the fraction of its keyword list found as
/// substrings of the content, clamped to 1.0.
pub fn risk_scores(doc: &IndexedDocument) -> BTreeMap<RiskCategory, f64> {
    let content = doc.content.to_lowercase();
    ALL_CATEGORIES
        .into_iter()
        .map(|category| {
            let keywords = category.keywords();
            let hits = keywords
                .iter()
                .filter(|kw| content.contains(*kw))
                .count();
            let score = (hits as f64 / keywords.len() as f64).min(1.0);
            (category, score)
        })
        .collect()
}

/// Compute a document's insight block: top risk categories and compliance
/// gaps.
pub fn insights(doc: &IndexedDocument) -> RiskInsights {
    let scores = risk_scores(doc);

    let mut ranked: Vec<(RiskCategory, f64)> = scores
        .into_iter()
        .filter(|(_, score)| *score > 0.5)
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
    });

    let top_risks = ranked
        .into_iter()
        .take(3)
        .map(|(category, _)| category.display_name())
        .collect();

    let gaps: Vec<Framework> = required_frameworks(&doc.content)
        .into_iter()
        .filter(|fw| !doc.compliance.contains(fw))
        .collect();

    RiskInsights {
        top_risks,
        compliance_gaps: if gaps.is_empty() { None } else { Some(gaps) },
    }
}

/// Frameworks a document's content implies it should reference.
fn required_frameworks(content: &str) -> Vec<Framework> {
    let content = content.to_lowercase();
    let mut required = Vec::new();

    if content.contains("capital") || content.contains("tier 1") {
        required.push(Framework::BaselIii);
    }
    if content.contains("internal control") || content.contains("financial reporting")
    {
        required.push(Framework::Sox);
    }
    if content.contains("personal data") || content.contains("privacy") {
        required.push(Framework::Gdpr);
    }
    if content.contains("money laundering") || content.contains("suspicious") {
        required.push(Framework::AmlKyc);
    }

    required
}

/// Render a multi-line textual report over a ranked result set: totals,
/// severity warnings, the risk-level distribution, the most frequent risk
/// areas, and compliance framework coverage.
pub fn summarize(results: &[SearchResult]) -> String {
    let mut by_level: BTreeMap<RiskLevel, usize> = BTreeMap::new();
    let mut coverage: BTreeMap<Framework, usize> = BTreeMap::new();
    let mut risk_areas: BTreeMap<String, usize> = BTreeMap::new();

    for result in results {
        *by_level.entry(result.document.risk_level).or_default() += 1;
        for fw in &result.document.compliance {
            *coverage.entry(*fw).or_default() += 1;
        }
        for risk in &result.risk_insights.top_risks {
            *risk_areas.entry(risk.clone()).or_default() += 1;
        }
    }

    let count_of = |level: RiskLevel| by_level.get(&level).copied().unwrap_or(0);
    let critical = count_of(RiskLevel::Critical);
    let high = count_of(RiskLevel::High);

    let mut out = String::new();
    let _ = writeln!(out, "Found {} documents", results.len());

    if critical > 0 {
        let _ = writeln!(
            out,
            "\nWARNING: {critical} CRITICAL risk documents require immediate attention"
        );
    }
    if high > 0 {
        let _ = writeln!(
            out,
            "{}WARNING: {high} HIGH risk documents require review",
            if critical > 0 { "" } else { "\n" }
        );
    }

    let _ = writeln!(out, "\nRisk distribution:");
    let _ = writeln!(out, "  critical: {critical}");
    let _ = writeln!(out, "  high: {high}");
    let _ = writeln!(out, "  medium: {}", count_of(RiskLevel::Medium));
    let _ = writeln!(out, "  low: {}", count_of(RiskLevel::Low));

    if !risk_areas.is_empty() {
        let mut top: Vec<(&String, &usize)> = risk_areas.iter().collect();
        top.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let _ = writeln!(out, "\nTop risk areas:");
        for (risk, count) in top.into_iter().take(3) {
            let _ = writeln!(out, "  {risk}: {count} documents");
        }
    }

    if !coverage.is_empty() {
        let _ = writeln!(out, "\nCompliance coverage:");
        for (fw, count) in &coverage {
            let _ = writeln!(out, "  {fw}: {count} documents");
        }
    }

    out
}

/// Derive alerts from a ranked result set.
///
/// Thresholds: any CRITICAL result raises `CRITICAL_RISK`; more than three
/// HIGH results raise `HIGH_RISK_CONCENTRATION`; any result with an open
/// compliance gap raises `COMPLIANCE_GAPS`.
pub fn alerts(results: &[SearchResult]) -> Vec<RiskAlert> {
    let mut alerts = Vec::new();

    let critical = results
        .iter()
        .filter(|r| r.document.risk_level == RiskLevel::Critical)
        .count();
    if critical > 0 {
        alerts.push(RiskAlert {
            kind: "CRITICAL_RISK",
            severity: RiskLevel::Critical,
            description: format!(
                "{critical} documents with CRITICAL risk level found"
            ),
        });
    }

    let high = results
        .iter()
        .filter(|r| r.document.risk_level == RiskLevel::High)
        .count();
    if high > 3 {
        alerts.push(RiskAlert {
            kind: "HIGH_RISK_CONCENTRATION",
            severity: RiskLevel::High,
            description: format!(
                "{high} documents with HIGH risk level - review risk concentration"
            ),
        });
    }

    let with_gaps = results
        .iter()
        .filter(|r| {
            r.risk_insights
                .compliance_gaps
                .as_ref()
                .is_some_and(|gaps| !gaps.is_empty())
        })
        .count();
    if with_gaps > 0 {
        alerts.push(RiskAlert {
            kind: "COMPLIANCE_GAPS",
            severity: RiskLevel::Medium,
            description: format!(
                "{with_gaps} documents have compliance framework gaps"
            ),
        });
    }

    alerts
}
