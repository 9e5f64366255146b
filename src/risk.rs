//! Risk level classification.
//!
//! An ordered-rule classifier over regex signal groups. The first group that
//! matches wins; match counts are never compared. This is deliberately a
//! heuristic rule list, not a model.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Ordinal document risk classification: `Low < Medium < High < Critical`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            "CRITICAL" => Ok(RiskLevel::Critical),
            _ => Err(Error::Parse {
                kind: "risk level",
                value: s.to_string(),
            }),
        }
    }
}

static CRITICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)breach|violation|critical|severe|immediate action|urgent|emergency|failure to comply",
    )
    .unwrap()
});

static CAPITAL_SHORTFALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)capital ratio.*below|insufficient capital|undercapitalized")
        .unwrap()
});

static LIQUIDITY_SHORTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)liquidity.*shortage|funding.*gap|cash.*crunch").unwrap()
});

static COMPLIANCE_VIOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)non-compliance|regulatory.*breach|violation.*of").unwrap()
});

static HIGH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)high risk|significant|material|substantial|elevated|attention required|non-compliant",
    )
    .unwrap()
});

static MEDIUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)moderate|medium risk|potential|review required|monitor|assess")
        .unwrap()
});

/// Classify free text into a [`RiskLevel`].
///
/// Groups are evaluated in strict priority order with short-circuit: any
/// critical trigger (generic severity words, a capital adequacy shortfall,
/// a liquidity shortage, or a compliance violation) wins immediately, then
/// the high group, then the medium group. Anything else, including empty or
/// whitespace-only text, is `Low`.
pub fn classify(text: &str) -> RiskLevel {
    if CRITICAL.is_match(text)
        || CAPITAL_SHORTFALL.is_match(text)
        || LIQUIDITY_SHORTAGE.is_match(text)
        || COMPLIANCE_VIOLATION.is_match(text)
    {
        return RiskLevel::Critical;
    }
    if HIGH.is_match(text) {
        return RiskLevel::High;
    }
    if MEDIUM.is_match(text) {
        return RiskLevel::Medium;
    }
    RiskLevel::Low
}
