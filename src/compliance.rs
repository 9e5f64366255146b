//! Regulatory framework detection.
//!
//! Nine independent regex patterns, one per framework. Detection is
//! non-exclusive: a document may reference several frameworks or none.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named regulatory framework a document may be relevant to.
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
pub enum Framework {
    BaselIii,
    Sox,
    Gdpr,
    AmlKyc,
    DoddFrank,
    Mifid,
    Ifrs,
    Ccar,
    Dfast,
}

/// All frameworks in declaration order, which is also detection order.
pub const ALL_FRAMEWORKS: [Framework; 9] = [
    Framework::BaselIii,
    Framework::Sox,
    Framework::Gdpr,
    Framework::AmlKyc,
    Framework::DoddFrank,
    Framework::Mifid,
    Framework::Ifrs,
    Framework::Ccar,
    Framework::Dfast,
];

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::BaselIii => "BASEL_III",
            Framework::Sox => "SOX",
            Framework::Gdpr => "GDPR",
            Framework::AmlKyc => "AML_KYC",
            Framework::DoddFrank => "DODD_FRANK",
            Framework::Mifid => "MIFID",
            Framework::Ifrs => "IFRS",
            Framework::Ccar => "CCAR",
            Framework::Dfast => "DFAST",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Framework::BaselIii => &BASEL_III,
            Framework::Sox => &SOX,
            Framework::Gdpr => &GDPR,
            Framework::AmlKyc => &AML_KYC,
            Framework::DoddFrank => &DODD_FRANK,
            Framework::Mifid => &MIFID,
            Framework::Ifrs => &IFRS,
            Framework::Ccar => &CCAR,
            Framework::Dfast => &DFAST,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase().replace('-', "_");
        ALL_FRAMEWORKS
            .into_iter()
            .find(|fw| fw.as_str() == upper)
            .ok_or_else(|| Error::Parse {
                kind: "compliance framework",
                value: s.to_string(),
            })
    }
}

static BASEL_III: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)basel\s*(iii|3)|capital\s*adequacy|tier\s*1|leverage\s*ratio")
        .unwrap()
});

static SOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)sarbanes|sox|internal\s*controls|404|302").unwrap()
});

static GDPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)gdpr|data\s*protection|privacy|right\s*to\s*be\s*forgotten")
        .unwrap()
});

static AML_KYC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)anti.*money.*laundering|aml|kyc|know.*your.*customer|suspicious.*activity",
    )
    .unwrap()
});

static DODD_FRANK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)dodd.*frank|volcker|swap.*execution|living\s*will").unwrap()
});

static MIFID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mifid|markets.*financial.*instruments|best\s*execution")
        .unwrap()
});

static IFRS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ifrs|international.*financial.*reporting").unwrap()
});

static CCAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ccar|comprehensive.*capital.*analysis").unwrap()
});

static DFAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)dfast|dodd.*frank.*stress\s*test").unwrap()
});

/// Detect which frameworks `text` references.
///
/// Every pattern is tested independently; results come back in declaration
/// order so output is deterministic for a given input.
pub fn detect(text: &str) -> Vec<Framework> {
    ALL_FRAMEWORKS
        .into_iter()
        .filter(|fw| fw.pattern().is_match(text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_matches_nothing() {
        assert!(detect("").is_empty());
    }

    #[test]
    fn detection_is_non_exclusive() {
        let found =
            detect("Basel III capital rules and GDPR personal data duties");
        assert!(found.contains(&Framework::BaselIii));
        assert!(found.contains(&Framework::Gdpr));
    }

    #[test]
    fn aml_kyc_from_suspicious_activity() {
        let found = detect(
            "Suspicious activity reports (SARs) must be filed promptly. \
             Know Your Customer procedures apply to onboarding.",
        );
        assert!(found.contains(&Framework::AmlKyc));
    }

    #[test]
    fn basel_spelled_with_digit() {
        assert!(detect("Basel 3 phase-in schedule").contains(&Framework::BaselIii));
    }

    #[test]
    fn results_in_declaration_order() {
        let found = detect("DFAST results, MiFID scope, SOX 404 controls");
        assert_eq!(found, vec![
            Framework::Sox,
            Framework::Mifid,
            Framework::Dfast
        ]);
    }

    #[test]
    fn dodd_frank_stress_test_hits_both() {
        let found = detect("Dodd-Frank stress test submissions");
        assert!(found.contains(&Framework::DoddFrank));
        assert!(found.contains(&Framework::Dfast));
    }

    #[test]
    fn identifier_round_trip() {
        for fw in ALL_FRAMEWORKS {
            assert_eq!(fw.as_str().parse::<Framework>().unwrap(), fw);
        }
        assert_eq!("aml_kyc".parse::<Framework>().unwrap(), Framework::AmlKyc);
        assert!("NOT_A_FRAMEWORK".parse::<Framework>().is_err());
    }
}
