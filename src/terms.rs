//! Banking vocabulary extraction.
//!
//! Scans document text for a fixed table of banking/risk/compliance phrases.
//! The matched subset becomes the document's `risk_terms`, which the search
//! index weights as heavily as the title.

/// The banking term vocabulary, in the order terms are reported.
pub const VOCABULARY: [&str; 39] = [
    "basel iii",
    "tier 1 capital",
    "tier 2 capital",
    "liquidity coverage ratio",
    "credit risk",
    "market risk",
    "operational risk",
    "systemic risk",
    "var",
    "cvar",
    "stress testing",
    "counterparty",
    "concentration risk",
    "default",
    "exposure",
    "hedge",
    "derivative",
    "swap",
    "option",
    "leverage ratio",
    "capital adequacy",
    "risk-weighted assets",
    "probability of default",
    "loss given default",
    "exposure at default",
    "credit valuation adjustment",
    "funding valuation adjustment",
    "dodd-frank",
    "volcker rule",
    "mifid",
    "emir",
    "fatca",
    "anti-money laundering",
    "know your customer",
    "sanctions",
    "liquidity risk",
    "interest rate risk",
    "fx risk",
    "commodity risk",
];

/// Extract the vocabulary terms present in `text`.
///
/// Matching is a case-insensitive substring scan, so "Basel III" in prose
/// matches the "basel iii" entry. Vocabulary order is preserved and each
/// term appears at most once.
pub fn extract(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    VOCABULARY
        .iter()
        .filter(|term| lower.contains(*term))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_multiword_terms() {
        let found =
            extract("Our Basel III and Tier 1 capital planning for Q3");
        assert!(found.contains(&"basel iii"));
        assert!(found.contains(&"tier 1 capital"));
    }

    #[test]
    fn preserves_vocabulary_order() {
        let found = extract("counterparty exposure under stress testing");
        let positions: Vec<usize> = found
            .iter()
            .map(|t| VOCABULARY.iter().position(|v| v == t).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(extract("DODD-FRANK and MiFID review"), vec![
            "dodd-frank",
            "mifid"
        ]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
    }

    #[test]
    fn no_duplicates() {
        let found = extract("swap swap swap");
        assert_eq!(found, vec!["swap"]);
    }
}
