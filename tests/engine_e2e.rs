//! End-to-end tests over the public API: ingest a small banking corpus,
//! search it, and check annotation, ranking, and reporting together.

use riskdex::{
    Document,
    DocumentIndex,
    Facets,
    Framework,
    RiskLevel,
    insights,
    query,
};

fn doc(id: &str, title: &str, content: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        ..Document::default()
    }
}

fn banking_corpus() -> Vec<Document> {
    vec![
        doc(
            "basel-capital",
            "Basel III Capital Requirements",
            "Tier 1 capital and capital adequacy requirements under Basel III. \
             Banks must maintain capital buffers against risk-weighted assets.",
        ),
        doc(
            "liquidity-stress",
            "Liquidity Stress Testing Framework",
            "Liquidity coverage ratio monitoring and funding stress scenarios. \
             Potential funding concentration should be assessed quarterly.",
        ),
        doc(
            "aml-sar",
            "Suspicious Activity Reporting Procedures",
            "Filing SARs for suspicious transactions under anti-money \
             laundering rules. Know your customer onboarding checks apply.",
        ),
        doc(
            "breach-incident",
            "Regulatory Breach Incident Report",
            "Severe regulatory breach requiring immediate action. Violation of \
             reporting obligations identified during the audit.",
        ),
        doc(
            "newsletter",
            "Quarterly Branch Newsletter",
            "The downtown branch reopens next month with extended hours.",
        ),
    ]
}

fn build_index() -> DocumentIndex {
    let mut index = DocumentIndex::new().unwrap();
    let ingested = index.ingest_batch(banking_corpus()).unwrap();
    assert_eq!(ingested, 5);
    index
}

#[test]
fn capital_query_ranks_basel_document_first() {
    let index = build_index();
    let results =
        query::search(&index, "capital adequacy", &Facets::default()).unwrap();

    assert!(!results.is_empty());
    assert_eq!(results[0].document.id, "basel-capital");
    assert!(results[0].score > 0.0);
    assert!(results[0].score < 1.0);
}

#[test]
fn annotation_is_visible_through_the_index() {
    let index = build_index();

    let aml = index.get("aml-sar").unwrap();
    assert!(aml.compliance.contains(&Framework::AmlKyc));
    assert!(aml.risk_terms.contains(&"anti-money laundering"));
    assert!(aml.risk_terms.contains(&"know your customer"));

    let basel = index.get("basel-capital").unwrap();
    assert!(basel.compliance.contains(&Framework::BaselIii));
    assert!(basel.risk_terms.contains(&"capital adequacy"));
}

#[test]
fn urgent_risk_query_promotes_the_critical_document() {
    let index = build_index();
    let results =
        query::search(&index, "critical risk breach", &Facets::default())
            .unwrap();

    assert!(!results.is_empty());
    // The incident report is the only CRITICAL document in the corpus and
    // the urgency boost halves its distance.
    assert_eq!(results[0].document.id, "breach-incident");
    assert_eq!(results[0].document.risk_level, RiskLevel::Critical);
    assert!(results.iter().all(|r| r.risk_relevance));
}

#[test]
fn typo_in_query_still_finds_the_document() {
    let index = build_index();
    let results =
        query::search(&index, "liqudity coverage", &Facets::default()).unwrap();
    assert!(
        results
            .iter()
            .any(|r| r.document.id == "liquidity-stress")
    );
}

#[test]
fn facets_narrow_results_through_the_public_api() {
    let index = build_index();

    let critical_only = Facets {
        risk_level: Some(RiskLevel::Critical),
        ..Facets::default()
    };
    let results = query::search(&index, "regulatory", &critical_only).unwrap();
    assert!(!results.is_empty());
    assert!(
        results
            .iter()
            .all(|r| r.document.risk_level == RiskLevel::Critical)
    );

    let basel_only = Facets {
        compliance: Some(Framework::BaselIii),
        ..Facets::default()
    };
    let results = query::search(&index, "capital", &basel_only).unwrap();
    assert!(!results.is_empty());
    assert!(
        results
            .iter()
            .all(|r| r.document.compliance.contains(&Framework::BaselIii))
    );
}

#[test]
fn clear_resets_all_state() {
    let mut index = build_index();
    assert_eq!(index.count(), 5);

    index.clear().unwrap();
    assert_eq!(index.count(), 0);
    assert!(index.get("basel-capital").is_none());
    assert!(
        query::search(&index, "capital", &Facets::default())
            .unwrap()
            .is_empty()
    );

    // The index is still usable after a reset.
    index
        .ingest(doc("solo", "Capital Note", "capital adequacy memo"))
        .unwrap();
    let results = query::search(&index, "capital", &Facets::default()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].document.id, "solo");
}

#[test]
fn summary_and_alerts_cover_a_result_set() {
    let index = build_index();
    let results =
        query::search(&index, "regulatory risk reporting", &Facets::default())
            .unwrap();
    assert!(!results.is_empty());

    let summary = insights::summarize(&results);
    assert!(summary.contains(&format!("Found {} documents", results.len())));
    assert!(summary.contains("Risk distribution:"));

    // The breach incident matches this query, so a CRITICAL alert fires.
    assert!(
        results
            .iter()
            .any(|r| r.document.risk_level == RiskLevel::Critical)
    );
    let alerts = insights::alerts(&results);
    assert!(alerts.iter().any(|a| a.kind == "CRITICAL_RISK"));
}

#[test]
fn corpus_round_trips_through_json_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    std::fs::write(
        &path,
        r#"[
            {
                "id": "gdpr-policy",
                "title": "GDPR Data Handling Policy",
                "content": "Personal data processing and privacy controls under GDPR.",
                "tags": "privacy,policy",
                "fileSize": 2048
            },
            {
                "id": "minimal",
                "title": "Minimal Document"
            }
        ]"#,
    )
    .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let docs: Vec<Document> = serde_json::from_str(&raw).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].file_size, Some(2048));
    assert_eq!(docs[1].content, "");

    let mut index = DocumentIndex::new().unwrap();
    index.ingest_batch(docs).unwrap();
    assert_eq!(index.count(), 2);

    let gdpr = index.get("gdpr-policy").unwrap();
    assert!(gdpr.compliance.contains(&Framework::Gdpr));
}
