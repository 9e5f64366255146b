use clap::Parser;
use tracing_subscriber::EnvFilter;

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

use cli::{AnnotateArgs, Cli, Command, SearchArgs};
use document::{Document, IndexedDocument};
use index::DocumentIndex;
use query::{Facets, SearchResult};

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = std::env::var("RISKDEX_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Search(args) => cmd_search(&args),
        Command::Annotate(args) => cmd_annotate(&args),
    }
}

fn load_corpus(path: &std::path::Path) -> error::Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn cmd_search(args: &SearchArgs) -> error::Result<()> {
    let mut index = DocumentIndex::new()?;
    index.ingest_batch(load_corpus(&args.corpus)?)?;

    let facets = Facets {
        risk_level: args.risk_level,
        compliance: args.compliance,
        date_range: None,
    };

    let mut results = query::search(&index, &args.query, &facets)?;
    results.retain(|r| r.score >= args.min_score);
    if !args.all {
        results.truncate(args.count);
    }

    if args.json {
        let mut payload = serde_json::json!({
            "query": args.query,
            "results": results,
        });
        if args.summary {
            payload["summary"] =
                serde_json::Value::String(insights::summarize(&results));
        }
        if args.alerts {
            payload["alerts"] = serde_json::to_value(insights::alerts(&results))?;
        }
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    format_human(&results);
    if args.summary {
        println!();
        print!("{}", insights::summarize(&results));
    }
    if args.alerts {
        println!();
        format_alerts(&insights::alerts(&results));
    }
    Ok(())
}

fn cmd_annotate(args: &AnnotateArgs) -> error::Result<()> {
    let annotated: Vec<IndexedDocument> = load_corpus(&args.corpus)?
        .into_iter()
        .map(IndexedDocument::annotate)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&annotated)?);
        return Ok(());
    }

    for doc in &annotated {
        let frameworks: Vec<&str> =
            doc.compliance.iter().map(|fw| fw.as_str()).collect();
        println!(
            "{}\t{}\t[{}]\t[{}]",
            doc.id,
            doc.risk_level,
            doc.risk_terms.join(", "),
            frameworks.join(", ")
        );
    }
    println!("\n{} document(s)", annotated.len());
    Ok(())
}

fn format_human(results: &[SearchResult]) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }

    for (i, r) in results.iter().enumerate() {
        println!(
            "{:>3}. [{:.3}] {} ({})",
            i + 1,
            r.score,
            r.document.title,
            r.document.risk_level
        );
        if !r.document.compliance.is_empty() {
            let frameworks: Vec<&str> =
                r.document.compliance.iter().map(|fw| fw.as_str()).collect();
            println!("     compliance: {}", frameworks.join(", "));
        }
        if !r.risk_insights.top_risks.is_empty() {
            println!("     risks: {}", r.risk_insights.top_risks.join(", "));
        }
    }
    println!("\n{} result(s)", results.len());
}

fn format_alerts(alerts: &[insights::RiskAlert]) {
    if alerts.is_empty() {
        println!("No alerts.");
        return;
    }
    for alert in alerts {
        println!("[{}] {}: {}", alert.severity, alert.kind, alert.description);
    }
}
