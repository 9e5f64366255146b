use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{compliance::Framework, risk::RiskLevel};

#[derive(Debug, Parser)]
#[command(
    name = "riskdex",
    about = "Risk-aware search over banking document corpora"
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search a document corpus
    Search(SearchArgs),
    /// Print the derived risk annotations for every document in a corpus
    Annotate(AnnotateArgs),
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Path to a JSON corpus (an array of documents)
    pub corpus: PathBuf,

    /// The search query
    pub query: String,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Return all results above the score threshold
    #[arg(long)]
    pub all: bool,

    /// Only return documents at this risk level (LOW/MEDIUM/HIGH/CRITICAL)
    #[arg(long)]
    pub risk_level: Option<RiskLevel>,

    /// Only return documents referencing this framework (e.g. BASEL_III, SOX)
    #[arg(long)]
    pub compliance: Option<Framework>,

    /// Minimum score threshold
    #[arg(long, default_value = "0.0")]
    pub min_score: f64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Append a risk summary for the result set
    #[arg(long)]
    pub summary: bool,

    /// Append derived risk alerts for the result set
    #[arg(long)]
    pub alerts: bool,
}

// -- Annotate --

#[derive(Debug, Parser)]
pub struct AnnotateArgs {
    /// Path to a JSON corpus (an array of documents)
    pub corpus: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_facets() {
        let cli = Cli::parse_from([
            "riskdex",
            "search",
            "corpus.json",
            "capital adequacy",
            "--risk-level",
            "high",
            "--compliance",
            "basel-iii",
            "-n",
            "5",
        ]);
        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query, "capital adequacy");
        assert_eq!(args.count, 5);
        assert_eq!(args.risk_level, Some(RiskLevel::High));
        assert_eq!(args.compliance, Some(Framework::BaselIii));
        assert!(!args.json);
    }

    #[test]
    fn parses_annotate_defaults() {
        let cli = Cli::parse_from(["riskdex", "annotate", "corpus.json"]);
        let Command::Annotate(args) = cli.command else {
            panic!("expected annotate command");
        };
        assert_eq!(args.corpus, PathBuf::from("corpus.json"));
        assert!(!args.json);
    }

    #[test]
    fn rejects_unknown_risk_level() {
        let parsed = Cli::try_parse_from([
            "riskdex",
            "search",
            "corpus.json",
            "q",
            "--risk-level",
            "extreme",
        ]);
        assert!(parsed.is_err());
    }
}
