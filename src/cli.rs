//! CLI mode implementation
//!
//! Command-line surface feeding raw request parameters into the query
//! compiler, the same key/value pairs the original search form submitted.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::query::mode::SearchParams;

/// Experiment search CLI
#[derive(Parser)]
#[command(name = "experimentsearch")]
#[command(about = "Search lab experiment records by name, investigator or date", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a record set with raw request parameters
    Search(SearchArgs),
    /// Classify a parameter set and print the compiled filter
    Explain(ExplainArgs),
}

/// Search command arguments
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// JSON file holding the experiment records
    #[arg(short = 'd', long)]
    pub data: PathBuf,

    /// Raw request parameters (search_name=..., search_pi=..., from_date_day=..., ...)
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

/// Explain command arguments
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// Raw request parameters to classify
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

/// Parse `key=value` arguments, preserving arrival order.
pub fn parse_params(args: &[String]) -> Result<SearchParams> {
    let mut pairs = Vec::with_capacity(args.len());
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{arg}'"))?;
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(SearchParams::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let args = vec![
            "search_name=kiwi fruit".to_string(),
            "from_date_day=5".to_string(),
        ];
        let params = parse_params(&args).unwrap();
        assert_eq!(params.get("search_name"), Some("kiwi fruit"));
        assert_eq!(params.get("from_date_day"), Some("5"));
        assert_eq!(params.get("search_pi"), None);
    }

    #[test]
    fn test_parse_params_keeps_order_and_empty_values() {
        let args = vec!["search_name=".to_string(), "search_pi=x".to_string()];
        let params = parse_params(&args).unwrap();
        assert_eq!(params.get("search_name"), Some(""));
        assert!(params.contains("search_name"));
    }

    #[test]
    fn test_parse_params_rejects_bare_words() {
        let args = vec!["kiwi".to_string()];
        assert!(parse_params(&args).is_err());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let args = vec!["search_name=a=b".to_string()];
        let params = parse_params(&args).unwrap();
        assert_eq!(params.get("search_name"), Some("a=b"));
    }

    #[test]
    fn test_cli_parses_search_command() {
        let cli = Cli::try_parse_from([
            "experimentsearch",
            "search",
            "--data",
            "records.json",
            "search_name=kiwi",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.data, PathBuf::from("records.json"));
                assert_eq!(args.params, vec!["search_name=kiwi".to_string()]);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_cli_parses_explain_command() {
        let cli = Cli::try_parse_from(["experimentsearch", "explain", "search_pi=smith"]).unwrap();
        match cli.command {
            Some(Commands::Explain(args)) => {
                assert_eq!(args.params, vec!["search_pi=smith".to_string()]);
            }
            _ => panic!("expected explain command"),
        }
    }
}
