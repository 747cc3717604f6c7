//! experimentsearch CLI
//!
//! Searches a set of lab experiment records with the small query language
//! the original web search used in its free-text fields:
//! - whitespace = OR
//! - `+` = AND
//! - `%` = wildcard at either end of a word, or alone to match anything
//!
//! Two commands:
//! - `search` - run raw request parameters against a JSON record set
//! - `explain` - show how a parameter set classifies and compiles

mod cli;
mod error;
mod model;
mod query;
mod store;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use error::QueryError;
use model::Experiment;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let result = match cli.command {
        Some(Commands::Search(args)) => run_search(args),
        Some(Commands::Explain(args)) => run_explain(args),
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            match e.downcast_ref::<QueryError>() {
                Some(query_err) => eprintln!("Error ({}): {}", query_err.error_code(), query_err),
                None => eprintln!("Error: {}", e),
            }
            std::process::exit(get_exit_code(&e));
        }
    }
}

fn run_search(args: cli::SearchArgs) -> Result<String> {
    let params = cli::parse_params(&args.params)?;
    // Lenient compile: a blank parameter set is a blank page, not an error
    let outcome = query::compile(&params)?;
    let records = store::MemoryStore::load(&args.data)?;
    tracing::debug!(records = records.len(), "record set loaded");
    if records.is_empty() {
        tracing::warn!("record set {} holds no experiments", args.data.display());
    }

    match store::materialize(&records, &outcome) {
        None => Ok("No search performed.".to_string()),
        Some(matches) if matches.is_empty() => Ok(format!(
            "No results for {}.",
            outcome.search_term.as_deref().unwrap_or("search")
        )),
        Some(matches) => Ok(format_results(
            &matches,
            outcome.search_term.as_deref().unwrap_or(""),
        )),
    }
}

fn run_explain(args: cli::ExplainArgs) -> Result<String> {
    let params = cli::parse_params(&args.params)?;
    let outcome = query::compile_strict(&params)?;

    let mut out = format!("mode: {:?}\n", outcome.mode);
    out.push_str(&format!(
        "search term: {}\n",
        outcome.search_term.as_deref().unwrap_or("-")
    ));
    match &outcome.filter {
        Some(filter) => {
            out.push_str(&format!("clauses: {}\n", filter.clauses().len()));
            out.push_str(&format!("filter: {:#?}", filter));
        }
        None => out.push_str("filter: none"),
    }
    Ok(out)
}

/// Format matched records as a markdown table.
fn format_results(experiments: &[Experiment], search_term: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# Search Results · {} experiments\n\n",
        experiments.len()
    ));
    if !search_term.is_empty() {
        md.push_str(&format!("Query: {}\n\n", search_term));
    }

    md.push_str("| Name | Primary Investigator | Created | Created By |\n");
    md.push_str("|------|----------------------|---------|------------|\n");
    for experiment in experiments {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            experiment.name,
            experiment.pi,
            experiment.createddate.format("%Y-%m-%d %H:%M"),
            experiment.createdby
        ));
    }
    md
}

/// Map error kinds to exit codes
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<QueryError>() {
        // Validation failures are usage errors
        Some(QueryError::EmptyTerm)
        | Some(QueryError::NoSearchTerm)
        | Some(QueryError::MalformedDate { .. })
        | Some(QueryError::UnrecognizedParameters) => 1,
        // Anything else (pattern compile, record file problems)
        _ => 5,
    }
}
