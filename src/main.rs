//! repohub CLI
//!
//! With no subcommand the interactive TUI launches; `repohub search` does a
//! single query and prints the results.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::HumanDuration;
use repohub::{format_count, GitHubClient, SearchQuery, SortOrder};
use std::time::Instant;

/// repohub - Search GitHub repositories from your terminal
#[derive(Parser)]
#[command(name = "repohub")]
#[command(version)]
#[command(about = "Search GitHub repositories from your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and print the results
    Search {
        /// Topic to search for
        topic: String,

        /// Restrict results to one language (e.g. python)
        #[arg(short, long)]
        language: Option<String>,

        /// Sort by star count instead of best match
        #[arg(long)]
        sort_stars: bool,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        order: String,

        /// Result page (10 items per page)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },
}

fn main() {
    repohub::logging::init();
    log::info!("repohub {} starting up", repohub::VERSION);

    let cli = Cli::parse();

    let result = match cli.command {
        None => run_tui(),
        Some(Commands::Search {
            topic,
            language,
            sort_stars,
            order,
            page,
            output,
        }) => cmd_search(&topic, language, sort_stars, &order, page, &output),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run_tui() -> repohub::Result<()> {
    let client = GitHubClient::new()?;
    repohub::tui::run(client)
}

/// One-shot search command implementation
fn cmd_search(
    topic: &str,
    language: Option<String>,
    sort_stars: bool,
    order: &str,
    page: u32,
    output_format: &str,
) -> repohub::Result<()> {
    let order = match order {
        "asc" => SortOrder::Ascending,
        _ => SortOrder::Descending,
    };

    let query = SearchQuery {
        topic: topic.to_string(),
        language: language.filter(|l| !l.is_empty()),
        sort_by_stars: sort_stars,
        page: page.max(1),
        order,
    };

    let client = GitHubClient::new()?;
    let start = Instant::now();
    let results = client.search(&query)?;
    let elapsed = start.elapsed();

    if output_format == "json" {
        println!(
            "{}",
            serde_json::json!({
                "topic": topic,
                "page": query.page,
                "total_count": results.total_count,
                "items": results.items,
            })
        );
        return Ok(());
    }

    if results.items.is_empty() {
        println!(
            "Your search - {} - did not match any repositories.",
            style(topic).bold()
        );
        return Ok(());
    }

    println!(
        "{} Found {} repositories in {} (page {}):",
        style("\u{2713}").green().bold(),
        style(format_count(results.total_count)).yellow(),
        style(HumanDuration(elapsed)).cyan(),
        query.page
    );
    println!();

    for (i, repo) in results.items.iter().enumerate() {
        let owner = repo
            .owner
            .as_ref()
            .map(|o| o.login.as_str())
            .unwrap_or("unknown");

        println!(
            "  {} {}/{}",
            style(format!("{:2}.", i + 1)).dim(),
            style(owner).cyan(),
            style(&repo.name).cyan().bold()
        );
        println!(
            "      \u{2B50} {}  \u{1F500} {}  {}",
            format_count(repo.stargazers_count),
            format_count(repo.forks),
            repo.language.as_deref().unwrap_or("")
        );
        if let Some(description) = &repo.description {
            println!("      {}", description);
        }
        println!("      {}", style(&repo.html_url).dim());
        println!();
    }

    Ok(())
}
