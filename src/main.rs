use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use crate::citation::format::format_record;
use crate::cli::Cli;
use crate::config::Config;

mod citation;
mod cli;
mod config;
mod error;
mod extra;
mod page;
mod pubmed;

fn main() -> ExitCode {
    let config = Cli::parse().into_config();
    match run(&config) {
        Ok(count) => {
            eprintln!("{} {count}  {} 0", "✓".green(), "✗".red());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {err:#}", "✗".red());
            eprintln!("{} 0  {} 1", "✓".green(), "✗".red());
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<usize> {
    let id_text = fs::read_to_string(&config.ids_path)
        .with_context(|| format!("failed to read {}", config.ids_path.display()))?;
    let ids = pubmed::parse_id_list(&id_text)?;

    let mut citations = Vec::new();
    if ids.is_empty() {
        eprintln!("no PubMed ids listed; building from extra citations only");
    } else {
        for record in fetch_sorted(config, &ids)? {
            let citation = format_record(&record, &config.highlight_author)?;
            eprintln!("{} {}", "✓".green(), record.pmid);
            citations.push(citation);
        }
    }

    let extra_text = fs::read_to_string(&config.extra_path)
        .with_context(|| format!("failed to read {}", config.extra_path.display()))?;
    citations.extend(extra::parse_blocks(&extra_text)?);
    let count = citations.len();

    let rendered = page::render_page(citations);
    fs::write(&config.out_path, rendered)
        .with_context(|| format!("failed to write {}", config.out_path.display()))?;
    eprintln!("{} wrote {}", "✓".green(), config.out_path.display());

    Ok(count)
}

fn fetch_sorted(config: &Config, ids: &[String]) -> anyhow::Result<Vec<pubmed::RawRecord>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("fetching {} records", ids.len()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let fetched = pubmed::fetch::fetch_records(config, ids);
    spinner.finish_and_clear();

    Ok(pubmed::sort_newest_first(fetched?)?)
}
