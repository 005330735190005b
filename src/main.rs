// src/main.rs
mod extractors;
mod moon;
mod storage;
mod utils;

use chrono::NaiveDate;
use clap::Parser;
use extractors::{aggregate, Segmenter, SegmenterConfig};
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the 4dmoon draw-results scraper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Draw date to scrape (YYYY-MM-DD)
    date: Option<String>,

    /// File with one YYYY-MM-DD per line; every pending date is scraped
    #[arg(long)]
    dates_file: Option<String>,

    /// Output directory for extracted records
    #[arg(short, long, default_value = "./json")]
    output_dir: String,

    /// Re-scrape dates whose output file already exists
    #[arg(short, long)]
    force: bool,

    /// Rewrite the dates file afterwards, dropping dates already scraped
    #[arg(long)]
    prune_dates_file: bool,

    /// Debug mode - save the raw page and line stream next to the JSON output
    #[arg(short, long)]
    debug: bool,
}

fn validate_date(date: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| AppError::Config(format!("Invalid date '{}', expected YYYY-MM-DD", date)))
}

/// Scrapes one date end to end: fetch, segment, extract, save.
/// Returns the number of records written.
async fn scrape_date(
    date: &str,
    segmenter: &Segmenter,
    storage: &StorageManager,
    debug: bool,
) -> Result<usize, AppError> {
    let html = moon::client::fetch_page(date).await?;
    let lines = moon::client::html_to_lines(&html);
    tracing::debug!("Reduced page for {} to {} lines", date, lines.len());

    if debug {
        storage.save_debug_page(date, &html, &lines)?;
    }

    let blocks = segmenter.segment(&lines);
    tracing::info!("Found {} draw blocks for {}", blocks.len(), date);

    let records = aggregate(&blocks);
    for record in &records {
        tracing::info!(
            "{} | {} | 1st={} 2nd={} 3rd={} | special={} consolation={}",
            record.title,
            record.draw,
            record.first.as_deref().unwrap_or("-"),
            record.second.as_deref().unwrap_or("-"),
            record.third.as_deref().unwrap_or("-"),
            record.special.len(),
            record.consolation.len(),
        );
    }

    storage.save_records(date, &records)?;
    Ok(records.len())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Collect the dates to scrape
    let dates: Vec<String> = match (&args.date, &args.dates_file) {
        (Some(date), None) => vec![date.clone()],
        (None, Some(path)) => storage::load_dates_file(path)?,
        (Some(_), Some(_)) => {
            return Err(AppError::Config(
                "Pass either a date or --dates-file, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(AppError::Config(
                "No date given. Usage: fourd_scraper YYYY-MM-DD (or --dates-file)".to_string(),
            ));
        }
    };

    for date in &dates {
        validate_date(date)?;
    }

    if args.prune_dates_file && args.dates_file.is_none() {
        return Err(AppError::Config(
            "--prune-dates-file requires --dates-file".to_string(),
        ));
    }

    // 4. Initialize storage and the segmenter
    let storage = StorageManager::new(&args.output_dir)?;
    let segmenter = Segmenter::new(SegmenterConfig::fourdmoon());

    // 5. Process each date
    let mut success_count = 0;
    let mut failure_count = 0;

    for date in &dates {
        if storage.records_exist(date) && !args.force {
            tracing::info!("Date {} already scraped, skipping (use --force to redo)", date);
            continue;
        }

        match scrape_date(date, &segmenter, &storage, args.debug).await {
            Ok(count) => {
                if count == 0 {
                    tracing::warn!("No draw blocks recognized for {} - page layout may have changed", date);
                }
                success_count += 1;
            }
            Err(e) => {
                tracing::error!("Failed to scrape {}: {}", date, e);
                failure_count += 1;
            }
        }
    }

    // 6. Optionally drop completed dates from the dates file
    if args.prune_dates_file {
        if let Some(path) = &args.dates_file {
            let keep: Vec<String> = dates
                .iter()
                .filter(|d| !storage.records_exist(d))
                .cloned()
                .collect();
            let removed = dates.len() - keep.len();
            storage::rewrite_dates_file(path, &keep)?;
            tracing::info!(
                "Pruned {}: removed {} scraped dates, {} remaining",
                path,
                removed,
                keep.len()
            );
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 && failure_count > 0 {
        return Err(AppError::Processing(format!(
            "Failed to scrape all {} requested dates",
            failure_count
        )));
    }

    Ok(())
}
