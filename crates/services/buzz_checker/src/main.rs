use buzz_calendar::{
    query_availability, FilePageFetcher, HttpPageFetcher, QueryResolver, TableExtractor,
};
use buzz_common::{
    config_error, extraction_error, log_error, log_result, BuzzError, Context, ExitStatus,
    PageFetcher,
};
use buzz_config::{load_config, load_config_from, AppConfig};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;
mod report;


use cli::{Args, DATE_USAGE};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    buzz_common::init_with_level(args.log_level());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error(&err, "Check failed");
            eprintln!("Error: {}", err);
            if matches!(err, BuzzError::ValidationError(_)) {
                eprintln!("{}", DATE_USAGE);
            }
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(args: &Args) -> Result<(), BuzzError> {
    let config = log_result(
        match &args.config {
            Some(dir) => load_config_from(dir),
            None => load_config(),
        },
        "Configuration loaded",
        "Failed to load configuration",
    )?;
    let venue = &config.venue;

    let now = venue_now(&config)?;
    let resolver = QueryResolver::new(venue);
    let date = resolver.resolve_date(&args.date, now)?;
    let studios = resolver.resolve_studios(&args.studios);
    debug!("Resolved date {} and studios {:?}", date, studios);

    let extractor = TableExtractor::new(venue)?;
    let fetcher: Box<dyn PageFetcher> = match &args.file {
        Some(path) => Box::new(FilePageFetcher::new(path.clone())),
        None => Box::new(HttpPageFetcher::new(venue, &config.fetch)?),
    };

    let markup = fetcher
        .fetch_calendar(date)
        .await
        .with_context(|| format!("Failed to fetch calendar from {}", fetcher.describe()))?;
    let grid = extractor.extract_grid(&markup);
    if grid.is_empty() {
        return Err(extraction_error(format!(
            "no studio columns found in the calendar from {}",
            fetcher.describe()
        )));
    }
    info!(
        "Extracted {} studios and {} slots",
        grid.studios().len(),
        grid.slots().len()
    );

    let slots = match &args.times {
        Some(times) => resolver.resolve_time_slots(times),
        None => grid.slots().to_vec(),
    };
    let result = query_availability(&grid, &studios, &slots);

    if args.json {
        println!("{}", report::render_json(&venue.name, date, &result)?);
    } else {
        print!("{}", report::render_text(&venue.name, date, &result));
    }
    Ok(())
}

/// The current wall-clock time at the venue.
fn venue_now(config: &AppConfig) -> Result<NaiveDateTime, BuzzError> {
    let tz: Tz = config
        .venue
        .timezone
        .parse()
        .map_err(|_| config_error(format!("unknown time zone {}", config.venue.timezone)))?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}
