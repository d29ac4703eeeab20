use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Check studio availability on the BUZZ booking calendar
#[derive(Parser, Debug)]
#[command(name = "buzz-checker")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Date: today, tomorrow, a weekday name, YYYY-MM-DD or YYYY/MM/DD
    #[arg(short, long, default_value = "today")]
    pub date: String,

    /// Studios: all, a list (1,3,5), a range (2-4) or one studio
    #[arg(short, long, default_value = "all")]
    pub studios: String,

    /// Times: a list (10:00,11:30), a range (10:00-12:00) or one time.
    /// Defaults to every slot on the page
    #[arg(short, long)]
    pub times: Option<String>,

    /// Read the calendar from a saved page instead of the live site
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Directory holding default.toml and the RUN_ENV overlay
    #[arg(long, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Log extraction details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

/// Printed after an unrecognised date.
pub const DATE_USAGE: &str = "\
Accepted dates:
  today, tomorrow (今日, 明日)
  a weekday name such as friday or 金曜日 (always the next one after today)
  2025-05-09 or 2025/05/09";
