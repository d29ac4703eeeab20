//! Renders a [`QueryResult`] for the terminal or as JSON.

use buzz_calendar::{CalendarDate, QueryResult, ResultStatus};
use buzz_common::BuzzError;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    venue: &'a str,
    date: CalendarDate,
    #[serde(flatten)]
    result: &'a QueryResult,
}

fn symbol(status: ResultStatus) -> &'static str {
    match status {
        ResultStatus::Available => "○",
        ResultStatus::Reserved => "×",
        ResultStatus::NotFound => "-",
    }
}

/// One header line, a slot header, one line per answered studio and one per
/// missing studio.
pub fn render_text(venue: &str, date: CalendarDate, result: &QueryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", venue, date.format("%Y-%m-%d (%a)"));

    if let Some(first) = result.studios().first() {
        let studio_width = result
            .studios()
            .iter()
            .map(|r| r.studio.as_str().chars().count())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = first
            .slots
            .iter()
            .map(|(slot, _)| slot.as_str().chars().count().max(1))
            .collect();

        let mut header = " ".repeat(studio_width);
        for (slot, _) in &first.slots {
            let _ = write!(header, "  {}", slot);
        }
        let _ = writeln!(out, "{}", header.trim_end());

        for studio in result.studios() {
            let mut line = format!("{:<width$}", studio.studio.as_str(), width = studio_width);
            for ((_, status), width) in studio.slots.iter().zip(&widths) {
                let _ = write!(line, "  {:<width$}", symbol(*status), width = *width);
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
    } else if result.missing_studios().is_empty() {
        out.push_str("No studios requested\n");
    }

    for studio in result.missing_studios() {
        let _ = writeln!(out, "{}: not on the calendar page", studio);
    }
    out
}

pub fn render_json(venue: &str, date: CalendarDate, result: &QueryResult) -> Result<String, BuzzError> {
    let report = JsonReport {
        venue,
        date,
        result,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
