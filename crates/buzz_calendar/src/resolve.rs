//! Turns the loose date / studio / time text a user types into canonical
//! lookup parameters. All functions are pure: "now" is passed in.

use buzz_config::VenueConfig;
use chrono::{Datelike, Days, Duration, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::CalendarError;
use crate::models::{CalendarDate, Query, StudioId, TimeSlot};

const TODAY_ALIASES: &[&str] = &["today", "今日", "きょう", "本日"];
const TOMORROW_ALIASES: &[&str] = &["tomorrow", "明日", "あした", "あす"];
const ALL_STUDIOS_ALIASES: &[&str] = &["all", "全部", "全て", "すべて"];

/// Longest studio range expanded; longer ranges resolve to no studios.
pub const MAX_STUDIO_RANGE: u64 = 1000;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));
static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").expect("valid regex"));
static NUMBER_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("valid regex"));
static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})\s*-\s*([0-9]{1,2}):([0-9]{2})$").expect("valid regex")
});

/// Resolves query text against one venue's roster and slot length.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    studio_count: u32,
    studio_suffix: String,
    slot_step: Duration,
}

impl QueryResolver {
    pub fn new(venue: &VenueConfig) -> Self {
        Self {
            studio_count: venue.studio_count,
            studio_suffix: venue.studio_suffix.clone(),
            slot_step: Duration::minutes(i64::from(venue.slot_minutes.max(1))),
        }
    }

    /// Resolves all three axes at once.
    pub fn resolve(
        &self,
        date: &str,
        studios: &str,
        slots: &str,
        now: NaiveDateTime,
    ) -> Result<Query, CalendarError> {
        Ok(Query {
            date: self.resolve_date(date, now)?,
            studios: self.resolve_studios(studios),
            slots: self.resolve_time_slots(slots),
        })
    }

    /// The full roster, `1st..=Nst`.
    pub fn roster(&self) -> Vec<StudioId> {
        (1..=self.studio_count)
            .map(|n| StudioId::numbered(n, &self.studio_suffix))
            .collect()
    }

    /// Resolves a date expression relative to `now`.
    ///
    /// Tried in order: today/tomorrow aliases, weekday names (always the
    /// next occurrence strictly after today), `YYYY-MM-DD`, `YYYY/MM/DD`.
    pub fn resolve_date(
        &self,
        input: &str,
        now: NaiveDateTime,
    ) -> Result<CalendarDate, CalendarError> {
        let token = input.trim();
        let lowered = token.to_lowercase();
        let today = now.date();
        let invalid = || CalendarError::InvalidDateFormat(input.to_string());

        if TODAY_ALIASES.contains(&lowered.as_str()) {
            return Ok(today);
        }
        if TOMORROW_ALIASES.contains(&lowered.as_str()) {
            return today.checked_add_days(Days::new(1)).ok_or_else(invalid);
        }
        if let Some(weekday) = parse_weekday(&lowered) {
            return next_weekday_after(today, weekday).ok_or_else(invalid);
        }
        if ISO_DATE.is_match(token) {
            return CalendarDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| invalid());
        }
        if SLASH_DATE.is_match(token) {
            return CalendarDate::parse_from_str(token, "%Y/%m/%d").map_err(|_| invalid());
        }
        Err(invalid())
    }

    /// Resolves a studio expression: `all`, `1,3st,5`, `2-4` or a single studio.
    ///
    /// Ids are not checked against any page. A descending range (`5-3`) or
    /// one longer than [`MAX_STUDIO_RANGE`] yields no studios.
    pub fn resolve_studios(&self, input: &str) -> Vec<StudioId> {
        let token = input.trim();

        if ALL_STUDIOS_ALIASES.contains(&token.to_lowercase().as_str()) {
            return self.roster();
        }
        if token.contains(',') {
            return token
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| StudioId::new(part, &self.studio_suffix))
                .collect();
        }
        if let Some((start, end)) = number_range(token) {
            if start > end {
                debug!("Descending studio range {:?} resolves to no studios", token);
            } else if u64::from(end - start) + 1 > MAX_STUDIO_RANGE {
                warn!(
                    "Studio range {:?} spans more than {} studios; resolving to none",
                    token, MAX_STUDIO_RANGE
                );
                return Vec::new();
            }
            return (start..=end)
                .map(|n| StudioId::numbered(n, &self.studio_suffix))
                .collect();
        }
        vec![StudioId::new(token, &self.studio_suffix)]
    }

    /// Resolves a time expression: `10:00,11:30`, `10:00-12:00` or one slot.
    ///
    /// Lists and single slots are taken verbatim. Ranges expand in slot-length
    /// steps, both ends inclusive; a descending range yields no slots.
    pub fn resolve_time_slots(&self, input: &str) -> Vec<TimeSlot> {
        let token = input.trim();

        if token.contains(',') {
            return token
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(TimeSlot::new)
                .collect();
        }
        if let Some((start, end)) = time_range(token) {
            if start > end {
                debug!("Descending time range {:?} resolves to no slots", token);
            }
            return expand_time_range(start, end, self.slot_step);
        }
        vec![TimeSlot::new(token)]
    }
}

/// English and Japanese weekday names, long and short.
fn parse_weekday(token: &str) -> Option<Weekday> {
    let weekday = match token {
        "monday" | "mon" | "月曜日" | "月曜" | "月" => Weekday::Mon,
        "tuesday" | "tue" | "tues" | "火曜日" | "火曜" | "火" => Weekday::Tue,
        "wednesday" | "wed" | "水曜日" | "水曜" | "水" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" | "木曜日" | "木曜" | "木" => Weekday::Thu,
        "friday" | "fri" | "金曜日" | "金曜" | "金" => Weekday::Fri,
        "saturday" | "sat" | "土曜日" | "土曜" | "土" => Weekday::Sat,
        "sunday" | "sun" | "日曜日" | "日曜" | "日" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// First `weekday` strictly after `today`; a week ahead when today matches.
fn next_weekday_after(today: CalendarDate, weekday: Weekday) -> Option<CalendarDate> {
    let current = today.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let ahead = match (target + 7 - current) % 7 {
        0 => 7,
        days => days,
    };
    today.checked_add_days(Days::new(u64::from(ahead)))
}

fn number_range(token: &str) -> Option<(u32, u32)> {
    let caps = NUMBER_RANGE.captures(token)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

fn time_range(token: &str) -> Option<(NaiveTime, NaiveTime)> {
    let caps = TIME_RANGE.captures(token)?;
    let clock = |h: &str, m: &str| NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, 0);
    Some((clock(&caps[1], &caps[2])?, clock(&caps[3], &caps[4])?))
}

fn expand_time_range(start: NaiveTime, end: NaiveTime, step: Duration) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let mut current = start;
    while current <= end {
        slots.push(TimeSlot::from_time(current));
        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }
    slots
}
