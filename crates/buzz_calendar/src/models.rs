use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// A calendar day in the venue's local time.
pub type CalendarDate = NaiveDate;

/// Canonical studio identifier, e.g. `"3st"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudioId(String);

impl StudioId {
    /// Builds an id from user or page text, appending `suffix` when missing.
    pub fn new(raw: &str, suffix: &str) -> Self {
        let token = raw.trim();
        if token.ends_with(suffix) {
            Self(token.to_string())
        } else {
            Self(format!("{}{}", token, suffix))
        }
    }

    /// The id of studio number `n`.
    pub fn numbered(n: u32, suffix: &str) -> Self {
        Self(format!("{}{}", n, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StudioId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A time-of-day row label, normally `"HH:MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    /// Keeps the (trimmed) text as-is, without checking its format.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// Zero-pads `H:MM` labels to `HH:MM`; any other text is kept trimmed.
    pub fn normalized(raw: &str) -> Self {
        let token = raw.trim();
        match parse_clock(token) {
            Some(time) => Self::from_time(time),
            None => Self(token.to_string()),
        }
    }

    pub fn from_time(time: NaiveTime) -> Self {
        Self(format!("{:02}:{:02}", time.hour(), time.minute()))
    }

    /// The label as a clock time, if it is one.
    pub fn as_time(&self) -> Option<NaiveTime> {
        parse_clock(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TimeSlot {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Parses `H:MM` / `HH:MM` (1–2 digit hour, exactly two minute digits).
pub(crate) fn parse_clock(token: &str) -> Option<NaiveTime> {
    let (hour, minute) = token.split_once(':')?;
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !digits(hour) || !digits(minute) {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Status of one cell of the availability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Reserved,
}

/// Status of one requested (studio, slot) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Available,
    Reserved,
    /// The slot is not part of the studio's schedule on the page.
    NotFound,
}

impl From<SlotStatus> for ResultStatus {
    fn from(status: SlotStatus) -> Self {
        match status {
            SlotStatus::Available => ResultStatus::Available,
            SlotStatus::Reserved => ResultStatus::Reserved,
        }
    }
}

/// Studio × time-slot snapshot of one calendar page.
///
/// Every studio carries the same slots, in the row order of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityGrid {
    studios: Vec<StudioId>,
    slots: Vec<TimeSlot>,
    cells: HashMap<StudioId, HashMap<TimeSlot, SlotStatus>>,
}

impl AvailabilityGrid {
    /// Creates a grid with the given studio columns and no rows.
    /// Repeated studios keep their first position.
    pub fn new<I>(studios: I) -> Self
    where
        I: IntoIterator<Item = StudioId>,
    {
        let mut grid = Self::default();
        for studio in studios {
            if !grid.cells.contains_key(&studio) {
                grid.cells.insert(studio.clone(), HashMap::new());
                grid.studios.push(studio);
            }
        }
        grid
    }

    /// Adds (or replaces) the row for `slot`.
    ///
    /// Studios not mentioned in `cells` get [`SlotStatus::Available`];
    /// entries for studios that are not columns of the grid are ignored.
    pub fn insert_row<I>(&mut self, slot: TimeSlot, cells: I)
    where
        I: IntoIterator<Item = (StudioId, SlotStatus)>,
    {
        if self.studios.is_empty() {
            return;
        }
        if !self.slots.contains(&slot) {
            self.slots.push(slot.clone());
        }
        for column in self.cells.values_mut() {
            column.insert(slot.clone(), SlotStatus::Available);
        }
        for (studio, status) in cells {
            if let Some(column) = self.cells.get_mut(&studio) {
                column.insert(slot.clone(), status);
            }
        }
    }

    /// Studio columns in page order.
    pub fn studios(&self) -> &[StudioId] {
        &self.studios
    }

    /// Slots in page order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn contains_studio(&self, studio: &str) -> bool {
        self.cells.contains_key(studio)
    }

    /// All slots of one studio, `None` if the studio is not a column.
    pub fn studio(&self, studio: &str) -> Option<&HashMap<TimeSlot, SlotStatus>> {
        self.cells.get(studio)
    }

    pub fn status(&self, studio: &str, slot: &str) -> Option<SlotStatus> {
        self.cells.get(studio)?.get(slot).copied()
    }

    /// True when no studio column was found.
    pub fn is_empty(&self) -> bool {
        self.studios.is_empty()
    }
}

struct OrderedSlots<'a> {
    slots: &'a [TimeSlot],
    column: &'a HashMap<TimeSlot, SlotStatus>,
}

impl Serialize for OrderedSlots<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for slot in self.slots {
            if let Some(status) = self.column.get(slot) {
                map.serialize_entry(slot, status)?;
            }
        }
        map.end()
    }
}

// Serialised as an ordered `{studio: {slot: status}}` map.
impl Serialize for AvailabilityGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.studios.len()))?;
        for studio in &self.studios {
            if let Some(column) = self.cells.get(studio) {
                map.serialize_entry(
                    studio,
                    &OrderedSlots {
                        slots: &self.slots,
                        column,
                    },
                )?;
            }
        }
        map.end()
    }
}

/// Canonical lookup parameters resolved from user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub date: CalendarDate,
    pub studios: Vec<StudioId>,
    pub slots: Vec<TimeSlot>,
}

/// Answers for one studio, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioResult {
    pub studio: StudioId,
    pub slots: Vec<(TimeSlot, ResultStatus)>,
}

impl StudioResult {
    pub fn status(&self, slot: &str) -> Option<ResultStatus> {
        self.slots
            .iter()
            .find(|(candidate, _)| candidate.as_str() == slot)
            .map(|(_, status)| *status)
    }
}

impl Index<&str> for StudioResult {
    type Output = ResultStatus;

    fn index(&self, slot: &str) -> &ResultStatus {
        self.slots
            .iter()
            .find(|(candidate, _)| candidate.as_str() == slot)
            .map(|(_, status)| status)
            .unwrap_or_else(|| panic!("slot {slot} not in result for {}", self.studio))
    }
}

impl Serialize for StudioResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (slot, status) in &self.slots {
            map.serialize_entry(slot, status)?;
        }
        map.end()
    }
}

/// Result of looking up a [`Query`] against an [`AvailabilityGrid`].
///
/// Studios missing from the grid have no entry; they are listed in
/// [`QueryResult::missing_studios`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub(crate) studios: Vec<StudioResult>,
    pub(crate) missing_studios: Vec<StudioId>,
}

impl QueryResult {
    pub fn get(&self, studio: &str) -> Option<&StudioResult> {
        self.studios.iter().find(|r| r.studio.as_str() == studio)
    }

    pub fn contains_studio(&self, studio: &str) -> bool {
        self.get(studio).is_some()
    }

    /// Answered studios in request order.
    pub fn studios(&self) -> &[StudioResult] {
        &self.studios
    }

    pub fn missing_studios(&self) -> &[StudioId] {
        &self.missing_studios
    }

    pub fn len(&self) -> usize {
        self.studios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.studios.is_empty()
    }
}

impl Index<&str> for QueryResult {
    type Output = StudioResult;

    fn index(&self, studio: &str) -> &StudioResult {
        self.get(studio)
            .unwrap_or_else(|| panic!("studio {studio} not in result"))
    }
}

impl Serialize for QueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Studios<'a>(&'a [StudioResult]);

        impl Serialize for Studios<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for result in self.0 {
                    map.serialize_entry(&result.studio, result)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("studios", &Studios(&self.studios))?;
        map.serialize_entry("missing_studios", &self.missing_studios)?;
        map.end()
    }
}
