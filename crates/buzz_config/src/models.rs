use serde::{Deserialize, Serialize};

// --- CSS markers used to locate the calendar table ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MarkerConfig {
    /// The availability table itself.
    pub table: String,
    /// Header row; the first match inside the table is used.
    pub header_row: String,
    /// Label nested in a header cell that names the studio.
    pub studio_label: String,
    /// Control rendered inside a cell that cannot be booked.
    pub closed: String,
    /// Control rendered inside a cell that can be booked.
    pub reserve_link: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            table: "table.reservation-table".to_string(),
            header_row: "tr".to_string(),
            studio_label: ".studio-name".to_string(),
            closed: ".closed, .is-closed, [data-status=\"closed\"]".to_string(),
            reserve_link: "a[href], button".to_string(),
        }
    }
}

// --- Venue Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct VenueConfig {
    pub name: String,
    pub base_url: String,
    /// IANA zone used to compute "now" for relative dates.
    pub timezone: String,
    /// Studios are numbered 1..=studio_count.
    pub studio_count: u32,
    pub studio_suffix: String,
    /// Length of one bookable slot in minutes.
    pub slot_minutes: u32,
    /// When set, the fetcher appends `?{param}=YYYY-MM-DD` to `base_url`.
    pub date_query_param: Option<String>,
    pub markers: MarkerConfig,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            name: "BUZZ Fukuoka Honten".to_string(),
            base_url: "https://buzz-st.com/fukuokahonten".to_string(),
            timezone: "Asia/Tokyo".to_string(),
            studio_count: 12,
            studio_suffix: "st".to_string(),
            slot_minutes: 30,
            date_query_param: None,
            markers: MarkerConfig::default(),
        }
    }
}

// --- Fetch Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub venue: VenueConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}
