//! Screen-time receipt data model and generator.
//!
//! A [`ReceiptDocument`] is created on demand, replaced wholesale on
//! "generate new", and never partially mutated. Subtotals and the grand
//! total are always derived from the app records, never stored, so
//! recomputation is idempotent by construction.

use chrono::{Days, NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::timefmt;

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// The time window a receipt summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
}

impl Period {
    /// Factor applied to per-app synthetic minute ranges.
    pub fn multiplier(self) -> u32 {
        match self {
            Period::Daily => 1,
            Period::Weekly => 7,
        }
    }
}

/// One application's usage within the receipt period.
///
/// `icon` holds either a bundled icon key (e.g. `"spotify"`) or an absolute
/// artwork URL substituted by the icon resolution pass. Immutable once the
/// receipt is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUsageRecord {
    pub name: String,
    pub category: String,
    pub minutes: u32,
    pub icon: String,
}

/// A named receipt section. Insertion order of `apps` is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCategory {
    pub name: String,
    pub apps: Vec<AppUsageRecord>,
}

impl UsageCategory {
    /// Sum of app minutes in this section, derived on demand.
    pub fn subtotal(&self) -> u32 {
        self.apps.iter().map(|app| app.minutes).sum()
    }
}

/// A complete screen-time receipt.
///
/// Invariants: for a daily receipt `start_date == end_date`; for a weekly
/// receipt `start_date == end_date - 7 days`. Dates serialize as `MM/DD/YY`
/// strings, matching the rendered receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDocument {
    pub period: Period,
    #[serde(with = "receipt_date")]
    pub start_date: NaiveDate,
    #[serde(with = "receipt_date")]
    pub end_date: NaiveDate,
    /// 12-hour clock reading taken when the receipt was generated.
    pub generated_at: String,
    pub categories: Vec<UsageCategory>,
}

impl ReceiptDocument {
    /// Sum of all app minutes across all sections, derived on demand.
    pub fn grand_total(&self) -> u32 {
        self.categories.iter().map(UsageCategory::subtotal).sum()
    }
}

/// Serde adapter keeping receipt dates in their rendered `MM/DD/YY` form.
mod receipt_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::timefmt::RECEIPT_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(RECEIPT_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, RECEIPT_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Synthetic roster
// ---------------------------------------------------------------------------

struct SyntheticApp {
    name: &'static str,
    category: &'static str,
    icon_key: &'static str,
    min_minutes: u32,
    max_minutes: u32,
}

const fn synth(
    name: &'static str,
    category: &'static str,
    icon_key: &'static str,
    min_minutes: u32,
    max_minutes: u32,
) -> SyntheticApp {
    SyntheticApp {
        name,
        category,
        icon_key,
        min_minutes,
        max_minutes,
    }
}

/// Fixed demo roster used when no parsed data is available. Ranges are
/// inclusive daily minutes, scaled by the period multiplier.
const SYNTHETIC_ROSTER: &[(&str, &[SyntheticApp])] = &[
    (
        "SOCIAL & COMMUNICATION",
        &[
            synth("INSTAGRAM", "SOCIAL MEDIA", "instagram", 30, 180),
            synth("TWITTER/X", "SOCIAL MEDIA", "twitter", 20, 120),
            synth("LINKEDIN", "SOCIAL MEDIA", "linkedin", 40, 200),
            synth("MESSAGES", "COMMUNICATION", "messages", 10, 60),
        ],
    ),
    (
        "WORK & PRODUCTIVITY",
        &[
            synth("CALENDAR", "PRODUCTIVITY", "calendar", 10, 40),
            synth("SLACK", "WORK", "slack", 60, 180),
            synth("NOTES", "PRODUCTIVITY", "notes", 5, 30),
            synth("MAIL", "WORK", "mail", 30, 90),
            synth("NOTION", "PRODUCTIVITY", "notion", 20, 80),
        ],
    ),
    (
        "ENTERTAINMENT",
        &[
            synth("YOUTUBE", "ENTERTAINMENT", "youtube", 60, 240),
            synth("NETFLIX", "STREAMING", "netflix", 30, 150),
            synth("SPOTIFY", "MUSIC", "spotify", 60, 300),
        ],
    ),
];

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Assemble a receipt for the given period at an explicit moment in time,
/// drawing synthetic durations from the supplied random source.
///
/// When `parsed` contains at least one non-empty category (the upload
/// path), those categories are used verbatim; the generator never alters
/// parser output. Otherwise the fixed synthetic roster is rolled.
pub fn generate_receipt_at<R: Rng>(
    period: Period,
    parsed: Option<Vec<UsageCategory>>,
    now: NaiveDateTime,
    rng: &mut R,
) -> ReceiptDocument {
    let end_date = now.date();
    let start_date = match period {
        Period::Daily => end_date,
        Period::Weekly => end_date - Days::new(7),
    };

    let categories = match parsed {
        Some(categories) if categories.iter().any(|c| !c.apps.is_empty()) => categories,
        _ => synthesize_categories(period, rng),
    };

    ReceiptDocument {
        period,
        start_date,
        end_date,
        generated_at: timefmt::format_clock_time(now),
        categories,
    }
}

/// Ambient-clock, ambient-RNG convenience wrapper around
/// [`generate_receipt_at`].
pub fn generate_receipt(period: Period, parsed: Option<Vec<UsageCategory>>) -> ReceiptDocument {
    generate_receipt_at(
        period,
        parsed,
        chrono::Local::now().naive_local(),
        &mut rand::rng(),
    )
}

fn synthesize_categories<R: Rng>(period: Period, rng: &mut R) -> Vec<UsageCategory> {
    let multiplier = period.multiplier();
    SYNTHETIC_ROSTER
        .iter()
        .map(|(name, roster)| UsageCategory {
            name: (*name).to_string(),
            apps: roster
                .iter()
                .map(|app| AppUsageRecord {
                    name: app.name.to_string(),
                    category: app.category.to_string(),
                    minutes: rng.random_range(app.min_minutes..=app.max_minutes) * multiplier,
                    icon: app.icon_key.to_string(),
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
