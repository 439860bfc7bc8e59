//! Known-application tables for screen-time parsing.
//!
//! The OCR parser recognises apps by case-insensitive substring containment
//! against this fixed table, in table order with first match winning. That
//! matching rule is deliberately loose (the single-letter "x" token matches
//! any line containing the letter) because recognised text is noisy; the
//! duplicate check and the "Most Used" section scoping keep the false
//! positive rate tolerable in practice.

use std::ops::Range;

use crate::receipt::{AppUsageRecord, UsageCategory};

// ---------------------------------------------------------------------------
// Bundled icon keys
// ---------------------------------------------------------------------------

/// Icon key used for apps without their own bundled artwork. Records that
/// carry this key (and are not one of [`CONFIDENTLY_LOCAL_NAMES`]) are
/// candidates for an external icon lookup.
pub const FALLBACK_ICON_KEY: &str = "instagram";

/// Display names whose fallback icon is fine as-is; no external lookup is
/// attempted for these even though they map to [`FALLBACK_ICON_KEY`].
pub const CONFIDENTLY_LOCAL_NAMES: &[&str] = &["INSTAGRAM", "FACEBOOK", "TIKTOK"];

/// Whether a parsed record should have its icon upgraded via the external
/// icon lookup service.
pub fn needs_icon_lookup(record: &AppUsageRecord) -> bool {
    record.icon == FALLBACK_ICON_KEY && !CONFIDENTLY_LOCAL_NAMES.contains(&record.name.as_str())
}

// ---------------------------------------------------------------------------
// Known apps
// ---------------------------------------------------------------------------

/// One recognisable application: the lowercase token searched for in OCR
/// text, the bundled icon key, and the uppercase display name printed on the
/// receipt.
#[derive(Debug, Clone, Copy)]
pub struct KnownApp {
    pub token: &'static str,
    pub icon_key: &'static str,
    pub display_name: &'static str,
}

const fn app(token: &'static str, icon_key: &'static str, display_name: &'static str) -> KnownApp {
    KnownApp {
        token,
        icon_key,
        display_name,
    }
}

/// The recognition table, in match-priority order. Several tokens share an
/// icon key (e.g. `imessage` and `messenger` reuse the Messages icon) and
/// apps without bundled artwork fall back to [`FALLBACK_ICON_KEY`].
pub const KNOWN_APPS: &[KnownApp] = &[
    app("instagram", "instagram", "INSTAGRAM"),
    app("twitter", "twitter", "TWITTER/X"),
    app("x", "twitter", "X"),
    app("linkedin", "linkedin", "LINKEDIN"),
    app("messages", "messages", "MESSAGES"),
    app("imessage", "messages", "MESSAGES"),
    app("calendar", "calendar", "CALENDAR"),
    app("slack", "slack", "SLACK"),
    app("notes", "notes", "NOTES"),
    app("mail", "mail", "MAIL"),
    app("notion", "notion", "NOTION"),
    app("youtube", "youtube", "YOUTUBE"),
    app("netflix", "netflix", "NETFLIX"),
    app("spotify", "spotify", "SPOTIFY"),
    app("safari", "instagram", "SAFARI"),
    app("chrome", "instagram", "CHROME"),
    app("facebook", "instagram", "FACEBOOK"),
    app("messenger", "messages", "MESSENGER"),
    app("whatsapp", "messages", "WHATSAPP"),
    app("tiktok", "instagram", "TIKTOK"),
    app("reddit", "twitter", "REDDIT"),
    app("discord", "slack", "DISCORD"),
    app("gmail", "mail", "GMAIL"),
    app("outlook", "mail", "OUTLOOK"),
    app("beli", "instagram", "BELI"),
    app("retro", "instagram", "RETRO"),
    app("hinge", "instagram", "HINGE"),
    app("bumble", "instagram", "BUMBLE"),
    app("tinder", "instagram", "TINDER"),
];

// ---------------------------------------------------------------------------
// Per-app usage category labels
// ---------------------------------------------------------------------------

const SOCIAL_TOKENS: &[&str] = &[
    "instagram", "twitter", "x", "tiktok", "facebook", "reddit", "linkedin", "hinge", "bumble",
    "tinder", "beli",
];
const COMM_TOKENS: &[&str] = &["messages", "imessage", "messenger", "whatsapp", "discord"];
const WORK_TOKENS: &[&str] = &["slack", "notion", "calendar", "mail", "gmail", "outlook", "notes"];
const ENTERTAINMENT_TOKENS: &[&str] = &["youtube", "netflix", "spotify"];
const BROWSER_TOKENS: &[&str] = &["safari", "chrome"];

/// The small category label printed under an app's name on the receipt.
pub fn category_for_app(token: &str) -> &'static str {
    if SOCIAL_TOKENS.contains(&token) {
        "SOCIAL MEDIA"
    } else if COMM_TOKENS.contains(&token) {
        "COMMUNICATION"
    } else if WORK_TOKENS.contains(&token) {
        "PRODUCTIVITY"
    } else if ENTERTAINMENT_TOKENS.contains(&token) {
        "ENTERTAINMENT"
    } else if BROWSER_TOKENS.contains(&token) {
        "WEB BROWSING"
    } else {
        "APP"
    }
}

// ---------------------------------------------------------------------------
// Estimated durations (OCR read the label but not the time)
// ---------------------------------------------------------------------------

const HEAVY_USE_TOKENS: &[&str] = &[
    "instagram", "x", "twitter", "tiktok", "youtube", "netflix", "spotify",
];
const MEDIUM_USE_TOKENS: &[&str] = &["messages", "linkedin", "slack", "mail", "notion"];

/// Minute range (half-open) to draw an estimated duration from when OCR
/// recognised an app name but no readable time. Social and entertainment
/// apps bias toward 2-5 hours, communication and productivity apps toward
/// 1-3 hours, everything else 30-90 minutes.
pub fn estimated_duration_range(token: &str) -> Range<u32> {
    if HEAVY_USE_TOKENS.contains(&token) {
        120..300
    } else if MEDIUM_USE_TOKENS.contains(&token) {
        60..180
    } else {
        30..90
    }
}

// ---------------------------------------------------------------------------
// Display category grouping
// ---------------------------------------------------------------------------

/// Receipt section headings, in display priority order.
pub const CATEGORY_SOCIAL_COMMUNICATION: &str = "SOCIAL & COMMUNICATION";
pub const CATEGORY_WORK_PRODUCTIVITY: &str = "WORK & PRODUCTIVITY";
pub const CATEGORY_ENTERTAINMENT: &str = "ENTERTAINMENT";
pub const CATEGORY_WEB_BROWSING: &str = "WEB BROWSING";
pub const CATEGORY_OTHER: &str = "OTHER";

const GROUP_SOCIAL: &[&str] = &[
    "INSTAGRAM",
    "X",
    "TWITTER/X",
    "LINKEDIN",
    "FACEBOOK",
    "TIKTOK",
    "REDDIT",
    "HINGE",
    "BELI",
];
const GROUP_COMMUNICATION: &[&str] = &["MESSAGES", "MESSENGER", "WHATSAPP", "DISCORD"];
const GROUP_WORK: &[&str] = &[
    "SLACK", "NOTION", "CALENDAR", "MAIL", "GMAIL", "OUTLOOK", "NOTES",
];
const GROUP_ENTERTAINMENT: &[&str] = &["YOUTUBE", "NETFLIX", "SPOTIFY"];
const GROUP_BROWSER: &[&str] = &["SAFARI", "CHROME"];

/// Partition parsed records into the receipt's display sections.
///
/// Social and communication apps merge into one leading section (social
/// first, then communication, each preserving parse order); only non-empty
/// sections are emitted, in the fixed priority order above. Anything not in
/// a named group lands in OTHER.
pub fn group_into_categories(records: Vec<AppUsageRecord>) -> Vec<UsageCategory> {
    let mut social = Vec::new();
    let mut communication = Vec::new();
    let mut work = Vec::new();
    let mut entertainment = Vec::new();
    let mut browser = Vec::new();
    let mut other = Vec::new();

    for record in records {
        let name = record.name.as_str();
        if GROUP_SOCIAL.contains(&name) {
            social.push(record);
        } else if GROUP_COMMUNICATION.contains(&name) {
            communication.push(record);
        } else if GROUP_WORK.contains(&name) {
            work.push(record);
        } else if GROUP_ENTERTAINMENT.contains(&name) {
            entertainment.push(record);
        } else if GROUP_BROWSER.contains(&name) {
            browser.push(record);
        } else {
            other.push(record);
        }
    }

    let mut categories = Vec::new();

    if !social.is_empty() || !communication.is_empty() {
        let mut apps = social;
        apps.append(&mut communication);
        categories.push(UsageCategory {
            name: CATEGORY_SOCIAL_COMMUNICATION.to_string(),
            apps,
        });
    }
    for (name, apps) in [
        (CATEGORY_WORK_PRODUCTIVITY, work),
        (CATEGORY_ENTERTAINMENT, entertainment),
        (CATEGORY_WEB_BROWSING, browser),
        (CATEGORY_OTHER, other),
    ] {
        if !apps.is_empty() {
            categories.push(UsageCategory {
                name: name.to_string(),
                apps,
            });
        }
    }

    categories
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
