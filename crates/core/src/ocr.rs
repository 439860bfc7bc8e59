//! Heuristic parser for OCR output of Screen Time screenshots.
//!
//! Recognised text is noisy: times drift across lines, headings get
//! squashed ("MostUsed"), and light-gray durations often vanish entirely.
//! The parser therefore scans line by line inside the "Most Used" section,
//! pairing each duration with the nearest label line, and falls back to an
//! estimated duration when a known app name appears without a readable
//! time. It never fails on malformed input; the worst case is `None`.
//!
//! App detection is plain substring containment against the table in
//! [`crate::apps`]. That can mis-fire (the "x" token matches any line
//! containing the letter), a known trade-off kept for recall on noisy text.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::apps;
use crate::error::CoreError;
use crate::receipt::{AppUsageRecord, UsageCategory};

// ---------------------------------------------------------------------------
// Duration patterns
// ---------------------------------------------------------------------------

/// `6h 27m`, `6h27m`, `6 hr 27 min`, ...
static TIME_HOURS_MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:h|hr)(?:r|our)?\s*(\d+)\s*(?:m|min)").expect("valid regex")
});

/// `6h`, `1 hr`, `2 hour` -- the digit guard below keeps this from eating
/// the hour half of a compound time.
static TIME_HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:h|hr)(?:r|our)?").expect("valid regex"));

/// `27m`, `15 min`, `30 minutes`.
static TIME_MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:m|min)(?:ute)?s?").expect("valid regex"));

/// Loose time shapes used only for screenshot plausibility scoring.
static INDICATOR_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+h\s*\d+m|\d+\s*min|\d+:\d+").expect("valid regex"));

/// First match whose end is not immediately followed by another digit.
///
/// Stands in for the negative lookahead the source patterns rely on: it
/// stops `"6h"` being lifted out of `"6h27"` while still matching `"6h"`
/// at end-of-line or before whitespace.
fn capture_with_digit_guard(re: &Regex, line: &str) -> Option<u32> {
    for caps in re.captures_iter(line) {
        let end = caps.get(0).expect("group 0 always present").end();
        let followed_by_digit = line[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        if !followed_by_digit {
            return caps[1].parse().ok();
        }
    }
    None
}

/// Extract a duration in minutes from one (lowercased) line.
///
/// Patterns are tried in priority order: hours+minutes, hours alone,
/// minutes alone. Returns `None` when no duration shape is present.
pub fn parse_duration(line: &str) -> Option<u32> {
    if let Some(caps) = TIME_HOURS_MINUTES_RE.captures(line) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        return hours.checked_mul(60)?.checked_add(minutes);
    }
    if let Some(hours) = capture_with_digit_guard(&TIME_HOURS_RE, line) {
        return hours.checked_mul(60);
    }
    capture_with_digit_guard(&TIME_MINUTES_RE, line)
}

// ---------------------------------------------------------------------------
// Section scanning
// ---------------------------------------------------------------------------

/// Lines containing any of these end the per-app section entirely.
const STOP_WORDS: &[&str] = &["pickup", "show more", "daily average"];

/// Lines containing any of these are skipped but do not end the scan.
const SKIP_WORDS: &[&str] = &["show categories", "categories", "subtotal"];

/// Index of the "Most Used" heading, tolerating OCR-squashed spacing.
fn find_most_used_marker(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| {
        let lower = line.to_lowercase();
        let squashed: String = lower.chars().filter(|c| !c.is_whitespace()).collect();
        squashed.contains("mostused") || (squashed.contains("most") && lower.contains("used"))
    })
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse raw OCR text into receipt categories.
///
/// Scanning starts after the "Most Used" heading when one is found (all
/// lines otherwise -- degraded mode), stops at the first pickups / show
/// more / daily average line, and skips category buttons and subtotals.
/// Durations missing from both the current and the following line trigger
/// the estimated-duration fallback drawn from `rng`. Returns `None` when
/// no app was recognised, signalling the caller to fall back to synthetic
/// data.
pub fn parse_usage_text<R: Rng>(raw: &str, rng: &mut R) -> Option<Vec<UsageCategory>> {
    let all_lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let start = match find_most_used_marker(&all_lines) {
        Some(index) => index + 1,
        None => 0,
    };
    let lines = &all_lines[start.min(all_lines.len())..];

    let mut parsed: Vec<AppUsageRecord> = Vec::new();

    for i in 0..lines.len() {
        let line = lines[i].to_lowercase();
        let next = lines.get(i + 1).map(|l| l.to_lowercase()).unwrap_or_default();
        let prev = match i {
            0 => String::new(),
            _ => lines[i - 1].to_lowercase(),
        };

        if STOP_WORDS.iter().any(|word| line.contains(word)) {
            break;
        }
        if SKIP_WORDS.iter().any(|word| line.contains(word)) {
            continue;
        }

        // Duration on the current line wins; the following line is the
        // backup (app name above, time below is the common layout).
        let (duration, time_in_next) = match parse_duration(&line) {
            Some(minutes) => (Some(minutes), false),
            None => (parse_duration(&next), true),
        };

        match duration {
            Some(minutes) if minutes > 0 => {
                // The label is on whichever line did not carry the time.
                let label_line = if time_in_next { &line } else { &prev };
                for known in apps::KNOWN_APPS {
                    if label_line.contains(known.token) && !already_captured(&parsed, known) {
                        parsed.push(make_record(known, minutes));
                        break;
                    }
                }
            }
            Some(_) => {
                // A zero-minute reading is OCR noise; ignore the line.
            }
            None => {
                // No time anywhere nearby. If the line still names a known
                // app, OCR probably lost the gray duration text; estimate.
                for known in apps::KNOWN_APPS {
                    if line.contains(known.token) && !already_captured(&parsed, known) {
                        let minutes = rng.random_range(apps::estimated_duration_range(known.token));
                        parsed.push(make_record(known, minutes));
                        break;
                    }
                }
            }
        }
    }

    if parsed.is_empty() {
        return None;
    }
    Some(apps::group_into_categories(parsed))
}

fn already_captured(parsed: &[AppUsageRecord], known: &apps::KnownApp) -> bool {
    parsed.iter().any(|record| record.name == known.display_name)
}

fn make_record(known: &apps::KnownApp, minutes: u32) -> AppUsageRecord {
    AppUsageRecord {
        name: known.display_name.to_string(),
        category: apps::category_for_app(known.token).to_string(),
        minutes,
        icon: known.icon_key.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Screenshot plausibility
// ---------------------------------------------------------------------------

/// Indicators required before text is treated as a Screen Time screenshot.
pub const MIN_SCREEN_TIME_INDICATORS: usize = 2;

/// Count the Screen Time markers present in recognised text.
///
/// Eight independent signals are checked; requiring only a couple of them
/// tolerates OCR dropouts while still rejecting arbitrary screenshots.
pub fn screen_time_indicator_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    let indicators = [
        lower.contains("screen time") || lower.contains("screentime"),
        lower.contains("most used") || lower.contains("mostused"),
        lower.contains("limit"),
        lower.contains("categor"),
        lower.contains("this week") || lower.contains("today"),
        INDICATOR_TIME_RE.is_match(&lower),
        lower.contains("pickup"),
        lower.contains("average"),
    ];
    indicators.iter().filter(|present| **present).count()
}

/// Whether recognised text plausibly came from a Screen Time screenshot.
pub fn looks_like_screen_time(text: &str) -> bool {
    screen_time_indicator_count(text) >= MIN_SCREEN_TIME_INDICATORS
}

// ---------------------------------------------------------------------------
// Screenshot dimensions
// ---------------------------------------------------------------------------

/// Minimum acceptable screenshot width in pixels.
pub const MIN_SCREENSHOT_WIDTH: u32 = 300;
/// Minimum acceptable screenshot height in pixels.
pub const MIN_SCREENSHOT_HEIGHT: u32 = 400;
/// Phone screenshots run portrait with height/width inside this window.
pub const MIN_SCREENSHOT_ASPECT: f64 = 1.5;
pub const MAX_SCREENSHOT_ASPECT: f64 = 2.5;

/// Validate that uploaded image dimensions look like a phone screenshot.
///
/// Checks run in order -- portrait, minimum size, aspect ratio -- so the
/// user sees the most specific complaint first.
pub fn validate_screenshot_dimensions(width: u32, height: u32) -> Result<(), CoreError> {
    if height <= width {
        return Err(CoreError::Validation(
            "Please upload a portrait screenshot from your phone's Screen Time settings."
                .to_string(),
        ));
    }
    if width < MIN_SCREENSHOT_WIDTH || height < MIN_SCREENSHOT_HEIGHT {
        return Err(CoreError::Validation(
            "Image is too small. Please upload a full-resolution screenshot.".to_string(),
        ));
    }
    let aspect = f64::from(height) / f64::from(width);
    if !(MIN_SCREENSHOT_ASPECT..=MAX_SCREENSHOT_ASPECT).contains(&aspect) {
        return Err(CoreError::Validation(
            "This doesn't look like a phone screenshot. Please upload your Screen Time screenshot from Settings."
                .to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn flat_apps(categories: &[UsageCategory]) -> Vec<(&str, u32)> {
        categories
            .iter()
            .flat_map(|c| c.apps.iter())
            .map(|a| (a.name.as_str(), a.minutes))
            .collect()
    }

    // -- parse_duration --

    #[test]
    fn duration_hours_and_minutes() {
        assert_eq!(parse_duration("2h 15m"), Some(135));
        assert_eq!(parse_duration("6h27m"), Some(387));
        assert_eq!(parse_duration("1 hr 5 min"), Some(65));
    }

    #[test]
    fn duration_hours_alone() {
        assert_eq!(parse_duration("3h"), Some(180));
        assert_eq!(parse_duration("2 hour"), Some(120));
    }

    #[test]
    fn duration_minutes_alone() {
        assert_eq!(parse_duration("45m"), Some(45));
        assert_eq!(parse_duration("15 min"), Some(15));
        assert_eq!(parse_duration("30 minutes"), Some(30));
    }

    #[test]
    fn duration_digit_guard_rejects_truncated_compounds() {
        // "6h27" has no minute suffix; lifting "6h" out of it would double
        // count when the next line carries the real time.
        assert_eq!(parse_duration("6h27"), None);
    }

    #[test]
    fn duration_absent() {
        assert_eq!(parse_duration("instagram"), None);
        assert_eq!(parse_duration(""), None);
    }

    // -- parse_usage_text --

    #[test]
    fn app_above_time_below_is_parsed() {
        let text = "Screen Time\nMost Used\nINSTAGRAM\n2h 15m";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("INSTAGRAM", 135)]);
        assert_eq!(categories[0].name, "SOCIAL & COMMUNICATION");
    }

    #[test]
    fn time_on_same_line_pairs_with_previous_label() {
        let text = "Most Used\nSLACK\nslack 3h 5m";
        // Line 2 carries the duration, so the label is searched on line 1.
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("SLACK", 185)]);
    }

    #[test]
    fn no_recognizable_apps_returns_none() {
        let mut r = rng();
        assert_matches!(parse_usage_text("Most Used\nSomething 2h 15m", &mut r), None);
        assert_matches!(parse_usage_text("", &mut r), None);
    }

    #[test]
    fn pickups_before_any_app_stops_the_scan() {
        let text = "Most Used\nPickups\nINSTAGRAM\n2h 15m";
        assert_matches!(parse_usage_text(text, &mut rng()), None);
    }

    #[test]
    fn stop_words_end_the_section() {
        let text = "Most Used\nINSTAGRAM\n2h 15m\nDaily Average\nSLACK\n3h";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("INSTAGRAM", 135)]);
    }

    #[test]
    fn subtotal_lines_are_skipped_not_fatal() {
        let text = "Most Used\nSubtotal 9h 10m\nNETFLIX\n1h 30m";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("NETFLIX", 90)]);
    }

    #[test]
    fn squashed_most_used_heading_is_found() {
        let text = "MostUsed\nYOUTUBE\n2h";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("YOUTUBE", 120)]);
    }

    #[test]
    fn missing_heading_scans_from_the_top() {
        let text = "SPOTIFY\n1h 10m";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("SPOTIFY", 70)]);
    }

    #[test]
    fn lines_before_the_heading_are_discarded() {
        let text = "NETFLIX\n5h\nMost Used\nSPOTIFY\n1h";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("SPOTIFY", 60)]);
    }

    #[test]
    fn duplicate_apps_are_captured_once() {
        let text = "Most Used\nINSTAGRAM\n2h 15m\nINSTAGRAM\n1h";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("INSTAGRAM", 135)]);
    }

    #[test]
    fn estimated_duration_when_time_is_unreadable() {
        let text = "Most Used\nSLACK";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        let apps = flat_apps(&categories);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].0, "SLACK");
        // Communication/productivity estimate range.
        assert!((60..180).contains(&apps[0].1), "got {}", apps[0].1);
    }

    #[test]
    fn estimation_is_deterministic_with_a_seeded_source() {
        let text = "Most Used\nYOUTUBE";
        let first = parse_usage_text(text, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = parse_usage_text(text, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_minute_readings_are_ignored() {
        let text = "Most Used\nINSTAGRAM\n0m";
        assert_matches!(parse_usage_text(text, &mut rng()), None);
    }

    #[test]
    fn single_letter_token_matches_inside_words() {
        // Documented quirk of substring matching: the "x" token fires on
        // any label containing the letter.
        let text = "Most Used\nxbox\n2h";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        assert_eq!(flat_apps(&categories), vec![("X", 120)]);
    }

    #[test]
    fn sections_come_out_in_display_priority_order() {
        let text = "Most Used\nSAFARI\n1h\nINSTAGRAM\n2h\nSLACK\n3h";
        let categories = parse_usage_text(text, &mut rng()).unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["SOCIAL & COMMUNICATION", "WORK & PRODUCTIVITY", "WEB BROWSING"]
        );
    }

    // -- indicators --

    #[test]
    fn indicator_count_on_realistic_text() {
        let text = "Screen Time\nToday\nMost Used\nINSTAGRAM\n2h 15m\nPickups";
        assert!(screen_time_indicator_count(text) >= 4);
        assert!(looks_like_screen_time(text));
    }

    #[test]
    fn single_indicator_is_not_enough() {
        assert_eq!(screen_time_indicator_count("my holiday pickup truck"), 1);
        assert!(!looks_like_screen_time("my holiday pickup truck"));
    }

    #[test]
    fn unrelated_text_scores_zero() {
        assert_eq!(screen_time_indicator_count("grocery list: eggs, milk"), 0);
    }

    // -- dimensions --

    #[test]
    fn landscape_screenshots_are_rejected() {
        assert_matches!(
            validate_screenshot_dimensions(800, 600),
            Err(CoreError::Validation(msg)) if msg.contains("portrait")
        );
    }

    #[test]
    fn square_images_count_as_landscape() {
        assert!(validate_screenshot_dimensions(500, 500).is_err());
    }

    #[test]
    fn tiny_images_are_rejected() {
        assert_matches!(
            validate_screenshot_dimensions(200, 390),
            Err(CoreError::Validation(msg)) if msg.contains("too small")
        );
    }

    #[test]
    fn extreme_aspect_ratios_are_rejected() {
        // 3:1 portrait is not a phone screen.
        assert_matches!(
            validate_screenshot_dimensions(400, 1200),
            Err(CoreError::Validation(msg)) if msg.contains("phone screenshot")
        );
    }

    #[test]
    fn aspect_bounds_are_inclusive() {
        assert!(validate_screenshot_dimensions(400, 600).is_ok()); // 1.5
        assert!(validate_screenshot_dimensions(400, 1000).is_ok()); // 2.5
        assert!(validate_screenshot_dimensions(390, 844).is_ok()); // iPhone-ish
    }
}
