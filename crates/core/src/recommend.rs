//! Usage recommendation engine.
//!
//! Maps a receipt's grand total to a tiered verdict printed at the bottom of
//! the receipt. Brackets are half-open in hours with the boundary belonging
//! to the upper bracket, so exactly 2.0 hours already earns "NICE WORK!".

use serde::Serialize;

/// A recommendation verdict: the large headline plus the smaller message
/// printed beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub headline: &'static str,
    pub message: &'static str,
}

/// Derive the recommendation for a total usage duration.
///
/// Bracket table (hours, half-open):
///
/// | Range    | Headline           |
/// |----------|--------------------|
/// | [0, 2)   | IMPRESSIVE!        |
/// | [2, 4)   | NICE WORK!         |
/// | [4, 6)   | NOT BAD!           |
/// | [6, 10)  | TIME FOR A BREAK!  |
/// | [10, 15) | TIME FOR A BREAK!  |
/// | [15, 20) | EMERGENCY!         |
/// | [20, ∞)  | ARE YOU OKAY?      |
///
/// Pure and deterministic; no side effects.
pub fn recommend(total_minutes: u32) -> Recommendation {
    let hours = f64::from(total_minutes) / 60.0;

    if hours < 2.0 {
        Recommendation {
            headline: "IMPRESSIVE!",
            message: "You're crushing it! \u{1F4AA}",
        }
    } else if hours < 4.0 {
        Recommendation {
            headline: "NICE WORK!",
            message: "You're doing great! \u{1F31F}",
        }
    } else if hours < 6.0 {
        Recommendation {
            headline: "NOT BAD!",
            message: "Pretty good! \u{1F44D}\nMaybe add a walk to your day?",
        }
    } else if hours < 10.0 {
        Recommendation {
            headline: "TIME FOR A BREAK!",
            message: "Go touch some grass \u{1F331}",
        }
    } else if hours < 15.0 {
        Recommendation {
            headline: "TIME FOR A BREAK!",
            message: "Your eyes need a rest! \u{1F440}",
        }
    } else if hours < 20.0 {
        Recommendation {
            headline: "EMERGENCY!",
            message: "Touch grass IMMEDIATELY \u{1F331}",
        }
    } else {
        Recommendation {
            headline: "ARE YOU OKAY?",
            message: "There's a world outside! \u{1F30D}",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
