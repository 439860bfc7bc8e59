//! Handlers for screen-time receipt generation and screenshot parsing.
//!
//! Generation is synchronous domain logic; parsing additionally resolves
//! app-store artwork for records whose bundled icon is the generic
//! fallback. Lookups run sequentially in scan order and are cached
//! at-most-once per app name for the lifetime of the process.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use folio_core::receipt::{generate_receipt, Period, ReceiptDocument, UsageCategory};
use folio_core::recommend::{recommend, Recommendation};
use folio_core::timefmt::format_time;
use folio_core::{apps, ocr};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// A receipt plus the figures the site prints beneath it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    #[serde(flatten)]
    pub receipt: ReceiptDocument,
    pub grand_total_minutes: u32,
    pub grand_total: String,
    pub recommendation: Recommendation,
}

impl From<ReceiptDocument> for ReceiptView {
    fn from(receipt: ReceiptDocument) -> Self {
        let total = receipt.grand_total();
        Self {
            grand_total_minutes: total,
            grand_total: format_time(total),
            recommendation: recommend(total),
            receipt,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /receipts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateReceiptRequest {
    pub period: Period,
    /// Previously parsed categories; when at least one is non-empty they
    /// pass through verbatim instead of rolling synthetic data.
    #[serde(default)]
    pub categories: Option<Vec<UsageCategory>>,
}

/// Generate a receipt for the requested period.
pub async fn create_receipt(
    Json(input): Json<GenerateReceiptRequest>,
) -> AppResult<impl IntoResponse> {
    let receipt = generate_receipt(input.period, input.categories);

    tracing::info!(
        period = ?receipt.period,
        total_minutes = receipt.grand_total(),
        "Receipt generated",
    );

    Ok(Json(DataResponse {
        data: ReceiptView::from(receipt),
    }))
}

// ---------------------------------------------------------------------------
// POST /receipts/parse
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReceiptRequest {
    /// Raw text recognised from the uploaded screenshot.
    pub text: String,
    /// Receipt period; defaults to daily.
    #[serde(default)]
    pub period: Option<Period>,
    /// Uploaded image dimensions, validated when both are present.
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
}

/// Parse recognised screenshot text into a receipt.
///
/// Pipeline: dimension validation (when reported) -> Screen Time indicator
/// bar -> line scan -> icon resolution. Confidence failures are 422s with
/// the user-facing messages the upload dialog shows verbatim.
pub async fn parse_receipt(
    State(state): State<AppState>,
    Json(input): Json<ParseReceiptRequest>,
) -> AppResult<impl IntoResponse> {
    if let (Some(width), Some(height)) = (input.image_width, input.image_height) {
        ocr::validate_screenshot_dimensions(width, height)?;
    }

    if !ocr::looks_like_screen_time(&input.text) {
        return Err(AppError::Unprocessable(
            "This doesn't appear to be a Screen Time screenshot. Please upload your Screen Time data from Settings."
                .to_string(),
        ));
    }

    let categories = ocr::parse_usage_text(&input.text, &mut rand::rng()).ok_or_else(|| {
        AppError::Unprocessable(
            "Could not read app data from the screenshot. Please try a clearer image.".to_string(),
        )
    })?;

    let app_count: usize = categories.iter().map(|c| c.apps.len()).sum();
    let mut receipt = generate_receipt(input.period.unwrap_or(Period::Daily), Some(categories));

    resolve_receipt_icons(&state, &mut receipt).await;

    tracing::info!(
        apps = app_count,
        total_minutes = receipt.grand_total(),
        "Screenshot text parsed into a receipt",
    );

    Ok(Json(DataResponse {
        data: ReceiptView::from(receipt),
    }))
}

/// Upgrade fallback icons to App Store artwork where possible.
///
/// Failures keep the bundled key; with no icon client configured this is a
/// no-op.
async fn resolve_receipt_icons(state: &AppState, receipt: &mut ReceiptDocument) {
    let Some(icons) = &state.icons else {
        return;
    };

    let mut cache = state.icon_cache.lock().await;
    for category in &mut receipt.categories {
        for app in &mut category.apps {
            if apps::needs_icon_lookup(app) {
                if let Some(url) = icons.lookup(&mut cache, &app.name).await {
                    app.icon = url;
                }
            }
        }
    }
}
