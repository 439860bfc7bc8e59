//! Image asset reference parsing and CDN URL building.
//!
//! Uploaded images are referenced from documents as
//! `image-<assetId>-<width>x<height>-<format>`. The CDN serves them at
//! `https://cdn.sanity.io/images/<project>/<dataset>/<assetId>-<WxH>.<fmt>`
//! with rendering controlled by query parameters. New URLs default to
//! automatic format negotiation at quality 75, matching the site's
//! bandwidth-optimised read client.

use crate::client::SanityConfig;
use crate::error::SanityError;

/// CDN root for image assets.
pub const IMAGE_CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Default JPEG/WebP quality applied to every built URL.
pub const DEFAULT_QUALITY: u8 = 75;

// ---------------------------------------------------------------------------
// Asset references
// ---------------------------------------------------------------------------

/// A parsed image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub asset_id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl ImageRef {
    /// Parse an `image-<id>-<WxH>-<ext>` reference.
    pub fn parse(reference: &str) -> Result<Self, SanityError> {
        let malformed = || SanityError::MalformedImageRef(reference.to_string());

        let rest = reference.strip_prefix("image-").ok_or_else(malformed)?;
        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let dimensions = parts.next().ok_or_else(malformed)?;
        let asset_id = parts.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

        let (width, height) = dimensions.split_once('x').ok_or_else(malformed)?;
        let width: u32 = width.parse().map_err(|_| malformed())?;
        let height: u32 = height.parse().map_err(|_| malformed())?;

        Ok(Self {
            asset_id: asset_id.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }

    /// CDN filename for this asset (`<id>-<WxH>.<ext>`).
    pub fn filename(&self) -> String {
        format!(
            "{}-{}x{}.{}",
            self.asset_id, self.width, self.height, self.format
        )
    }
}

// ---------------------------------------------------------------------------
// URL building
// ---------------------------------------------------------------------------

/// Builds CDN URLs for one project/dataset pair.
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    /// Create a builder scoped to the configured project and dataset.
    pub fn new(config: &SanityConfig) -> Self {
        Self {
            project_id: config.project_id.clone(),
            dataset: config.dataset.clone(),
        }
    }

    /// Start a URL for the given asset reference.
    pub fn image(&self, asset_ref: &str) -> Result<ImageUrl, SanityError> {
        let parsed = ImageRef::parse(asset_ref)?;
        Ok(ImageUrl {
            base: format!(
                "{IMAGE_CDN_BASE}/{}/{}/{}",
                self.project_id,
                self.dataset,
                parsed.filename()
            ),
            width: None,
            quality: Some(DEFAULT_QUALITY),
            auto_format: true,
        })
    }
}

/// One image URL under construction.
#[derive(Debug, Clone)]
pub struct ImageUrl {
    base: String,
    width: Option<u32>,
    quality: Option<u8>,
    auto_format: bool,
}

impl ImageUrl {
    /// Request server-side resizing to the given width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Override the compression quality.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Render the final URL.
    pub fn build(&self) -> String {
        let mut params = Vec::new();
        if self.auto_format {
            params.push("auto=format".to_string());
        }
        if let Some(quality) = self.quality {
            params.push(format!("q={quality}"));
        }
        if let Some(width) = self.width {
            params.push(format!("w={width}"));
        }

        if params.is_empty() {
            self.base.clone()
        } else {
            format!("{}?{}", self.base, params.join("&"))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
