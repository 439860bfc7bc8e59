//! Library shelf read model.
//!
//! Fetches published book-type shelf items and reshapes them for the
//! library view: cover resolution prefers the uploaded asset (served from
//! the CDN at display width) and falls back to an external cover URL.

use serde::{Deserialize, Serialize};

use crate::client::SanityClient;
use crate::error::SanityError;
use crate::image::ImageUrlBuilder;

/// GROQ query for published books on the shelf, in curator order.
pub const SHELF_BOOKS_QUERY: &str = r#"
  *[_type == "shelfItem" && isPublished == true && mediaType == "book"] | order(order asc) {
    _id,
    title,
    author,
    cover,
    externalCoverUrl,
    rating,
    year,
    goodreadsUrl,
    review,
    review_en
  }
"#;

/// Display width requested for CDN-served covers.
pub const BOOK_COVER_WIDTH: u32 = 400;

// ---------------------------------------------------------------------------
// Raw document shape
// ---------------------------------------------------------------------------

/// An image field as stored on a document: a reference to an asset.
#[derive(Debug, Clone, Deserialize)]
pub struct SanityImage {
    pub asset: Option<ImageAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// A shelf item as returned by [`SHELF_BOOKS_QUERY`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfBookData {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub cover: Option<SanityImage>,
    pub external_cover_url: Option<String>,
    pub rating: Option<u32>,
    pub year: Option<String>,
    pub goodreads_url: Option<String>,
    pub review: Option<String>,
    #[serde(rename = "review_en")]
    pub review_en: Option<String>,
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// A book as served to the library view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Resolved cover URL; empty when the item has no usable cover.
    pub cover_image: String,
    /// Star rating, 0-5; 0 renders as "unrated".
    pub rating: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goodreads_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(rename = "review_en", skip_serializing_if = "Option::is_none")]
    pub review_en: Option<String>,
}

/// Reshape one raw shelf item into the view model.
///
/// A malformed asset reference keeps the external-URL fallback rather than
/// failing the whole listing.
pub fn transform_book(item: ShelfBookData, images: &ImageUrlBuilder) -> Book {
    let cover_image = match item.cover.as_ref().and_then(|c| c.asset.as_ref()) {
        Some(asset) => match images.image(&asset.reference) {
            Ok(url) => url.width(BOOK_COVER_WIDTH).build(),
            Err(err) => {
                tracing::warn!(book = %item.id, error = %err, "Unusable cover reference");
                item.external_cover_url.clone().unwrap_or_default()
            }
        },
        None => item.external_cover_url.clone().unwrap_or_default(),
    };

    Book {
        id: item.id,
        title: item.title,
        author: item.author.unwrap_or_default(),
        cover_image,
        rating: item.rating.unwrap_or(0),
        year: item.year,
        goodreads_url: item.goodreads_url,
        review: item.review,
        review_en: item.review_en,
    }
}

/// Fetch and transform every published book on the shelf.
pub async fn fetch_shelf_books(
    client: &SanityClient,
    images: &ImageUrlBuilder,
) -> Result<Vec<Book>, SanityError> {
    let raw: Vec<ShelfBookData> = client.query(SHELF_BOOKS_QUERY).await?;
    Ok(raw
        .into_iter()
        .map(|item| transform_book(item, images))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
