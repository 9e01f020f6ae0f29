// ABOUTME: Enrichment module - attaches artwork image URLs to validated records.
// ABOUTME: Lookups run concurrently; a failed lookup only nulls that record's image.

mod google;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;

use crate::error::ImageError;
use crate::parser::Record;

pub use google::{GOOGLE_CSE_ENDPOINT, GoogleImageSearch};

/// Field naming the artwork a record relates to. Consumed by enrichment.
pub const RELATED_ARTWORK_FIELD: &str = "related_artwork";

/// Field enrichment writes the image URL (or null) into.
pub const IMAGE_URL_FIELD: &str = "artwork_image_url";

/// Finds a picture of an artwork.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// URL of the best image for `title` by `artist`, if any.
    async fn find_image(&self, title: &str, artist: &str) -> Result<Option<String>, ImageError>;
}

/// Replace each record's `related_artwork` with an `artwork_image_url`.
///
/// Records without a `related_artwork` key are left alone. Empty titles are
/// not looked up. Misses and failures become `null`.
pub async fn attach_artwork_images(records: &mut [Record], artist: &str, lookup: &dyn ImageLookup) {
    let titles: Vec<Option<String>> = records
        .iter()
        .map(|record| {
            record
                .get_str(RELATED_ARTWORK_FIELD)
                .map(str::trim)
                .map(str::to_string)
        })
        .collect();

    let lookups = titles.iter().map(|title| async move {
        match title.as_deref() {
            Some(title) if !title.is_empty() => match lookup.find_image(title, artist).await {
                Ok(Some(url)) => Value::String(url),
                Ok(None) => {
                    tracing::warn!(title, artist, "no image found for artwork");
                    Value::Null
                }
                Err(e) => {
                    tracing::warn!(title, artist, error = %e, "image lookup failed");
                    Value::Null
                }
            },
            _ => Value::Null,
        }
    });
    let urls = join_all(lookups).await;

    for (record, url) in records.iter_mut().zip(urls) {
        if record.remove(RELATED_ARTWORK_FIELD).is_some() {
            record.set(IMAGE_URL_FIELD, url);
        }
    }
}
