//! Cloud storage bucket and CDN configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Static-assets bucket name.
    #[serde(default)]
    pub bucket: String,

    /// Public CDN base URL fronting the bucket.
    #[serde(default)]
    pub cdn_url: String,

    /// CloudFront distribution id for cache invalidation.
    #[serde(default)]
    pub cloudfront_distribution_id: String,
}

impl StorageConfig {
    /// Check the minimum required fields for uploads.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty() && !self.cdn_url.is_empty()
    }

    /// Bucket key prefix for one event's assets.
    #[must_use]
    pub fn event_prefix(&self, event_code: &str) -> String {
        format!("events/{}/", event_code.to_lowercase())
    }

    /// Fully qualified bucket URI for a path under the event prefix.
    #[must_use]
    pub fn bucket_uri(&self, event_code: &str, path: &str) -> String {
        format!(
            "s3://{}/{}{}",
            self.bucket,
            self.event_prefix(event_code),
            path
        )
    }
}
