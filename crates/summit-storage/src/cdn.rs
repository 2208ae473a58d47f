//! CDN cache invalidation.

use summit_config::StorageConfig;

use crate::error::StorageError;
use crate::runner::CommandRunner;

/// Invalidate the event's path prefix on the CDN after an upload pass.
///
/// No-op (with a warning) when no distribution id is configured, so local
/// runs without CDN access still complete.
pub async fn invalidate_cdn(
    runner: &CommandRunner,
    config: &StorageConfig,
    event_code: &str,
) -> Result<(), StorageError> {
    if config.cloudfront_distribution_id.is_empty() {
        tracing::warn!("no CloudFront distribution configured, skipping invalidation");
        return Ok(());
    }

    let paths = format!("/{}*", config.event_prefix(event_code));
    tracing::info!(%paths, "invalidating CDN cache");

    runner
        .run(
            "aws",
            [
                "cloudfront",
                "create-invalidation",
                "--distribution-id",
                &config.cloudfront_distribution_id,
                "--paths",
                &paths,
            ],
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_distribution_is_a_no_op() {
        let runner = CommandRunner::new();
        let config = StorageConfig::default();
        invalidate_cdn(&runner, &config, "SAN19").await.unwrap();
    }
}
