//! Responsive share-image variants.

use std::path::Path;

use summit_storage::CommandRunner;

use crate::error::MediaError;

/// Produce resized JPEG variants of every generated PNG card.
///
/// One `mogrify` pass per width, writing into `<images_dir>/<width>/`.
/// ImageMagick expands the `*.png` glob itself, so no shell is involved.
pub async fn resize_variants(
    runner: &CommandRunner,
    images_dir: &Path,
    widths: &[u32],
) -> Result<(), MediaError> {
    for width in widths {
        let out_dir = images_dir.join(width.to_string());
        std::fs::create_dir_all(&out_dir)?;

        tracing::info!(width, "resizing share images");
        runner
            .run(
                "mogrify",
                [
                    "-path".to_string(),
                    format!("{}/", out_dir.display()),
                    "-resize".to_string(),
                    width.to_string(),
                    "-format".to_string(),
                    "jpg".to_string(),
                    format!("{}/*.png", images_dir.display()),
                ],
            )
            .await?;
    }
    Ok(())
}
