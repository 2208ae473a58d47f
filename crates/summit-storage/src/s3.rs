//! Bucket mirroring via the `aws` CLI.
//!
//! All sync invocations are scoped with `--exclude '*' --include
//! '<CODE>-*...'` so only this event's artifacts leave the machine; the
//! scratch directories also hold circle thumbnails and resized variants that
//! must not land next to the originals.

use std::path::Path;

use summit_config::StorageConfig;

use crate::error::StorageError;
use crate::runner::CommandRunner;

pub struct S3Sync<'a> {
    runner: &'a CommandRunner,
    config: &'a StorageConfig,
    event_code: String,
    /// When set (`--no-upload`), every sync is a logged no-op.
    no_upload: bool,
}

impl<'a> S3Sync<'a> {
    #[must_use]
    pub fn new(
        runner: &'a CommandRunner,
        config: &'a StorageConfig,
        event_code: &str,
        no_upload: bool,
    ) -> Self {
        Self {
            runner,
            config,
            event_code: event_code.to_uppercase(),
            no_upload,
        }
    }

    /// Mirror original share images plus their resized variants.
    pub async fn sync_images(
        &self,
        images_dir: &Path,
        widths: &[u32],
    ) -> Result<(), StorageError> {
        self.sync(
            images_dir,
            "images/",
            &[
                format!("{}-*.png", self.event_code),
                format!("{}-*.jpg", self.event_code),
            ],
        )
        .await?;

        for width in widths {
            self.sync(
                &images_dir.join(width.to_string()),
                &format!("images/{width}/"),
                &[format!("{}-*.jpg", self.event_code)],
            )
            .await?;
        }
        Ok(())
    }

    /// Mirror downloaded presentation PDFs.
    pub async fn sync_presentations(&self, dir: &Path) -> Result<(), StorageError> {
        self.sync(dir, "presentations/", &[format!("{}-*.pdf", self.event_code)])
            .await
    }

    /// Mirror non-PDF session attachments.
    pub async fn sync_other_files(&self, dir: &Path) -> Result<(), StorageError> {
        self.sync(dir, "other_files/", &[format!("{}-*", self.event_code)])
            .await
    }

    /// Upload the event's resources summary to the bucket root of the
    /// event prefix.
    pub async fn upload_resources(&self, file: &Path) -> Result<(), StorageError> {
        if self.no_upload {
            tracing::info!("skipping resources upload (--no-upload)");
            return Ok(());
        }
        if !file.is_file() {
            tracing::warn!(file = %file.display(), "resources file missing, skipping upload");
            return Ok(());
        }

        let source = file.display().to_string();
        let destination = self.config.bucket_uri(&self.event_code, "resources.json");
        tracing::info!(%destination, "uploading resources summary");
        self.runner
            .run("aws", ["s3", "cp", source.as_str(), destination.as_str()])
            .await?;
        Ok(())
    }

    async fn sync(
        &self,
        local_dir: &Path,
        remote_path: &str,
        includes: &[String],
    ) -> Result<(), StorageError> {
        if self.no_upload {
            tracing::info!(remote_path, "skipping upload (--no-upload)");
            return Ok(());
        }
        if !local_dir.is_dir() {
            tracing::warn!(dir = %local_dir.display(), "sync source missing, skipping");
            return Ok(());
        }

        let destination = self.config.bucket_uri(&self.event_code, remote_path);
        let mut args = vec![
            "s3".to_string(),
            "sync".to_string(),
            "--exclude".to_string(),
            "*".to_string(),
        ];
        for include in includes {
            args.push("--include".to_string());
            args.push(include.clone());
        }
        args.push(local_dir.display().to_string());
        args.push(destination.clone());

        tracing::info!(%destination, "syncing to bucket");
        self.runner.run("aws", &args).await?;
        Ok(())
    }
}
