//! Share-image and video tasks.

use std::collections::BTreeMap;
use std::path::Path;

use summit_core::Session;
use summit_media::{MediaError, VideoMeta};

use crate::progress::Progress;
use crate::tasks::TaskContext;

/// Generate and upload social share images without touching the website.
pub async fn social_images(ctx: &TaskContext) -> anyhow::Result<()> {
    let mut client = ctx.sched_client();
    let sessions = client.fetch_sessions().await?;
    tracing::info!(sessions = sessions.len(), "session export fetched");

    regenerate_images(ctx, &sessions).await?;
    Ok(())
}

/// Composite a card per session, produce the resized variants and mirror
/// everything to storage.
pub(crate) async fn regenerate_images(
    ctx: &TaskContext,
    sessions: &BTreeMap<String, Session>,
) -> anyhow::Result<usize> {
    let images_dir = ctx.images_dir();
    let template = ctx.config.media.template_for(&ctx.config.event.code);
    let assets_dir = Path::new(&ctx.config.media.assets_dir);

    let spinner = Progress::spinner("generating share cards", !ctx.quiet);
    let generated = summit_media::generate_cards(
        &ctx.runner,
        &ctx.http,
        sessions,
        Path::new(&template),
        assets_dir,
        &images_dir,
    )
    .await?;
    spinner.finish(&format!("{generated} share cards generated"));

    let widths = &ctx.config.media.responsive_widths;
    summit_media::resize_variants(&ctx.runner, &images_dir, widths).await?;

    ctx.s3().sync_images(&images_dir, widths).await?;
    Ok(generated)
}

/// Download one session recording from the CDN and hand it to the
/// configured uploader.
pub async fn upload_video(ctx: &TaskContext) -> anyhow::Result<()> {
    let raw = &ctx.config.general.session_id;
    if raw.is_empty() {
        anyhow::bail!("--upload-video requires a session id (--session-id or general.session_id)");
    }

    let code = &ctx.config.event.code;
    let session_id = summit_core::extract_session_id(raw, code)
        .ok_or_else(|| MediaError::UnknownSession(raw.clone()))?;

    let mut client = ctx.sched_client();
    let sessions = client.fetch_sessions().await?;
    let session = sessions
        .get(&session_id)
        .ok_or_else(|| MediaError::UnknownSession(session_id.clone()))?;

    let video = summit_media::download_video(
        &ctx.http,
        &ctx.config.storage.cdn_url,
        code,
        &session_id,
        &ctx.videos_dir(),
    )
    .await?;

    let thumbnail = ctx.images_dir().join(format!("{session_id}.png"));
    let meta = VideoMeta::for_session(
        session,
        &video,
        &thumbnail,
        &ctx.config.event.session_url(&session_id),
        code,
    );

    summit_media::publish_video(&ctx.runner, &ctx.config.media.uploader_command, &meta).await?;
    tracing::info!(%session_id, "video handed to uploader");
    Ok(())
}
