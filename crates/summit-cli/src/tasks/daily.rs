//! The content-publishing tasks: the full daily run and the lighter
//! session-update run.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use summit_core::Session;
use summit_site::ChangeSet;

use crate::progress::Progress;
use crate::tasks::TaskContext;
use crate::tasks::media::regenerate_images;
use crate::tasks::uploads::sync_attachments;

/// Full daily pass over the event: session data, share images, website
/// content, attachments, CDN.
pub async fn daily_tasks(ctx: &TaskContext) -> anyhow::Result<()> {
    let started = Instant::now();

    let mut client = ctx.sched_client();
    let spinner = Progress::spinner("fetching session export", !ctx.quiet);
    let sessions = client.fetch_sessions().await?;
    spinner.finish(&format!("{} sessions fetched", sessions.len()));

    regenerate_images(ctx, &sessions).await?;
    publish_content(ctx, &sessions, true).await?;
    sync_attachments(ctx, &client).await?;
    publish_resources(ctx, &sessions).await?;

    if !ctx.no_upload {
        summit_storage::invalidate_cdn(&ctx.runner, &ctx.config.storage, &ctx.config.event.code)
            .await?;
    }

    tracing::info!(elapsed = ?started.elapsed(), "daily tasks complete");
    Ok(())
}

/// Refresh content files, share images, attachments and the resources
/// summary, then open the PR. Skips the image staging and CDN steps of
/// the daily run.
pub async fn update_session(ctx: &TaskContext) -> anyhow::Result<()> {
    let mut client = ctx.sched_client();
    let sessions = client.fetch_sessions().await?;
    tracing::info!(sessions = sessions.len(), "session export fetched");

    regenerate_images(ctx, &sessions).await?;
    publish_content(ctx, &sessions, false).await?;
    sync_attachments(ctx, &client).await?;
    publish_resources(ctx, &sessions).await
}

/// Sync the website clone: optionally stage images, rewrite content files,
/// commit and ensure the pull request. A clean tree after sync means no PR.
async fn publish_content(
    ctx: &TaskContext,
    sessions: &BTreeMap<String, Session>,
    stage_images: bool,
) -> anyhow::Result<()> {
    let workflow = ctx.workflow()?;
    workflow.prepare().await?;

    if stage_images {
        stage_site_images(ctx, workflow.repo_dir()).await?;
    }

    let today = chrono::Local::now().date_naive();
    let changes = summit_site::sync_posts(
        sessions,
        &ctx.posts_dir(workflow.repo_dir()),
        &ctx.config.event.code,
        today,
    )?;
    tracing::info!(
        created = changes.created.len(),
        updated = changes.updated.len(),
        deleted = changes.deleted.len(),
        "content files synchronized"
    );

    let pr = ctx.pr_client()?;
    let title = format!("Session update for {today}");
    if let Some(summary) = workflow.finalize(&pr, &title, &pr_body(&changes)).await? {
        tracing::info!(number = summary.number, url = %summary.url, created = summary.created, "pull request ready");
    }
    Ok(())
}

/// Rebuild the event's resources summary and mirror it to the bucket so
/// downstream tools can read session data without the scheduling service.
async fn publish_resources(
    ctx: &TaskContext,
    sessions: &BTreeMap<String, Session>,
) -> anyhow::Result<()> {
    let path = ctx.work_dir().join("resources.json");
    if summit_site::write_resources_json(sessions, &path)? {
        tracing::info!(path = %path.display(), "resources summary changed");
    }
    ctx.s3().upload_resources(&path).await?;
    Ok(())
}

/// Mirror the generated share cards into the clone so the site serves them
/// from its own assets tree.
async fn stage_site_images(ctx: &TaskContext, repo_dir: &Path) -> anyhow::Result<()> {
    let target = ctx.site_images_dir(repo_dir);
    std::fs::create_dir_all(&target)?;

    ctx.runner
        .run(
            "rsync",
            [
                "-a".to_string(),
                "--include".to_string(),
                format!("{}-*.png", ctx.config.event.code.to_uppercase()),
                "--exclude".to_string(),
                "*".to_string(),
                format!("{}/", ctx.images_dir().display()),
                format!("{}/", target.display()),
            ],
        )
        .await?;
    Ok(())
}

fn pr_body(changes: &ChangeSet) -> String {
    format!(
        "Automated session update.\n\n\
         - created: {}\n\
         - updated: {}\n\
         - deleted: {}\n",
        changes.created.len(),
        changes.updated.len(),
        changes.deleted.len()
    )
}
