//! # summit
//!
//! Automation container for a conference website: pulls the session export
//! from the scheduling service, regenerates social share images, rewrites
//! the website's session content files, uploads assets to cloud storage and
//! opens the pull request. One task per invocation; a failing external
//! command terminates the process with that command's exit code.

use clap::Parser;

mod bootstrap;
mod cli;
mod progress;
mod tasks;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("summit error: {error:#}");
        std::process::exit(exit_code(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    // .env may hold SUMMIT_LOG, so it loads before the subscriber.
    bootstrap::load_dotenv();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config(&cli).await?;
    let task = cli.task();
    let ctx = tasks::TaskContext::new(config, cli.no_upload, cli.quiet);

    match task {
        cli::Task::DailyTasks => tasks::daily_tasks(&ctx).await,
        cli::Task::UpdateSession => tasks::update_session(&ctx).await,
        cli::Task::SocialImages => tasks::social_images(&ctx).await,
        cli::Task::UploadPresentations => tasks::upload_presentations(&ctx).await,
        cli::Task::UploadVideo => tasks::upload_video(&ctx).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SUMMIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Map a pipeline failure to the process exit code. External commands
/// propagate their own exit code; everything else is 1.
fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(storage) = error.downcast_ref::<summit_storage::StorageError>() {
        return storage.exit_code();
    }
    if let Some(git) = error.downcast_ref::<summit_git::GitError>() {
        return git.exit_code();
    }
    if let Some(media) = error.downcast_ref::<summit_media::MediaError>() {
        return media.exit_code();
    }
    1
}
