//! Command-line surface of the `summit` binary.
//!
//! The container runs exactly one task per invocation, selected by a task
//! flag. Everything else is tuning: `--no-upload` keeps cloud storage
//! untouched, `--work-dir` relocates the scratch directory, `--session-id`
//! picks the video for single-video runs.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "summit",
    version,
    about = "Summit - conference website automation"
)]
#[command(group(
    clap::ArgGroup::new("task")
        .required(true)
        .args(["daily_tasks", "update_session", "social_images", "upload_presentations", "upload_video"]),
))]
pub struct Cli {
    /// Full daily run: pull sessions, regenerate images, update the
    /// website content, upload assets, open the PR.
    #[arg(long)]
    pub daily_tasks: bool,

    /// Refresh session content files and images, then open the PR.
    #[arg(long)]
    pub update_session: bool,

    /// Generate and upload social share images only.
    #[arg(long)]
    pub social_images: bool,

    /// Download session attachments and upload them to storage.
    #[arg(long)]
    pub upload_presentations: bool,

    /// Publish one session recording through the configured uploader.
    #[arg(long)]
    pub upload_video: bool,

    /// Session id for --upload-video (falls back to general.session_id).
    #[arg(long)]
    pub session_id: Option<String>,

    /// Skip every cloud-storage upload; local outputs are still written.
    #[arg(long)]
    pub no_upload: bool,

    /// Scratch directory override (defaults to general.work_dir).
    #[arg(long)]
    pub work_dir: Option<String>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// The task selected for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    DailyTasks,
    UpdateSession,
    SocialImages,
    UploadPresentations,
    UploadVideo,
}

impl Cli {
    /// Resolve the task flags into one task. The arg group guarantees
    /// exactly one flag is set.
    #[must_use]
    pub fn task(&self) -> Task {
        if self.daily_tasks {
            Task::DailyTasks
        } else if self.update_session {
            Task::UpdateSession
        } else if self.social_images {
            Task::SocialImages
        } else if self.upload_presentations {
            Task::UploadPresentations
        } else {
            Task::UploadVideo
        }
    }
}
