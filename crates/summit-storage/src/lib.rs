//! # summit-storage
//!
//! External tool plumbing: a shared command runner that captures output and
//! preserves exit codes, `aws s3 sync` invocations scoped to one event's
//! assets, and CloudFront cache invalidation.

mod cdn;
mod error;
mod runner;
mod s3;

pub use cdn::invalidate_cdn;
pub use error::StorageError;
pub use runner::CommandRunner;
pub use s3::S3Sync;
