//! # summit-site
//!
//! Content-file writer for the conference website. One markdown file per
//! session, holding a YAML front-matter header and an empty body. Sync is
//! idempotent: files are only rewritten when the freshly computed header
//! differs structurally from the one on disk, so an unchanged data pull
//! leaves the working tree clean.

mod error;
mod escape;
mod front_matter;
mod resources;
mod sync;

pub use error::SiteError;
pub use escape::escape_html;
pub use front_matter::{FrontMatter, SpeakerEntry};
pub use resources::write_resources_json;
pub use sync::{ChangeSet, sync_posts};
