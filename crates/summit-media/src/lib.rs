//! # summit-media
//!
//! Social-share card generation and video publishing support. Compositing
//! and resizing are delegated to ImageMagick through the shared command
//! runner; this crate owns layout, text wrapping, avatar downloads and the
//! uploader hand-off payload.

mod cards;
mod error;
mod photos;
mod resize;
mod video;

pub use cards::{CardLayout, TextBlock, generate_cards, magick_args};
pub use error::MediaError;
pub use photos::fetch_speaker_photo;
pub use resize::resize_variants;
pub use video::{VideoMeta, build_description, download_video, publish_video};
