//! # summit-core
//!
//! Core types and id helpers for the Summit automation container.
//!
//! This crate provides the foundational types shared across all Summit
//! crates:
//! - `Session` and `Speaker` records as pulled from the scheduling API
//! - Session-id parsing and case-normalization helpers
//! - Slug generation for downloaded asset file names

pub mod ids;
pub mod session;

pub use ids::{extract_session_id, slugify};
pub use session::{Session, SessionSlot, Speaker};
