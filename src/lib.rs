//! # Site Content
//!
//! The content layer of a small marketing site: the site copy itself, plus the
//! utilities pages use to load, clean, and inspect content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Site copy (navigation, endorsements, certificates) and its accessors |
//! | [`progress`] | Progress snapshots published to a single-slot observable channel |
//! | [`loader`] | Chunked loading: fixed-size slices, per-chunk transform, progress per chunk |
//! | [`orchestrate`] | Async chunk-by-chunk driver with observer callbacks and cancellation |
//! | [`sanitize`] | Best-effort HTML stripping and text entity escaping |
//! | [`analyze`] | Pattern-based SVG and HTML structure summaries |
//! | [`render`] | Escaped HTML fragments for the content sections (Maud) |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Progress Channels
//!
//! Progress is published to a [`progress::ProgressChannel`] handed to each
//! reporter, never to a global. Independent operations get independent
//! channels and cannot overwrite each other's snapshots.
//!
//! ## Cooperative Loading
//!
//! [`orchestrate::load_content_with_progress`] processes one chunk, reports,
//! and yields to the runtime before the next, so a host event loop stays
//! responsive. It is an ordinary future: dropping it cancels the load.
//!
//! ## Patterns, Not Parsers
//!
//! The sanitizer and analyzer work on raw text with a handful of patterns.
//! They are total and fast but make no guarantees against malformed or
//! adversarial markup. Rendering goes through Maud, which escapes every
//! interpolated value, so site copy never needs sanitizing on the way out.

pub mod analyze;
pub mod config;
pub mod content;
pub mod loader;
pub mod orchestrate;
pub mod output;
pub mod progress;
pub mod render;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod test_helpers;
