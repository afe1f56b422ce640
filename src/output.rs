//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity (nav link, endorsement, certificate) leads with a positional
//! index and its title. Secondary details follow as indented context lines:
//!
//! ```text
//! 001 PARLIAMENTARY ENDORSEMENT
//!     Id: parliamentary
//!     Subtitle: HOUSE OF COMMONS RECOGNITION
//!     Quote: Dear Ben, Thank you for recently contacting my office about...
//!         — Parliamentary - Tony
//! ```
//!
//! Load progress prints one line per chunk:
//!
//! ```text
//! [ 33%] chunk 1/3 (2 items)
//! [ 67%] chunk 2/3 (4 items)
//! [100%] chunk 3/3 (5 items)
//! Loaded 5 items in 3 chunks
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::content::{Certificate, Endorsement, NavLink};
use crate::orchestrate::LoadProgress;

/// Longest quote excerpt shown before truncating.
const QUOTE_EXCERPT_CHARS: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Site content
// ============================================================================

pub fn format_nav(links: &[NavLink]) -> Vec<String> {
    links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let marker = if link.is_button { " [button]" } else { "" };
            format!("{} {} → {}{}", format_index(i + 1), link.title, link.url, marker)
        })
        .collect()
}

pub fn print_nav(links: &[NavLink]) {
    for line in format_nav(links) {
        println!("{}", line);
    }
}

/// Header plus context lines for one endorsement at the given position.
pub fn format_endorsement(index: usize, endorsement: &Endorsement) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(index), endorsement.title)];
    lines.push(format!("{}Id: {}", indent(1), endorsement.id));
    lines.push(format!("{}Subtitle: {}", indent(1), endorsement.subtitle));
    if let Some(quote) = &endorsement.quote {
        lines.push(format!(
            "{}Quote: {}",
            indent(1),
            truncate(&quote.text, QUOTE_EXCERPT_CHARS)
        ));
        lines.push(format!("{}— {}", indent(2), quote.author));
    }
    lines
}

pub fn format_endorsements(list: &[Endorsement]) -> Vec<String> {
    list.iter()
        .enumerate()
        .flat_map(|(i, e)| format_endorsement(i + 1, e))
        .collect()
}

pub fn print_endorsements(list: &[Endorsement]) {
    for line in format_endorsements(list) {
        println!("{}", line);
    }
}

pub fn format_certificates(list: &[Certificate]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, cert) in list.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), cert.title));
        lines.push(format!("{}Issuer: {} ({})", indent(1), cert.issuer, cert.date));
    }
    lines
}

pub fn print_certificates(list: &[Certificate]) {
    for line in format_certificates(list) {
        println!("{}", line);
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn format_load_progress(progress: &LoadProgress, items_so_far: usize) -> String {
    format!(
        "[{:>3}%] chunk {}/{} ({} items)",
        progress.percentage, progress.current, progress.total, items_so_far
    )
}

pub fn format_load_summary(items: usize, chunks: usize) -> String {
    let item_word = if items == 1 { "item" } else { "items" };
    let chunk_word = if chunks == 1 { "chunk" } else { "chunks" };
    format!("Loaded {} {} in {} {}", items, item_word, chunks, chunk_word)
}
