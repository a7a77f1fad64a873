//! Library file loading
//!
//! A library is either a JSON array of tracks or JSON Lines with one track per line. JSON Lines
//! input degrades gracefully: malformed lines are logged with `tracing::warn!` and skipped, but
//! a file where more than half of the lines fail, or 100 lines fail in a row, is rejected as
//! corrupted. Errors are `anyhow::Result` with context naming the file.

pub mod library;

pub use library::{load_library, parse_library};
