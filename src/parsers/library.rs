use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::models::Track;
use crate::utils::validate_file_size;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Load a track library from `path`.
///
/// A file whose first non-blank character is `[` is read as one JSON array and must parse as a
/// whole. Anything else is read as JSON Lines: malformed lines are logged and skipped, and the
/// load fails when more than half of the lines or 100 lines in a row are bad.
pub fn load_library(path: &Path) -> Result<Vec<Track>> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open library file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .with_context(|| format!("Failed to read library file: {}", path.display()))?;

    let tracks = parse_library(&content)
        .with_context(|| format!("Failed to parse library file: {}", path.display()))?;
    debug!(path = %path.display(), tracks = tracks.len(), "loaded library");
    Ok(tracks)
}

/// Parse library text in either supported layout
pub fn parse_library(content: &str) -> Result<Vec<Track>> {
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content).context("Invalid JSON track array")
    } else {
        parse_json_lines(content)
    }
}

fn parse_json_lines(content: &str) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();
    let mut skipped = 0;
    let mut total = 0;
    let mut consecutive_errors = 0;

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        total += 1;

        match serde_json::from_str::<Track>(line) {
            Ok(track) => {
                tracks.push(track);
                consecutive_errors = 0;
            }
            Err(e) => {
                warn!(line = line_num + 1, error = %e, "skipping malformed library line");
                skipped += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in library file - file may be corrupted",
                        consecutive_errors
                    );
                }
            }
        }
    }

    if total > 0 {
        let failure_rate = skipped as f64 / total as f64;
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in library file: {} of {} lines failed ({:.1}%)",
                skipped,
                total,
                failure_rate * 100.0
            );
        }
    }

    if skipped > 0 {
        warn!(tracks = tracks.len(), skipped, "parsed library with skipped lines");
    }

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_library(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_array() {
        let file = temp_library(
            r#"[
                {"persistent_id": "A1", "name": "Money", "artist": "Pink Floyd", "year": 1973},
                {"persistent_id": "A2", "genre": "Rock", "play_count": 4}
            ]"#,
        );
        let tracks = load_library(file.path()).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name.as_deref(), Some("Money"));
        assert_eq!(tracks[0].year, Some(1973));
        assert_eq!(tracks[1].name, None);
        assert_eq!(tracks[1].play_count, 4);
    }

    #[test]
    fn test_load_json_lines_skips_bad_lines() {
        let file = temp_library(
            "{\"persistent_id\": \"1\", \"name\": \"One\"}\n\
             not json\n\
             \n\
             {\"persistent_id\": \"2\", \"date_added\": \"2020-01-02T03:04:05Z\"}\n",
        );
        let tracks = load_library(file.path()).unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks[1].date_added.is_some());
    }

    #[test]
    fn test_mostly_bad_lines_fail() {
        let file = temp_library("{\"persistent_id\": \"1\"}\nbad\nworse\n");
        let err = load_library(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Too many parse failures"));
    }

    #[test]
    fn test_consecutive_errors_fail() {
        let mut content = String::new();
        for i in 0..150 {
            content.push_str(&format!("{{\"persistent_id\": \"{i}\"}}\n"));
        }
        content.push_str(&"garbage\n".repeat(MAX_CONSECUTIVE_ERRORS));
        let err = parse_library(&content).unwrap_err();
        assert!(err.to_string().contains("consecutive"));
    }

    #[test]
    fn test_invalid_array_fails_as_a_whole() {
        let err = parse_library(r#"[{"persistent_id": "1"}, {"name": "no id"}]"#).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON track array"));
    }

    #[test]
    fn test_empty_file() {
        let file = temp_library("");
        assert!(load_library(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_library(Path::new("/nonexistent/library.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open library file"));
    }
}
