//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use track_browser::models::Track;

/// Builder for test tracks
#[derive(Debug, Clone, Default)]
pub struct TrackBuilder {
    track: Track,
}

impl TrackBuilder {
    pub fn new(id: &str) -> Self {
        Self { track: Track { persistent_id: id.to_string(), ..Default::default() } }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.track.name = Some(name.to_string());
        self
    }

    pub fn artist(mut self, artist: &str) -> Self {
        self.track.artist = Some(artist.to_string());
        self
    }

    pub fn album_artist(mut self, album_artist: &str) -> Self {
        self.track.album_artist = Some(album_artist.to_string());
        self
    }

    pub fn album(mut self, album: &str) -> Self {
        self.track.album = Some(album.to_string());
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.track.genre = Some(genre.to_string());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.track.year = Some(year);
        self
    }

    pub fn total_time(mut self, ms: u64) -> Self {
        self.track.total_time = Some(ms);
        self
    }

    pub fn build(self) -> Track {
        self.track
    }

    /// Single-line JSON, as written to a JSON Lines library
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.track).expect("Failed to serialize track")
    }
}

fn sample(id: &str, name: &str, artist: &str, album: &str, genre: &str, year: i32) -> Track {
    TrackBuilder::new(id).name(name).artist(artist).album(album).genre(genre).year(year).build()
}

/// A small library covering several genres, artists and albums
pub fn sample_tracks() -> Vec<Track> {
    let dark_side = "The Dark Side of the Moon";
    let mut tracks = vec![
        sample("1", "Money", "Pink Floyd", dark_side, "Rock", 1973),
        sample("2", "So What", "Miles Davis", "Kind of Blue", "Jazz", 1959),
        sample("3", "Time", "Pink Floyd", dark_side, "Rock", 1973),
        sample("4", "Tom Sawyer", "Rush", "Moving Pictures", "rock", 1981),
        sample("5", "Blue in Green", "Miles Davis", "Kind of Blue", "Jazz", 1959),
    ];
    for (track, ms) in tracks.iter_mut().zip([382_000, 562_000, 413_000, 276_000, 337_000]) {
        track.total_time = Some(ms);
    }
    tracks
}

/// Temporary directory holding library files
pub struct LibraryDir {
    temp_dir: TempDir,
}

impl LibraryDir {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` verbatim to `name`
    pub fn with_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write library file");
        path
    }

    /// Write tracks as a JSON array
    pub fn with_json(&self, name: &str, tracks: &[Track]) -> PathBuf {
        let content = serde_json::to_string_pretty(tracks).expect("Failed to serialize tracks");
        self.with_file(name, &content)
    }

    /// Write tracks as JSON Lines
    pub fn with_json_lines(&self, name: &str, tracks: &[Track]) -> PathBuf {
        let content = tracks
            .iter()
            .map(|t| serde_json::to_string(t).expect("Failed to serialize track"))
            .collect::<Vec<_>>()
            .join("\n");
        self.with_file(name, &content)
    }
}
