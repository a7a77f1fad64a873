use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A library track as supplied by the caller. The engine never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub persistent_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub album_artist: Option<String>,
    #[serde(default)]
    pub composer: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub disc_number: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Duration in milliseconds
    #[serde(default)]
    pub total_time: Option<u64>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub play_count: u32,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

/// Sortable and filterable track columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Name,
    Artist,
    Album,
    AlbumArtist,
    Composer,
    Genre,
    TrackNumber,
    DiscNumber,
    Year,
    TotalTime,
    Rating,
    PlayCount,
    DateAdded,
}

/// Raw value of one track column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Missing,
    Number(i64),
    Text(&'a str),
}

impl TrackField {
    pub const ALL: [TrackField; 13] = [
        TrackField::Name,
        TrackField::Artist,
        TrackField::Album,
        TrackField::AlbumArtist,
        TrackField::Composer,
        TrackField::Genre,
        TrackField::TrackNumber,
        TrackField::DiscNumber,
        TrackField::Year,
        TrackField::TotalTime,
        TrackField::Rating,
        TrackField::PlayCount,
        TrackField::DateAdded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrackField::Name => "name",
            TrackField::Artist => "artist",
            TrackField::Album => "album",
            TrackField::AlbumArtist => "album_artist",
            TrackField::Composer => "composer",
            TrackField::Genre => "genre",
            TrackField::TrackNumber => "track_number",
            TrackField::DiscNumber => "disc_number",
            TrackField::Year => "year",
            TrackField::TotalTime => "total_time",
            TrackField::Rating => "rating",
            TrackField::PlayCount => "play_count",
            TrackField::DateAdded => "date_added",
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TrackField::ALL.into_iter().find(|field| field.as_str() == lower).ok_or_else(|| {
            let valid: Vec<&str> = TrackField::ALL.iter().map(|f| f.as_str()).collect();
            anyhow!("Unknown track field: '{}' (valid fields: {})", s, valid.join(", "))
        })
    }
}

impl Track {
    /// Read a column as a loosely typed value
    pub fn field(&self, field: TrackField) -> FieldValue<'_> {
        fn text(value: &Option<String>) -> FieldValue<'_> {
            value.as_deref().map_or(FieldValue::Missing, FieldValue::Text)
        }
        fn number<T: Into<i64> + Copy>(value: Option<T>) -> FieldValue<'static> {
            value.map_or(FieldValue::Missing, |v| FieldValue::Number(v.into()))
        }

        match field {
            TrackField::Name => text(&self.name),
            TrackField::Artist => text(&self.artist),
            TrackField::Album => text(&self.album),
            TrackField::AlbumArtist => text(&self.album_artist),
            TrackField::Composer => text(&self.composer),
            TrackField::Genre => text(&self.genre),
            TrackField::TrackNumber => number(self.track_number),
            TrackField::DiscNumber => number(self.disc_number),
            TrackField::Year => number(self.year),
            TrackField::TotalTime => {
                self.total_time.map_or(FieldValue::Missing, |v| FieldValue::Number(v as i64))
            }
            TrackField::Rating => number(self.rating),
            TrackField::PlayCount => FieldValue::Number(self.play_count.into()),
            TrackField::DateAdded => self
                .date_added
                .map_or(FieldValue::Missing, |d| FieldValue::Number(d.timestamp_millis())),
        }
    }

    /// Text value of a column, `None` for numeric or missing columns
    pub fn text(&self, field: TrackField) -> Option<&str> {
        match self.field(field) {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}
