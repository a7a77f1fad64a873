use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

use anyhow::{Error, anyhow};

use crate::models::TrackField;

/// Independent filter dimension of the track list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// Free-text search over several text columns
    Search,
    Genre,
    Artist,
    Album,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::Search, Facet::Genre, Facet::Artist, Facet::Album];

    /// Facets that expose a selectable option list
    pub const LISTED: [Facet; 3] = [Facet::Genre, Facet::Artist, Facet::Album];

    pub fn index(self) -> usize {
        match self {
            Facet::Search => 0,
            Facet::Genre => 1,
            Facet::Artist => 2,
            Facet::Album => 3,
        }
    }

    pub fn bit(self) -> FacetMask {
        FacetMask(1 << self.index())
    }

    /// Columns an entry is tested against
    pub fn match_fields(self) -> &'static [TrackField] {
        match self {
            Facet::Search => &[
                TrackField::Name,
                TrackField::Album,
                TrackField::Artist,
                TrackField::AlbumArtist,
                TrackField::Composer,
            ],
            Facet::Genre => &[TrackField::Genre],
            Facet::Artist => &[TrackField::Artist, TrackField::AlbumArtist, TrackField::Composer],
            Facet::Album => &[TrackField::Album],
        }
    }

    /// Columns enumerated for the option list
    pub fn option_fields(self) -> &'static [TrackField] {
        match self {
            Facet::Search => &[],
            Facet::Genre => &[TrackField::Genre],
            Facet::Artist => &[TrackField::Artist, TrackField::AlbumArtist],
            Facet::Album => &[TrackField::Album],
        }
    }

    /// Singular and plural display nouns
    pub fn nouns(self) -> (&'static str, &'static str) {
        match self {
            Facet::Search => ("Search", "Search"),
            Facet::Genre => ("Genre", "Genres"),
            Facet::Artist => ("Artist", "Artists"),
            Facet::Album => ("Album", "Albums"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Search => "search",
            Facet::Genre => "genre",
            Facet::Artist => "artist",
            Facet::Album => "album",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" => Ok(Facet::Search),
            "genre" | "genres" => Ok(Facet::Genre),
            "artist" | "artists" => Ok(Facet::Artist),
            "album" | "albums" => Ok(Facet::Album),
            _ => Err(anyhow!(
                "Unknown facet: '{}' (valid facets: search, genre, artist, album)",
                s
            )),
        }
    }
}

/// Set of facets an entry currently fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FacetMask(u8);

impl FacetMask {
    pub const NONE: FacetMask = FacetMask(0);
    pub const ALL: FacetMask = FacetMask(0b1111);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, facet: Facet) -> bool {
        !(self & facet.bit()).is_empty()
    }

    /// Set or clear one facet's bit
    pub fn with(self, facet: Facet, failed: bool) -> FacetMask {
        let cleared = self & !facet.bit();
        if failed { cleared | facet.bit() } else { cleared }
    }

    /// Mask of every facet except `facet`
    pub fn others(facet: Facet) -> FacetMask {
        FacetMask::ALL & !facet.bit()
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for FacetMask {
    type Output = FacetMask;

    fn bitor(self, rhs: FacetMask) -> FacetMask {
        FacetMask(self.0 | rhs.0)
    }
}

impl BitAnd for FacetMask {
    type Output = FacetMask;

    fn bitand(self, rhs: FacetMask) -> FacetMask {
        FacetMask(self.0 & rhs.0)
    }
}

impl Not for FacetMask {
    type Output = FacetMask;

    fn not(self) -> FacetMask {
        FacetMask(!self.0 & FacetMask::ALL.0)
    }
}
