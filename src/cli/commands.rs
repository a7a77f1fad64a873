use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::browser::{Action, TrackList};
use crate::filters::{Facet, parse_query};
use crate::models::Track;
use crate::parsers::load_library;
use crate::sort::SortRequest;

#[derive(Parser)]
#[command(name = "track-browser")]
#[command(version = "0.1.0")]
#[command(about = "Filter, sort and inspect a music library", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the visible tracks in display order
    List {
        /// Library file (JSON array or JSON Lines)
        #[arg(env = "TRACK_BROWSER_LIBRARY")]
        library: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Print the option list of a facet
    Facets {
        #[arg(env = "TRACK_BROWSER_LIBRARY")]
        library: PathBuf,

        /// genre, artist or album
        facet: Facet,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show statistics about a library
    Stats {
        #[arg(env = "TRACK_BROWSER_LIBRARY")]
        library: PathBuf,
    },
}

/// Facet values and ordering shared by `list` and `facets`
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Words every listed track must contain
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub genre: Vec<String>,

    #[arg(long)]
    pub artist: Vec<String>,

    #[arg(long)]
    pub album: Vec<String>,

    /// Combined query, e.g. `genre:rock artist:"pink floyd" money`
    #[arg(long, short)]
    pub query: Option<String>,

    /// Sort column, optionally prefixed with + or - (e.g. `-year`)
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<SortRequest>,
}

impl FilterArgs {
    /// Reduce `list` through every facet and the sort described by these arguments
    pub fn apply(&self, list: TrackList) -> Result<TrackList> {
        let mut values: [Vec<String>; 4] = Default::default();
        values[Facet::Search.index()].extend(self.search.iter().cloned());
        values[Facet::Genre.index()].extend(self.genre.iter().cloned());
        values[Facet::Artist.index()].extend(self.artist.iter().cloned());
        values[Facet::Album.index()].extend(self.album.iter().cloned());

        if let Some(query) = &self.query {
            let query = parse_query(query).context("Invalid --query")?;
            for facet in Facet::ALL {
                values[facet.index()].extend(query.values(facet));
            }
        }

        let mut list = list;
        for facet in Facet::ALL {
            let facet_values = std::mem::take(&mut values[facet.index()]);
            if !facet_values.is_empty() {
                list = list.reduce(Action::ApplyFacet { facet, values: facet_values }).state;
            }
        }
        if let Some(request) = self.sort {
            list = list.reduce(Action::Sort(request)).state;
        }
        Ok(list)
    }
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::List { library, filters }) => list_tracks(library, filters)?,
        Some(Commands::Facets { library, facet, filters }) => list_facet(library, *facet, filters)?,
        Some(Commands::Stats { library }) => show_stats(library)?,
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn open_list(library: &Path, filters: &FilterArgs) -> Result<TrackList> {
    let tracks = load_library(library)?;
    filters.apply(TrackList::new(tracks))
}

fn list_tracks(library: &Path, filters: &FilterArgs) -> Result<()> {
    let list = open_list(library, filters)?;

    for (position, track) in list.display_tracks().iter().enumerate() {
        println!("{:>5}  {}", position + 1, describe(track));
    }
    println!();
    println!("{} of {} tracks ({})", list.display_tracks().len(), list.len(), list.sort_state());

    info!(visible = list.display_tracks().len(), total = list.len(), "listed tracks");
    Ok(())
}

fn list_facet(library: &Path, facet: Facet, filters: &FilterArgs) -> Result<()> {
    if facet == Facet::Search {
        bail!("The search facet has no option list (use genre, artist or album)");
    }
    let list = open_list(library, filters)?;

    for option in list.facet_options(facet) {
        let marker = if option.selected { "[x]" } else { "[ ]" };
        println!("{} {}", marker, option.label);
    }

    info!(%facet, options = list.facet_options(facet).len(), "listed facet options");
    Ok(())
}

fn show_stats(library: &Path) -> Result<()> {
    let list = TrackList::new(load_library(library)?);
    let tracks = list.display_tracks();

    // the "All" row is not a value
    let distinct = |facet: Facet| list.facet_options(facet).len().saturating_sub(1);
    let ids: HashSet<&str> = tracks.iter().map(|t| t.persistent_id.as_str()).collect();
    let total_ms: u64 = tracks.iter().filter_map(|t| t.total_time).sum();
    let plays: u64 = tracks.iter().map(|t| u64::from(t.play_count)).sum();

    println!("Track Library Statistics");
    println!("========================");
    println!("Total tracks: {}", list.len());
    if ids.len() != list.len() {
        println!("  Unique ids: {}", ids.len());
    }
    println!("  Genres: {}", distinct(Facet::Genre));
    println!("  Artists: {}", distinct(Facet::Artist));
    println!("  Albums: {}", distinct(Facet::Album));
    println!("Total time: {}", format_duration(total_ms));
    println!("Total plays: {}", plays);
    println!();
    println!("Library file: {}", library.display());

    let added = tracks.iter().filter_map(|t| t.date_added);
    if let Some(oldest) = added.clone().min() {
        println!("Oldest addition: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = added.max() {
        println!("Newest addition: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }

    info!(tracks = list.len(), "computed library statistics");
    Ok(())
}

fn describe(track: &Track) -> String {
    let name = track.name.as_deref().unwrap_or("(untitled)");
    let artist = track.artist.as_deref().or(track.album_artist.as_deref()).unwrap_or("-");
    let album = track.album.as_deref().unwrap_or("-");
    match track.genre.as_deref() {
        Some(genre) => format!("{} - {} - {} [{}]", name, artist, album, genre),
        None => format!("{} - {} - {}", name, artist, album),
    }
}

/// Format milliseconds as `H:MM:SS`
fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}:{:02}", seconds / 3600, (seconds / 60) % 60, seconds % 60)
}
