use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::types::{
    Album, AlbumTableRow, Artist, ArtistTableRow, Entity, Playlist, PlaylistTableRow,
    SongTableRow, Track,
};

const NOT_AVAILABLE: &str = "N/A";

/// Spinner shown while a long catalog request is running.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn remove_duplicates<E: Entity>(entities: &mut Vec<E>) {
    let mut seen_ids = HashSet::new();
    entities.retain(|entity| seen_ids.insert(entity.id()));
}

pub fn sort_by_display_name<E: Entity>(entities: &mut [E]) {
    entities.sort_by(|a, b| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
            .then(a.id().cmp(&b.id()))
    });
}

/// Formats seconds as `m:ss`, or `N/A` when unknown.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s.round() as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn song_rows(tracks: Vec<Track>) -> Vec<SongTableRow> {
    tracks
        .into_iter()
        .map(|t| SongTableRow {
            id: t.id,
            title: t.title,
            artists: or_na(Some(t.artist_names.join(", "))),
            album: or_na(t.album_title),
            year: or_na(t.year.map(|y| y.to_string())),
            duration: format_duration(t.duration_seconds),
        })
        .collect()
}

pub fn artist_rows(artists: Vec<Artist>) -> Vec<ArtistTableRow> {
    artists
        .into_iter()
        .map(|a| ArtistTableRow {
            id: a.id,
            name: a.name,
            website: or_na(a.website),
        })
        .collect()
}

pub fn album_rows(albums: Vec<Album>) -> Vec<AlbumTableRow> {
    albums
        .into_iter()
        .map(|a| AlbumTableRow {
            id: a.id,
            title: a.title,
            year: or_na(a.year.map(|y| y.to_string())),
            artist: or_na(a.artist_id.map(|id| id.to_string())),
        })
        .collect()
}

pub fn playlist_rows(playlists: Vec<Playlist>) -> Vec<PlaylistTableRow> {
    playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            description: or_na(p.description),
        })
        .collect()
}
