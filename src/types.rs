use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Anything that can be listed, searched and picked by the user.
pub trait Entity {
    fn id(&self) -> i64;
    fn display_name(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub id: i64,
    pub title: String,
    #[serde(rename = "song_file", default, deserialize_with = "null_as_empty")]
    pub media_uri: String,
    #[serde(rename = "duration", default)]
    pub duration_seconds: Option<f64>,
    #[serde(rename = "artists", default, deserialize_with = "names_or_ids")]
    pub artist_names: Vec<String>,
    #[serde(rename = "album", default, deserialize_with = "opt_name_or_id")]
    pub album_title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover: Option<String>,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        !self.media_uri.trim().is_empty()
    }
}

impl Entity for Track {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Entity for Artist {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Album {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(rename = "artist", default)]
    pub artist_id: Option<i64>,
}

impl Entity for Album {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
}

impl Entity for Playlist {
    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// One page of a paginated list read, before the records are decoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// Song (child) in playlist (parent).
    PlaylistEntry,
    /// Artist (parent) credited on song (child).
    SongArtist,
}

/// A directed association submitted once to the catalog service.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub kind: LinkKind,
    pub parent_id: i64,
    pub child_id: i64,
    pub order: Option<u32>,
    pub role: Option<String>,
}

pub const DEFAULT_ENTRY_ORDER: u32 = 1;
pub const DEFAULT_ARTIST_ROLE: &str = "Artista";

impl LinkRecord {
    pub fn playlist_entry(playlist_id: i64, song_id: i64) -> Self {
        Self {
            kind: LinkKind::PlaylistEntry,
            parent_id: playlist_id,
            child_id: song_id,
            order: Some(DEFAULT_ENTRY_ORDER),
            role: None,
        }
    }

    pub fn song_artist(artist_id: i64, song_id: i64) -> Self {
        Self {
            kind: LinkKind::SongArtist,
            parent_id: artist_id,
            child_id: song_id,
            order: None,
            role: Some(DEFAULT_ARTIST_ROLE.to_string()),
        }
    }

    /// Association of `kind` with the default extra fields.
    pub fn new(kind: LinkKind, parent_id: i64, child_id: i64) -> Self {
        match kind {
            LinkKind::PlaylistEntry => Self::playlist_entry(parent_id, child_id),
            LinkKind::SongArtist => Self::song_artist(parent_id, child_id),
        }
    }

    pub fn body(&self) -> Value {
        match self.kind {
            LinkKind::PlaylistEntry => serde_json::json!({
                "order": self.order.unwrap_or(DEFAULT_ENTRY_ORDER),
                "playlist": self.parent_id,
                "song": self.child_id,
            }),
            LinkKind::SongArtist => serde_json::json!({
                "song": self.child_id,
                "artist": self.parent_id,
                "role": self.role.as_deref().unwrap_or(DEFAULT_ARTIST_ROLE),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub title: String,
    pub year: Option<i32>,
    pub album_id: Option<i64>,
    pub file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAlbum {
    pub title: String,
    pub year: Option<i32>,
    pub artist_id: i64,
    pub cover: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub name: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPlaylist {
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
}

/// Changes to an existing playlist. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistEdit {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PlaylistEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Full `{ name, description }` body with the edit laid over `current`.
    pub fn apply(&self, current: &Playlist) -> Value {
        serde_json::json!({
            "name": self.name.as_deref().unwrap_or(&current.name),
            "description": self.description.as_ref().or(current.description.as_ref()),
        })
    }
}

/// Payload of an entity create request.
#[derive(Debug, Clone, PartialEq)]
pub enum NewEntity {
    Song(NewSong),
    Album(NewAlbum),
    Artist(NewArtist),
    Playlist(NewPlaylist),
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub id: i64,
    pub title: String,
    pub artists: String,
    pub album: String,
    pub year: String,
    pub duration: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub id: i64,
    pub name: String,
    pub website: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: i64,
    pub title: String,
    pub year: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: i64,
    pub name: String,
    pub description: String,
}

// The service sends related entities either as ids or as names.
fn name_or_id(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map
            .get("name")
            .or_else(|| map.get("title"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn names_or_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.into_iter().filter_map(name_or_id).collect())
}

fn opt_name_or_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(name_or_id))
}
