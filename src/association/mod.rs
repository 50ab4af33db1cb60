//! # Association Module
//!
//! Writes the links between catalog entities, plus the one in-place edit the
//! client offers (playlist name and description). Two link shapes exist:
//!
//! - **Direct link**: both entities already exist (song into playlist). One
//!   link record is submitted; on failure nothing is kept locally.
//! - **Create-then-link**: the child does not exist yet (a new song credited
//!   to several artists). The child is created first and, only once its id is
//!   known, one link per selected parent is submitted.
//!
//! The catalog service has no transactions and no way to delete a half
//! linked child, so create-then-link is a two step saga: link failures are
//! collected per parent and reported as `CatalogError::PartialLink` with the
//! created id, never rolled back. Unlike the page fetch, this is not
//! all-or-nothing.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    catalog::{self, CatalogService, ResourceKind},
    error::CatalogError,
    types::{LinkKind, LinkRecord, NewAlbum, NewEntity, NewSong, Playlist, PlaylistEdit},
};

mod selection;

pub use selection::{ParentSelection, SelectedParent};

/// Submits one link record.
///
/// # Errors
///
/// - `CatalogError::Link` naming both ids and the status on failure
/// - `CatalogError::Auth` when the service answers 401
pub async fn link<S>(service: &S, record: &LinkRecord) -> Result<(), CatalogError>
where
    S: CatalogService + ?Sized,
{
    debug!(kind = ?record.kind, parent = record.parent_id, child = record.child_id, "linking");
    service
        .link(record)
        .await
        .map_err(|err| CatalogError::link(record.parent_id, record.child_id, err))
}

pub async fn add_song_to_playlist<S>(
    service: &S,
    song_id: i64,
    playlist_id: i64,
) -> Result<(), CatalogError>
where
    S: CatalogService + ?Sized,
{
    link(service, &LinkRecord::playlist_entry(playlist_id, song_id)).await
}

/// Creates an entity and returns its new id.
pub async fn create_entity<S>(service: &S, entity: &NewEntity) -> Result<i64, CatalogError>
where
    S: CatalogService + ?Sized,
{
    let kind = entity.kind();
    let record = service
        .create(entity)
        .await
        .map_err(|err| CatalogError::create(kind, err))?;

    created_id(kind, &record)
}

/// Creates `child`, then links it to every parent in `parents`.
///
/// Links are submitted one after the other; a failing parent does not stop
/// the remaining ones. An unauthorized link does: the child stays created and
/// no further link is attempted.
///
/// # Returns
///
/// - `Ok(id)` - Child created and every parent linked
/// - `Err(CatalogError::Create)` - Child not created, no link attempted
/// - `Err(CatalogError::PartialLink)` - Child created, the listed parents failed
/// - `Err(CatalogError::Auth)` - The create or a link request was rejected as unauthorized
pub async fn create_then_link<S>(
    service: &S,
    child: &NewEntity,
    parents: &ParentSelection,
    link_kind: LinkKind,
) -> Result<i64, CatalogError>
where
    S: CatalogService + ?Sized,
{
    let created_id = create_entity(service, child).await?;
    debug!(kind = %child.kind(), created_id, parents = parents.len(), "child created");

    let mut failed_parent_ids = Vec::new();
    for parent_id in parents.ids() {
        let record = LinkRecord::new(link_kind, parent_id, created_id);
        match link(service, &record).await {
            Ok(()) => {}
            // the remaining links would be rejected the same way
            Err(CatalogError::Auth) => {
                warn!(parent_id, created_id, "link rejected as unauthorized");
                return Err(CatalogError::Auth);
            }
            Err(err) => {
                warn!(parent_id, created_id, %err, "link failed");
                failed_parent_ids.push(parent_id);
            }
        }
    }

    if failed_parent_ids.is_empty() {
        Ok(created_id)
    } else {
        Err(CatalogError::PartialLink {
            created_id,
            failed_parent_ids,
        })
    }
}

/// Uploads a song and credits it to the selected artists.
pub async fn upload_song<S>(
    service: &S,
    song: NewSong,
    artists: &ParentSelection,
) -> Result<i64, CatalogError>
where
    S: CatalogService + ?Sized,
{
    create_then_link(service, &NewEntity::Song(song), artists, LinkKind::SongArtist).await
}

/// Creates an album owned by `album.artist_id`.
///
/// The artist reference travels inside the create request, so there is no
/// separate link step that could fail on its own.
pub async fn create_album_for_artist<S>(service: &S, album: NewAlbum) -> Result<i64, CatalogError>
where
    S: CatalogService + ?Sized,
{
    create_entity(service, &NewEntity::Album(album)).await
}

/// Renames a playlist or replaces its description.
///
/// The stored playlist is read first so that the fields left out of `edit`
/// are sent back unchanged. An empty edit only reads.
///
/// # Errors
///
/// - `CatalogError::Fetch` when the playlist cannot be read
/// - `CatalogError::Update` when the service rejects the write
/// - `CatalogError::Auth` when either request answers 401
pub async fn edit_playlist<S>(
    service: &S,
    playlist_id: i64,
    edit: &PlaylistEdit,
) -> Result<Playlist, CatalogError>
where
    S: CatalogService + ?Sized,
{
    let kind = ResourceKind::Playlists;
    let current: Playlist = catalog::fetch_one(service, kind, playlist_id).await?;
    if edit.is_empty() {
        return Ok(current);
    }

    let stored = service
        .update(kind, playlist_id, &edit.apply(&current))
        .await
        .map_err(|err| CatalogError::update(kind, playlist_id, err))?;
    debug!(playlist_id, "playlist updated");

    serde_json::from_value(stored).map_err(|e| {
        warn!(playlist_id, error = %e, "cannot decode updated playlist");
        CatalogError::Update {
            kind,
            id: playlist_id,
            http_status: None,
        }
    })
}

fn created_id(kind: ResourceKind, record: &Value) -> Result<i64, CatalogError> {
    record.get("id").and_then(Value::as_i64).ok_or_else(|| {
        warn!(%kind, "create response carries no id");
        CatalogError::Create {
            kind,
            http_status: None,
        }
    })
}
