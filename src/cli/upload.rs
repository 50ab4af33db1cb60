use std::path::PathBuf;

use crate::{
    association::{self, ParentSelection},
    catalog::{HttpCatalog, ResourceKind},
    error,
    error::CatalogError,
    info,
    search::SearchSession,
    success,
    types::{Album, Artist, NewSong},
    warning,
};

use super::{fail, load_all, pick};

/// Uploads a song file and credits it to every artist in `artist_queries`.
///
/// Each query must resolve to one artist before anything is sent. Once the
/// song exists, artists that could not be linked are reported but the song
/// is kept.
pub async fn upload(
    title: String,
    file: PathBuf,
    year: Option<i32>,
    album_query: Option<String>,
    album_id: Option<i64>,
    artist_queries: Vec<String>,
) {
    if !file.is_file() {
        error!("No such file: {}", file.display());
    }

    let service = HttpCatalog::from_env().await;

    let mut selection = ParentSelection::new();
    if !artist_queries.is_empty() {
        let artists: Vec<Artist> = load_all(&service, ResourceKind::Artists).await;
        let mut session = SearchSession::new(artists);
        for query in &artist_queries {
            let artist = pick(&mut session, "artist", query);
            if !selection.add_from(&session) {
                info!("{} is already selected", artist.name);
            }
        }
    }

    let album_id = match (album_id, album_query) {
        (Some(id), _) => Some(id),
        (None, Some(query)) => {
            let albums: Vec<Album> = load_all(&service, ResourceKind::Albums).await;
            let mut session = SearchSession::new(albums);
            Some(pick(&mut session, "album", &query).id)
        }
        (None, None) => None,
    };

    let song = NewSong {
        title: title.clone(),
        year,
        album_id,
        file,
    };

    match association::upload_song(&service, song, &selection).await {
        Ok(id) => success!(
            "Uploaded {} (#{}) with {} artist(s)",
            title,
            id,
            selection.len()
        ),
        Err(CatalogError::PartialLink {
            created_id,
            failed_parent_ids,
        }) => {
            let missing = selection
                .parents()
                .iter()
                .filter(|p| failed_parent_ids.contains(&p.id))
                .map(|p| format!("{} (#{})", p.name, p.id))
                .collect::<Vec<_>>()
                .join(", ");
            warning!(
                "Uploaded {} (#{}) but could not credit: {}",
                title,
                created_id,
                missing
            );
        }
        Err(e) => fail(&e),
    }
}
