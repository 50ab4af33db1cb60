use tabled::Table;

use crate::{
    association,
    catalog::{HttpCatalog, ResourceKind},
    error,
    search::{self, SearchSession},
    success,
    types::{NewEntity, NewPlaylist, Playlist, PlaylistEdit},
    utils, warning,
};

use super::{fail, load_all, pick};

pub async fn list_playlists(search_term: Option<String>) {
    let service = HttpCatalog::from_env().await;
    let mut playlists: Vec<Playlist> = load_all(&service, ResourceKind::Playlists).await;

    utils::remove_duplicates(&mut playlists);
    utils::sort_by_display_name(&mut playlists);

    if let Some(term) = search_term {
        playlists = search::filter(&playlists, &term);
    }

    if playlists.is_empty() {
        warning!("No playlists found");
        return;
    }

    println!("{}", Table::new(utils::playlist_rows(playlists)));
}

pub async fn create_playlist(name: String, description: Option<String>, public: bool) {
    let service = HttpCatalog::from_env().await;
    let playlist = NewEntity::Playlist(NewPlaylist {
        name: name.clone(),
        description,
        public,
    });

    match association::create_entity(&service, &playlist).await {
        Ok(id) => success!("Created playlist {} (#{})", name, id),
        Err(e) => fail(&e),
    }
}

/// Renames a playlist and/or replaces its description.
pub async fn edit_playlist(playlist_id: i64, name: Option<String>, description: Option<String>) {
    let edit = PlaylistEdit { name, description };
    if edit.is_empty() {
        error!("Nothing to change, pass --name and/or --description");
    }

    let service = HttpCatalog::from_env().await;
    match association::edit_playlist(&service, playlist_id, &edit).await {
        Ok(playlist) => {
            success!("Updated playlist {} (#{})", playlist.name, playlist.id);
            println!("{}", Table::new(utils::playlist_rows(vec![playlist])));
        }
        Err(e) => fail(&e),
    }
}

/// Adds an existing song to a playlist given either by id or by name.
pub async fn add_to_playlist(
    song_id: i64,
    playlist_query: Option<String>,
    playlist_id: Option<i64>,
) {
    let service = HttpCatalog::from_env().await;

    let (playlist_id, label) = match (playlist_id, playlist_query) {
        (Some(id), _) => (id, format!("#{}", id)),
        (None, Some(query)) => {
            let playlists: Vec<Playlist> = load_all(&service, ResourceKind::Playlists).await;
            let mut session = SearchSession::new(playlists);
            let playlist = pick(&mut session, "playlist", &query);
            (playlist.id, playlist.name)
        }
        (None, None) => error!("Name the playlist with --playlist or --playlist-id"),
    };

    match association::add_song_to_playlist(&service, song_id, playlist_id).await {
        Ok(()) => success!("Song #{} added to playlist {}", song_id, label),
        Err(e) => fail(&e),
    }
}
