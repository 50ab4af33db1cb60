use std::path::PathBuf;

use tabled::Table;

use crate::{
    association,
    catalog::{HttpCatalog, ResourceKind},
    search::{self, SearchSession},
    success,
    types::{Album, Artist, NewAlbum},
    utils, warning,
};

use super::{fail, load_all, pick};

pub async fn list_albums(search_term: Option<String>) {
    let service = HttpCatalog::from_env().await;
    let mut albums: Vec<Album> = load_all(&service, ResourceKind::Albums).await;

    utils::remove_duplicates(&mut albums);
    utils::sort_by_display_name(&mut albums);

    if let Some(term) = search_term {
        albums = search::filter(&albums, &term);
    }

    if albums.is_empty() {
        warning!("No albums found");
        return;
    }

    println!("{}", Table::new(utils::album_rows(albums)));
}

/// Creates an album owned by the artist `artist_query` resolves to.
pub async fn create_album(
    title: String,
    artist_query: String,
    year: Option<i32>,
    cover: Option<PathBuf>,
) {
    let service = HttpCatalog::from_env().await;
    let artists: Vec<Artist> = load_all(&service, ResourceKind::Artists).await;
    let mut session = SearchSession::new(artists);
    let artist = pick(&mut session, "artist", &artist_query);

    let album = NewAlbum {
        title: title.clone(),
        year,
        artist_id: artist.id,
        cover,
    };

    match association::create_album_for_artist(&service, album).await {
        Ok(id) => success!("Created album {} (#{}) for {}", title, id, artist.name),
        Err(e) => fail(&e),
    }
}
