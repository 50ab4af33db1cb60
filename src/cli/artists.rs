use std::path::PathBuf;

use tabled::Table;

use crate::{
    association,
    catalog::{HttpCatalog, ResourceKind},
    search, success,
    types::{Artist, NewArtist, NewEntity},
    utils, warning,
};

use super::{fail, load_all};

pub async fn list_artists(search_term: Option<String>) {
    let service = HttpCatalog::from_env().await;
    let mut artists: Vec<Artist> = load_all(&service, ResourceKind::Artists).await;

    utils::remove_duplicates(&mut artists);
    utils::sort_by_display_name(&mut artists);

    if let Some(term) = search_term {
        artists = search::filter(&artists, &term);
    }

    if artists.is_empty() {
        warning!("No artists found");
        return;
    }

    println!("{}", Table::new(utils::artist_rows(artists)));
}

pub async fn create_artist(
    name: String,
    bio: Option<String>,
    website: Option<String>,
    image: Option<PathBuf>,
) {
    let service = HttpCatalog::from_env().await;
    let artist = NewEntity::Artist(NewArtist {
        name: name.clone(),
        bio,
        website,
        image,
    });

    match association::create_entity(&service, &artist).await {
        Ok(id) => success!("Created artist {} (#{})", name, id),
        Err(e) => fail(&e),
    }
}
