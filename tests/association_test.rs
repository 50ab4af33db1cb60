mod common;

use std::path::PathBuf;

use common::{FIRST_CREATED_ID, FakeCatalog, artist};
use serde_json::json;
use harmonycli::{
    association::{self, ParentSelection},
    catalog::ResourceKind,
    error::{CatalogError, ServiceError},
    search::SearchSession,
    types::{LinkKind, LinkRecord, NewAlbum, NewEntity, NewSong, PlaylistEdit},
};

fn new_song(title: &str) -> NewSong {
    NewSong {
        title: title.to_string(),
        year: Some(2024),
        album_id: None,
        file: PathBuf::from("demo.mp3"),
    }
}

fn three_artists() -> ParentSelection {
    let mut selection = ParentSelection::new();
    selection.add(&artist(1, "Nina Simone"));
    selection.add(&artist(2, "Miles Davis"));
    selection.add(&artist(3, "Chet Baker"));
    selection
}

#[tokio::test]
async fn test_upload_links_every_selected_artist() {
    let service = FakeCatalog::new();

    let id = association::upload_song(&service, new_song("Blue"), &three_artists())
        .await
        .unwrap();

    assert_eq!(id, FIRST_CREATED_ID);
    let links = service.links();
    assert_eq!(links.len(), 3);
    assert!(links.iter().all(|l| l.kind == LinkKind::SongArtist && l.child_id == id));
    assert_eq!(
        links.iter().map(|l| l.parent_id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(links[0].body()["role"], "Artista");
}

#[tokio::test]
async fn test_partial_link_names_exactly_the_failed_parents() {
    let service = FakeCatalog::new()
        .failing_link(2, ServiceError::Status(500))
        .failing_link(3, ServiceError::Transport("timeout".into()));

    let result = association::upload_song(&service, new_song("Blue"), &three_artists()).await;

    assert_eq!(
        result,
        Err(CatalogError::PartialLink {
            created_id: FIRST_CREATED_ID,
            failed_parent_ids: vec![2, 3],
        })
    );
    // every parent was tried and the created song was kept
    assert_eq!(service.link_attempts().len(), 3);
    assert_eq!(service.links().len(), 1);
    assert_eq!(service.creates().len(), 1);
}

#[tokio::test]
async fn test_failed_create_attempts_no_link() {
    let service = FakeCatalog::new().failing_create(ServiceError::Status(400));

    let result = association::upload_song(&service, new_song("Blue"), &three_artists()).await;

    assert_eq!(
        result,
        Err(CatalogError::Create {
            kind: ResourceKind::Songs,
            http_status: Some(400),
        })
    );
    assert!(service.link_attempts().is_empty());
}

#[tokio::test]
async fn test_unauthorized_create_is_an_auth_error() {
    let service = FakeCatalog::new().failing_create(ServiceError::Unauthorized);

    let result = association::upload_song(&service, new_song("Blue"), &three_artists()).await;

    assert_eq!(result, Err(CatalogError::Auth));
    assert!(service.link_attempts().is_empty());
}

#[tokio::test]
async fn test_unauthorized_link_is_an_auth_error() {
    let service = FakeCatalog::new().failing_link(2, ServiceError::Unauthorized);

    let result = association::upload_song(&service, new_song("Blue"), &three_artists()).await;

    assert_eq!(result, Err(CatalogError::Auth));
    // the song exists, the first artist is linked, nothing after the 401 is tried
    assert_eq!(service.creates().len(), 1);
    assert_eq!(service.links().len(), 1);
    assert_eq!(
        service
            .link_attempts()
            .iter()
            .map(|l| l.parent_id)
            .collect::<Vec<_>>(),
        vec![1, 2]
    );
}

#[tokio::test]
async fn test_create_then_link_without_parents_only_creates() {
    let service = FakeCatalog::new();

    let id = association::create_then_link(
        &service,
        &NewEntity::Song(new_song("Solo")),
        &ParentSelection::new(),
        LinkKind::SongArtist,
    )
    .await
    .unwrap();

    assert_eq!(id, FIRST_CREATED_ID);
    assert!(service.link_attempts().is_empty());
}

#[tokio::test]
async fn test_add_song_to_playlist_submits_one_entry() {
    let service = FakeCatalog::new();

    association::add_song_to_playlist(&service, 9, 4)
        .await
        .unwrap();

    assert_eq!(service.links(), vec![LinkRecord::playlist_entry(4, 9)]);
    assert_eq!(service.links()[0].body()["order"], 1);
}

#[tokio::test]
async fn test_failed_playlist_entry_reports_both_ids() {
    let service = FakeCatalog::new().failing_link(4, ServiceError::Status(404));

    let result = association::add_song_to_playlist(&service, 9, 4).await;

    assert_eq!(
        result,
        Err(CatalogError::Link {
            parent_id: 4,
            child_id: 9,
            http_status: Some(404),
        })
    );
}

#[tokio::test]
async fn test_album_carries_its_artist_in_the_create_request() {
    let service = FakeCatalog::new();
    let album = NewAlbum {
        title: "Kind of Blue".to_string(),
        year: Some(1959),
        artist_id: 2,
        cover: None,
    };

    let id = association::create_album_for_artist(&service, album.clone())
        .await
        .unwrap();

    assert_eq!(id, FIRST_CREATED_ID);
    assert_eq!(service.creates(), vec![NewEntity::Album(album)]);
    assert!(service.link_attempts().is_empty());
}

#[tokio::test]
async fn test_selecting_a_parent_twice_links_it_once() {
    let service = FakeCatalog::new();
    let mut session = SearchSession::new(vec![artist(1, "Nina Simone"), artist(2, "Miles Davis")]);
    let mut selection = ParentSelection::new();

    session.set_query("nin");
    assert!(session.select_by_id(1).is_some());
    assert!(selection.add_from(&session));

    session.set_query("simone");
    assert!(session.select_by_id(1).is_some());
    assert!(!selection.add_from(&session));
    assert_eq!(selection.len(), 1);

    association::upload_song(&service, new_song("Blue"), &selection)
        .await
        .unwrap();

    assert_eq!(service.link_attempts().len(), 1);
}

fn late_night() -> FakeCatalog {
    FakeCatalog::new().with_record(
        ResourceKind::Playlists,
        4,
        json!({ "id": 4, "name": "Late Night", "description": "slow songs", "public": true }),
    )
}

#[tokio::test]
async fn test_edit_playlist_keeps_the_fields_it_does_not_touch() {
    let service = late_night();
    let edit = PlaylistEdit {
        name: Some("After Hours".to_string()),
        description: None,
    };

    let playlist = association::edit_playlist(&service, 4, &edit).await.unwrap();

    assert_eq!(playlist.name, "After Hours");
    assert_eq!(playlist.description.as_deref(), Some("slow songs"));
    assert_eq!(
        service.updates(),
        vec![(
            ResourceKind::Playlists,
            4,
            json!({ "name": "After Hours", "description": "slow songs" })
        )]
    );
    assert_eq!(
        service.record(ResourceKind::Playlists, 4).unwrap()["public"],
        true
    );
}

#[tokio::test]
async fn test_empty_playlist_edit_only_reads() {
    let service = late_night();

    let playlist = association::edit_playlist(&service, 4, &PlaylistEdit::default())
        .await
        .unwrap();

    assert_eq!(playlist.name, "Late Night");
    assert!(service.updates().is_empty());
}

#[tokio::test]
async fn test_editing_a_missing_playlist_writes_nothing() {
    let service = FakeCatalog::new();
    let edit = PlaylistEdit {
        name: Some("After Hours".to_string()),
        description: None,
    };

    let result = association::edit_playlist(&service, 4, &edit).await;

    assert_eq!(
        result,
        Err(CatalogError::Fetch {
            kind: ResourceKind::Playlists,
            http_status: Some(404),
        })
    );
    assert!(service.updates().is_empty());
}

#[tokio::test]
async fn test_rejected_playlist_edit_names_the_playlist() {
    let service = late_night().failing_update(ServiceError::Status(400));
    let edit = PlaylistEdit {
        name: None,
        description: Some("".to_string()),
    };

    let result = association::edit_playlist(&service, 4, &edit).await;

    assert_eq!(
        result,
        Err(CatalogError::Update {
            kind: ResourceKind::Playlists,
            id: 4,
            http_status: Some(400),
        })
    );

    let unauthorized = late_night().failing_update(ServiceError::Unauthorized);
    assert_eq!(
        association::edit_playlist(&unauthorized, 4, &edit).await,
        Err(CatalogError::Auth)
    );
}
