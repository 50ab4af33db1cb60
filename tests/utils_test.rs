use harmonycli::types::{Album, Artist, Playlist, Track};
use harmonycli::utils::*;

// Helper function to create a test artist
fn create_test_artist(id: i64, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        bio: None,
        website: None,
        image: None,
    }
}

// Helper function to create a test track
fn create_test_track(id: i64, title: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        media_uri: format!("https://cdn.example/{}.mp3", id),
        duration_seconds: Some(185.0),
        artist_names: vec!["Nina Simone".to_string(), "Miles Davis".to_string()],
        album_title: None,
        year: Some(1965),
        cover: None,
    }
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Some(0.0)), "0:00");
    assert_eq!(format_duration(Some(59.4)), "0:59");
    assert_eq!(format_duration(Some(125.0)), "2:05");
    assert_eq!(format_duration(Some(3600.0)), "60:00");
}

#[test]
fn test_format_duration_unknown() {
    assert_eq!(format_duration(None), "N/A");
    assert_eq!(format_duration(Some(-1.0)), "N/A");
    assert_eq!(format_duration(Some(f64::NAN)), "N/A");
}

#[test]
fn test_remove_duplicates() {
    let mut artists = vec![
        create_test_artist(1, "Nina Simone"),
        create_test_artist(2, "Miles Davis"),
        create_test_artist(1, "Nina Simone"),
        create_test_artist(3, "Chet Baker"),
        create_test_artist(2, "Miles Davis"),
    ];

    remove_duplicates(&mut artists);

    let ids: Vec<i64> = artists.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_remove_duplicates_empty() {
    let mut artists: Vec<Artist> = Vec::new();
    remove_duplicates(&mut artists);
    assert!(artists.is_empty());
}

#[test]
fn test_sort_by_display_name() {
    let mut artists = vec![
        create_test_artist(3, "nina simone"),
        create_test_artist(1, "Miles Davis"),
        create_test_artist(2, "Chet Baker"),
        create_test_artist(4, "chet baker"),
    ];

    sort_by_display_name(&mut artists);

    let ids: Vec<i64> = artists.iter().map(|a| a.id).collect();
    // equal names fall back to id order
    assert_eq!(ids, vec![2, 4, 1, 3]);
}

#[test]
fn test_song_rows() {
    let rows = song_rows(vec![create_test_track(7, "Blue")]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 7);
    assert_eq!(rows[0].artists, "Nina Simone, Miles Davis");
    assert_eq!(rows[0].album, "N/A");
    assert_eq!(rows[0].year, "1965");
    assert_eq!(rows[0].duration, "3:05");
}

#[test]
fn test_song_rows_without_artists() {
    let mut track = create_test_track(8, "Demo");
    track.artist_names.clear();
    track.duration_seconds = None;

    let rows = song_rows(vec![track]);

    assert_eq!(rows[0].artists, "N/A");
    assert_eq!(rows[0].duration, "N/A");
}

#[test]
fn test_album_and_playlist_rows() {
    let albums = album_rows(vec![Album {
        id: 1,
        title: "Kind of Blue".to_string(),
        year: None,
        cover: None,
        artist_id: Some(2),
    }]);
    assert_eq!(albums[0].year, "N/A");
    assert_eq!(albums[0].artist, "2");

    let playlists = playlist_rows(vec![Playlist {
        id: 5,
        name: "Late Night".to_string(),
        description: Some("  ".to_string()),
        public: Some(true),
    }]);
    assert_eq!(playlists[0].description, "N/A");
}

#[test]
fn test_artist_rows() {
    let mut artist = create_test_artist(1, "Nina Simone");
    artist.website = Some("https://ninasimone.com".to_string());

    let rows = artist_rows(vec![artist, create_test_artist(2, "Miles Davis")]);

    assert_eq!(rows[0].website, "https://ninasimone.com");
    assert_eq!(rows[1].website, "N/A");
}
