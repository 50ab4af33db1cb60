use std::sync::Arc;

use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    catalog::{self, HttpCatalog, ResourceKind},
    error, info,
    playback::{
        PlayOutcome, PlaybackController, PlaybackSession, RodioBackend, SKIP_SECONDS,
    },
    search, success,
    types::Track,
    utils, warning,
};

use super::{fail, load_all};

pub async fn list_songs(search_term: Option<String>) {
    let service = HttpCatalog::from_env().await;
    let mut songs: Vec<Track> = load_all(&service, ResourceKind::Songs).await;

    // rows without a media file cannot be played and are not listed
    songs.retain(Track::is_playable);
    utils::remove_duplicates(&mut songs);

    if let Some(term) = search_term {
        songs = search::filter(&songs, &term);
    }

    if songs.is_empty() {
        warning!("No playable songs found");
        return;
    }

    println!("{}", Table::new(utils::song_rows(songs)));
}

/// Plays one song and reads transport commands from stdin until `q`.
pub async fn play(song_id: i64) {
    let service = HttpCatalog::from_env().await;
    let track: Track = match catalog::fetch_one(&service, ResourceKind::Songs, song_id).await {
        Ok(track) => track,
        Err(e) => fail(&e),
    };

    if !track.is_playable() {
        error!("Song #{} has no media file", track.id);
    }

    let backend = match RodioBackend::open() {
        Ok(backend) => backend,
        Err(e) => error!("Cannot open audio output: {}", e),
    };
    let controller = Arc::new(PlaybackController::new(backend));
    let sessions = controller.subscribe();

    info!("{} - {}", track.title, track.artist_names.join(", "));
    info!("Commands: p play/pause, f forward, b rewind, s <sec> seek, v <0-1> volume, x stop, q quit");

    toggle(&controller, &track).await;
    render(&track, &sessions.borrow());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input: {}", e);
                break;
            }
        };

        controller.tick().await;

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("p"), _) => toggle(&controller, &track).await,
            (Some("f"), _) => {
                controller.seek_relative(SKIP_SECONDS).await;
            }
            (Some("b"), _) => {
                controller.seek_relative(-SKIP_SECONDS).await;
            }
            (Some("s"), Some(arg)) => match arg.parse::<f64>() {
                Ok(seconds) => {
                    controller.seek_to(seconds).await;
                }
                Err(_) => warning!("Not a number of seconds: {}", arg),
            },
            (Some("v"), Some(arg)) => match arg.parse::<f32>() {
                Ok(volume) => {
                    controller.set_volume(volume).await;
                }
                Err(_) => warning!("Not a volume: {}", arg),
            },
            (Some("x"), _) => controller.stop().await,
            (Some("q"), _) => break,
            (None, _) => {}
            _ => warning!("Unknown command: {}", line.trim()),
        }

        render(&track, &sessions.borrow());
    }

    controller.stop().await;
}

async fn toggle(controller: &PlaybackController<RodioBackend>, track: &Track) {
    match controller.play(track).await {
        Ok(PlayOutcome::Playing) => success!("Playing {}", track.title),
        Ok(PlayOutcome::Paused) => info!("Paused {}", track.title),
        Ok(PlayOutcome::Superseded) => {}
        Err(e) => warning!("{}", e),
    }
}

fn render(track: &Track, session: &PlaybackSession) {
    let label = if session.is_playing_track(track.id) {
        "playing"
    } else if session.is_active(track.id) {
        "paused"
    } else {
        "stopped"
    };

    let duration = (session.duration_seconds > 0.0).then_some(session.duration_seconds);
    info!(
        "[{}] {} / {}  vol {:.0}%",
        label,
        utils::format_duration(Some(session.position_seconds)),
        utils::format_duration(duration),
        session.volume * 100.0
    );
}
