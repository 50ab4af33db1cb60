//! # CLI Module
//!
//! This module provides the command-line interface layer for harmonycli. It
//! plays the role of the view layer: it loads candidates, renders tables,
//! turns user input into searches and selections, and reports the typed
//! results of the core operations.
//!
//! ## Command Categories
//!
//! ### Session
//!
//! - [`login`] / [`logout`] - Obtain or forget the catalog token
//!
//! ### Listing
//!
//! - [`list_songs`], [`list_artists`], [`list_albums`], [`list_playlists`] -
//!   Fetch a whole collection and print it, optionally filtered by a query
//!
//! ### Playback
//!
//! - [`play`] - Play one song and drive the transport from stdin
//!
//! ### Linking
//!
//! - [`add_to_playlist`] - Put an existing song into a playlist
//! - [`upload`] - Upload a song and credit it to one or more artists
//! - [`create_album`] - Create an album for an artist
//! - [`create_artist`], [`create_playlist`] - Plain entity creation
//! - [`edit_playlist`] - Rename a playlist or change its description
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (tables, prompts, messages)
//!     ↓
//! Search / Association / Playback
//!     ↓
//! Catalog Fetcher
//!     ↓
//! HttpCatalog (HarmonyHub REST API)
//! ```
//!
//! ## Error Presentation
//!
//! Failures that leave nothing useful to do end the program through
//! [`crate::error!`]. A partial link batch is only a warning: the created
//! entity exists and the user is told which parents are missing.

use serde::de::DeserializeOwned;

use crate::{
    catalog::{self, HttpCatalog, ResourceKind},
    config, error,
    error::CatalogError,
    search::{self, SearchSession},
    types::Entity,
    utils,
};

mod albums;
mod artists;
mod auth;
mod playlist;
mod songs;
mod upload;

pub use albums::create_album;
pub use albums::list_albums;
pub use artists::create_artist;
pub use artists::list_artists;
pub use auth::login;
pub use auth::logout;
pub use playlist::add_to_playlist;
pub use playlist::create_playlist;
pub use playlist::edit_playlist;
pub use playlist::list_playlists;
pub use songs::list_songs;
pub use songs::play;
pub use upload::upload;

/// Fetches a whole collection behind a spinner, or exits with a message.
async fn load_all<T>(service: &HttpCatalog, kind: ResourceKind) -> Vec<T>
where
    T: DeserializeOwned + Send,
{
    let pb = utils::spinner(format!("Fetching {}...", kind));
    let result = catalog::fetch_all::<T, _>(service, kind, config::page_size()).await;
    pb.finish_and_clear();

    match result {
        Ok(items) => items,
        Err(e) => fail(&e),
    }
}

/// Resolves `query` to exactly one entity of `session`.
///
/// A single hit is taken as is; among several hits an exact (case-insensitive)
/// name match wins. Anything else ends the program with the candidates listed.
fn pick<E>(session: &mut SearchSession<E>, what: &str, query: &str) -> E
where
    E: Entity + Clone,
{
    session.set_query(query);
    let hits = session.filtered();

    let chosen = match hits.as_slice() {
        [only] => Some(only.clone()),
        _ => hits
            .iter()
            .find(|e| search::same_name(e.display_name(), query))
            .cloned(),
    };

    match chosen {
        Some(entity) => {
            session.select(entity.clone());
            entity
        }
        None if hits.is_empty() => error!("No {} matches '{}'", what, query),
        None => {
            let names = hits
                .iter()
                .map(|e| format!("{} (#{})", e.display_name(), e.id()))
                .collect::<Vec<_>>()
                .join(", ");
            error!("'{}' matches several {}s: {}", query, what, names)
        }
    }
}

fn fail(err: &CatalogError) -> ! {
    error!("{}", err)
}
