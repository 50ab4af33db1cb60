//! HarmonyHub Catalog Client Library
//!
//! This library provides the building blocks of a catalog browsing and
//! media-linking client for a HarmonyHub catalog service. It lists songs,
//! artists, albums and playlists page by page, keeps exactly one track
//! playing at a time, and links entities together (song to playlist, artists
//! to a freshly uploaded song, artist to album).
//!
//! # Modules
//!
//! - `association` - Direct links and the create-then-link workflow
//! - `catalog` - Catalog service contract, HTTP client and page fetcher
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by the catalog operations
//! - `management` - Local session token storage
//! - `playback` - Single-active-track playback controller
//! - `search` - In-memory entity filtering and selection state
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use harmonycli::{catalog::{self, HttpCatalog, ResourceKind}, config, types::Artist};
//!
//! #[tokio::main]
//! async fn main() -> harmonycli::Res<()> {
//!     config::load_env().await?;
//!     let service = HttpCatalog::from_env().await;
//!     let artists: Vec<Artist> =
//!         catalog::fetch_all(&service, ResourceKind::Artists, config::page_size()).await?;
//!     println!("{} artists", artists.len());
//!     Ok(())
//! }
//! ```

pub mod association;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod playback;
pub mod search;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line plumbing (configuration loading, the token
/// cache) where any error is eventually printed to the user. Library
/// operations return the typed errors from [`error::CatalogError`] and
/// [`playback::PlaybackError`] instead.
///
/// # Example
///
/// ```
/// use harmonycli::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlists...");
/// info!("Found {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to confirm that a write against the catalog service went through,
/// e.g. a created song or a submitted playlist entry.
///
/// # Example
///
/// ```
/// success!("Song {} added to playlist {}", song_id, playlist_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the command-line layer uses this macro. Library code returns typed
/// errors and never terminates the process.
///
/// # Example
///
/// ```
/// error!("Failed to load songs: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. a partially applied link batch.
///
/// # Example
///
/// ```
/// warning!("Artist {} could not be linked", artist_id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
