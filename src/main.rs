use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use harmonycli::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and cache the catalog token
    Login(LoginOptions),

    /// Forget the cached catalog token
    Logout,

    /// List playable songs
    Songs(SearchOptions),

    /// Handle artists
    Artists(ArtistsOptions),

    /// Handle albums
    Albums(AlbumsOptions),

    /// Handle playlists
    Playlists(PlaylistsOptions),

    #[clap(about = "Add songs to a playlist")]
    Playlist(PlaylistOptions),

    /// Play a song and control it from stdin
    Play(PlayOptions),

    /// Upload a song and credit it to artists
    Upload(UploadOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    #[clap(long)]
    pub username: String,

    #[clap(long)]
    pub password: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Only show entries whose name contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle artists",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct ArtistsOptions {
    /// Search for artists
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<ArtistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ArtistsSubcommand {
    /// Create an artist
    Create(ArtistCreateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistCreateOpts {
    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub bio: Option<String>,

    #[clap(long)]
    pub website: Option<String>,

    /// Image file to upload
    #[clap(long)]
    pub image: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle albums", args_conflicts_with_subcommands = true)]
pub struct AlbumsOptions {
    /// Search for albums
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<AlbumsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumsSubcommand {
    /// Create an album for an artist
    Create(AlbumCreateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumCreateOpts {
    #[clap(long)]
    pub title: String,

    /// Artist name (or part of it) owning the album
    #[clap(long)]
    pub artist: String,

    #[clap(long)]
    pub year: Option<i32>,

    /// Cover image to upload
    #[clap(long)]
    pub cover: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle playlists", args_conflicts_with_subcommands = true)]
pub struct PlaylistsOptions {
    /// Search for playlists
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Create a playlist
    Create(PlaylistCreateOpts),
    /// Rename a playlist or change its description
    Edit(PlaylistEditOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistCreateOpts {
    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub description: Option<String>,

    #[clap(long)]
    pub public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistEditOpts {
    #[clap(long)]
    pub id: i64,

    /// New name
    #[clap(long, required_unless_present = "description")]
    pub name: Option<String>,

    /// New description
    #[clap(long)]
    pub description: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Add a song to a playlist
    Add(PlaylistAddOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistAddOpts {
    #[clap(long)]
    pub song: i64,

    /// Playlist name (or part of it)
    #[clap(long, conflicts_with = "playlist_id", required_unless_present = "playlist_id")]
    pub playlist: Option<String>,

    #[clap(long)]
    pub playlist_id: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    pub song_id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct UploadOptions {
    #[clap(long)]
    pub title: String,

    /// Audio file to upload
    #[clap(long)]
    pub file: PathBuf,

    #[clap(long)]
    pub year: Option<i32>,

    /// Album name (or part of it)
    #[clap(long, conflicts_with = "album_id")]
    pub album: Option<String>,

    #[clap(long)]
    pub album_id: Option<i64>,

    /// Artist name (or part of it); can be repeated
    #[clap(long = "artist", action = ArgAction::Append, num_args = 1)]
    pub artists: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config::log_filter()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Login(opt) => cli::login(opt.username, opt.password).await,
        Command::Logout => cli::logout().await,
        Command::Songs(opt) => cli::list_songs(opt.search).await,

        Command::Artists(opt) => match opt.command {
            Some(ArtistsSubcommand::Create(c)) => {
                cli::create_artist(c.name, c.bio, c.website, c.image).await
            }
            None => cli::list_artists(opt.search).await,
        },

        Command::Albums(opt) => match opt.command {
            Some(AlbumsSubcommand::Create(c)) => {
                cli::create_album(c.title, c.artist, c.year, c.cover).await
            }
            None => cli::list_albums(opt.search).await,
        },

        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Create(c)) => {
                cli::create_playlist(c.name, c.description, c.public).await
            }
            Some(PlaylistsSubcommand::Edit(e)) => {
                cli::edit_playlist(e.id, e.name, e.description).await
            }
            None => cli::list_playlists(opt.search).await,
        },

        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::Add(a) => {
                cli::add_to_playlist(a.song, a.playlist, a.playlist_id).await
            }
        },

        Command::Play(opt) => cli::play(opt.song_id).await,

        Command::Upload(opt) => {
            cli::upload(
                opt.title,
                opt.file,
                opt.year,
                opt.album,
                opt.album_id,
                opt.artists,
            )
            .await
        }

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
