//! Configuration management for the HarmonyHub catalog client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every accessor falls back to a sensible default so
//! the client works against the public sandbox without any setup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

use crate::Res;

pub const DEFAULT_API_URL: &str = "https://sandbox.academiadevelopers.com/harmonyhub";
pub const DEFAULT_AUTH_URL: &str = "https://sandbox.academiadevelopers.com/api-auth/";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `harmonycli/.env` in the platform-specific local data
/// directory:
/// - Linux: `~/.local/share/harmonycli/.env`
/// - macOS: `~/Library/Application Support/harmonycli/.env`
/// - Windows: `%LOCALAPPDATA%/harmonycli/.env`
///
/// A missing file is not an error; the defaults below apply instead.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("cannot read {}: {}", path.display(), e).into()),
    }
}

/// Base URL of the catalog service, without a trailing slash.
///
/// Reads `HARMONY_API_URL`.
pub fn api_url() -> String {
    env::var("HARMONY_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Token endpoint used by `harmonycli login`.
///
/// Reads `HARMONY_AUTH_URL`.
pub fn auth_url() -> String {
    env::var("HARMONY_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Page size hint sent with the first page request.
///
/// Reads `HARMONY_PAGE_SIZE`; unset or unparsable values leave the choice to
/// the service.
pub fn page_size() -> Option<u32> {
    env::var("HARMONY_PAGE_SIZE")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|size| *size > 0)
}

/// Explicit API token, taking precedence over the cached login token.
///
/// Reads `HARMONY_API_TOKEN`.
pub fn api_token() -> Option<String> {
    env::var("HARMONY_API_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Filter directive for the diagnostic log, e.g. `harmonycli=debug`.
///
/// Reads `HARMONY_LOG`.
pub fn log_filter() -> String {
    env::var("HARMONY_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

/// Directory holding the `.env` file and the token cache.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("harmonycli");
    path
}

fn env_path() -> PathBuf {
    data_dir().join(".env")
}
