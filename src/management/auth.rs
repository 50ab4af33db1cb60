use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::debug;

use crate::{Res, config, types::Token};

/// Keeps the catalog token between runs.
///
/// The token is opaque to the client: it is obtained once with a username and
/// password, stored under the local data directory and attached to every
/// request. There is no refresh; a 401 asks the user to log in again.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    /// Exchanges credentials for a token at the configured auth endpoint.
    pub async fn login(username: &str, password: &str) -> Res<Self> {
        let client = Client::new();
        let res = client
            .post(config::auth_url())
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(format!("login rejected with status {}", res.status().as_u16()).into());
        }

        let token = res.json::<Token>().await?;
        debug!("obtained catalog token");
        Ok(Self { token })
    }

    pub async fn load() -> Res<Self> {
        Self::read_from(&Self::token_path()).await
    }

    pub async fn persist(&self) -> Res<()> {
        self.write_to(&Self::token_path()).await
    }

    /// Removes the cached token. A missing cache is not an error.
    pub async fn forget() -> Res<()> {
        match async_fs::remove_file(Self::token_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn current_token(&self) -> &str {
        &self.token.token
    }

    async fn read_from(path: &Path) -> Res<Self> {
        let content = async_fs::read_to_string(path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self { token })
    }

    async fn write_to(&self, path: &Path) -> Res<()> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
