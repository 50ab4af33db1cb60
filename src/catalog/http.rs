use std::path::Path;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::AUTHORIZATION,
    multipart::{Form, Part},
};
use serde_json::{Value, json};
use tracing::debug;

use super::{CatalogService, PageCursor, ResourceKind};
use crate::{
    config,
    error::ServiceError,
    management::TokenManager,
    types::{LinkKind, LinkRecord, NewAlbum, NewArtist, NewEntity, NewSong, RawPage},
};

/// [`CatalogService`] backed by the HarmonyHub REST API.
///
/// The token, when present, is sent as `Authorization: Token <token>`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Builds a client from the configured API URL and the best available
    /// token: `HARMONY_API_TOKEN` first, then the cached login token.
    pub async fn from_env() -> Self {
        let token = match config::api_token() {
            Some(token) => Some(token),
            None => TokenManager::load()
                .await
                .ok()
                .map(|mgr| mgr.current_token().to_string()),
        };
        Self::new(config::api_url(), token)
    }

    fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url, path = path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Token {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = self.authorized(request).send().await?;

        match response.error_for_status() {
            Ok(valid_response) => Ok(valid_response),
            Err(err) => match err.status() {
                Some(StatusCode::UNAUTHORIZED) => Err(ServiceError::Unauthorized),
                _ => Err(err.into()), // propagate other errors
            },
        }
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, ServiceError> {
        let response = self.send(request).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn song_form(&self, song: &NewSong) -> Result<Form, ServiceError> {
        let mut form = Form::new().text("title", song.title.clone());
        if let Some(year) = song.year {
            form = form.text("year", year.to_string());
        }
        if let Some(album_id) = song.album_id {
            form = form.text("album", album_id.to_string());
        }
        Ok(form.part("song_file", file_part(&song.file).await?))
    }

    async fn artist_form(&self, artist: &NewArtist) -> Result<Form, ServiceError> {
        let mut form = Form::new()
            .text("name", artist.name.clone())
            .text("bio", artist.bio.clone().unwrap_or_default())
            .text("website", artist.website.clone().unwrap_or_default());
        if let Some(image) = &artist.image {
            form = form.part("image", file_part(image).await?);
        }
        Ok(form)
    }

    async fn album_request(&self, album: &NewAlbum) -> Result<RequestBuilder, ServiceError> {
        let request = self.client.post(self.url("albums/"));

        // Albums only go out as multipart when a cover is attached.
        match &album.cover {
            Some(cover) => {
                let mut form = Form::new()
                    .text("title", album.title.clone())
                    .text("artist", album.artist_id.to_string());
                if let Some(year) = album.year {
                    form = form.text("year", year.to_string());
                }
                Ok(request.multipart(form.part("cover", file_part(cover).await?)))
            }
            None => Ok(request.json(&json!({
                "title": album.title,
                "year": album.year,
                "artist": album.artist_id,
            }))),
        }
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn get_page(&self, cursor: &PageCursor) -> Result<RawPage, ServiceError> {
        let api_url = match cursor {
            PageCursor::First { kind, page_size } => {
                let mut api_url = format!("{}?page=1", self.url(&format!("{}/", kind.path())));
                if let Some(size) = page_size {
                    api_url.push_str(&format!("&page_size={}", size));
                }
                api_url
            }
            PageCursor::Next(next) => next.clone(),
        };

        debug!(%api_url, "GET page");
        let response = self.send(self.client.get(&api_url)).await?;
        response
            .json::<RawPage>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }

    async fn get_one(&self, kind: ResourceKind, id: i64) -> Result<Value, ServiceError> {
        let api_url = self.url(&format!("{}/{}/", kind.path(), id));
        self.send_json(self.client.get(&api_url)).await
    }

    async fn create(&self, entity: &NewEntity) -> Result<Value, ServiceError> {
        let api_url = self.url(&format!("{}/", entity.kind().path()));
        let request = match entity {
            NewEntity::Song(song) => self
                .client
                .post(&api_url)
                .multipart(self.song_form(song).await?),
            NewEntity::Artist(artist) => self
                .client
                .post(&api_url)
                .multipart(self.artist_form(artist).await?),
            NewEntity::Album(album) => self.album_request(album).await?,
            NewEntity::Playlist(playlist) => self.client.post(&api_url).json(playlist),
        };

        debug!(kind = %entity.kind(), "POST create");
        self.send_json(request).await
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: i64,
        fields: &Value,
    ) -> Result<Value, ServiceError> {
        let api_url = self.url(&format!("{}/{}/", kind.path(), id));
        debug!(%kind, id, "PUT update");
        self.send_json(self.client.put(&api_url).json(fields)).await
    }

    async fn link(&self, record: &LinkRecord) -> Result<(), ServiceError> {
        let path = match record.kind {
            LinkKind::PlaylistEntry => "playlist-entries/",
            LinkKind::SongArtist => "song-artists/",
        };

        debug!(path, parent = record.parent_id, child = record.child_id, "POST link");
        self.send(self.client.post(self.url(path)).json(&record.body()))
            .await
            .map(|_| ())
    }
}

async fn file_part(path: &Path) -> Result<Part, ServiceError> {
    let bytes = async_fs::read(path)
        .await
        .map_err(|e| ServiceError::Io(format!("{}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(Part::bytes(bytes).file_name(file_name))
}
