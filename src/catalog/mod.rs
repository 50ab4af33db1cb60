//! # Catalog Module
//!
//! This module is the integration layer between the client and the HarmonyHub
//! catalog service. It defines the service contract the rest of the crate is
//! written against, a reqwest based implementation of that contract, and the
//! page fetcher every list and search surface is built on.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Search, Association)
//!          ↓
//! Catalog Fetcher (page stream, fetch_all, fetch_one)
//!          ↓
//! CatalogService trait
//!     ├── HttpCatalog (reqwest, JSON, multipart)
//!     └── test doubles
//!          ↓
//! HarmonyHub REST API
//! ```
//!
//! ## Service Endpoints
//!
//! - `GET <resource>/?page=N` - paginated list read, `{ results, next, count }`
//! - `GET <resource>/<id>/` - single record
//! - `POST <resource>/` - entity creation, returns the new record with its id
//! - `PUT <resource>/<id>/` - replaces the editable fields of a record
//! - `POST playlist-entries/`, `POST song-artists/` - link records
//!
//! ## Error Handling
//!
//! The service layer reports [`ServiceError`]; the fetcher and the association
//! workflow translate it into the typed [`crate::error::CatalogError`]. Nothing
//! here retries. A 401 always becomes `CatalogError::Auth`.
//!
//! ## Pagination
//!
//! Pages are read strictly in order: the service only hands out the cursor of
//! page N+1 together with page N, so the fetcher cannot issue requests ahead.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::ServiceError,
    types::{LinkRecord, NewEntity, RawPage},
};

mod fetcher;
mod http;

pub use fetcher::{PageStream, fetch_all, fetch_one, pages};
pub use http::HttpCatalog;

/// Collections exposed by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Songs,
    Artists,
    Albums,
    Playlists,
}

impl ResourceKind {
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Songs => "songs",
            ResourceKind::Artists => "artists",
            ResourceKind::Albums => "albums",
            ResourceKind::Playlists => "playlists",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl NewEntity {
    pub fn kind(&self) -> ResourceKind {
        match self {
            NewEntity::Song(_) => ResourceKind::Songs,
            NewEntity::Album(_) => ResourceKind::Albums,
            NewEntity::Artist(_) => ResourceKind::Artists,
            NewEntity::Playlist(_) => ResourceKind::Playlists,
        }
    }
}

/// Where the next page read starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// First page of a collection, with an optional page size hint.
    First {
        kind: ResourceKind,
        page_size: Option<u32>,
    },
    /// Opaque `next` value handed out by the previous page.
    Next(String),
}

/// Contract of the remote catalog service.
///
/// Implementations attach whatever credential they were configured with; the
/// callers never look at it.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn get_page(&self, cursor: &PageCursor) -> Result<RawPage, ServiceError>;

    async fn get_one(&self, kind: ResourceKind, id: i64) -> Result<Value, ServiceError>;

    /// Creates an entity and returns the stored record, including its new id.
    async fn create(&self, entity: &NewEntity) -> Result<Value, ServiceError>;

    /// Writes `fields` over the stored record and returns the updated record.
    async fn update(
        &self,
        kind: ResourceKind,
        id: i64,
        fields: &Value,
    ) -> Result<Value, ServiceError>;

    async fn link(&self, record: &LinkRecord) -> Result<(), ServiceError>;
}
