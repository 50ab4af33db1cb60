//! Error taxonomy for catalog reads and writes.
//!
//! Every catalog operation returns one of these variants to its caller. The
//! crate never retries on its own and no variant is fatal: a failed fetch
//! leaves nothing cached, a failed link leaves both entities untouched, and a
//! partial link batch reports exactly which parents were not linked.

use thiserror::Error;

use crate::catalog::ResourceKind;

/// Low level failure of a single request against the catalog service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("cannot read upload: {0}")]
    Io(String),
}

impl ServiceError {
    /// HTTP status behind the failure, if the service answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ServiceError::Unauthorized => Some(401),
            ServiceError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 401 => ServiceError::Unauthorized,
            Some(status) => ServiceError::Status(status.as_u16()),
            None if err.is_decode() => ServiceError::Decode(err.to_string()),
            None => ServiceError::Transport(err.to_string()),
        }
    }
}

/// Typed result of a catalog operation as seen by the view layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A page load failed. Pages fetched before the failure are discarded.
    #[error("failed to fetch {kind} (status: {})", display_status(.http_status))]
    Fetch {
        kind: ResourceKind,
        http_status: Option<u16>,
    },

    /// The child entity of a create-then-link could not be created.
    #[error("failed to create {kind} (status: {})", display_status(.http_status))]
    Create {
        kind: ResourceKind,
        http_status: Option<u16>,
    },

    /// An existing record could not be updated.
    #[error("failed to update {kind} {id} (status: {})", display_status(.http_status))]
    Update {
        kind: ResourceKind,
        id: i64,
        http_status: Option<u16>,
    },

    /// A single association could not be written.
    #[error("failed to link {child_id} to {parent_id} (status: {})", display_status(.http_status))]
    Link {
        parent_id: i64,
        child_id: i64,
        http_status: Option<u16>,
    },

    /// The child was created but some of its links failed. Nothing is rolled back.
    #[error("created {created_id} but could not link parents {failed_parent_ids:?}")]
    PartialLink {
        created_id: i64,
        failed_parent_ids: Vec<i64>,
    },

    /// The catalog service rejected the credential.
    #[error("not authorized, run `harmonycli login` first")]
    Auth,
}

impl CatalogError {
    pub(crate) fn fetch(kind: ResourceKind, err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => CatalogError::Auth,
            other => CatalogError::Fetch {
                kind,
                http_status: other.http_status(),
            },
        }
    }

    pub(crate) fn create(kind: ResourceKind, err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => CatalogError::Auth,
            other => CatalogError::Create {
                kind,
                http_status: other.http_status(),
            },
        }
    }

    pub(crate) fn update(kind: ResourceKind, id: i64, err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => CatalogError::Auth,
            other => CatalogError::Update {
                kind,
                id,
                http_status: other.http_status(),
            },
        }
    }

    pub(crate) fn link(parent_id: i64, child_id: i64, err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized => CatalogError::Auth,
            other => CatalogError::Link {
                parent_id,
                child_id,
                http_status: other.http_status(),
            },
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}
