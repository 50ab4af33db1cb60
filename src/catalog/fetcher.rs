use std::pin::Pin;

use futures::{Stream, TryStreamExt, stream};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{CatalogService, PageCursor, ResourceKind};
use crate::error::CatalogError;

/// Lazy, finite sequence of decoded pages.
///
/// The stream cannot be restarted; a fresh one has to be requested from
/// [`pages`]. After the first error it yields nothing more.
pub type PageStream<'a, T> = Pin<Box<dyn Stream<Item = Result<Vec<T>, CatalogError>> + Send + 'a>>;

/// Streams every page of `kind`, following the `next` cursor of each response.
///
/// Page N+1 is only requested once page N has resolved.
///
/// # Arguments
///
/// * `service` - Catalog service to read from
/// * `kind` - Collection to list
/// * `page_size` - Optional page size hint for the first request
///
/// # Example
///
/// ```
/// let mut songs = pages::<Track, _>(&service, ResourceKind::Songs, None);
/// while let Some(page) = songs.next().await {
///     println!("{} songs", page?.len());
/// }
/// ```
pub fn pages<'a, T, S>(service: &'a S, kind: ResourceKind, page_size: Option<u32>) -> PageStream<'a, T>
where
    T: DeserializeOwned + Send + 'a,
    S: CatalogService + ?Sized,
{
    let start = PageCursor::First { kind, page_size };

    Box::pin(stream::unfold(Some(start), move |cursor| async move {
        let cursor = cursor?;
        debug!(%kind, ?cursor, "requesting page");

        match service.get_page(&cursor).await {
            Ok(page) => match decode_records::<T>(kind, page.results) {
                Ok(items) => Some((Ok(items), page.next.map(PageCursor::Next))),
                Err(e) => Some((Err(e), None)),
            },
            Err(err) => {
                warn!(%kind, %err, "page request failed");
                Some((Err(CatalogError::fetch(kind, err)), None))
            }
        }
    }))
}

/// Fetches every record of `kind`.
///
/// All or nothing: if any page fails, the pages already received are dropped
/// and only the error is returned, so callers never see a partially filled
/// collection. An empty collection is `Ok(vec![])`.
///
/// # Returns
///
/// - `Ok(Vec<T>)` - Every record, in page order
/// - `Err(CatalogError::Fetch)` - A page request failed or could not be decoded
/// - `Err(CatalogError::Auth)` - The service answered 401
pub async fn fetch_all<T, S>(
    service: &S,
    kind: ResourceKind,
    page_size: Option<u32>,
) -> Result<Vec<T>, CatalogError>
where
    T: DeserializeOwned + Send,
    S: CatalogService + ?Sized,
{
    let all: Vec<T> = pages::<T, S>(service, kind, page_size).try_concat().await?;
    debug!(%kind, count = all.len(), "fetched collection");
    Ok(all)
}

/// Fetches a single record of `kind` by id.
pub async fn fetch_one<T, S>(service: &S, kind: ResourceKind, id: i64) -> Result<T, CatalogError>
where
    T: DeserializeOwned,
    S: CatalogService + ?Sized,
{
    let value = service
        .get_one(kind, id)
        .await
        .map_err(|err| CatalogError::fetch(kind, err))?;

    serde_json::from_value(value).map_err(|e| {
        warn!(%kind, id, error = %e, "cannot decode record");
        CatalogError::Fetch {
            kind,
            http_status: None,
        }
    })
}

fn decode_records<T: DeserializeOwned>(
    kind: ResourceKind,
    records: Vec<Value>,
) -> Result<Vec<T>, CatalogError> {
    records
        .into_iter()
        .map(serde_json::from_value::<T>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            warn!(%kind, error = %e, "cannot decode page");
            CatalogError::Fetch {
                kind,
                http_status: None,
            }
        })
}
