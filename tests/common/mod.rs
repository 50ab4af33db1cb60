#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicI64, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use harmonycli::{
    catalog::{CatalogService, PageCursor, ResourceKind},
    error::ServiceError,
    playback::{AudioBackend, MediaHandle},
    types::{Artist, LinkRecord, NewEntity, RawPage, Track},
};
use serde_json::{Value, json};
use tokio::sync::oneshot;

pub const FIRST_CREATED_ID: i64 = 100;

pub fn artist(id: i64, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        bio: None,
        website: None,
        image: None,
    }
}

pub fn artist_json(id: i64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn track(id: i64, media_uri: &str, duration: Option<f64>) -> Track {
    Track {
        id,
        title: format!("Track {id}"),
        media_uri: media_uri.to_string(),
        duration_seconds: duration,
        artist_names: Vec::new(),
        album_title: None,
        year: None,
        cover: None,
    }
}

/// In-memory catalog service. Pages are served in order, every request is
/// recorded, and single pages, creates, updates or links can be told to fail.
/// Updates are merged into the stored records.
pub struct FakeCatalog {
    pages: HashMap<ResourceKind, Vec<Vec<Value>>>,
    failing_pages: HashMap<(ResourceKind, usize), ServiceError>,
    records: Mutex<HashMap<(ResourceKind, i64), Value>>,
    create_error: Option<ServiceError>,
    update_error: Option<ServiceError>,
    failing_links: HashMap<i64, ServiceError>,
    next_id: AtomicI64,
    page_requests: Mutex<Vec<PageCursor>>,
    creates: Mutex<Vec<NewEntity>>,
    updates: Mutex<Vec<(ResourceKind, i64, Value)>>,
    link_attempts: Mutex<Vec<LinkRecord>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        FakeCatalog {
            pages: HashMap::new(),
            failing_pages: HashMap::new(),
            records: Mutex::new(HashMap::new()),
            create_error: None,
            update_error: None,
            failing_links: HashMap::new(),
            next_id: AtomicI64::new(FIRST_CREATED_ID),
            page_requests: Mutex::new(Vec::new()),
            creates: Mutex::new(Vec::new()),
            updates: Mutex::new(Vec::new()),
            link_attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_pages(mut self, kind: ResourceKind, pages: Vec<Vec<Value>>) -> Self {
        self.pages.insert(kind, pages);
        self
    }

    /// `index` is zero based: `1` makes the second page fail.
    pub fn failing_page(mut self, kind: ResourceKind, index: usize, err: ServiceError) -> Self {
        self.failing_pages.insert((kind, index), err);
        self
    }

    pub fn with_record(mut self, kind: ResourceKind, id: i64, record: Value) -> Self {
        self.records.get_mut().unwrap().insert((kind, id), record);
        self
    }

    pub fn failing_update(mut self, err: ServiceError) -> Self {
        self.update_error = Some(err);
        self
    }

    pub fn failing_create(mut self, err: ServiceError) -> Self {
        self.create_error = Some(err);
        self
    }

    pub fn failing_link(mut self, parent_id: i64, err: ServiceError) -> Self {
        self.failing_links.insert(parent_id, err);
        self
    }

    pub fn page_requests(&self) -> Vec<PageCursor> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<NewEntity> {
        self.creates.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(ResourceKind, i64, Value)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn record(&self, kind: ResourceKind, id: i64) -> Option<Value> {
        self.records.lock().unwrap().get(&(kind, id)).cloned()
    }

    pub fn link_attempts(&self) -> Vec<LinkRecord> {
        self.link_attempts.lock().unwrap().clone()
    }

    /// Links the service accepted.
    pub fn links(&self) -> Vec<LinkRecord> {
        self.link_attempts()
            .into_iter()
            .filter(|record| !self.failing_links.contains_key(&record.parent_id))
            .collect()
    }
}

// Cursors handed out look like `songs/?page=2`.
fn parse_next(next: &str) -> (ResourceKind, usize) {
    let kind = [
        ResourceKind::Songs,
        ResourceKind::Artists,
        ResourceKind::Albums,
        ResourceKind::Playlists,
    ]
    .into_iter()
    .find(|kind| next.starts_with(kind.path()))
    .unwrap();
    let page: usize = next.rsplit("page=").next().unwrap().parse().unwrap();
    (kind, page - 1)
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn get_page(&self, cursor: &PageCursor) -> Result<RawPage, ServiceError> {
        self.page_requests.lock().unwrap().push(cursor.clone());

        let (kind, index) = match cursor {
            PageCursor::First { kind, .. } => (*kind, 0),
            PageCursor::Next(next) => parse_next(next),
        };

        if let Some(err) = self.failing_pages.get(&(kind, index)) {
            return Err(err.clone());
        }

        let pages = self.pages.get(&kind).cloned().unwrap_or_default();
        let results = pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < pages.len()).then(|| format!("{}/?page={}", kind.path(), index + 2));

        Ok(RawPage {
            results,
            next,
            count: pages.iter().map(Vec::len).sum::<usize>() as u64,
        })
    }

    async fn get_one(&self, kind: ResourceKind, id: i64) -> Result<Value, ServiceError> {
        self.record(kind, id).ok_or(ServiceError::Status(404))
    }

    async fn create(&self, entity: &NewEntity) -> Result<Value, ServiceError> {
        self.creates.lock().unwrap().push(entity.clone());
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "id": id }))
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: i64,
        fields: &Value,
    ) -> Result<Value, ServiceError> {
        self.updates.lock().unwrap().push((kind, id, fields.clone()));
        if let Some(err) = &self.update_error {
            return Err(err.clone());
        }

        let mut records = self.records.lock().unwrap();
        let stored = records.get_mut(&(kind, id)).ok_or(ServiceError::Status(404))?;
        if let (Some(stored), Some(fields)) = (stored.as_object_mut(), fields.as_object()) {
            for (key, value) in fields {
                stored.insert(key.clone(), value.clone());
            }
        }
        Ok(stored.clone())
    }

    async fn link(&self, record: &LinkRecord) -> Result<(), ServiceError> {
        self.link_attempts.lock().unwrap().push(record.clone());
        match self.failing_links.get(&record.parent_id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// What the fake audio resources went through, shared with the test.
#[derive(Clone, Default)]
pub struct BackendLog {
    events: Arc<Mutex<Vec<String>>>,
    live: Arc<AtomicUsize>,
}

impl BackendLog {
    /// Resources started and not yet torn down.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn saw(&self, event: &str) -> bool {
        self.events().iter().any(|e| e == event)
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

/// Audio backend whose attaches can be held back until the test says so.
pub struct FakeBackend {
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    failing: HashSet<String>,
    duration: Option<f64>,
    log: BackendLog,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            gates: Mutex::new(HashMap::new()),
            failing: HashSet::new(),
            duration: None,
            log: BackendLog::default(),
        }
    }

    pub fn failing(mut self, media_uri: &str) -> Self {
        self.failing.insert(media_uri.to_string());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Holds the next attach of `media_uri` until the returned sender fires
    /// (or is dropped).
    pub fn gate(&self, media_uri: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(media_uri.to_string(), rx);
        tx
    }

    pub fn log(&self) -> BackendLog {
        self.log.clone()
    }
}

#[async_trait]
impl AudioBackend for FakeBackend {
    async fn attach(&self, media_uri: &str) -> Result<Box<dyn MediaHandle>, String> {
        self.log.push(format!("attach {media_uri}"));

        let gate = self.gates.lock().unwrap().remove(media_uri);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing.contains(media_uri) {
            return Err(format!("cannot open {media_uri}"));
        }

        Ok(Box::new(FakeHandle {
            media_uri: media_uri.to_string(),
            position: 0.0,
            duration: self.duration,
            started: false,
            log: self.log.clone(),
        }))
    }
}

struct FakeHandle {
    media_uri: String,
    position: f64,
    duration: Option<f64>,
    started: bool,
    log: BackendLog,
}

impl MediaHandle for FakeHandle {
    fn start(&mut self, volume: f32) -> Result<(), String> {
        self.started = true;
        self.log.live.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("start {} {}", self.media_uri, volume));
        Ok(())
    }

    fn pause(&mut self) {
        self.log.push(format!("pause {}", self.media_uri));
    }

    fn resume(&mut self) {
        self.log.push(format!("resume {}", self.media_uri));
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn set_volume(&mut self, volume: f32) {
        self.log.push(format!("volume {} {}", self.media_uri, volume));
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.duration.is_some_and(|d| self.position >= d)
    }

    fn teardown(&mut self) {
        if self.started {
            self.started = false;
            self.log.live.fetch_sub(1, Ordering::SeqCst);
        }
        self.log.push(format!("teardown {}", self.media_uri));
    }
}
