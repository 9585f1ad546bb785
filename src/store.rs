//! In-memory snapshots of the backend collections.
//!
//! Each listing page works off a cached snapshot so that searching, facet
//! filtering and paging never trigger another network round-trip. Snapshots
//! are refreshed when older than the configured maximum age and patched in
//! place after successful mutations.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::blog::BlogPost;
use crate::domain::event::Event;
use crate::domain::member::Member;
use crate::domain::paper::ResearchPaper;
use crate::lookup::LookupSessions;

pub const DEFAULT_SNAPSHOT_MAX_AGE: Duration = Duration::from_secs(300);

struct Snapshot<T> {
    records: Vec<T>,
    fetched_at: Option<Instant>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            fetched_at: None,
        }
    }
}

/// Cached copy of one backend collection.
pub struct RecordStore<T> {
    inner: RwLock<Snapshot<T>>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Snapshot::default()),
        }
    }
}

impl<T: Clone> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current snapshot, empty if never fetched.
    pub async fn records(&self) -> Vec<T> {
        self.inner.read().await.records.clone()
    }

    /// True when the snapshot was never fetched or is older than `max_age`.
    pub async fn is_stale(&self, max_age: Duration) -> bool {
        match self.inner.read().await.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() > max_age,
            None => true,
        }
    }

    /// Replaces the snapshot with freshly fetched records.
    pub async fn replace(&self, records: Vec<T>) {
        let mut snapshot = self.inner.write().await;
        snapshot.records = records;
        snapshot.fetched_at = Some(Instant::now());
    }

    /// Forces the next staleness check to report stale.
    pub async fn invalidate(&self) {
        self.inner.write().await.fetched_at = None;
    }

    /// Returns the first record matching `predicate`, if any.
    pub async fn find_by<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|record| predicate(record))
            .cloned()
    }

    /// Appends a record created on the backend.
    pub async fn insert(&self, record: T) {
        self.inner.write().await.records.push(record);
    }

    /// Replaces the first record matching `predicate`, appending when absent.
    pub async fn upsert_by<F>(&self, predicate: F, record: T)
    where
        F: Fn(&T) -> bool,
    {
        let mut snapshot = self.inner.write().await;
        match snapshot.records.iter_mut().find(|r| predicate(r)) {
            Some(existing) => *existing = record,
            None => snapshot.records.push(record),
        }
    }

    /// Removes every record matching `predicate`.
    pub async fn remove_by<F>(&self, predicate: F)
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .write()
            .await
            .records
            .retain(|record| !predicate(record));
    }
}

/// Application-wide state shared across request handlers.
#[derive(Default)]
pub struct PortalStore {
    pub blogs: RecordStore<BlogPost>,
    pub events: RecordStore<Event>,
    pub members: RecordStore<Member>,
    pub papers: RecordStore<ResearchPaper>,
    pub lookups: LookupSessions,
}

impl PortalStore {
    pub fn new() -> Self {
        Self::default()
    }
}
