// Test doubles for the kernel traits
//
// Spies record calls so tests can assert what reached infrastructure.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

use super::{BaseDirectoryService, BaseObjectStorage};
use crate::domains::providers::{Provider, SearchCriteria, SortKey};

// =============================================================================
// Spy Directory
// =============================================================================

/// Wraps a directory (or fails every call) and counts what reached it
pub struct SpyDirectory {
    inner: Option<Box<dyn BaseDirectoryService>>,
    failure: Option<String>,
    ignore_sort: bool,
    search_calls: Arc<Mutex<Vec<SearchCriteria>>>,
    location_calls: Arc<Mutex<Vec<String>>>,
}

impl SpyDirectory {
    pub fn new(inner: impl BaseDirectoryService + 'static) -> Self {
        Self {
            inner: Some(Box::new(inner)),
            failure: None,
            ignore_sort: false,
            search_calls: Arc::new(Mutex::new(Vec::new())),
            location_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with this message
    pub fn failing(message: &str) -> Self {
        Self {
            inner: None,
            failure: Some(message.to_string()),
            ignore_sort: false,
            search_calls: Arc::new(Mutex::new(Vec::new())),
            location_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Behave like a vendor that returns its own order regardless of sortBy
    pub fn ignoring_sort(mut self) -> Self {
        self.ignore_sort = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    pub fn last_search(&self) -> Option<SearchCriteria> {
        self.search_calls.lock().unwrap().last().cloned()
    }

    pub fn location_calls(&self) -> usize {
        self.location_calls.lock().unwrap().len()
    }

    fn fail(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BaseDirectoryService for SpyDirectory {
    fn name(&self) -> &'static str {
        "spy"
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Provider>> {
        self.search_calls.lock().unwrap().push(criteria.clone());
        self.fail()?;

        let mut forwarded = criteria.clone();
        if self.ignore_sort {
            forwarded.sort_by = SortKey::Relevance;
        }
        match &self.inner {
            Some(inner) => inner.search(&forwarded).await,
            None => Ok(Vec::new()),
        }
    }

    async fn locations(&self, query: &str) -> Result<Vec<String>> {
        self.location_calls.lock().unwrap().push(query.to_string());
        self.fail()?;

        match &self.inner {
            Some(inner) => inner.locations(query).await,
            None => Ok(Vec::new()),
        }
    }
}

// =============================================================================
// Recording Storage
// =============================================================================

/// Object storage that keeps nothing but the keys it was asked to write
#[derive(Clone, Default)]
pub struct RecordingStorage {
    put_calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn put_calls(&self) -> Vec<String> {
        self.put_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseObjectStorage for RecordingStorage {
    async fn put(&self, key: &str, _content_type: &str, _data: Bytes) -> Result<String> {
        self.put_calls.lock().unwrap().push(key.to_string());
        if self.fail {
            anyhow::bail!("disk full");
        }
        Ok(format!("http://test.local/uploads/{}", key))
    }
}
