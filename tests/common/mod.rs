#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use procure_workspace_rust::config::WorkspaceConfig;
use procure_workspace_rust::db::{DocumentQuery, DocumentStore, MemoryStore};
use procure_workspace_rust::models::{Document, DocumentKind, PageRequest, WorkspaceFilters};
use procure_workspace_rust::{StoreError, WorkspaceService};

pub const ORG: &str = "org_a";
pub const OTHER_ORG: &str = "org_b";

/// 内存存储 + 递增的创建时间 (后插入的排在前面)
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    seq: AtomicI64,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            seq: AtomicI64::new(0),
        }
    }

    pub fn insert(
        &self,
        kind: DocumentKind,
        org: &str,
        id: &str,
        status: Option<&str>,
        data: Value,
    ) -> &Self {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(seq);
        self.store.insert(
            kind,
            Document {
                id: id.to_string(),
                organization_id: org.to_string(),
                active: true,
                status: status.map(str::to_string),
                data: data.as_object().cloned().unwrap_or_default(),
                created_at,
            },
        );
        self
    }

    pub fn po(&self, id: &str, data: Value) -> &Self {
        self.insert(DocumentKind::PurchaseOrder, ORG, id, None, data)
    }

    pub fn invoice(&self, id: &str, data: Value) -> &Self {
        self.insert(DocumentKind::Invoice, ORG, id, Some("approved"), data)
    }

    pub fn grn(&self, id: &str, data: Value) -> &Self {
        self.insert(DocumentKind::Grn, ORG, id, Some("approved"), data)
    }

    pub fn service(&self) -> WorkspaceService {
        WorkspaceService::new(self.store.clone(), WorkspaceConfig::default())
    }
}

pub fn filters() -> WorkspaceFilters {
    WorkspaceFilters::default()
}

pub fn first_page() -> PageRequest {
    PageRequest { page: 1, limit: 100 }
}

/// 始终不可用的存储
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find(
        &self,
        _kind: DocumentKind,
        _query: &DocumentQuery,
        _skip: u64,
        _limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn count(&self, _kind: DocumentKind, _query: &DocumentQuery) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn find_by_id(
        &self,
        _kind: DocumentKind,
        _id: &str,
        _organization_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn distinct(
        &self,
        _kind: DocumentKind,
        _field: &'static str,
        _query: &DocumentQuery,
    ) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

/// 记录同时进行中的查询数峰值
pub struct TrackingStore {
    inner: Arc<MemoryStore>,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

impl TrackingStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for TrackingStore {
    async fn find(
        &self,
        kind: DocumentKind,
        query: &DocumentQuery,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        let result = self.inner.find(kind, query, skip, limit).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn count(&self, kind: DocumentKind, query: &DocumentQuery) -> Result<u64, StoreError> {
        self.inner.count(kind, query).await
    }

    async fn find_by_id(
        &self,
        kind: DocumentKind,
        id: &str,
        organization_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.inner.find_by_id(kind, id, organization_id).await
    }

    async fn distinct(
        &self,
        kind: DocumentKind,
        field: &'static str,
        query: &DocumentQuery,
    ) -> Result<Vec<String>, StoreError> {
        self.inner.distinct(kind, field, query).await
    }
}
