use crate::db::store::{DocumentQuery, DocumentStore};
use crate::error::StoreError;
use crate::models::document::scalar_text;
use crate::models::{Document, DocumentKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use indexmap::IndexMap;

/// 进程内单据存储，查询语义与 [`PgDocumentStore`](crate::db::PgDocumentStore) 一致
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<DocumentKind, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, kind: DocumentKind, doc: Document) {
        self.collections.entry(kind).or_default().push(doc);
    }

    pub fn extend(&self, kind: DocumentKind, docs: impl IntoIterator<Item = Document>) {
        self.collections.entry(kind).or_default().extend(docs);
    }

    pub fn len(&self, kind: DocumentKind) -> usize {
        self.collections.get(&kind).map_or(0, |docs| docs.len())
    }

    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(|entry| entry.value().is_empty())
    }

    /// 过滤并排序：created_at 降序，id 升序
    fn matching(&self, kind: DocumentKind, query: &DocumentQuery) -> Vec<Document> {
        let mut docs: Vec<Document> = self
            .collections
            .get(&kind)
            .map(|docs| docs.iter().filter(|d| query.matches(d)).cloned().collect())
            .unwrap_or_default();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        docs
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        kind: DocumentKind,
        query: &DocumentQuery,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let docs = self.matching(kind, query).into_iter().skip(skip);
        Ok(match limit {
            Some(limit) => docs.take(usize::try_from(limit).unwrap_or(usize::MAX)).collect(),
            None => docs.collect(),
        })
    }

    async fn count(&self, kind: DocumentKind, query: &DocumentQuery) -> Result<u64, StoreError> {
        Ok(self.matching(kind, query).len() as u64)
    }

    async fn find_by_id(
        &self,
        kind: DocumentKind,
        id: &str,
        organization_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.get(&kind).and_then(|docs| {
            docs.iter()
                .find(|d| d.id == id && d.organization_id == organization_id && d.active)
                .cloned()
        }))
    }

    async fn distinct(
        &self,
        kind: DocumentKind,
        field: &'static str,
        query: &DocumentQuery,
    ) -> Result<Vec<String>, StoreError> {
        let mut last_seen: IndexMap<String, DateTime<Utc>> = IndexMap::new();
        for doc in self.matching(kind, query) {
            let Some(value) = scalar_text(doc.data.get(field)) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let seen = last_seen.entry(value.into_owned()).or_insert(doc.created_at);
            if doc.created_at > *seen {
                *seen = doc.created_at;
            }
        }
        last_seen.sort_by(|a_key, a_seen, b_key, b_seen| b_seen.cmp(a_seen).then_with(|| a_key.cmp(b_key)));
        Ok(last_seen.into_keys().collect())
    }
}
