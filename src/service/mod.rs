pub mod aggregate;
pub mod classify;
pub mod matcher;
pub mod query;
pub mod reconcile;

mod detail;
mod facets;
mod grn_workspace;
mod invoice_workspace;
mod po_workspace;

pub use matcher::{BusinessKeyMatcher, Link};

use futures::stream::{self, StreamExt, TryStreamExt};
use rayon::prelude::*;
use std::future::Future;
use std::sync::Arc;

use crate::config::WorkspaceConfig;
use crate::db::DocumentStore;
use crate::error::{Result, WorkspaceError};
use crate::models::{Document, DocumentKind, PageRequest, WorkspaceFilters};

/// 对账工作台服务：工作台列表、单据详情、过滤候选值
pub struct WorkspaceService {
    store: Arc<dyn DocumentStore>,
    matcher: BusinessKeyMatcher,
    config: WorkspaceConfig,
}

impl WorkspaceService {
    pub fn new(store: Arc<dyn DocumentStore>, config: WorkspaceConfig) -> Self {
        let matcher = BusinessKeyMatcher::new(store.clone(), config.approved_status.clone());
        Self {
            store,
            matcher,
            config,
        }
    }

    pub fn page_request(&self, page: Option<i64>, limit: Option<i64>) -> PageRequest {
        query::page_request(page, limit, &self.config)
    }

    /// 当前页基础单据 + 满足条件的总数
    async fn fetch_page(
        &self,
        kind: DocumentKind,
        organization_id: &str,
        filters: &WorkspaceFilters,
        page: PageRequest,
    ) -> Result<(Vec<Document>, u64)> {
        let query = query::base_query(kind, organization_id, filters, &self.config.approved_status)?;
        let (total, docs) = tokio::try_join!(
            self.store.count(kind, &query),
            self.store.find(kind, &query, page.skip(), Some(u64::from(page.limit))),
        )?;
        Ok((docs, total))
    }

    /// 并发补全每张单据，并发度受 lookup_concurrency 限制，结果保持原顺序
    async fn enrich_all<R, F, Fut>(&self, docs: Vec<Document>, enrich: F) -> Result<Vec<R>>
    where
        F: FnMut(Document) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        stream::iter(docs)
            .map(enrich)
            .buffered(self.config.lookup_concurrency)
            .try_collect()
            .await
    }

    /// 单据详情的基础单据 (仅校验组织与有效标记)
    async fn load(&self, kind: DocumentKind, organization_id: &str, id: &str) -> Result<Document> {
        self.store
            .find_by_id(kind, id, organization_id)
            .await?
            .ok_or(WorkspaceError::NotFound(kind))
    }
}

/// 派生字段过滤，保持原顺序
fn retain_par<R, P>(rows: Vec<R>, keep: P) -> Vec<R>
where
    R: Send,
    P: Fn(&R) -> bool + Sync + Send,
{
    rows.into_par_iter().filter(|row| keep(row)).collect()
}
