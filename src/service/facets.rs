use indexmap::IndexMap;
use tracing::info;

use super::query::eligible_query;
use super::WorkspaceService;
use crate::error::Result;
use crate::models::status::labels_of;
use crate::models::{
    AcceptanceStatus, DocumentKind, GrnInvoiceStatus, InvoiceGrnStatus, InvoicePoStatus,
    PoInvoiceStatus, ReceiptStatus, StatusTags, WorkspaceFacets,
};

impl WorkspaceService {
    /// 过滤器候选值：参与对账单据上的地点/城市/买卖方，以及该类型可能出现的状态
    pub async fn facets(&self, kind: DocumentKind, organization_id: &str) -> Result<WorkspaceFacets> {
        let query = eligible_query(kind, organization_id, &self.config.approved_status);
        let (sites, cities, buyers, sellers) = tokio::try_join!(
            self.store.distinct(kind, "site", &query),
            self.store.distinct(kind, "city", &query),
            self.store.distinct(kind, "buyerName", &query),
            self.store.distinct(kind, "sellerName", &query),
        )?;

        info!(
            "{} 过滤候选值 org={}: 地点 {}, 城市 {}, 买方 {}, 卖方 {}",
            kind,
            organization_id,
            sites.len(),
            cities.len(),
            buyers.len(),
            sellers.len()
        );

        Ok(WorkspaceFacets {
            sites,
            cities,
            buyers,
            sellers,
            statuses: status_vocabulary(kind),
        })
    }
}

/// 键名与对应的查询参数一致
fn status_vocabulary(kind: DocumentKind) -> IndexMap<&'static str, Vec<&'static str>> {
    let mut statuses = IndexMap::new();
    match kind {
        DocumentKind::PurchaseOrder => {
            statuses.insert("invoiceStatus", labels_of::<PoInvoiceStatus>());
            statuses.insert("grnStatus", StatusTags::<ReceiptStatus>::vocabulary());
        }
        DocumentKind::Invoice => {
            statuses.insert("poStatus", labels_of::<InvoicePoStatus>());
            statuses.insert("grnStatus", StatusTags::<InvoiceGrnStatus>::vocabulary());
        }
        DocumentKind::Grn => {
            statuses.insert("invoiceStatus", labels_of::<GrnInvoiceStatus>());
            statuses.insert("acceptanceStatus", labels_of::<AcceptanceStatus>());
        }
    }
    statuses
}
