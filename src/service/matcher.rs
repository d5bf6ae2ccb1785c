use std::sync::Arc;

use crate::db::{DocumentQuery, DocumentStore};
use crate::error::StoreError;
use crate::models::{Document, DocumentKind};

/// 单据之间的业务主键关联 (无外键，按字段值精确匹配)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// 采购订单 -> 发票: invoice.buyerOrderNo == po.poNumber
    InvoicesOfPo,
    /// 采购订单 -> 收货单: grn.poNumber == po.poNumber
    GrnsOfPo,
    /// 发票 -> 采购订单: po.poNumber == invoice.buyerOrderNo
    PoOfInvoice,
    /// 发票 -> 收货单: grn.vendorInvoiceNo == invoice.invoiceNumber
    GrnsOfInvoice,
    /// 收货单 -> 发票: invoice.invoiceNumber == grn.vendorInvoiceNo
    InvoiceOfGrn,
    /// 收货单 -> 采购订单: po.poNumber == grn.poNumber
    PoOfGrn,
}

impl Link {
    /// 被查找的单据类型
    pub fn target(self) -> DocumentKind {
        match self {
            Self::InvoicesOfPo | Self::InvoiceOfGrn => DocumentKind::Invoice,
            Self::GrnsOfPo | Self::GrnsOfInvoice => DocumentKind::Grn,
            Self::PoOfInvoice | Self::PoOfGrn => DocumentKind::PurchaseOrder,
        }
    }

    /// 目标单据上参与匹配的字段
    pub fn target_field(self) -> &'static str {
        match self {
            Self::InvoicesOfPo => "buyerOrderNo",
            Self::GrnsOfPo => "poNumber",
            Self::PoOfInvoice | Self::PoOfGrn => "poNumber",
            Self::GrnsOfInvoice => "vendorInvoiceNo",
            Self::InvoiceOfGrn => "invoiceNumber",
        }
    }
}

/// 业务主键匹配器：组织隔离，仅有效单据；发票/收货单还须已审批
#[derive(Clone)]
pub struct BusinessKeyMatcher {
    store: Arc<dyn DocumentStore>,
    approved_status: String,
}

impl BusinessKeyMatcher {
    pub fn new(store: Arc<dyn DocumentStore>, approved_status: impl Into<String>) -> Self {
        Self {
            store,
            approved_status: approved_status.into(),
        }
    }

    fn query(&self, link: Link, key: &str, organization_id: &str) -> DocumentQuery {
        let query = DocumentQuery::new(organization_id).equals(link.target_field(), key);
        if link.target().requires_approval() {
            query.with_status(self.approved_status.as_str())
        } else {
            query
        }
    }

    /// 全部关联单据；空主键直接返回空集，不做通配
    pub async fn find_linked(
        &self,
        link: Link,
        key: &str,
        organization_id: &str,
    ) -> Result<Vec<Document>, StoreError> {
        if key.is_empty() {
            return Ok(Vec::new());
        }
        let docs = self
            .store
            .find(link.target(), &self.query(link, key, organization_id), 0, None)
            .await?;
        tracing::debug!("{:?} [{}] 匹配到 {} 条", link, key, docs.len());
        Ok(docs)
    }

    /// 单个关联单据 (多条同号时取最新一条)
    pub async fn find_one_linked(
        &self,
        link: Link,
        key: &str,
        organization_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        if key.is_empty() {
            return Ok(None);
        }
        let doc = self
            .store
            .find_one(link.target(), &self.query(link, key, organization_id))
            .await?;
        tracing::debug!("{:?} [{}] 匹配: {}", link, key, doc.is_some());
        Ok(doc)
    }
}
