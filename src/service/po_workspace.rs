use std::time::Instant;
use tracing::{debug, info};

use super::aggregate::{mean_by, sum_by};
use super::query::{matches_any, matches_search, search_needle};
use super::reconcile::PoReconciliation;
use super::{retain_par, Link, WorkspaceService};
use crate::error::Result;
use crate::models::numeric::{percent_value, to_fixed};
use crate::models::{
    Document, DocumentKind, PageRequest, Pagination, PoInvoiceStatus, PoSummary, PoTotals,
    PoWorkspace, PoWorkspaceRow, PurchaseOrderFields, ReceiptStatus, StatusLabel, WorkspaceFilters,
    WorkspacePage,
};

impl WorkspaceService {
    /// 采购订单工作台
    pub async fn po_workspace(
        &self,
        organization_id: &str,
        filters: &WorkspaceFilters,
        page: PageRequest,
    ) -> Result<PoWorkspace> {
        let start = Instant::now();
        let (docs, total) = self
            .fetch_page(DocumentKind::PurchaseOrder, organization_id, filters, page)
            .await?;
        let fetched = docs.len();

        let rows = self
            .enrich_all(docs, |doc| self.po_row(organization_id, doc))
            .await?;

        // summary 统计过滤前的整页，totals 统计过滤后的结果
        let summary = po_summary(&rows);
        let needle = search_needle(filters.search.as_deref());
        let rows = retain_par(rows, |row| {
            matches_search(
                needle.as_deref(),
                &[
                    row.po_number.as_str(),
                    row.buyer.as_str(),
                    row.seller.as_str(),
                    row.site.as_str(),
                ],
            ) && matches_any(&filters.invoice_status, [row.invoice_status.label()])
                && matches_any(&filters.grn_status, row.grn_status.labels())
        });
        let totals = po_totals(&rows);

        info!(
            "✓ 采购订单工作台 org={} page={} limit={}: 总数 {}, 本页 {}, 过滤后 {}, 耗时: {:?}",
            organization_id,
            page.page,
            page.limit,
            total,
            fetched,
            rows.len(),
            start.elapsed()
        );

        Ok(WorkspacePage {
            documents: rows,
            summary,
            totals,
            pagination: Pagination::new(total, page),
        })
    }

    async fn po_row(&self, organization_id: &str, doc: Document) -> Result<PoWorkspaceRow> {
        let po = PurchaseOrderFields::from_document(&doc);
        let (invoices, grns) = tokio::try_join!(
            self.matcher
                .find_linked(Link::InvoicesOfPo, &po.po_number, organization_id),
            self.matcher
                .find_linked(Link::GrnsOfPo, &po.po_number, organization_id),
        )?;
        debug!(
            "采购订单 {} 关联发票 {} 张, 收货单 {} 张",
            po.po_number,
            invoices.len(),
            grns.len()
        );

        let r = PoReconciliation::compute(&po, &invoices, &grns);
        Ok(PoWorkspaceRow {
            id: po.id,
            po_number: po.po_number,
            po_date: po.po_date,
            buyer: po.buyer_name,
            seller: po.seller_name,
            site: po.site,
            city: po.city,
            po_qty: po.total_qty,
            po_value: to_fixed(po.total_order_value, 2),
            invoiced_qty: r.invoiced_qty,
            invoiced_value: to_fixed(r.invoiced_value, 2),
            grn_accepted_qty: r.grn_accepted_qty,
            grn_rejected_qty: r.grn_rejected_qty,
            qty_invoiced_percent: r.qty_invoiced_percent,
            value_invoiced_percent: r.value_invoiced_percent,
            qty_received_percent: r.qty_received_percent,
            invoice_status: r.invoice_status,
            grn_status: r.grn_status,
            linked_invoices_count: invoices.len(),
            linked_grns_count: grns.len(),
            po_value_raw: po.total_order_value,
            invoiced_value_raw: r.invoiced_value,
        })
    }
}

fn po_summary(rows: &[PoWorkspaceRow]) -> PoSummary {
    let mut summary = PoSummary {
        total_pos: rows.len(),
        ..PoSummary::default()
    };
    for row in rows {
        match row.invoice_status {
            PoInvoiceStatus::Open => summary.open += 1,
            PoInvoiceStatus::PartiallyInvoiced => summary.partially_invoiced += 1,
            PoInvoiceStatus::FullyInvoiced => summary.fully_invoiced += 1,
            PoInvoiceStatus::OverInvoiced => summary.over_invoiced += 1,
        }
        match row.grn_status.primary {
            ReceiptStatus::NoGrnYet => summary.no_grn_yet += 1,
            ReceiptStatus::PartiallyReceived => summary.partially_received += 1,
            ReceiptStatus::FullyReceived => summary.fully_received += 1,
            ReceiptStatus::OverReceived => summary.over_received += 1,
        }
        if row.grn_status.has_rejections {
            summary.has_rejections += 1;
        }
    }
    summary
}

fn po_totals(rows: &[PoWorkspaceRow]) -> PoTotals {
    PoTotals {
        rows: rows.len(),
        po_qty: sum_by(rows, |r| r.po_qty),
        po_value: sum_by(rows, |r| r.po_value_raw),
        invoiced_qty: sum_by(rows, |r| r.invoiced_qty),
        invoiced_value: sum_by(rows, |r| r.invoiced_value_raw),
        grn_accepted_qty: sum_by(rows, |r| r.grn_accepted_qty),
        grn_rejected_qty: sum_by(rows, |r| r.grn_rejected_qty),
        // 取已四舍五入的百分比字符串再求平均
        avg_qty_invoiced: mean_by(rows, |r| percent_value(&r.qty_invoiced_percent)),
    }
}
