use std::time::Instant;
use tracing::{debug, info};

use super::aggregate::{mean_by, sum_by};
use super::query::{matches_any, matches_search, search_needle};
use super::reconcile::InvoiceReconciliation;
use super::{retain_par, Link, WorkspaceService};
use crate::error::Result;
use crate::models::numeric::percent_value;
use crate::models::{
    Document, DocumentKind, InvoiceFields, InvoiceGrnStatus, InvoicePoStatus, InvoiceSummary,
    InvoiceTotals, InvoiceWorkspace, InvoiceWorkspaceRow, PageRequest, Pagination, StatusLabel,
    WorkspaceFilters, WorkspacePage,
};

impl WorkspaceService {
    /// 发票工作台
    pub async fn invoice_workspace(
        &self,
        organization_id: &str,
        filters: &WorkspaceFilters,
        page: PageRequest,
    ) -> Result<InvoiceWorkspace> {
        let start = Instant::now();
        let (docs, total) = self
            .fetch_page(DocumentKind::Invoice, organization_id, filters, page)
            .await?;
        let fetched = docs.len();

        let rows = self
            .enrich_all(docs, |doc| self.invoice_row(organization_id, doc))
            .await?;

        let summary = invoice_summary(&rows);
        let needle = search_needle(filters.search.as_deref());
        let rows = retain_par(rows, |row| {
            matches_search(
                needle.as_deref(),
                &[
                    row.invoice_number.as_str(),
                    row.buyer_order_no.as_str(),
                    row.buyer.as_str(),
                    row.seller.as_str(),
                    row.site.as_str(),
                ],
            ) && matches_any(&filters.po_status, [row.po_status.label()])
                && matches_any(&filters.grn_status, row.grn_status.labels())
        });
        let totals = invoice_totals(&rows);

        info!(
            "✓ 发票工作台 org={} page={} limit={}: 总数 {}, 本页 {}, 过滤后 {}, 耗时: {:?}",
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

    async fn invoice_row(&self, organization_id: &str, doc: Document) -> Result<InvoiceWorkspaceRow> {
        let invoice = InvoiceFields::from_document(&doc);
        let (po, grns) = tokio::try_join!(
            self.matcher
                .find_one_linked(Link::PoOfInvoice, &invoice.buyer_order_no, organization_id),
            self.matcher
                .find_linked(Link::GrnsOfInvoice, &invoice.invoice_number, organization_id),
        )?;
        debug!(
            "发票 {} 关联采购订单: {}, 收货单 {} 张",
            invoice.invoice_number,
            po.is_some(),
            grns.len()
        );

        let r = InvoiceReconciliation::compute(&invoice, po.as_ref(), &grns);
        Ok(InvoiceWorkspaceRow {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            invoice_date: invoice.invoice_date,
            buyer_order_no: invoice.buyer_order_no,
            buyer: invoice.buyer_name,
            seller: invoice.seller_name,
            site: invoice.site,
            invoice_qty: invoice.invoice_qty,
            gross_amount: invoice.gross_amount,
            gst_amount: invoice.gst_amount,
            total_amount: invoice.total_amount,
            linked_po_id: po.map(|p| p.id),
            grn_accepted_qty: r.grn_accepted_qty,
            grn_rejected_qty: r.grn_rejected_qty,
            qty_received_percent: r.qty_received_percent,
            po_status: r.po_status,
            grn_status: r.grn_status,
            linked_grns_count: grns.len(),
        })
    }
}

fn invoice_summary(rows: &[InvoiceWorkspaceRow]) -> InvoiceSummary {
    let mut summary = InvoiceSummary {
        total_invoices: rows.len(),
        ..InvoiceSummary::default()
    };
    for row in rows {
        match row.po_status {
            InvoicePoStatus::NoPo => summary.no_po += 1,
            InvoicePoStatus::PoLinked => summary.po_linked += 1,
        }
        match row.grn_status.primary {
            InvoiceGrnStatus::MissingGrn => summary.missing_grn += 1,
            InvoiceGrnStatus::GrnUnder => summary.grn_under += 1,
            InvoiceGrnStatus::GrnMatched => summary.grn_matched += 1,
            InvoiceGrnStatus::GrnOver => summary.grn_over += 1,
        }
        if row.grn_status.has_rejections {
            summary.has_rejections += 1;
        }
    }
    summary
}

fn invoice_totals(rows: &[InvoiceWorkspaceRow]) -> InvoiceTotals {
    InvoiceTotals {
        rows: rows.len(),
        invoice_qty: sum_by(rows, |r| r.invoice_qty),
        gross_amount: sum_by(rows, |r| r.gross_amount),
        gst_amount: sum_by(rows, |r| r.gst_amount),
        total_amount: sum_by(rows, |r| r.total_amount),
        grn_accepted_qty: sum_by(rows, |r| r.grn_accepted_qty),
        grn_rejected_qty: sum_by(rows, |r| r.grn_rejected_qty),
        avg_qty_received: mean_by(rows, |r| percent_value(&r.qty_received_percent)),
    }
}
