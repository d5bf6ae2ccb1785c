use std::time::Instant;
use tracing::{debug, info};

use super::aggregate::sum_by;
use super::query::{matches_any, matches_search, search_needle};
use super::reconcile::GrnReconciliation;
use super::{retain_par, Link, WorkspaceService};
use crate::error::Result;
use crate::models::{
    AcceptanceStatus, Document, DocumentKind, GrnFields, GrnInvoiceStatus, GrnSummary, GrnTotals,
    GrnWorkspace, GrnWorkspaceRow, PageRequest, Pagination, StatusLabel, WorkspaceFilters,
    WorkspacePage,
};

impl WorkspaceService {
    /// 收货单工作台
    pub async fn grn_workspace(
        &self,
        organization_id: &str,
        filters: &WorkspaceFilters,
        page: PageRequest,
    ) -> Result<GrnWorkspace> {
        let start = Instant::now();
        let (docs, total) = self
            .fetch_page(DocumentKind::Grn, organization_id, filters, page)
            .await?;
        let fetched = docs.len();

        let rows = self
            .enrich_all(docs, |doc| self.grn_row(organization_id, doc))
            .await?;

        let summary = grn_summary(&rows);
        let needle = search_needle(filters.search.as_deref());
        let rows = retain_par(rows, |row| {
            matches_search(
                needle.as_deref(),
                &[
                    row.grn_number.as_str(),
                    row.po_number.as_str(),
                    row.vendor_invoice_no.as_str(),
                    row.buyer.as_str(),
                    row.seller.as_str(),
                    row.site.as_str(),
                ],
            ) && matches_any(&filters.invoice_status, [row.invoice_status.label()])
                && matches_any(&filters.acceptance_status, [row.acceptance_status.label()])
        });
        let totals = grn_totals(&rows);

        info!(
            "✓ 收货单工作台 org={} page={} limit={}: 总数 {}, 本页 {}, 过滤后 {}, 耗时: {:?}",
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

    async fn grn_row(&self, organization_id: &str, doc: Document) -> Result<GrnWorkspaceRow> {
        let grn = GrnFields::from_document(&doc);
        let invoice = self
            .matcher
            .find_one_linked(Link::InvoiceOfGrn, &grn.vendor_invoice_no, organization_id)
            .await?;
        debug!("收货单 {} 关联发票: {}", grn.grn_number, invoice.is_some());

        let r = GrnReconciliation::compute(&grn, invoice.as_ref());
        Ok(GrnWorkspaceRow {
            id: grn.id,
            grn_number: grn.grn_number,
            grn_date: grn.grn_date,
            po_number: grn.po_number,
            vendor_invoice_no: grn.vendor_invoice_no,
            buyer: grn.buyer_name,
            seller: grn.seller_name,
            site: grn.site,
            received_qty: r.received_qty,
            accepted_qty: r.accepted_qty,
            rejected_qty: r.rejected_qty,
            invoice_qty: r.invoice_qty,
            linked_invoice_id: invoice.map(|inv| inv.id),
            accepted_vs_invoice_percent: r.accepted_vs_invoice_percent,
            invoice_status: r.invoice_status,
            acceptance_status: r.acceptance_status,
        })
    }
}

fn grn_summary(rows: &[GrnWorkspaceRow]) -> GrnSummary {
    let mut summary = GrnSummary {
        total_grns: rows.len(),
        ..GrnSummary::default()
    };
    for row in rows {
        match row.invoice_status {
            GrnInvoiceStatus::MissingInvoice => summary.missing_invoice += 1,
            GrnInvoiceStatus::UnderVsInvoice => summary.under_vs_invoice += 1,
            GrnInvoiceStatus::MatchedVsInvoice => summary.matched_vs_invoice += 1,
            GrnInvoiceStatus::OverVsInvoice => summary.over_vs_invoice += 1,
        }
        match row.acceptance_status {
            AcceptanceStatus::FullyAccepted => summary.fully_accepted += 1,
            AcceptanceStatus::PartiallyAccepted => summary.partially_accepted += 1,
        }
    }
    summary
}

fn grn_totals(rows: &[GrnWorkspaceRow]) -> GrnTotals {
    GrnTotals {
        rows: rows.len(),
        received_qty: sum_by(rows, |r| r.received_qty),
        accepted_qty: sum_by(rows, |r| r.accepted_qty),
        rejected_qty: sum_by(rows, |r| r.rejected_qty),
        invoice_qty: sum_by(rows, |r| r.invoice_qty),
    }
}
