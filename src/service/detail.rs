use std::time::Instant;
use tracing::info;

use super::aggregate::sum_by;
use super::reconcile::{GrnReconciliation, InvoiceReconciliation, PoReconciliation};
use super::{Link, WorkspaceService};
use crate::error::Result;
use crate::models::detail::raw_view;
use crate::models::numeric::to_fixed;
use crate::models::{
    Document, DocumentKind, GrnDetail, GrnDetailSummary, GrnFields, InvoiceDetail,
    InvoiceDetailSummary, InvoiceFields, LinkedGrn, LinkedInvoice, LinkedPo, PoDetail,
    PoDetailSummary, PurchaseOrderFields,
};

impl WorkspaceService {
    /// 采购订单详情：全部关联发票与收货单
    pub async fn po_detail(&self, organization_id: &str, id: &str) -> Result<PoDetail> {
        let start = Instant::now();
        let doc = self.load(DocumentKind::PurchaseOrder, organization_id, id).await?;
        let po = PurchaseOrderFields::from_document(&doc);

        let (invoices, grns) = tokio::try_join!(
            self.matcher
                .find_linked(Link::InvoicesOfPo, &po.po_number, organization_id),
            self.matcher
                .find_linked(Link::GrnsOfPo, &po.po_number, organization_id),
        )?;
        let r = PoReconciliation::compute(&po, &invoices, &grns);

        info!(
            "✓ 采购订单详情 {} ({}): 发票 {} 张, 收货单 {} 张, 耗时: {:?}",
            id,
            po.po_number,
            invoices.len(),
            grns.len(),
            start.elapsed()
        );

        Ok(PoDetail {
            po: raw_view(&doc),
            summary: PoDetailSummary {
                invoiced_qty: r.invoiced_qty,
                invoiced_value: to_fixed(r.invoiced_value, 2),
                grn_accepted_qty: r.grn_accepted_qty,
                grn_rejected_qty: r.grn_rejected_qty,
                qty_invoiced_percent: r.qty_invoiced_percent,
                value_invoiced_percent: r.value_invoiced_percent,
                qty_received_percent: r.qty_received_percent,
                invoice_status: r.invoice_status,
                grn_status: r.grn_status,
            },
            linked_invoices: invoices.iter().map(linked_invoice).collect(),
            linked_grns: grns.iter().map(linked_grn).collect(),
        })
    }

    /// 发票详情：关联采购订单与全部收货单
    pub async fn invoice_detail(&self, organization_id: &str, id: &str) -> Result<InvoiceDetail> {
        let start = Instant::now();
        let doc = self.load(DocumentKind::Invoice, organization_id, id).await?;
        let invoice = InvoiceFields::from_document(&doc);

        let (po, grns) = tokio::try_join!(
            self.matcher
                .find_one_linked(Link::PoOfInvoice, &invoice.buyer_order_no, organization_id),
            self.matcher
                .find_linked(Link::GrnsOfInvoice, &invoice.invoice_number, organization_id),
        )?;
        let r = InvoiceReconciliation::compute(&invoice, po.as_ref(), &grns);

        info!(
            "✓ 发票详情 {} ({}): 采购订单 {}, 收货单 {} 张, 耗时: {:?}",
            id,
            invoice.invoice_number,
            po.is_some(),
            grns.len(),
            start.elapsed()
        );

        Ok(InvoiceDetail {
            invoice: raw_view(&doc),
            summary: InvoiceDetailSummary {
                invoice_qty: invoice.invoice_qty,
                grn_accepted_qty: r.grn_accepted_qty,
                grn_rejected_qty: r.grn_rejected_qty,
                qty_received_percent: r.qty_received_percent,
                po_status: r.po_status,
                grn_status: r.grn_status,
            },
            linked_po: po.as_ref().map(linked_po),
            linked_grns: grns.iter().map(linked_grn).collect(),
        })
    }

    /// 收货单详情：明细行、关联发票与采购订单
    pub async fn grn_detail(&self, organization_id: &str, id: &str) -> Result<GrnDetail> {
        let start = Instant::now();
        let doc = self.load(DocumentKind::Grn, organization_id, id).await?;
        let grn = GrnFields::from_document(&doc);

        let (invoice, po) = tokio::try_join!(
            self.matcher
                .find_one_linked(Link::InvoiceOfGrn, &grn.vendor_invoice_no, organization_id),
            self.matcher
                .find_one_linked(Link::PoOfGrn, &grn.po_number, organization_id),
        )?;
        let r = GrnReconciliation::compute(&grn, invoice.as_ref());

        info!(
            "✓ 收货单详情 {} ({}): 发票 {}, 采购订单 {}, 耗时: {:?}",
            id,
            grn.grn_number,
            invoice.is_some(),
            po.is_some(),
            start.elapsed()
        );

        Ok(GrnDetail {
            grn: raw_view(&doc),
            summary: GrnDetailSummary {
                received_qty: r.received_qty,
                accepted_qty: r.accepted_qty,
                rejected_qty: r.rejected_qty,
                invoice_qty: r.invoice_qty,
                accepted_vs_invoice_percent: r.accepted_vs_invoice_percent,
                invoice_status: r.invoice_status,
                acceptance_status: r.acceptance_status,
            },
            lines: grn.lines,
            linked_invoice: invoice.as_ref().map(linked_invoice),
            linked_po: po.as_ref().map(linked_po),
        })
    }
}

fn linked_po(doc: &Document) -> LinkedPo {
    LinkedPo::from(&PurchaseOrderFields::from_document(doc))
}

fn linked_invoice(doc: &Document) -> LinkedInvoice {
    LinkedInvoice::from(&InvoiceFields::from_document(doc))
}

fn linked_grn(doc: &Document) -> LinkedGrn {
    let grn = GrnFields::from_document(doc);
    let received = sum_by(&grn.lines, |line| line.received_qty);
    let accepted = sum_by(&grn.lines, |line| line.accepted_qty);
    LinkedGrn::new(&grn, received, accepted)
}
