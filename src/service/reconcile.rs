use crate::models::numeric::percent_label;
use crate::models::{
    AcceptanceStatus, Document, GrnFields, GrnInvoiceStatus, InvoiceFields, InvoiceGrnStatus,
    InvoicePoStatus, PoInvoiceStatus, PurchaseOrderFields, ReceiptStatus, StatusTags,
};

use super::aggregate::{self, sum_by};
use super::classify;

/// 采购订单对账结果
#[derive(Debug, Clone)]
pub struct PoReconciliation {
    pub invoiced_qty: f64,
    pub invoiced_value: f64,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub qty_invoiced_percent: String,
    pub value_invoiced_percent: String,
    pub qty_received_percent: String,
    pub invoice_status: PoInvoiceStatus,
    pub grn_status: StatusTags<ReceiptStatus>,
}

impl PoReconciliation {
    pub fn compute(po: &PurchaseOrderFields, invoices: &[Document], grns: &[Document]) -> Self {
        let invoiced_qty = aggregate::sum_field(invoices, "invoiceQty");
        let invoiced_value = aggregate::sum_field(invoices, "totalAmount");
        let grn_accepted_qty = aggregate::accepted_qty(grns);
        let grn_rejected_qty = aggregate::rejected_qty(grns);
        let has_rejections = aggregate::has_rejections(grns);

        Self {
            invoiced_qty,
            invoiced_value,
            grn_accepted_qty,
            grn_rejected_qty,
            qty_invoiced_percent: percent_label(invoiced_qty, po.total_qty),
            value_invoiced_percent: percent_label(invoiced_value, po.total_order_value),
            qty_received_percent: percent_label(grn_accepted_qty, po.total_qty),
            invoice_status: classify::po_invoice_status(po.total_qty, invoiced_qty),
            grn_status: classify::po_grn_status(po.total_qty, grn_accepted_qty, has_rejections),
        }
    }
}

/// 发票对账结果
#[derive(Debug, Clone)]
pub struct InvoiceReconciliation {
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub qty_received_percent: String,
    pub po_status: InvoicePoStatus,
    pub grn_status: StatusTags<InvoiceGrnStatus>,
}

impl InvoiceReconciliation {
    pub fn compute(invoice: &InvoiceFields, po: Option<&Document>, grns: &[Document]) -> Self {
        let grn_accepted_qty = aggregate::accepted_qty(grns);
        let grn_rejected_qty = aggregate::rejected_qty(grns);
        let has_rejections = aggregate::has_rejections(grns);

        Self {
            grn_accepted_qty,
            grn_rejected_qty,
            qty_received_percent: percent_label(grn_accepted_qty, invoice.invoice_qty),
            po_status: classify::invoice_po_status(po.is_some()),
            grn_status: classify::invoice_grn_status(
                invoice.invoice_qty,
                grn_accepted_qty,
                !grns.is_empty(),
                has_rejections,
            ),
        }
    }
}

/// 收货单对账结果
#[derive(Debug, Clone)]
pub struct GrnReconciliation {
    pub received_qty: f64,
    pub accepted_qty: f64,
    pub rejected_qty: f64,
    pub invoice_qty: f64,
    pub accepted_vs_invoice_percent: String,
    pub invoice_status: GrnInvoiceStatus,
    pub acceptance_status: AcceptanceStatus,
}

impl GrnReconciliation {
    pub fn compute(grn: &GrnFields, invoice: Option<&Document>) -> Self {
        let received_qty = sum_by(&grn.lines, |line| line.received_qty);
        let accepted_qty = sum_by(&grn.lines, |line| line.accepted_qty);
        let rejected_qty = received_qty - accepted_qty;
        let invoice_qty = invoice.map_or(0.0, |inv| inv.number("invoiceQty"));

        Self {
            received_qty,
            accepted_qty,
            rejected_qty,
            invoice_qty,
            accepted_vs_invoice_percent: percent_label(accepted_qty, invoice_qty),
            invoice_status: classify::grn_invoice_status(accepted_qty, invoice_qty, invoice.is_some()),
            acceptance_status: classify::grn_acceptance_status(rejected_qty),
        }
    }
}
