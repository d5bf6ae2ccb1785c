use serde::Serialize;
use serde_json::{Map, Value};

use super::document::Document;
use super::procurement::{GrnFields, GrnLine, InvoiceFields, PurchaseOrderFields};
use super::status::{
    AcceptanceStatus, GrnInvoiceStatus, InvoiceGrnStatus, InvoicePoStatus, PoInvoiceStatus,
    ReceiptStatus, StatusTags,
};

/// 单据原始字段 + id
pub fn raw_view(doc: &Document) -> Map<String, Value> {
    let mut view = doc.data.clone();
    view.insert("id".to_string(), Value::String(doc.id.clone()));
    view
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedPo {
    pub id: String,
    pub po_number: String,
    pub po_date: String,
    pub buyer: String,
    pub seller: String,
    pub total_qty: f64,
    pub total_order_value: f64,
}

impl From<&PurchaseOrderFields> for LinkedPo {
    fn from(po: &PurchaseOrderFields) -> Self {
        Self {
            id: po.id.clone(),
            po_number: po.po_number.clone(),
            po_date: po.po_date.clone(),
            buyer: po.buyer_name.clone(),
            seller: po.seller_name.clone(),
            total_qty: po.total_qty,
            total_order_value: po.total_order_value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInvoice {
    pub id: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub invoice_qty: f64,
    pub gross_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
}

impl From<&InvoiceFields> for LinkedInvoice {
    fn from(inv: &InvoiceFields) -> Self {
        Self {
            id: inv.id.clone(),
            invoice_number: inv.invoice_number.clone(),
            invoice_date: inv.invoice_date.clone(),
            invoice_qty: inv.invoice_qty,
            gross_amount: inv.gross_amount,
            gst_amount: inv.gst_amount,
            total_amount: inv.total_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedGrn {
    pub id: String,
    pub grn_number: String,
    pub grn_date: String,
    pub po_number: String,
    pub vendor_invoice_no: String,
    pub received_qty: f64,
    pub accepted_qty: f64,
    pub rejected_qty: f64,
    pub lines: Vec<GrnLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoDetailSummary {
    pub invoiced_qty: f64,
    pub invoiced_value: String,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub qty_invoiced_percent: String,
    pub value_invoiced_percent: String,
    pub qty_received_percent: String,
    pub invoice_status: PoInvoiceStatus,
    pub grn_status: StatusTags<ReceiptStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoDetail {
    pub po: Map<String, Value>,
    pub summary: PoDetailSummary,
    pub linked_invoices: Vec<LinkedInvoice>,
    #[serde(rename = "linkedGRNs")]
    pub linked_grns: Vec<LinkedGrn>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetailSummary {
    pub invoice_qty: f64,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub qty_received_percent: String,
    pub po_status: InvoicePoStatus,
    pub grn_status: StatusTags<InvoiceGrnStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    pub invoice: Map<String, Value>,
    pub summary: InvoiceDetailSummary,
    #[serde(rename = "linkedPO")]
    pub linked_po: Option<LinkedPo>,
    #[serde(rename = "linkedGRNs")]
    pub linked_grns: Vec<LinkedGrn>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrnDetailSummary {
    pub received_qty: f64,
    pub accepted_qty: f64,
    pub rejected_qty: f64,
    pub invoice_qty: f64,
    pub accepted_vs_invoice_percent: String,
    pub invoice_status: GrnInvoiceStatus,
    pub acceptance_status: AcceptanceStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrnDetail {
    pub grn: Map<String, Value>,
    pub summary: GrnDetailSummary,
    pub lines: Vec<GrnLine>,
    pub linked_invoice: Option<LinkedInvoice>,
    #[serde(rename = "linkedPO")]
    pub linked_po: Option<LinkedPo>,
}

impl LinkedGrn {
    pub fn new(grn: &GrnFields, received_qty: f64, accepted_qty: f64) -> Self {
        Self {
            id: grn.id.clone(),
            grn_number: grn.grn_number.clone(),
            grn_date: grn.grn_date.clone(),
            po_number: grn.po_number.clone(),
            vendor_invoice_no: grn.vendor_invoice_no.clone(),
            received_qty,
            accepted_qty,
            rejected_qty: received_qty - accepted_qty,
            lines: grn.lines.clone(),
        }
    }
}
