use serde::Serialize;
use serde_json::Value;

use super::document::Document;
use super::numeric::lenient_f64;

/// 采购订单业务字段 (已宽松解析)
#[derive(Debug, Clone)]
pub struct PurchaseOrderFields {
    pub id: String,
    pub po_number: String,
    pub po_date: String,
    pub buyer_name: String,
    pub seller_name: String,
    pub site: String,
    pub city: String,
    pub total_qty: f64,
    pub total_order_value: f64,
}

impl PurchaseOrderFields {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            po_number: doc.text("poNumber").to_string(),
            po_date: doc.text("poDate").to_string(),
            buyer_name: doc.text("buyerName").to_string(),
            seller_name: doc.text("sellerName").to_string(),
            site: doc.text("site").to_string(),
            city: doc.text("city").to_string(),
            total_qty: doc.number("totalQty"),
            total_order_value: doc.number("totalOrderValue"),
        }
    }
}

/// 发票业务字段
#[derive(Debug, Clone)]
pub struct InvoiceFields {
    pub id: String,
    pub invoice_number: String,
    pub buyer_order_no: String,
    pub invoice_date: String,
    pub buyer_name: String,
    pub seller_name: String,
    pub site: String,
    pub invoice_qty: f64,
    pub gross_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
}

impl InvoiceFields {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            invoice_number: doc.text("invoiceNumber").to_string(),
            buyer_order_no: doc.text("buyerOrderNo").to_string(),
            invoice_date: doc.text("invoiceDate").to_string(),
            buyer_name: doc.text("buyerName").to_string(),
            seller_name: doc.text("sellerName").to_string(),
            site: doc.text("site").to_string(),
            invoice_qty: doc.number("invoiceQty"),
            gross_amount: doc.number("grossAmount"),
            gst_amount: doc.number("gstAmount"),
            total_amount: doc.number("totalAmount"),
        }
    }
}

/// 收货单明细行；拒收数量不存储，由 received - accepted 推导
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrnLine {
    pub line_no: usize,
    pub received_qty: f64,
    pub accepted_qty: f64,
    pub rejected_qty: f64,
    pub item: Value,
}

impl GrnLine {
    pub fn from_item(line_no: usize, item: &Value) -> Self {
        let received_qty = lenient_f64(item.get("receivedQty"));
        let accepted_qty = lenient_f64(item.get("acceptedQty"));
        Self {
            line_no,
            received_qty,
            accepted_qty,
            rejected_qty: received_qty - accepted_qty,
            item: item.clone(),
        }
    }
}

/// 收货单业务字段
#[derive(Debug, Clone)]
pub struct GrnFields {
    pub id: String,
    pub grn_number: String,
    pub grn_date: String,
    pub po_number: String,
    pub vendor_invoice_no: String,
    pub buyer_name: String,
    pub seller_name: String,
    pub site: String,
    pub lines: Vec<GrnLine>,
}

impl GrnFields {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            grn_number: doc.text("grnNumber").to_string(),
            grn_date: doc.text("grnDate").to_string(),
            po_number: doc.text("poNumber").to_string(),
            vendor_invoice_no: doc.text("vendorInvoiceNo").to_string(),
            buyer_name: doc.text("buyerName").to_string(),
            seller_name: doc.text("sellerName").to_string(),
            site: doc.text("site").to_string(),
            lines: doc
                .items()
                .iter()
                .enumerate()
                .map(|(idx, item)| GrnLine::from_item(idx + 1, item))
                .collect(),
        }
    }
}
