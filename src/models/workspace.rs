use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::status::{
    AcceptanceStatus, GrnInvoiceStatus, InvoiceGrnStatus, InvoicePoStatus, PoInvoiceStatus,
    ReceiptStatus, StatusTags,
};

/// 日期区间 (ISO 字符串，两端均可省略)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 工作台过滤条件
#[derive(Debug, Clone, Default)]
pub struct WorkspaceFilters {
    pub date_range: Option<DateRange>,
    pub date_type: Option<String>,
    pub site: Vec<String>,
    pub city: Vec<String>,
    pub buyer: Vec<String>,
    pub seller: Vec<String>,
    pub search: Option<String>,
    pub invoice_status: Vec<String>,
    pub grn_status: Vec<String>,
    pub po_status: Vec<String>,
    pub acceptance_status: Vec<String>,
}

/// 分页请求 (已归一化：page >= 1, limit >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub pages: u64,
    pub limit: u32,
}

impl Pagination {
    pub fn new(total: u64, request: PageRequest) -> Self {
        let limit = u64::from(request.limit.max(1));
        Self {
            total,
            page: request.page,
            pages: total.div_ceil(limit),
            limit: request.limit,
        }
    }
}

/// 工作台返回信封
#[derive(Debug, Clone, Serialize)]
pub struct WorkspacePage<R, S, T> {
    pub documents: Vec<R>,
    pub summary: S,
    pub totals: T,
    pub pagination: Pagination,
}

// ---------- 采购订单工作台 ----------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoWorkspaceRow {
    pub id: String,
    pub po_number: String,
    pub po_date: String,
    pub buyer: String,
    pub seller: String,
    pub site: String,
    pub city: String,
    pub po_qty: f64,
    pub po_value: String,
    pub invoiced_qty: f64,
    pub invoiced_value: String,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub qty_invoiced_percent: String,
    pub value_invoiced_percent: String,
    pub qty_received_percent: String,
    pub invoice_status: PoInvoiceStatus,
    pub grn_status: StatusTags<ReceiptStatus>,
    pub linked_invoices_count: usize,
    #[serde(rename = "linkedGRNsCount")]
    pub linked_grns_count: usize,
    #[serde(skip)]
    pub po_value_raw: f64,
    #[serde(skip)]
    pub invoiced_value_raw: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoSummary {
    #[serde(rename = "totalPOs")]
    pub total_pos: usize,
    pub open: usize,
    pub partially_invoiced: usize,
    pub fully_invoiced: usize,
    pub over_invoiced: usize,
    #[serde(rename = "noGRNYet")]
    pub no_grn_yet: usize,
    pub partially_received: usize,
    pub fully_received: usize,
    pub over_received: usize,
    pub has_rejections: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoTotals {
    pub rows: usize,
    pub po_qty: f64,
    pub po_value: f64,
    pub invoiced_qty: f64,
    pub invoiced_value: f64,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub avg_qty_invoiced: f64,
}

pub type PoWorkspace = WorkspacePage<PoWorkspaceRow, PoSummary, PoTotals>;

// ---------- 发票工作台 ----------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWorkspaceRow {
    pub id: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub buyer_order_no: String,
    pub buyer: String,
    pub seller: String,
    pub site: String,
    pub invoice_qty: f64,
    pub gross_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub linked_po_id: Option<String>,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub qty_received_percent: String,
    pub po_status: InvoicePoStatus,
    pub grn_status: StatusTags<InvoiceGrnStatus>,
    #[serde(rename = "linkedGRNsCount")]
    pub linked_grns_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_invoices: usize,
    #[serde(rename = "noPO")]
    pub no_po: usize,
    pub po_linked: usize,
    #[serde(rename = "missingGRN")]
    pub missing_grn: usize,
    pub grn_under: usize,
    pub grn_matched: usize,
    pub grn_over: usize,
    pub has_rejections: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub rows: usize,
    pub invoice_qty: f64,
    pub gross_amount: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
    pub grn_accepted_qty: f64,
    pub grn_rejected_qty: f64,
    pub avg_qty_received: f64,
}

pub type InvoiceWorkspace = WorkspacePage<InvoiceWorkspaceRow, InvoiceSummary, InvoiceTotals>;

// ---------- 收货单工作台 ----------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrnWorkspaceRow {
    pub id: String,
    pub grn_number: String,
    pub grn_date: String,
    pub po_number: String,
    pub vendor_invoice_no: String,
    pub buyer: String,
    pub seller: String,
    pub site: String,
    pub received_qty: f64,
    pub accepted_qty: f64,
    pub rejected_qty: f64,
    pub invoice_qty: f64,
    pub linked_invoice_id: Option<String>,
    pub accepted_vs_invoice_percent: String,
    pub invoice_status: GrnInvoiceStatus,
    pub acceptance_status: AcceptanceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrnSummary {
    #[serde(rename = "totalGRNs")]
    pub total_grns: usize,
    pub missing_invoice: usize,
    pub under_vs_invoice: usize,
    pub matched_vs_invoice: usize,
    pub over_vs_invoice: usize,
    pub fully_accepted: usize,
    pub partially_accepted: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrnTotals {
    pub rows: usize,
    pub received_qty: f64,
    pub accepted_qty: f64,
    pub rejected_qty: f64,
    pub invoice_qty: f64,
}

pub type GrnWorkspace = WorkspacePage<GrnWorkspaceRow, GrnSummary, GrnTotals>;

/// 过滤器候选值
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkspaceFacets {
    pub sites: Vec<String>,
    pub cities: Vec<String>,
    pub buyers: Vec<String>,
    pub sellers: Vec<String>,
    pub statuses: IndexMap<&'static str, Vec<&'static str>>,
}
