//! 状态分类：严格三态比较 (小于 / 等于 / 大于)，浮点精确相等，不带容差

use crate::models::{
    AcceptanceStatus, GrnInvoiceStatus, InvoiceGrnStatus, InvoicePoStatus, PoInvoiceStatus,
    ReceiptStatus, StatusTags,
};

pub fn po_invoice_status(po_qty: f64, invoiced_qty: f64) -> PoInvoiceStatus {
    if invoiced_qty == 0.0 {
        PoInvoiceStatus::Open
    } else if invoiced_qty < po_qty {
        PoInvoiceStatus::PartiallyInvoiced
    } else if invoiced_qty == po_qty {
        PoInvoiceStatus::FullyInvoiced
    } else {
        PoInvoiceStatus::OverInvoiced
    }
}

pub fn po_grn_status(po_qty: f64, accepted_qty: f64, has_rejections: bool) -> StatusTags<ReceiptStatus> {
    let primary = if accepted_qty == 0.0 {
        ReceiptStatus::NoGrnYet
    } else if accepted_qty < po_qty {
        ReceiptStatus::PartiallyReceived
    } else if accepted_qty == po_qty {
        ReceiptStatus::FullyReceived
    } else {
        ReceiptStatus::OverReceived
    };
    StatusTags::new(primary, has_rejections)
}

pub fn invoice_po_status(has_po: bool) -> InvoicePoStatus {
    if has_po {
        InvoicePoStatus::PoLinked
    } else {
        InvoicePoStatus::NoPo
    }
}

pub fn invoice_grn_status(
    invoice_qty: f64,
    accepted_qty: f64,
    has_grn: bool,
    has_rejections: bool,
) -> StatusTags<InvoiceGrnStatus> {
    let primary = if !has_grn {
        InvoiceGrnStatus::MissingGrn
    } else if accepted_qty < invoice_qty {
        InvoiceGrnStatus::GrnUnder
    } else if accepted_qty == invoice_qty {
        InvoiceGrnStatus::GrnMatched
    } else {
        InvoiceGrnStatus::GrnOver
    };
    StatusTags::new(primary, has_rejections)
}

pub fn grn_invoice_status(accepted_qty: f64, invoice_qty: f64, has_invoice: bool) -> GrnInvoiceStatus {
    if !has_invoice {
        GrnInvoiceStatus::MissingInvoice
    } else if accepted_qty < invoice_qty {
        GrnInvoiceStatus::UnderVsInvoice
    } else if accepted_qty == invoice_qty {
        GrnInvoiceStatus::MatchedVsInvoice
    } else {
        GrnInvoiceStatus::OverVsInvoice
    }
}

pub fn grn_acceptance_status(rejected_qty: f64) -> AcceptanceStatus {
    if rejected_qty == 0.0 {
        AcceptanceStatus::FullyAccepted
    } else {
        AcceptanceStatus::PartiallyAccepted
    }
}
