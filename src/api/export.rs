use crate::models::{
    GrnWorkspaceRow, InvoiceWorkspaceRow, PoWorkspaceRow, StatusLabel, StatusTags,
};

const PO_HEADERS: &[&str] = &[
    "PO Number",
    "PO Date",
    "Buyer",
    "Seller",
    "Site",
    "City",
    "PO Qty",
    "PO Value",
    "Invoiced Qty",
    "Invoiced Value",
    "GRN Accepted Qty",
    "GRN Rejected Qty",
    "Qty Invoiced %",
    "Value Invoiced %",
    "Qty Received %",
    "Invoice Status",
    "GRN Status",
    "Linked Invoices",
    "Linked GRNs",
];

const INVOICE_HEADERS: &[&str] = &[
    "Invoice Number",
    "Invoice Date",
    "Buyer Order No",
    "Buyer",
    "Seller",
    "Site",
    "Invoice Qty",
    "Gross Amount",
    "GST Amount",
    "Total Amount",
    "GRN Accepted Qty",
    "GRN Rejected Qty",
    "Qty Received %",
    "PO Status",
    "GRN Status",
    "Linked GRNs",
];

const GRN_HEADERS: &[&str] = &[
    "GRN Number",
    "GRN Date",
    "PO Number",
    "Vendor Invoice No",
    "Buyer",
    "Seller",
    "Site",
    "Received Qty",
    "Accepted Qty",
    "Rejected Qty",
    "Invoice Qty",
    "Accepted vs Invoice %",
    "Invoice Status",
    "Acceptance Status",
];

fn write_csv<I>(headers: &[&str], records: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(&record)?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn tags<S: StatusLabel>(tags: &StatusTags<S>) -> String {
    tags.labels().collect::<Vec<_>>().join("; ")
}

pub fn po_csv(rows: &[PoWorkspaceRow]) -> Result<Vec<u8>, csv::Error> {
    write_csv(
        PO_HEADERS,
        rows.iter().map(|r| {
            vec![
                r.po_number.clone(),
                r.po_date.clone(),
                r.buyer.clone(),
                r.seller.clone(),
                r.site.clone(),
                r.city.clone(),
                r.po_qty.to_string(),
                r.po_value.clone(),
                r.invoiced_qty.to_string(),
                r.invoiced_value.clone(),
                r.grn_accepted_qty.to_string(),
                r.grn_rejected_qty.to_string(),
                r.qty_invoiced_percent.clone(),
                r.value_invoiced_percent.clone(),
                r.qty_received_percent.clone(),
                r.invoice_status.label().to_string(),
                tags(&r.grn_status),
                r.linked_invoices_count.to_string(),
                r.linked_grns_count.to_string(),
            ]
        }),
    )
}

pub fn invoice_csv(rows: &[InvoiceWorkspaceRow]) -> Result<Vec<u8>, csv::Error> {
    write_csv(
        INVOICE_HEADERS,
        rows.iter().map(|r| {
            vec![
                r.invoice_number.clone(),
                r.invoice_date.clone(),
                r.buyer_order_no.clone(),
                r.buyer.clone(),
                r.seller.clone(),
                r.site.clone(),
                r.invoice_qty.to_string(),
                r.gross_amount.to_string(),
                r.gst_amount.to_string(),
                r.total_amount.to_string(),
                r.grn_accepted_qty.to_string(),
                r.grn_rejected_qty.to_string(),
                r.qty_received_percent.clone(),
                r.po_status.label().to_string(),
                tags(&r.grn_status),
                r.linked_grns_count.to_string(),
            ]
        }),
    )
}

pub fn grn_csv(rows: &[GrnWorkspaceRow]) -> Result<Vec<u8>, csv::Error> {
    write_csv(
        GRN_HEADERS,
        rows.iter().map(|r| {
            vec![
                r.grn_number.clone(),
                r.grn_date.clone(),
                r.po_number.clone(),
                r.vendor_invoice_no.clone(),
                r.buyer.clone(),
                r.seller.clone(),
                r.site.clone(),
                r.received_qty.to_string(),
                r.accepted_qty.to_string(),
                r.rejected_qty.to_string(),
                r.invoice_qty.to_string(),
                r.accepted_vs_invoice_percent.clone(),
                r.invoice_status.label().to_string(),
                r.acceptance_status.label().to_string(),
            ]
        }),
    )
}
