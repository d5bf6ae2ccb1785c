mod common;

use common::*;
use serde_json::json;
use std::sync::Arc;

use procure_workspace_rust::config::WorkspaceConfig;
use procure_workspace_rust::models::{
    DateRange, DocumentKind, PageRequest, PoInvoiceStatus, ReceiptStatus, WorkspaceFilters,
};
use procure_workspace_rust::{WorkspaceError, WorkspaceService};

#[tokio::test]
async fn po_fully_invoiced() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 100, "totalOrderValue": "1000" }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": 100, "totalAmount": 1000 }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    assert_eq!(ws.documents.len(), 1);
    let row = &ws.documents[0];
    assert_eq!(row.invoice_status, PoInvoiceStatus::FullyInvoiced);
    assert_eq!(row.qty_invoiced_percent, "100.0%");
    assert_eq!(row.value_invoiced_percent, "100.0%");
    assert_eq!(row.po_value, "1000.00");
    assert_eq!(row.invoiced_value, "1000.00");
    assert_eq!(row.linked_invoices_count, 1);
    assert_eq!(ws.summary.fully_invoiced, 1);
}

#[tokio::test]
async fn po_over_invoiced() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": "100" }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": "150" }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    let row = &ws.documents[0];
    assert_eq!(row.invoice_status, PoInvoiceStatus::OverInvoiced);
    assert_eq!(row.qty_invoiced_percent, "150.0%");
}

#[tokio::test]
async fn invoices_are_summed_across_documents() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 100 }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": 40 }))
        .invoice("i2", json!({ "invoiceNumber": "INV-2", "buyerOrderNo": "PO-1", "invoiceQty": "abc" }))
        .invoice("i3", json!({ "invoiceNumber": "INV-3", "buyerOrderNo": "PO-1", "invoiceQty": "20" }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    let row = &ws.documents[0];
    // 无法解析的数量按 0 计，但单据仍计入关联数
    assert_eq!(row.invoiced_qty, 60.0);
    assert_eq!(row.linked_invoices_count, 3);
    assert_eq!(row.invoice_status, PoInvoiceStatus::PartiallyInvoiced);
    assert_eq!(row.qty_invoiced_percent, "60.0%");
}

#[tokio::test]
async fn grn_receipts_and_rejections() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 100 }))
        .grn("g1", json!({ "grnNumber": "GRN-1", "poNumber": "PO-1", "items": [
            { "receivedQty": 60, "acceptedQty": 55 },
            { "receivedQty": "40", "acceptedQty": "40" },
        ] }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    let row = &ws.documents[0];
    assert_eq!(row.grn_accepted_qty, 95.0);
    assert_eq!(row.grn_rejected_qty, 5.0);
    assert_eq!(row.qty_received_percent, "95.0%");
    assert_eq!(row.grn_status.primary, ReceiptStatus::PartiallyReceived);
    assert!(row.grn_status.has_rejections);
    assert_eq!(ws.summary.partially_received, 1);
    assert_eq!(ws.summary.has_rejections, 1);

    let json = serde_json::to_value(row).unwrap();
    assert_eq!(json["grnStatus"], json!(["Partially Received", "Has Rejections"]));
    assert_eq!(json["linkedGRNsCount"], json!(1));
    assert!(json.get("poValueRaw").is_none());
}

#[tokio::test]
async fn empty_result_is_zeroed() {
    let fx = Fixture::new();
    fx.insert(DocumentKind::PurchaseOrder, OTHER_ORG, "p1", None, json!({ "poNumber": "PO-1" }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    assert!(ws.documents.is_empty());
    assert_eq!(ws.pagination.total, 0);
    assert_eq!(ws.pagination.pages, 0);
    let json = serde_json::to_value(&ws).unwrap();
    assert_eq!(
        json["summary"],
        json!({
            "totalPOs": 0, "open": 0, "partiallyInvoiced": 0, "fullyInvoiced": 0,
            "overInvoiced": 0, "noGRNYet": 0, "partiallyReceived": 0, "fullyReceived": 0,
            "overReceived": 0, "hasRejections": 0
        })
    );
    assert_eq!(
        json["totals"],
        json!({
            "rows": 0, "poQty": 0.0, "poValue": 0.0, "invoicedQty": 0.0, "invoicedValue": 0.0,
            "grnAcceptedQty": 0.0, "grnRejectedQty": 0.0, "avgQtyInvoiced": 0.0
        })
    );
}

#[tokio::test]
async fn summary_ignores_derived_filters_but_totals_do_not() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 100 }))
        .po("p2", json!({ "poNumber": "PO-2", "totalQty": 50 }))
        .po("p3", json!({ "poNumber": "PO-3", "totalQty": 10 }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": 100 }));

    let f = WorkspaceFilters {
        invoice_status: vec!["Open".to_string()],
        ..filters()
    };
    let ws = fx.service().po_workspace(ORG, &f, first_page()).await.unwrap();

    assert_eq!(ws.summary.total_pos, 3);
    assert_eq!(ws.summary.open, 2);
    assert_eq!(ws.summary.fully_invoiced, 1);
    assert_eq!(ws.totals.rows, 2);
    assert_eq!(ws.totals.po_qty, 60.0);
    assert!(ws.documents.iter().all(|r| r.invoice_status == PoInvoiceStatus::Open));
    // 分页总数来自存储查询，不受派生过滤影响
    assert_eq!(ws.pagination.total, 3);
}

#[tokio::test]
async fn average_uses_rounded_percentages() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 3 }))
        .po("p2", json!({ "poNumber": "PO-2", "totalQty": 3 }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": 1 }))
        .invoice("i2", json!({ "invoiceNumber": "INV-2", "buyerOrderNo": "PO-2", "invoiceQty": 2 }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    let percents: Vec<_> = ws.documents.iter().map(|r| r.qty_invoiced_percent.as_str()).collect();
    assert_eq!(percents, vec!["66.7%", "33.3%"]);
    assert_eq!(ws.totals.avg_qty_invoiced, (66.7 + 33.3) / 2.0);
}

#[tokio::test]
async fn counterparts_are_organization_scoped_and_approved() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 100 }));
    fx.insert(
        DocumentKind::Invoice,
        OTHER_ORG,
        "i1",
        Some("approved"),
        json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": 100 }),
    );
    fx.insert(
        DocumentKind::Invoice,
        ORG,
        "i2",
        Some("pending"),
        json!({ "invoiceNumber": "INV-2", "buyerOrderNo": "PO-1", "invoiceQty": 100 }),
    );

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    let row = &ws.documents[0];
    assert_eq!(row.linked_invoices_count, 0);
    assert_eq!(row.invoice_status, PoInvoiceStatus::Open);
}

#[tokio::test]
async fn po_without_number_does_not_match_invoices_without_reference() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 10 }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "invoiceQty": 10 }))
        .invoice("i2", json!({ "invoiceNumber": "INV-2", "buyerOrderNo": "", "invoiceQty": 10 }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();
    assert_eq!(ws.documents[0].linked_invoices_count, 0);
}

#[tokio::test]
async fn invalid_extractions_are_excluded() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1" }))
        .po("p2", json!({ "poNumber": "" }))
        .po("p3", json!({ "totalQty": 5 }))
        .po("p4", json!({ "poNumber": "PO-4", "error": "extraction failed" }));

    let ws = fx.service().po_workspace(ORG, &filters(), first_page()).await.unwrap();

    let ids: Vec<_> = ws.documents.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p1"]);
    assert_eq!(ws.pagination.total, 1);
}

#[tokio::test]
async fn pagination_invariant() {
    let fx = Fixture::new();
    for n in 1..=5 {
        fx.po(&format!("p{}", n), json!({ "poNumber": format!("PO-{}", n) }));
    }
    let service = fx.service();

    for page in 1..=4 {
        let req = PageRequest { page, limit: 2 };
        let ws = service.po_workspace(ORG, &filters(), req).await.unwrap();
        assert_eq!(ws.pagination.total, 5);
        assert_eq!(ws.pagination.pages, 3);
        assert!(ws.documents.len() <= 2);
        let expected = match page {
            1 | 2 => 2,
            3 => 1,
            _ => 0,
        };
        assert_eq!(ws.documents.len(), expected);
    }

    // 最新创建的排在最前
    let ws = service
        .po_workspace(ORG, &filters(), PageRequest { page: 1, limit: 2 })
        .await
        .unwrap();
    let ids: Vec<_> = ws.documents.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p5", "p4"]);
}

#[tokio::test]
async fn native_filters_and_search() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "site": "Pune", "buyerName": "Acme Foods", "poDate": "2024-01-15" }))
        .po("p2", json!({ "poNumber": "PO-2", "site": "Delhi", "buyerName": "Globex", "poDate": "2024-01-31" }))
        .po("p3", json!({ "poNumber": "PO-3", "site": "Pune", "buyerName": "Initech", "poDate": "2024-02-01" }));
    let service = fx.service();

    let by_site = WorkspaceFilters {
        site: vec!["Pune".into()],
        ..filters()
    };
    let ws = service.po_workspace(ORG, &by_site, first_page()).await.unwrap();
    assert_eq!(ws.pagination.total, 2);

    let by_date = WorkspaceFilters {
        date_range: Some(DateRange {
            from: Some("2024-01-01".into()),
            to: Some("2024-01-31".into()),
        }),
        date_type: Some("poDate".into()),
        ..filters()
    };
    let ws = service.po_workspace(ORG, &by_date, first_page()).await.unwrap();
    let ids: Vec<_> = ws.documents.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);

    let by_search = WorkspaceFilters {
        search: Some("acme".into()),
        ..filters()
    };
    let ws = service.po_workspace(ORG, &by_search, first_page()).await.unwrap();
    assert_eq!(ws.documents.len(), 1);
    assert_eq!(ws.documents[0].id, "p1");
    assert_eq!(ws.summary.total_pos, 3);
}

#[tokio::test]
async fn date_bounds_compare_instants() {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "poDate": "2024-01-15" }))
        .po("p2", json!({ "poNumber": "PO-2", "poDate": "2024-01-14T20:00:00Z" }))
        .po("p3", json!({ "poNumber": "PO-3", "poDate": "2024-01-14T10:00:00Z" }));
    let service = fx.service();

    let starting = |from: &str| WorkspaceFilters {
        date_range: Some(DateRange {
            from: Some(from.into()),
            to: None,
        }),
        ..filters()
    };

    // 同一天的 RFC 3339 起点不应排除纯日期单据
    let ws = service
        .po_workspace(ORG, &starting("2024-01-15T00:00:00Z"), first_page())
        .await
        .unwrap();
    let ids: Vec<_> = ws.documents.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p1"]);

    // +05:30 零点即 2024-01-14T18:30Z
    let ws = service
        .po_workspace(ORG, &starting("2024-01-15T00:00:00+05:30"), first_page())
        .await
        .unwrap();
    let ids: Vec<_> = ws.documents.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);
}

#[tokio::test]
async fn wrong_date_type_is_rejected() {
    let fx = Fixture::new();
    let f = WorkspaceFilters {
        date_type: Some("invoiceDate".into()),
        ..filters()
    };
    let err = fx.service().po_workspace(ORG, &f, first_page()).await.unwrap_err();
    assert!(matches!(err, WorkspaceError::InvalidFilter(_)));
}

#[tokio::test]
async fn store_failures_propagate() {
    let service = WorkspaceService::new(Arc::new(FailingStore), WorkspaceConfig::default());
    let err = service.po_workspace(ORG, &filters(), first_page()).await.unwrap_err();
    assert!(matches!(err, WorkspaceError::Store(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn lookup_fan_out_is_bounded() {
    let fx = Fixture::new();
    for n in 0..12 {
        fx.po(&format!("p{}", n), json!({ "poNumber": format!("PO-{}", n) }));
        fx.invoice(&format!("i{}", n), json!({ "invoiceNumber": format!("INV-{}", n), "buyerOrderNo": format!("PO-{}", n), "invoiceQty": n }));
    }
    let tracking = Arc::new(TrackingStore::new(fx.store.clone()));
    let config = WorkspaceConfig {
        lookup_concurrency: 2,
        ..WorkspaceConfig::default()
    };
    let service = WorkspaceService::new(tracking.clone(), config);

    let ws = service.po_workspace(ORG, &filters(), first_page()).await.unwrap();

    assert_eq!(ws.documents.len(), 12);
    // 每张订单并发两次查询 (发票 + 收货单)
    // 两张订单同时补全，峰值应超过单张订单的两次查询
    let peak = tracking.peak.load(std::sync::atomic::Ordering::SeqCst);
    assert!(peak <= 4, "peak {}", peak);
    assert!(peak > 2, "peak {}", peak);
    // 结果顺序与基础查询一致
    let ids: Vec<_> = ws.documents.iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<String> = (0..12).rev().map(|n| format!("p{}", n)).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(ws.documents[0].invoiced_qty, 11.0);
}
