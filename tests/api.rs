mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use procure_workspace_rust::config::WorkspaceConfig;
use procure_workspace_rust::{router, WorkspaceService};

fn app(fx: &Fixture) -> Router {
    router(Arc::new(fx.service()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", "user_1")
        .header("x-organization-id", ORG)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn seeded() -> Fixture {
    let fx = Fixture::new();
    fx.po("p1", json!({ "poNumber": "PO-1", "totalQty": 100, "site": "Pune", "buyerName": "Acme" }))
        .invoice("i1", json!({ "invoiceNumber": "INV-1", "buyerOrderNo": "PO-1", "invoiceQty": 100 }));
    fx
}

#[tokio::test]
async fn health_reports_up() {
    let fx = Fixture::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send_json(app(&fx), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("UP"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn po_workspace_envelope() {
    let fx = seeded();
    let (status, body) = send_json(app(&fx), get("/api/workspace/po?page=1&limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["documents"][0]["poNumber"], json!("PO-1"));
    assert_eq!(data["documents"][0]["invoiceStatus"], json!("Fully Invoiced"));
    assert_eq!(data["documents"][0]["qtyInvoicedPercent"], json!("100.0%"));
    assert_eq!(data["summary"]["totalPOs"], json!(1));
    assert_eq!(data["totals"]["rows"], json!(1));
    assert_eq!(
        data["pagination"],
        json!({ "total": 1, "page": 1, "pages": 1, "limit": 10 })
    );
}

#[tokio::test]
async fn pagination_defaults_when_not_numeric() {
    let fx = seeded();
    let (status, body) = send_json(app(&fx), get("/api/workspace/po?page=abc&limit=0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], json!(1));
    assert_eq!(body["data"]["pagination"]["limit"], json!(100));
}

#[tokio::test]
async fn json_filters_are_applied() {
    let fx = seeded();
    let (status, body) = send_json(
        app(&fx),
        get("/api/workspace/po?site=%5B%22Delhi%22%5D"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["documents"], json!([]));
    assert_eq!(body["data"]["pagination"]["pages"], json!(0));
}

#[tokio::test]
async fn missing_user_is_unauthenticated() {
    let fx = seeded();
    let request = Request::builder()
        .uri("/api/workspace/po")
        .header("x-organization-id", ORG)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(app(&fx), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "message": "Authentication required" }));
}

#[tokio::test]
async fn missing_organization_is_rejected() {
    let fx = seeded();
    let request = Request::builder()
        .uri("/api/workspace/invoice")
        .header("x-user-id", "user_1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(app(&fx), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Organization not found"));
}

#[tokio::test]
async fn malformed_filter_json_is_a_client_error() {
    let fx = seeded();
    let (status, body) = send_json(app(&fx), get("/api/workspace/grn?site=%5BPune")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn undecodable_query_uses_error_envelope() {
    let fx = seeded();
    let (status, body) = send_json(app(&fx), get("/api/workspace/po?page=1&page=2")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Invalid filter:"), "{}", message);
    assert!(message.contains("page"), "{}", message);
}

#[tokio::test]
async fn undecodable_path_uses_error_envelope() {
    let fx = seeded();
    let (status, body) = send_json(app(&fx), get("/api/workspace/invoice/%FF")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "message": "Invalid document id" }));
}

#[tokio::test]
async fn detail_routes() {
    let fx = seeded();

    let (status, body) = send_json(app(&fx), get("/api/workspace/po/p1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["po"]["id"], json!("p1"));
    assert_eq!(body["data"]["linkedInvoices"][0]["id"], json!("i1"));

    let (status, body) = send_json(app(&fx), get("/api/workspace/invoice/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Invoice not found" }));

    let (status, body) = send_json(app(&fx), get("/api/workspace/grn/bad%20id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Invalid GRN id"));
}

#[tokio::test]
async fn facets_list_values_and_statuses() {
    let fx = seeded();
    let (status, body) = send_json(app(&fx), get("/api/workspace/po/facets")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sites"], json!(["Pune"]));
    assert_eq!(body["data"]["buyers"], json!(["Acme"]));
    assert_eq!(body["data"]["cities"], json!([]));
    assert_eq!(
        body["data"]["statuses"]["invoiceStatus"],
        json!(["Open", "Partially Invoiced", "Fully Invoiced", "Over Invoiced"])
    );
}

#[tokio::test]
async fn export_returns_csv() {
    let fx = seeded();
    let response = app(&fx).oneshot(get("/api/workspace/po/export")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("PO Number,PO Date"));
    assert!(lines[1].starts_with("PO-1,"));
    assert!(lines[1].contains("Fully Invoiced"));
}

#[tokio::test]
async fn store_failures_are_masked() {
    let service = WorkspaceService::new(Arc::new(FailingStore), WorkspaceConfig::default());
    let (status, body) = send_json(router(Arc::new(service)), get("/api/workspace/grn")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "message": "Internal server error" }));
}
