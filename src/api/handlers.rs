use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::auth::{is_valid_id, OrgContext};
use super::export;
use super::extract::{DocumentId, WorkspaceQuery};
use super::params::WorkspaceParams;
use super::response::ok;
use crate::error::{Result, WorkspaceError};
use crate::models::{DocumentKind, PageRequest, WorkspaceFilters};
use crate::service::WorkspaceService;

pub type AppState = Arc<WorkspaceService>;

/// 健康检查
pub async fn health_check() -> Response {
    Json(json!({ "status": "UP", "timestamp": Utc::now().to_rfc3339() })).into_response()
}

/// 解析过滤条件与分页，在访问存储前完成校验
fn scope(service: &WorkspaceService, params: &WorkspaceParams) -> Result<(WorkspaceFilters, PageRequest)> {
    let filters = params.filters()?;
    let page = service.page_request(params.page(), params.limit());
    Ok((filters, page))
}

fn check_id(kind: DocumentKind, id: &str) -> Result<()> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidId(format!("{} id", kind.label())))
    }
}

fn csv_response(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

// ---------- 采购订单 ----------

pub async fn po_workspace(
    State(service): State<AppState>,
    ctx: OrgContext,
    WorkspaceQuery(params): WorkspaceQuery,
) -> Result<Response> {
    let (filters, page) = scope(&service, &params)?;
    let data = service.po_workspace(&ctx.organization_id, &filters, page).await?;
    Ok(ok(data))
}

pub async fn po_facets(State(service): State<AppState>, ctx: OrgContext) -> Result<Response> {
    let data = service
        .facets(DocumentKind::PurchaseOrder, &ctx.organization_id)
        .await?;
    Ok(ok(data))
}

pub async fn po_export(
    State(service): State<AppState>,
    ctx: OrgContext,
    WorkspaceQuery(params): WorkspaceQuery,
) -> Result<Response> {
    let (filters, page) = scope(&service, &params)?;
    let data = service.po_workspace(&ctx.organization_id, &filters, page).await?;
    Ok(csv_response("po-workspace.csv", export::po_csv(&data.documents)?))
}

pub async fn po_detail(
    State(service): State<AppState>,
    ctx: OrgContext,
    DocumentId(id): DocumentId,
) -> Result<Response> {
    check_id(DocumentKind::PurchaseOrder, &id)?;
    let data = service.po_detail(&ctx.organization_id, &id).await?;
    Ok(ok(data))
}

// ---------- 发票 ----------

pub async fn invoice_workspace(
    State(service): State<AppState>,
    ctx: OrgContext,
    WorkspaceQuery(params): WorkspaceQuery,
) -> Result<Response> {
    let (filters, page) = scope(&service, &params)?;
    let data = service
        .invoice_workspace(&ctx.organization_id, &filters, page)
        .await?;
    Ok(ok(data))
}

pub async fn invoice_facets(State(service): State<AppState>, ctx: OrgContext) -> Result<Response> {
    let data = service
        .facets(DocumentKind::Invoice, &ctx.organization_id)
        .await?;
    Ok(ok(data))
}

pub async fn invoice_export(
    State(service): State<AppState>,
    ctx: OrgContext,
    WorkspaceQuery(params): WorkspaceQuery,
) -> Result<Response> {
    let (filters, page) = scope(&service, &params)?;
    let data = service
        .invoice_workspace(&ctx.organization_id, &filters, page)
        .await?;
    Ok(csv_response(
        "invoice-workspace.csv",
        export::invoice_csv(&data.documents)?,
    ))
}

pub async fn invoice_detail(
    State(service): State<AppState>,
    ctx: OrgContext,
    DocumentId(id): DocumentId,
) -> Result<Response> {
    check_id(DocumentKind::Invoice, &id)?;
    let data = service.invoice_detail(&ctx.organization_id, &id).await?;
    Ok(ok(data))
}

// ---------- 收货单 ----------

pub async fn grn_workspace(
    State(service): State<AppState>,
    ctx: OrgContext,
    WorkspaceQuery(params): WorkspaceQuery,
) -> Result<Response> {
    let (filters, page) = scope(&service, &params)?;
    let data = service.grn_workspace(&ctx.organization_id, &filters, page).await?;
    Ok(ok(data))
}

pub async fn grn_facets(State(service): State<AppState>, ctx: OrgContext) -> Result<Response> {
    let data = service.facets(DocumentKind::Grn, &ctx.organization_id).await?;
    Ok(ok(data))
}

pub async fn grn_export(
    State(service): State<AppState>,
    ctx: OrgContext,
    WorkspaceQuery(params): WorkspaceQuery,
) -> Result<Response> {
    let (filters, page) = scope(&service, &params)?;
    let data = service.grn_workspace(&ctx.organization_id, &filters, page).await?;
    Ok(csv_response("grn-workspace.csv", export::grn_csv(&data.documents)?))
}

pub async fn grn_detail(
    State(service): State<AppState>,
    ctx: OrgContext,
    DocumentId(id): DocumentId,
) -> Result<Response> {
    check_id(DocumentKind::Grn, &id)?;
    let data = service.grn_detail(&ctx.organization_id, &id).await?;
    Ok(ok(data))
}
