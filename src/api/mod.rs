pub mod auth;
pub mod export;
pub mod extract;
pub mod handlers;
pub mod params;
pub mod response;

pub use handlers::AppState;

use axum::{routing::get, Router};

/// 构建路由：/health + /api/workspace/{po,invoice,grn}
pub fn router(state: AppState) -> Router {
    let workspace = Router::new()
        .route("/po", get(handlers::po_workspace))
        .route("/po/facets", get(handlers::po_facets))
        .route("/po/export", get(handlers::po_export))
        .route("/po/:id", get(handlers::po_detail))
        .route("/invoice", get(handlers::invoice_workspace))
        .route("/invoice/facets", get(handlers::invoice_facets))
        .route("/invoice/export", get(handlers::invoice_export))
        .route("/invoice/:id", get(handlers::invoice_detail))
        .route("/grn", get(handlers::grn_workspace))
        .route("/grn/facets", get(handlers::grn_facets))
        .route("/grn/export", get(handlers::grn_export))
        .route("/grn/:id", get(handlers::grn_detail));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/workspace", workspace)
        .with_state(state)
}
