use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::WorkspaceError;

/// 成功响应体
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// 失败响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse { success: true, data })).into_response()
}

impl IntoResponse for WorkspaceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("✗ 请求失败: {:?}", self);
        } else {
            tracing::warn!("请求被拒绝 ({}): {}", status.as_u16(), self);
        }
        let response = ErrorResponse {
            success: false,
            message: self.public_message(),
        };
        (status, Json(response)).into_response()
    }
}
