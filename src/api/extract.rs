use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};

use super::params::WorkspaceParams;
use crate::error::WorkspaceError;

/// 查询参数；解析失败 (如重复参数) 走统一错误响应
#[derive(Debug)]
pub struct WorkspaceQuery(pub WorkspaceParams);

#[async_trait]
impl<S> FromRequestParts<S> for WorkspaceQuery
where
    S: Send + Sync,
{
    type Rejection = WorkspaceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<WorkspaceParams>::from_request_parts(parts, state)
            .await
            .map(|Query(params)| Self(params))
            .map_err(|rejection| WorkspaceError::InvalidFilter(rejection.body_text()))
    }
}

/// 路径中的单据 ID；格式在处理函数内按单据类型校验
#[derive(Debug)]
pub struct DocumentId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for DocumentId
where
    S: Send + Sync,
{
    type Rejection = WorkspaceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::warn!("路径参数无效: {}", rejection.body_text());
                Err(WorkspaceError::InvalidId("document id".to_string()))
            }
        }
    }
}
