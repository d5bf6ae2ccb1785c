use crate::models::DocumentKind;
use thiserror::Error;

/// 存储层错误 (连接/查询失败)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt {kind} document {id}: {reason}")]
    Corrupt {
        kind: DocumentKind,
        id: String,
        reason: String,
    },
}

/// 工作台领域错误
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Organization not found")]
    OrganizationNotFound,

    #[error("Invalid {0}")]
    InvalidId(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("{} not found", .0.label())]
    NotFound(DocumentKind),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}

impl WorkspaceError {
    /// HTTP 状态码映射
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::OrganizationNotFound | Self::InvalidId(_) | Self::InvalidFilter(_) => 400,
            Self::NotFound(_) => 404,
            Self::Store(_) | Self::Export(_) => 500,
        }
    }

    /// 对调用方可见的消息，内部错误不外泄
    pub fn public_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Export(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_name_the_kind() {
        assert_eq!(
            WorkspaceError::NotFound(DocumentKind::PurchaseOrder).to_string(),
            "Purchase Order not found"
        );
        assert_eq!(WorkspaceError::NotFound(DocumentKind::Invoice).to_string(), "Invoice not found");
        assert_eq!(WorkspaceError::NotFound(DocumentKind::Grn).to_string(), "GRN not found");
    }

    #[test]
    fn store_errors_are_masked() {
        let err = WorkspaceError::from(StoreError::Unavailable("connection refused 10.0.0.4".into()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(WorkspaceError::Unauthenticated.status_code(), 401);
        assert_eq!(WorkspaceError::OrganizationNotFound.status_code(), 400);
        assert_eq!(WorkspaceError::InvalidFilter("dateRange".into()).status_code(), 400);
        assert_eq!(WorkspaceError::NotFound(DocumentKind::Grn).status_code(), 404);
    }
}
