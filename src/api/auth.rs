use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::WorkspaceError;

/// 网关认证后转发的用户标识
pub const USER_HEADER: &str = "x-user-id";
/// 用户所属组织
pub const ORGANIZATION_HEADER: &str = "x-organization-id";

/// 调用方身份，在访问存储前校验
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgContext {
    pub user_id: String,
    pub organization_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for OrgContext
where
    S: Send + Sync,
{
    type Rejection = WorkspaceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_HEADER).ok_or(WorkspaceError::Unauthenticated)?;
        let organization_id = header(parts, ORGANIZATION_HEADER)
            .filter(|org| is_valid_id(org))
            .ok_or(WorkspaceError::OrganizationNotFound)?;

        Ok(Self {
            user_id: user_id.to_string(),
            organization_id: organization_id.to_string(),
        })
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// 标识符：1-64 位字母、数字、下划线或连字符
pub fn is_valid_id(value: &str) -> bool {
    (1..=64).contains(&value.len())
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_rules() {
        assert!(is_valid_id("org_1"));
        assert!(is_valid_id("65f1c2a9e4b0a1d2c3e4f5a6"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("org 1"));
        assert!(!is_valid_id("../etc"));
        assert!(!is_valid_id(&"a".repeat(65)));
    }
}
