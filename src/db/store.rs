use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::dates::parse_instant;
use crate::models::document::{is_truthy, scalar_text};
use crate::models::{Document, DocumentKind};

/// 业务字段上的查询条件 (字段均位于抽取数据 `data` 内)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCondition {
    /// 精确相等 (区分大小写)
    Equals { field: &'static str, value: String },
    /// 取值属于集合
    AnyOf { field: &'static str, values: Vec<String> },
    /// 日期闭区间，字段值换算为 UTC 时刻后比较；无法解析的值不匹配
    DateBetween {
        field: &'static str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// 存在且非空
    NonEmpty(&'static str),
    /// 缺失或为假值 (null / "" / false / 0)
    Unset(&'static str),
}

/// 存储查询：组织隔离 + 仅有效单据 + 可选生命周期状态 + 字段条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    pub organization_id: String,
    pub status: Option<String>,
    pub conditions: Vec<FieldCondition>,
}

impl DocumentQuery {
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            status: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn equals(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.conditions.push(FieldCondition::Equals {
            field,
            value: value.into(),
        });
        self
    }

    /// 空集合不产生条件
    pub fn any_of(mut self, field: &'static str, values: &[String]) -> Self {
        if !values.is_empty() {
            self.conditions.push(FieldCondition::AnyOf {
                field,
                values: values.to_vec(),
            });
        }
        self
    }

    pub fn date_between(
        mut self,
        field: &'static str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        if from.is_some() || to.is_some() {
            self.conditions.push(FieldCondition::DateBetween { field, from, to });
        }
        self
    }

    pub fn non_empty(mut self, field: &'static str) -> Self {
        self.conditions.push(FieldCondition::NonEmpty(field));
        self
    }

    pub fn unset(mut self, field: &'static str) -> Self {
        self.conditions.push(FieldCondition::Unset(field));
        self
    }

    /// 内存求值，语义与 SQL 实现保持一致
    pub fn matches(&self, doc: &Document) -> bool {
        if !doc.active || doc.organization_id != self.organization_id {
            return false;
        }
        if let Some(status) = &self.status {
            if doc.status.as_deref() != Some(status.as_str()) {
                return false;
            }
        }
        self.conditions.iter().all(|cond| cond.matches(doc))
    }
}

impl FieldCondition {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Equals { field, .. }
            | Self::AnyOf { field, .. }
            | Self::DateBetween { field, .. } => *field,
            Self::NonEmpty(field) | Self::Unset(field) => *field,
        }
    }

    fn matches(&self, doc: &Document) -> bool {
        let raw = doc.data.get(self.field());
        if let Self::Unset(_) = self {
            return !is_truthy(raw);
        }
        // SQL 中 NULL 参与比较恒为假
        let Some(text) = scalar_text(raw) else {
            return false;
        };
        let text: &str = &text;
        match self {
            Self::Equals { value, .. } => text == value.as_str(),
            Self::AnyOf { values, .. } => values.iter().any(|v| text == v.as_str()),
            Self::DateBetween { from, to, .. } => parse_instant(text).map_or(false, |at| {
                from.map_or(true, |f| at >= f) && to.map_or(true, |t| at <= t)
            }),
            Self::NonEmpty(_) => !text.is_empty(),
            Self::Unset(_) => false,
        }
    }
}

/// 单据存储：只读查询接口
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 按 created_at 降序、id 升序返回
    async fn find(
        &self,
        kind: DocumentKind,
        query: &DocumentQuery,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, kind: DocumentKind, query: &DocumentQuery) -> Result<u64, StoreError>;

    async fn find_by_id(
        &self,
        kind: DocumentKind,
        id: &str,
        organization_id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// 字段的非空去重取值，按最近出现时间降序
    async fn distinct(
        &self,
        kind: DocumentKind,
        field: &'static str,
        query: &DocumentQuery,
    ) -> Result<Vec<String>, StoreError>;

    async fn find_one(
        &self,
        kind: DocumentKind,
        query: &DocumentQuery,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find(kind, query, 0, Some(1)).await?.into_iter().next())
    }
}
