use crate::db::store::{DocumentQuery, DocumentStore, FieldCondition};
use crate::error::StoreError;
use crate::models::{Document, DocumentKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::future::Future;
use std::time::{Duration, Instant};

const DOCUMENT_COLUMNS: &str = "id, organization_id, active, status, data, created_at";

/// 单据表行 (purchase_orders / invoices / grns 结构一致)
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    organization_id: String,
    active: bool,
    status: Option<String>,
    data: Json<Value>,
    created_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document(self, kind: DocumentKind) -> Result<Document, StoreError> {
        let Json(data) = self.data;
        let Value::Object(data) = data else {
            return Err(StoreError::Corrupt {
                kind,
                id: self.id,
                reason: "data is not a JSON object".to_string(),
            });
        };
        Ok(Document {
            id: self.id,
            organization_id: self.organization_id,
            active: self.active,
            status: self.status,
            data,
            created_at: self.created_at,
        })
    }
}

/// Postgres 单据存储：业务字段存放在 JSONB `data` 列
pub struct PgDocumentStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// 带超时与耗时日志的查询执行
    async fn timed<T, F>(&self, label: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let start = Instant::now();
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(Ok(value)) => {
                tracing::debug!("{} 完成, 耗时: {:?}", label, start.elapsed());
                Ok(value)
            }
            Ok(Err(e)) => {
                tracing::error!("✗ {} 失败, 耗时: {:?}, 错误: {:?}", label, start.elapsed(), e);
                Err(StoreError::Database(e))
            }
            Err(_) => {
                tracing::error!("✗ {} 超时 (>{:?})!", label, self.query_timeout);
                Err(StoreError::Unavailable(format!(
                    "{} timed out after {:?}",
                    label, self.query_timeout
                )))
            }
        }
    }
}

/// 字段名均为编译期常量，可直接拼接
fn field_expr(field: &'static str) -> String {
    format!("(data->>'{}')", field)
}

/// 日期字段换算为 timestamptz：纯日期与不带偏移的时间按 UTC，
/// RFC 3339 按自带偏移；格式不符时为 NULL，不参与比较
fn instant_expr(field: &'static str) -> String {
    let f = field_expr(field);
    format!(
        concat!(
            r"(CASE",
            r" WHEN {f} ~ '^\d{{4}}-\d{{2}}-\d{{2}}$'",
            r" THEN ({f})::date::timestamp AT TIME ZONE 'UTC'",
            r" WHEN {f} ~ '^\d{{4}}-\d{{2}}-\d{{2}}[T ]\d{{2}}:\d{{2}}(:\d{{2}}(\.\d+)?)?$'",
            r" THEN ({f})::timestamp AT TIME ZONE 'UTC'",
            r" WHEN {f} ~ '^\d{{4}}-\d{{2}}-\d{{2}}[T ]\d{{2}}:\d{{2}}:\d{{2}}(\.\d+)?(Z|[+-]\d{{2}}:\d{{2}})$'",
            r" THEN ({f})::timestamptz END)",
        ),
        f = f
    )
}

fn push_where(qb: &mut QueryBuilder<'_, Postgres>, query: &DocumentQuery) {
    qb.push(" WHERE active = TRUE AND organization_id = ");
    qb.push_bind(query.organization_id.clone());

    if let Some(status) = &query.status {
        qb.push(" AND status = ");
        qb.push_bind(status.clone());
    }

    for condition in &query.conditions {
        qb.push(" AND ");
        match condition {
            FieldCondition::Equals { field, value } => {
                qb.push(field_expr(*field)).push(" = ").push_bind(value.clone());
            }
            FieldCondition::AnyOf { field, values } => {
                qb.push(field_expr(*field))
                    .push(" = ANY(")
                    .push_bind(values.clone())
                    .push(")");
            }
            FieldCondition::DateBetween { field, from, to } => {
                let expr = instant_expr(*field);
                qb.push("(").push(&expr).push(" IS NOT NULL");
                if let Some(from) = from {
                    qb.push(" AND ").push(&expr).push(" >= ").push_bind(*from);
                }
                if let Some(to) = to {
                    qb.push(" AND ").push(&expr).push(" <= ").push_bind(*to);
                }
                qb.push(")");
            }
            FieldCondition::NonEmpty(field) => {
                qb.push(field_expr(*field)).push(" <> ''");
            }
            FieldCondition::Unset(field) => {
                qb.push(format!(
                    "(data->'{0}' IS NULL OR data->'{0}' IN ('null'::jsonb, '\"\"'::jsonb, 'false'::jsonb, '0'::jsonb))",
                    field
                ));
            }
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        kind: DocumentKind,
        query: &DocumentQuery,
        skip: u64,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", DOCUMENT_COLUMNS, kind.table()));
        push_where(&mut qb, query);
        qb.push(" ORDER BY created_at DESC, id COLLATE \"C\" ASC");
        qb.push(" OFFSET ").push_bind(skip as i64);
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }

        let label = format!("查询 {}", kind.table());
        let rows = self
            .timed(&label, qb.build_query_as::<DocumentRow>().fetch_all(&self.pool))
            .await?;

        rows.into_iter().map(|row| row.into_document(kind)).collect()
    }

    async fn count(&self, kind: DocumentKind, query: &DocumentQuery) -> Result<u64, StoreError> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", kind.table()));
        push_where(&mut qb, query);

        let label = format!("统计 {}", kind.table());
        let count = self
            .timed(&label, qb.build_query_scalar::<i64>().fetch_one(&self.pool))
            .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        kind: DocumentKind,
        id: &str,
        organization_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND organization_id = $2 AND active = TRUE",
            DOCUMENT_COLUMNS,
            kind.table()
        );
        let label = format!("按ID查询 {}", kind.table());
        let row = self
            .timed(
                &label,
                sqlx::query_as::<_, DocumentRow>(&sql)
                    .bind(id)
                    .bind(organization_id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        row.map(|r| r.into_document(kind)).transpose()
    }

    async fn distinct(
        &self,
        kind: DocumentKind,
        field: &'static str,
        query: &DocumentQuery,
    ) -> Result<Vec<String>, StoreError> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT value FROM (SELECT {} AS value, MAX(created_at) AS last_seen FROM {}",
            field_expr(field),
            kind.table()
        ));
        push_where(&mut qb, query);
        qb.push(" AND ").push(field_expr(field)).push(" <> ''");
        qb.push(" GROUP BY 1) d ORDER BY last_seen DESC, value COLLATE \"C\" ASC");

        let label = format!("去重 {}.{}", kind.table(), field);
        self.timed(&label, qb.build_query_scalar::<String>().fetch_all(&self.pool))
            .await
    }
}
