use chrono::{DateTime, Utc};

use crate::config::WorkspaceConfig;
use crate::db::DocumentQuery;
use crate::error::{Result, WorkspaceError};
use crate::models::dates::{parse_instant, parse_range_end};
use crate::models::{DateRange, DocumentKind, PageRequest, WorkspaceFilters};

/// 参与工作台的基础单据：有效、主键非空、抽取无错误；发票/收货单须已审批
pub fn eligible_query(kind: DocumentKind, organization_id: &str, approved_status: &str) -> DocumentQuery {
    let query = DocumentQuery::new(organization_id)
        .non_empty(kind.business_key())
        .unset("error");
    if kind.requires_approval() {
        query.with_status(approved_status)
    } else {
        query
    }
}

/// 可下推到存储的过滤条件：日期区间、地点、城市、买方、卖方
pub fn base_query(
    kind: DocumentKind,
    organization_id: &str,
    filters: &WorkspaceFilters,
    approved_status: &str,
) -> Result<DocumentQuery> {
    if let Some(date_type) = filters.date_type.as_deref() {
        if date_type != kind.date_field() {
            return Err(WorkspaceError::InvalidFilter(format!(
                "dateType must be {} for {} workspace",
                kind.date_field(),
                kind.label()
            )));
        }
    }

    let (from, to) = match &filters.date_range {
        Some(range) => date_bounds(range)?,
        None => (None, None),
    };

    Ok(eligible_query(kind, organization_id, approved_status)
        .date_between(kind.date_field(), from, to)
        .any_of("site", &filters.site)
        .any_of("city", &filters.city)
        .any_of("buyerName", &filters.buyer)
        .any_of("sellerName", &filters.seller))
}

/// 校验日期区间并换算为 UTC 时刻；纯日期的截止值覆盖当天
fn date_bounds(range: &DateRange) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let from = non_blank(range.from.as_deref())
        .map(|from| bound(from, parse_instant))
        .transpose()?;
    let to = non_blank(range.to.as_deref())
        .map(|to| bound(to, parse_range_end))
        .transpose()?;
    Ok((from, to))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn bound(value: &str, parse: fn(&str) -> Option<DateTime<Utc>>) -> Result<DateTime<Utc>> {
    parse(value).ok_or_else(|| WorkspaceError::InvalidFilter(format!("invalid date: {}", value)))
}

/// 分页参数归一化：缺失或非正数取默认值，limit 不超过上限
pub fn page_request(page: Option<i64>, limit: Option<i64>, config: &WorkspaceConfig) -> PageRequest {
    let page = page
        .filter(|p| *p > 0)
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(config.default_page);
    let limit = limit
        .filter(|l| *l > 0)
        .map(|l| l.min(i64::from(config.max_limit)) as u32)
        .unwrap_or(config.default_limit);
    PageRequest { page, limit }
}

/// 小写关键字；空白关键字不过滤
pub fn search_needle(search: Option<&str>) -> Option<String> {
    search
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// 任一字段包含关键字 (不区分大小写)
pub fn matches_search(needle: Option<&str>, fields: &[&str]) -> bool {
    match needle {
        None => true,
        Some(needle) => fields.iter().any(|f| f.to_lowercase().contains(needle)),
    }
}

/// 标签过滤：未指定时不过滤
pub fn matches_any(selected: &[String], labels: impl IntoIterator<Item = &'static str>) -> bool {
    selected.is_empty() || labels.into_iter().any(|l| selected.iter().any(|s| s == l))
}
