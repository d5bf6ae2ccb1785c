use serde::Deserialize;

use crate::error::{Result, WorkspaceError};
use crate::models::{DateRange, WorkspaceFilters};

/// 工作台查询参数；列表类参数为 JSON 字符串数组
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceParams {
    pub date_range: Option<String>,
    pub date_type: Option<String>,
    pub site: Option<String>,
    pub city: Option<String>,
    pub buyer: Option<String>,
    pub seller: Option<String>,
    pub search: Option<String>,
    pub invoice_status: Option<String>,
    pub grn_status: Option<String>,
    pub po_status: Option<String>,
    pub acceptance_status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<String>),
    One(String),
}

impl WorkspaceParams {
    pub fn filters(&self) -> Result<WorkspaceFilters> {
        Ok(WorkspaceFilters {
            date_range: date_range(self.date_range.as_deref())?,
            date_type: present(self.date_type.as_deref()).map(str::to_string),
            site: json_list("site", self.site.as_deref())?,
            city: json_list("city", self.city.as_deref())?,
            buyer: json_list("buyer", self.buyer.as_deref())?,
            seller: json_list("seller", self.seller.as_deref())?,
            search: present(self.search.as_deref()).map(str::to_string),
            invoice_status: json_list("invoiceStatus", self.invoice_status.as_deref())?,
            grn_status: json_list("grnStatus", self.grn_status.as_deref())?,
            po_status: json_list("poStatus", self.po_status.as_deref())?,
            acceptance_status: json_list("acceptanceStatus", self.acceptance_status.as_deref())?,
        })
    }

    pub fn page(&self) -> Option<i64> {
        parse_int(self.page.as_deref())
    }

    pub fn limit(&self) -> Option<i64> {
        parse_int(self.limit.as_deref())
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|v| !v.trim().is_empty())
}

fn date_range(raw: Option<&str>) -> Result<Option<DateRange>> {
    match present(raw) {
        None => Ok(None),
        Some(raw) => serde_json::from_str::<Option<DateRange>>(raw)
            .map_err(|e| WorkspaceError::InvalidFilter(format!("dateRange: {}", e))),
    }
}

/// 单个字符串视为只含一个元素的数组
fn json_list(name: &str, raw: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = present(raw) else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<OneOrMany>(raw) {
        Ok(OneOrMany::Many(values)) => Ok(values),
        Ok(OneOrMany::One(value)) => Ok(vec![value]),
        Err(_) => Err(WorkspaceError::InvalidFilter(format!(
            "{} must be a JSON array of strings",
            name
        ))),
    }
}

/// 取开头的整数部分："20" -> 20, "20abc" -> 20, "abc" -> None
fn parse_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|v| sign * v)
}
