use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

use super::numeric::lenient_f64;

/// 单据类型 (采购订单 / 发票 / 收货单)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    PurchaseOrder,
    Invoice,
    Grn,
}

impl DocumentKind {
    /// 存储表名
    pub fn table(self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_orders",
            Self::Invoice => "invoices",
            Self::Grn => "grns",
        }
    }

    /// 业务主键字段
    pub fn business_key(self) -> &'static str {
        match self {
            Self::PurchaseOrder => "poNumber",
            Self::Invoice => "invoiceNumber",
            Self::Grn => "grnNumber",
        }
    }

    /// 主日期字段
    pub fn date_field(self) -> &'static str {
        match self {
            Self::PurchaseOrder => "poDate",
            Self::Invoice => "invoiceDate",
            Self::Grn => "grnDate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PurchaseOrder => "Purchase Order",
            Self::Invoice => "Invoice",
            Self::Grn => "GRN",
        }
    }

    /// 是否需要审批通过才参与对账
    pub fn requires_approval(self) -> bool {
        !matches!(self, Self::PurchaseOrder)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 存储中的单据：元数据 + 抽取出的半结构化业务字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub organization_id: String,
    pub active: bool,
    pub status: Option<String>,
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// 文本字段，与 Postgres `data->>'field'` 取值一致；缺失、null 或复合值为空串
    pub fn text(&self, field: &str) -> Cow<'_, str> {
        scalar_text(self.data.get(field)).unwrap_or(Cow::Borrowed(""))
    }

    /// 数值字段，宽松解析
    pub fn number(&self, field: &str) -> f64 {
        lenient_f64(self.data.get(field))
    }

    /// 明细行列表 (`items`)，缺失时为空
    pub fn items(&self) -> &[Value] {
        self.data
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// JS 意义上的真值：缺失 / null / "" / false / 0 视为假
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
        Some(_) => true,
    }
}

/// 标量 JSON 值的文本形式
pub fn scalar_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}
