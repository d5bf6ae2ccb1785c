use serde_json::Value;

use crate::models::numeric::lenient_f64;
use crate::models::Document;

/// 从 0.0 开始顺序累加 (避免空集合得到 -0.0)
pub fn sum_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    items.iter().fold(0.0, |acc, item| acc + f(item))
}

/// 平均值，空集合为 0
pub fn mean_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        0.0
    } else {
        sum_by(items, f) / items.len() as f64
    }
}

/// 多张单据同一字段求和，无法解析的值按 0 计
pub fn sum_field(docs: &[Document], field: &str) -> f64 {
    sum_by(docs, |doc| doc.number(field))
}

/// 明细行同一字段求和
pub fn sum_line_items(items: &[Value], field: &str) -> f64 {
    sum_by(items, |item| lenient_f64(item.get(field)))
}

pub fn received_qty(grns: &[Document]) -> f64 {
    sum_by(grns, |grn| sum_line_items(grn.items(), "receivedQty"))
}

pub fn accepted_qty(grns: &[Document]) -> f64 {
    sum_by(grns, |grn| sum_line_items(grn.items(), "acceptedQty"))
}

/// 拒收数量 = 收货合计 - 验收合计，可以为负
pub fn rejected_qty(grns: &[Document]) -> f64 {
    received_qty(grns) - accepted_qty(grns)
}

/// 任一明细行收货数大于验收数
pub fn has_rejections(grns: &[Document]) -> bool {
    grns.iter().flat_map(Document::items).any(|item| {
        lenient_f64(item.get("receivedQty")) - lenient_f64(item.get("acceptedQty")) > 0.0
    })
}
