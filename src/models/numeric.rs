use serde_json::Value;

/// 宽松数值解析：数字直接取值，字符串取最长合法数字前缀，
/// 其余 (缺失 / null / bool / 对象 / 无法解析) 一律为 0.0，结果保证有限
pub fn lenient_f64(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(s),
        Some(Value::Array(items)) => return lenient_f64(items.first()),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// 解析字符串开头的十进制数字 (忽略前导空白，允许尾随垃圾字符)
/// "12.5kg" -> 12.5, " -3" -> -3, "1,200" -> 1, "abc" -> None
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // 指数部分必须完整才计入
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// 定点格式化，舍入规则与 JS `Number.prototype.toFixed` 一致：
/// 按精确十进制值舍入，恰好位于中点时远离零
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return to_fixed(0.0, digits);
    }
    // -0.0 输出为 "0.0"
    let value = if value == 0.0 { 0.0 } else { value };

    if !is_exact_midpoint(value, digits) {
        return format!("{:.*}", digits, value);
    }

    let scale = 10f64.powi(digits as i32);
    let magnitude = ((value.abs() * scale).floor() + 1.0) as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    let padded = format!("{:0>width$}", magnitude, width = digits + 1);
    let (whole, frac) = padded.split_at(padded.len() - digits);
    if digits == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac}")
    }
}

/// value * 10^digits 的小数部分是否恰好为 0.5 (按二进制精确值判断)
fn is_exact_midpoint(value: f64, digits: usize) -> bool {
    let bits = value.abs().to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    if mantissa == 0 {
        return false;
    }
    let reduced_exponent = exponent + mantissa.trailing_zeros() as i32;
    reduced_exponent + 1 + digits as i32 == 0
}

/// 百分比标签："12.5%"，分母为 0 时为 "0.0%"
pub fn percent_label(numerator: f64, denominator: f64) -> String {
    if denominator > 0.0 {
        format!("{}%", to_fixed((numerator / denominator) * 100.0, 1))
    } else {
        "0.0%".to_string()
    }
}

/// 反解析百分比标签 (取数字前缀)
pub fn percent_value(label: &str) -> f64 {
    parse_float_prefix(label).filter(|v| v.is_finite()).unwrap_or(0.0)
}
