// ==========================================
// 库存清单合并工具 - 单元格取值与数值转换
// ==========================================
// 职责: 真值判定 / 文本形式 / 数量有效性 / 数量取值
// 注意: 有效性用前缀解析（"12abc" 有效），取值用整串严格转换
//       （"12abc" → NaN），两者口径不同，保持原样
// ==========================================

use crate::domain::item::{is_blank_char, CellValue};

const INFINITY_LITERAL: &[u8] = b"Infinity";

/// 扫描十进制字面量前缀，返回字节长度（0 = 无）
///
/// 形式: [+-] ( Infinity | 数字+ [. 数字*] [指数] | . 数字+ [指数] )
fn scan_decimal_literal(bytes: &[u8]) -> usize {
    let len = bytes.len();
    let mut i = 0;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    if bytes[i..].starts_with(INFINITY_LITERAL) {
        return i + INFINITY_LITERAL.len();
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < len && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - (i + 1);
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

/// 将已确认合法的字面量转换为 f64
fn literal_to_f64(literal: &str) -> Option<f64> {
    match literal {
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

/// 宽松前缀解析（"12" → 12, "12abc" → 12, " 3.5kg" → 3.5, "abc" → None）
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let trimmed = value.trim_start_matches(is_blank_char);
    let n = scan_decimal_literal(trimmed.as_bytes());
    if n == 0 {
        return None;
    }
    literal_to_f64(&trimmed[..n])
}

/// 严格整串转换
///
/// - 去首尾空白后为空 → 0
/// - 0x / 0o / 0b 前缀按进制解析
/// - 其余必须整串为十进制字面量，否则 NaN
pub fn to_number_strict(value: &str) -> f64 {
    let trimmed = value.trim_matches(is_blank_char);
    if trimmed.is_empty() {
        return 0.0;
    }

    let bytes = trimmed.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix(&trimmed[2..], radix);
        }
    }

    let n = scan_decimal_literal(bytes);
    if n != bytes.len() {
        return f64::NAN;
    }
    literal_to_f64(trimmed).unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    let mut acc = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * radix as f64 + d as f64,
            None => return f64::NAN,
        }
    }
    acc
}

/// 去掉数字之间的千分位逗号（"1,200" → "1200"）
///
/// 从左到右不重叠匹配 数字,数字："1,2,3" → "12,3"
fn strip_thousands_separators(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len()
            && chars[i].is_ascii_digit()
            && chars[i + 1] == ','
            && chars[i + 2].is_ascii_digit()
        {
            out.push(chars[i]);
            out.push(chars[i + 2]);
            i += 3;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// 分隔文本单元格的数值识别
///
/// 先整串严格转换；失败后去千分位逗号、去 `$`、每个 `%` 除以 100 再试；
/// 最后把括号视为负号（"(12)" → -12）。空白文本不视为数值。
pub fn parse_fuzzy_number(value: &str) -> Option<f64> {
    if value.trim_matches(is_blank_char).is_empty() {
        return None;
    }

    let direct = to_number_strict(value);
    if !direct.is_nan() {
        return Some(direct);
    }

    let mut scale = 1.0_f64;
    let mut cleaned = String::with_capacity(value.len());
    for c in strip_thousands_separators(value).chars() {
        match c {
            '$' => {}
            '%' => scale *= 100.0,
            _ => cleaned.push(c),
        }
    }
    if cleaned.trim_matches(is_blank_char).is_empty() {
        return None;
    }

    let n = to_number_strict(&cleaned);
    if !n.is_nan() {
        return Some(n / scale);
    }

    if let (Some(open), Some(close)) = (cleaned.find('('), cleaned.rfind(')')) {
        if open < close {
            let unwrapped = format!(
                "{}{}{}",
                &cleaned[..open],
                &cleaned[open + 1..close],
                &cleaned[close + 1..]
            );
            let n = to_number_strict(&unwrapped);
            if !n.is_nan() {
                return Some(-n / scale);
            }
        }
    }

    None
}

/// 数量有效性：数值单元格直接有效，其余看文本能否前缀解析
pub fn is_valid_quantity(cell: &CellValue) -> bool {
    match cell {
        CellValue::Number(_) => true,
        CellValue::Text(s) => parse_float_prefix(s).is_some(),
        CellValue::Empty | CellValue::Bool(_) => false,
    }
}

/// 数量取值（严格转换）
pub fn coerce_quantity(cell: &CellValue) -> f64 {
    match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => to_number_strict(s),
        CellValue::Empty => 0.0,
        CellValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// 可选文本：真值才返回文本形式
pub fn optional_text(cell: Option<&CellValue>) -> Option<String> {
    cell.filter(|c| c.is_truthy()).map(CellValue::to_text)
}
