// ==========================================
// 数值文本格式化
// ==========================================
// 口径与电子表格粘贴流程保持一致:
// - 整数不带小数点，小数取最短往返表示
// - NaN / Infinity / -Infinity
// - |x| >= 1e21 或 0 < |x| < 1e-6 时使用指数形式（1e+21 / 1.5e-7）
// ==========================================

/// 格式化数值
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value == 0.0 {
        // -0 也输出 "0"
        return "0".to_string();
    }

    let abs = value.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    format!("{}", value)
}
