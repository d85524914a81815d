// ==========================================
// CSV 导出
// ==========================================
// 格式（逐字节固定，供电子表格导入）:
//   Description,Total Quantity,Unit,Occurrences
//   "<描述, 内部双引号加倍>",<合计>,<单位>,<次数>
// 行分隔 \n，末尾无换行；仅描述列加引号
// ==========================================

use crate::domain::item::AggregatedItem;
use crate::export::number_format::format_number;

pub const CSV_HEADERS: [&str; 4] = ["Description", "Total Quantity", "Unit", "Occurrences"];

/// 描述列加引号（内部 " → ""）
pub fn quote_description(description: &str) -> String {
    format!("\"{}\"", description.replace('"', "\"\""))
}

/// 单行 CSV
pub fn csv_row(item: &AggregatedItem) -> String {
    format!(
        "{},{},{},{}",
        quote_description(&item.description),
        format_number(item.total_quantity),
        item.unit,
        item.occurrence_count
    )
}

/// 完整 CSV 文本
pub fn to_csv_string(items: &[AggregatedItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    lines.extend(items.iter().map(csv_row));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, total: f64, unit: &str, count: u32) -> AggregatedItem {
        AggregatedItem {
            id: description.to_lowercase(),
            description: description.to_string(),
            total_quantity: total,
            unit: unit.to_string(),
            occurrence_count: count,
        }
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        let row = csv_row(&item("Widget \"A\"", 2.0, "pcs", 1));
        assert_eq!(row, "\"Widget \"\"A\"\"\",2,pcs,1");
    }

    #[test]
    fn test_csv_full_document() {
        let csv = to_csv_string(&[item("Bolt", 8.0, "", 2), item("Nut, hex", 2.5, "kg", 1)]);
        assert_eq!(
            csv,
            "Description,Total Quantity,Unit,Occurrences\n\"Bolt\",8,,2\n\"Nut, hex\",2.5,kg,1"
        );
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        assert_eq!(to_csv_string(&[]), "Description,Total Quantity,Unit,Occurrences");
    }
}
