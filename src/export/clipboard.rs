// ==========================================
// 剪贴板导出（制表符分隔，便于直接粘贴到 Excel）
// ==========================================

use crate::domain::item::AggregatedItem;
use crate::export::number_format::format_number;

pub const TSV_HEADERS: [&str; 4] = ["Item Description", "Total Quantity", "Unit", "Occurrences"];

pub fn tsv_row(item: &AggregatedItem) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        item.description,
        format_number(item.total_quantity),
        item.unit,
        item.occurrence_count
    )
}

/// 完整 TSV 文本（行分隔 \n，末尾无换行，字段不加引号）
pub fn to_tsv_string(items: &[AggregatedItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(TSV_HEADERS.join("\t"));
    lines.extend(items.iter().map(tsv_row));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_layout() {
        let items = vec![
            AggregatedItem {
                id: "steel bolt".to_string(),
                description: "Steel \"M8\" Bolt".to_string(),
                total_quantity: 12.0,
                unit: String::new(),
                occurrence_count: 3,
            },
            AggregatedItem {
                id: "nut".to_string(),
                description: "Nut".to_string(),
                total_quantity: 0.5,
                unit: "kg".to_string(),
                occurrence_count: 1,
            },
        ];

        assert_eq!(
            to_tsv_string(&items),
            "Item Description\tTotal Quantity\tUnit\tOccurrences\n\
             Steel \"M8\" Bolt\t12\t\t3\n\
             Nut\t0.5\tkg\t1"
        );
    }
}
