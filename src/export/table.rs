// ==========================================
// 表格视图
// ==========================================
// 单位为空显示 "-"，次数显示为 "<n>x"
// ==========================================

use crate::domain::item::AggregatedItem;
use crate::export::number_format::format_number;
use serde::{Deserialize, Serialize};

pub const TABLE_HEADERS: [&str; 4] = ["Item Description", "Total Quantity", "Unit", "Occurrences"];

/// 表格行（已格式化的显示文本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: String,
    pub description: String,
    pub total_quantity: String,
    pub unit: String,
    pub occurrences: String,
}

impl From<&AggregatedItem> for TableRow {
    fn from(item: &AggregatedItem) -> Self {
        Self {
            id: item.id.clone(),
            description: item.description.clone(),
            total_quantity: format_number(item.total_quantity),
            unit: if item.unit.is_empty() {
                "-".to_string()
            } else {
                item.unit.clone()
            },
            occurrences: format!("{}x", item.occurrence_count),
        }
    }
}

pub fn table_rows(items: &[AggregatedItem]) -> Vec<TableRow> {
    items.iter().map(TableRow::from).collect()
}

/// 终端文本表格（按字符数对齐）
pub fn render_text_table(items: &[AggregatedItem]) -> String {
    let rows = table_rows(items);

    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        let cells = [
            &row.description,
            &row.total_quantity,
            &row.unit,
            &row.occurrences,
        ];
        for (idx, cell) in cells.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let pad = |text: &str, width: usize| {
        let fill = width.saturating_sub(text.chars().count());
        format!("{}{}", text, " ".repeat(fill))
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(
        TABLE_HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i]))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string(),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        let cells = [
            &row.description,
            &row.total_quantity,
            &row.unit,
            &row.occurrences,
        ];
        lines.push(
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| pad(c, widths[i]))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string(),
        );
    }
    lines.join("\n")
}
