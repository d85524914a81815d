// ==========================================
// 库存清单合并工具 - 条目归一化器实现
// ==========================================
// 职责: 按列映射从行记录提取描述/数量/单位，丢弃无效行
// 红线: 单行无效是策略（静默丢弃），不是错误；
//       唯一错误为全部无效（EmptyResult）
// ==========================================

use crate::domain::item::{CellValue, ColumnRoleMapping, RawRecord, ValidatedItem};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::item_importer_trait::ItemNormalizer as ItemNormalizerTrait;
use crate::importer::value_coercion::{coerce_quantity, is_valid_quantity, optional_text};
use tracing::{debug, info};

static EMPTY_CELL: CellValue = CellValue::Empty;

pub struct ItemNormalizer;

impl ItemNormalizer {
    /// 单行提取；无效返回 None
    fn extract(&self, record: &RawRecord, mapping: &ColumnRoleMapping) -> Option<ValidatedItem> {
        let desc_raw = record.get(&mapping.description_col).unwrap_or(&EMPTY_CELL);
        let qty_raw = record.get(&mapping.quantity_col).unwrap_or(&EMPTY_CELL);
        let unit_raw = mapping
            .unit_col
            .as_column()
            .map(|col| record.get(col).unwrap_or(&EMPTY_CELL));

        if !desc_raw.is_truthy() {
            debug!(row_number = record.row_number, "描述为空，丢弃");
            return None;
        }
        if !is_valid_quantity(qty_raw) {
            debug!(
                row_number = record.row_number,
                quantity = %qty_raw.to_text(),
                "数量无法解析，丢弃"
            );
            return None;
        }

        Some(ValidatedItem {
            description: desc_raw.to_text(),
            quantity: coerce_quantity(qty_raw),
            unit: optional_text(unit_raw),
            row_number: record.row_number,
        })
    }
}

impl ItemNormalizerTrait for ItemNormalizer {
    fn normalize(
        &self,
        records: &[RawRecord],
        mapping: &ColumnRoleMapping,
    ) -> ImportResult<Vec<ValidatedItem>> {
        let items: Vec<ValidatedItem> = records
            .iter()
            .filter_map(|record| self.extract(record, mapping))
            .collect();

        info!(
            total_rows = records.len(),
            kept = items.len(),
            dropped = records.len() - items.len(),
            description_col = %mapping.description_col,
            quantity_col = %mapping.quantity_col,
            unit_col = %mapping.unit_col,
            "归一化完成"
        );

        if items.is_empty() {
            return Err(ImportError::empty_result());
        }
        Ok(items)
    }
}
