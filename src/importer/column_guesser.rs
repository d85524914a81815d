// ==========================================
// 库存清单合并工具 - 列映射猜测器实现
// ==========================================
// 职责: 按表头名称子串给出默认列映射（用户确认前可修改）
// 规则: 小写表头包含关键字即命中，取第一个命中列
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::item::{ColumnRoleMapping, UnitColumn};
use crate::importer::item_importer_trait::ColumnGuesser as ColumnGuesserTrait;

pub const DEFAULT_DESCRIPTION_KEYWORDS: [&str; 4] = ["desc", "item", "name", "product"];
pub const DEFAULT_QUANTITY_KEYWORDS: [&str; 4] = ["qty", "quantity", "count", "amount"];
pub const DEFAULT_UNIT_KEYWORDS: [&str; 2] = ["unit", "uom"];

#[derive(Debug, Clone)]
pub struct ColumnGuesser {
    description_keywords: Vec<String>,
    quantity_keywords: Vec<String>,
    unit_keywords: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn lowercased(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

impl Default for ColumnGuesser {
    fn default() -> Self {
        Self {
            description_keywords: owned(&DEFAULT_DESCRIPTION_KEYWORDS),
            quantity_keywords: owned(&DEFAULT_QUANTITY_KEYWORDS),
            unit_keywords: owned(&DEFAULT_UNIT_KEYWORDS),
        }
    }
}

impl ColumnGuesser {
    /// 从配置读取关键字
    pub fn from_config<C: ImportConfigReader + ?Sized>(config: &C) -> Self {
        Self {
            description_keywords: lowercased(config.description_keywords()),
            quantity_keywords: lowercased(config.quantity_keywords()),
            unit_keywords: lowercased(config.unit_keywords()),
        }
    }

    /// 第一个包含任一关键字的表头下标
    fn find_index(lower_headers: &[String], keywords: &[String]) -> Option<usize> {
        lower_headers
            .iter()
            .position(|h| keywords.iter().any(|k| h.contains(k.as_str())))
    }
}

impl ColumnGuesserTrait for ColumnGuesser {
    fn guess(&self, headers: &[String]) -> Option<ColumnRoleMapping> {
        let first = headers.first()?;
        let lower_headers: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        let description_col = Self::find_index(&lower_headers, &self.description_keywords)
            .map(|i| headers[i].clone())
            .unwrap_or_else(|| first.clone());

        // 未命中时取第二列；只有一列时与描述列相同
        let quantity_col = Self::find_index(&lower_headers, &self.quantity_keywords)
            .map(|i| headers[i].clone())
            .or_else(|| headers.get(1).cloned())
            .unwrap_or_else(|| description_col.clone());

        let unit_col = Self::find_index(&lower_headers, &self.unit_keywords)
            .map(|i| UnitColumn::Column(headers[i].clone()))
            .unwrap_or(UnitColumn::None);

        Some(ColumnRoleMapping {
            description_col,
            quantity_col,
            unit_col,
        })
    }
}
