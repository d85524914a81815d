// ==========================================
// 库存清单合并工具 - 单位冲突检测
// ==========================================
// 职责: 找出同键条目中与已采用单位不同的行
// 红线: 仅用于诊断，不改变汇总结果（首个非空单位仍然胜出）
// ==========================================

use crate::domain::item::ValidatedItem;
use crate::engine::aggregation::normalize_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 单位冲突记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConflict {
    pub id: String,           // 归一化键
    pub row_number: usize,    // 被忽略单位所在行
    pub kept_unit: String,    // 已采用的单位
    pub ignored_unit: String, // 被忽略的单位
}

pub struct UnitConflictDetector;

impl UnitConflictDetector {
    /// 检测单位冲突
    ///
    /// # 返回
    /// - Vec<UnitConflict>: 按输入顺序（不包括首个非空单位本身）
    pub fn detect(&self, items: &[ValidatedItem]) -> Vec<UnitConflict> {
        let mut adopted: HashMap<String, String> = HashMap::new();
        let mut conflicts = Vec::new();

        for item in items {
            let unit = match item.unit.as_deref() {
                Some(u) if !u.is_empty() => u,
                _ => continue,
            };
            let key = normalize_key(&item.description);

            match adopted.get(&key) {
                Some(kept) if kept != unit => conflicts.push(UnitConflict {
                    id: key,
                    row_number: item.row_number,
                    kept_unit: kept.clone(),
                    ignored_unit: unit.to_string(),
                }),
                Some(_) => {}
                None => {
                    adopted.insert(key, unit.to_string());
                }
            }
        }

        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, unit: Option<&str>, row_number: usize) -> ValidatedItem {
        ValidatedItem {
            row_number,
            ..ValidatedItem::new(description, 1.0, unit)
        }
    }

    #[test]
    fn test_detect_none() {
        let items = vec![
            item("Bolt", Some("pcs"), 1),
            item("bolt", Some("pcs"), 2),
            item("Nut", Some("kg"), 3),
        ];
        assert!(UnitConflictDetector.detect(&items).is_empty());
    }

    #[test]
    fn test_detect_after_absent_unit() {
        let items = vec![
            item("Flour", None, 1),
            item("flour", Some("kg"), 2),
            item("FLOUR", Some("lb"), 3),
        ];

        let conflicts = UnitConflictDetector.detect(&items);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].row_number, 3);
        assert_eq!(conflicts[0].kept_unit, "kg");
        assert_eq!(conflicts[0].ignored_unit, "lb");
        assert_eq!(conflicts[0].id, "flour");
    }

    #[test]
    fn test_detect_multiple() {
        let items = vec![
            item("Rope", Some("m"), 1),
            item("rope", Some("ft"), 2),
            item("ROPE", Some("yd"), 3),
        ];
        let conflicts = UnitConflictDetector.detect(&items);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].row_number, 2);
        assert_eq!(conflicts[1].row_number, 3);
    }
}
