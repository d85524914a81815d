// ==========================================
// 库存清单合并工具 - 汇总引擎
// ==========================================
// 职责: 按归一化描述键合并条目，累加数量与出现次数
// 输入: ValidatedItem 序列
// 输出: AggregatedItem 序列（按键首次出现顺序）
// ==========================================
// 红线1: 键只由描述决定（去首尾空白 + 小写 + 空白折叠），不做词形处理
// 红线2: 单位首个非空者胜出，后续单位不合并、不换算、不校验
// 红线3: 输出保持插入顺序，不排序
// ==========================================

use crate::domain::item::{is_blank_char, AggregatedItem, ValidatedItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 归一化键：去首尾空白 → 小写 → 连续空白折叠为单个空格
pub fn normalize_key(description: &str) -> String {
    description
        .trim_matches(is_blank_char)
        .to_lowercase()
        .split(is_blank_char)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ==========================================
// AggregationSummary - 汇总统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSummary {
    pub validated_rows: usize, // 参与汇总的有效行数
    pub unique_items: usize,   // 去重后条目数
    pub total_quantity: f64,   // 全部数量合计
}

// ==========================================
// AggregationEngine - 汇总引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 合并条目
    ///
    /// # 规则
    /// - 新键: 建立记录（描述取首次出现的去空白原文）
    /// - 已有键: 累加数量 + 次数；现有单位为空时采用本条单位
    ///
    /// # 返回
    /// - 空输入返回空结果
    #[instrument(skip(self, items), fields(input = items.len()))]
    pub fn aggregate(&self, items: &[ValidatedItem]) -> Vec<AggregatedItem> {
        let mut index_by_key: HashMap<String, usize> = HashMap::new();
        let mut aggregated: Vec<AggregatedItem> = Vec::new();

        for item in items {
            let key = normalize_key(&item.description);

            match index_by_key.get(&key) {
                Some(&idx) => {
                    let existing = &mut aggregated[idx];
                    existing.total_quantity += item.quantity;
                    existing.occurrence_count += 1;
                    if existing.unit.is_empty() {
                        if let Some(unit) = item.unit.as_deref().filter(|u| !u.is_empty()) {
                            existing.unit = unit.to_string();
                        }
                    }
                }
                None => {
                    index_by_key.insert(key.clone(), aggregated.len());
                    aggregated.push(AggregatedItem {
                        id: key,
                        description: item.description.trim_matches(is_blank_char).to_string(),
                        total_quantity: item.quantity,
                        unit: item.unit.clone().unwrap_or_default(),
                        occurrence_count: 1,
                    });
                }
            }
        }

        debug!(unique = aggregated.len(), "汇总完成");
        aggregated
    }

    /// 汇总统计
    pub fn summarize(
        &self,
        items: &[ValidatedItem],
        aggregated: &[AggregatedItem],
    ) -> AggregationSummary {
        AggregationSummary {
            validated_rows: items.len(),
            unique_items: aggregated.len(),
            total_quantity: aggregated.iter().map(|a| a.total_quantity).sum(),
        }
    }
}
