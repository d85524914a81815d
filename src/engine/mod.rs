// ==========================================
// 库存清单合并工具 - 引擎层
// ==========================================
// 职责: 条目去重汇总规则
// 红线: 引擎只处理内存数据，不做文件 I/O
// ==========================================

pub mod aggregation;
pub mod unit_conflict;

// 重导出核心引擎
pub use aggregation::{normalize_key, AggregationEngine, AggregationSummary};
pub use unit_conflict::{UnitConflict, UnitConflictDetector};
