// ==========================================
// 库存清单合并工具 - 领域模型层
// ==========================================
// 职责: 定义条目实体、会话状态、类型
// 红线: 不含文件解码逻辑,不含汇总逻辑
// ==========================================

pub mod item;
pub mod session;
pub mod types;

// 重导出核心类型
pub use item::{
    AggregatedItem, CellValue, ColumnRoleMapping, DecodedSheet, RawRecord, UnitColumn,
    ValidatedItem, UNIT_COLUMN_NONE,
};
pub use session::{ConsolidationResult, ImportSession, InvalidTransition};
pub use types::{ExportFormat, ImportStatus};
