// ==========================================
// 库存清单合并工具 - 核心库
// ==========================================
// 流程: 文件解码 → 列映射 → 归一化 → 汇总 → 导出
// 系统定位: 本地内存处理，无持久化、无网络
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 汇总规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 表格 / CSV / 剪贴板
pub mod export;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 耗时统计
pub mod perf;

// API 层 - 会话接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ExportFormat, ImportStatus};

// 领域实体
pub use domain::{
    AggregatedItem, CellValue, ColumnRoleMapping, ConsolidationResult, DecodedSheet, RawRecord,
    UnitColumn, ValidatedItem,
};

// 引擎
pub use engine::{normalize_key, AggregationEngine, AggregationSummary, UnitConflictDetector};

// 导入
pub use importer::{ImportError, ImportResult, ItemImporterImpl};

// API
pub use api::{ApiError, ApiResult, ConsolidationApi, MappingProposal};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Inventory Consolidator";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
