// ==========================================
// 库存清单合并工具 - 应用层
// ==========================================
// 职责: 组装配置与API，供命令行入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
