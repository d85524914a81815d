// ==========================================
// 库存清单合并工具 - API 层
// ==========================================
// 职责: 提供会话式业务接口，供命令行 / 嵌入方调用
// ==========================================

pub mod consolidation_api;
pub mod error;

// 重导出核心类型
pub use consolidation_api::{ConsolidationApi, MappingProposal};
pub use error::{map_api_error, ApiError, ApiResult, ErrorResponse};
