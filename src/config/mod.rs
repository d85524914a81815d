// ==========================================
// 库存清单合并工具 - 配置层
// ==========================================
// 职责: 系统配置管理（列猜测关键字 / 文件命名 / 语言）
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{get_default_config_path, ConfigManager, ConsolidatorConfig, CONFIG_PATH_ENV};
pub use import_config_trait::ImportConfigReader;
