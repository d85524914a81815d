// ==========================================
// 库存清单合并工具 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::ConsolidationApi;
use crate::config::{ConfigManager, ImportConfigReader};
use crate::i18n;

/// 应用状态
///
/// 包含配置和API实例
pub struct AppState {
    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 合并会话API
    pub consolidation_api: Arc<ConsolidationApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config_path: 配置文件路径（None 时使用默认路径）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(config_path: Option<&Path>) -> Result<Self, String> {
        let config = match config_path {
            Some(path) => ConfigManager::load_from_path(path),
            None => ConfigManager::load(),
        }
        .map_err(|e| format!("无法加载配置: {}", e))?;

        Ok(Self::with_config(config))
    }

    /// 使用已加载的配置创建
    pub fn with_config(config: ConfigManager) -> Self {
        i18n::set_locale(&config.locale());

        let consolidation_api = Arc::new(ConsolidationApi::from_config(&config));
        tracing::info!(
            config_path = ?config.source_path(),
            locale = %config.locale(),
            "AppState初始化完成"
        );

        Self {
            config: Arc::new(config),
            consolidation_api,
        }
    }
}
