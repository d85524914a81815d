// ==========================================
// 库存清单合并工具 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照
// 存储: JSON 文件（不存在时使用默认值）
// 路径: $INVENTORY_CONSOLIDATOR_CONFIG 或 <config_dir>/inventory-consolidator/config.json
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::importer::column_guesser::{
    DEFAULT_DESCRIPTION_KEYWORDS, DEFAULT_QUANTITY_KEYWORDS, DEFAULT_UNIT_KEYWORDS,
};
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "INVENTORY_CONSOLIDATOR_CONFIG";

const CONFIG_DIR_NAME: &str = "inventory-consolidator";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConsolidatorConfig - 配置项全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidatorConfig {
    pub description_keywords: Vec<String>,
    pub quantity_keywords: Vec<String>,
    pub unit_keywords: Vec<String>,
    pub csv_file_name: String,
    pub pasted_file_name: String,
    pub locale: String,
}

impl Default for ConsolidatorConfig {
    fn default() -> Self {
        Self {
            description_keywords: DEFAULT_DESCRIPTION_KEYWORDS.iter().map(|w| w.to_string()).collect(),
            quantity_keywords: DEFAULT_QUANTITY_KEYWORDS.iter().map(|w| w.to_string()).collect(),
            unit_keywords: DEFAULT_UNIT_KEYWORDS.iter().map(|w| w.to_string()).collect(),
            csv_file_name: "aggregated_inventory.csv".to_string(),
            pasted_file_name: "pasted_data.txt".to_string(),
            locale: "en".to_string(),
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: ConsolidatorConfig,
    source_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用给定配置创建（测试 / 嵌入场景）
    pub fn from_config(config: ConsolidatorConfig) -> Self {
        Self {
            config,
            source_path: None,
        }
    }

    /// 从默认路径加载
    pub fn load() -> ImportResult<Self> {
        Self::load_from_path(get_default_config_path())
    }

    /// 从指定路径加载
    ///
    /// # 返回
    /// - 文件不存在: 默认配置
    /// - JSON 格式错误: ConfigReadError
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: ConsolidatorConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(path = %path.display(), "配置加载完成");
        Ok(Self {
            config,
            source_path: Some(path.to_path_buf()),
        })
    }

    pub fn config(&self) -> &ConsolidatorConfig {
        &self.config
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// 配置快照（JSON）
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        serde_json::to_string(&self.config).map_err(|e| ImportError::InternalError(e.to_string()))
    }
}

impl ImportConfigReader for ConfigManager {
    fn description_keywords(&self) -> Vec<String> {
        self.config.description_keywords.clone()
    }

    fn quantity_keywords(&self) -> Vec<String> {
        self.config.quantity_keywords.clone()
    }

    fn unit_keywords(&self) -> Vec<String> {
        self.config.unit_keywords.clone()
    }

    fn csv_file_name(&self) -> String {
        self.config.csv_file_name.clone()
    }

    fn pasted_file_name(&self) -> String {
        self.config.pasted_file_name.clone()
    }

    fn locale(&self) -> String {
        self.config.locale.clone()
    }
}

/// 获取默认配置文件路径
pub fn get_default_config_path() -> PathBuf {
    // 允许通过环境变量显式指定配置路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        None => PathBuf::from(".").join(CONFIG_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::load_from_path(dir.path().join("absent.json")).unwrap();

        assert_eq!(manager.config(), &ConsolidatorConfig::default());
        assert_eq!(manager.csv_file_name(), "aggregated_inventory.csv");
        assert!(manager.source_path().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"unit_keywords": ["measure"], "locale": "zh-CN"}}"#).unwrap();

        let manager = ConfigManager::load_from_path(file.path()).unwrap();

        assert_eq!(manager.unit_keywords(), vec!["measure".to_string()]);
        assert_eq!(manager.locale(), "zh-CN");
        assert_eq!(manager.pasted_file_name(), "pasted_data.txt");
        assert_eq!(manager.source_path(), Some(file.path()));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = ConfigManager::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::ConfigReadError { .. }));
    }

    #[test]
    fn test_config_snapshot_round_trips() {
        let manager = ConfigManager::default();
        let snapshot = manager.get_config_snapshot().unwrap();
        let parsed: ConsolidatorConfig = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(&parsed, manager.config());
    }
}
