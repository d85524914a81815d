// ==========================================
// 库存清单合并工具 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 导入状态 (Import Status)
// ==========================================
// 流转: IDLE → MAPPING → PROCESSING → SUCCESS | ERROR
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    Idle,       // 等待上传
    Mapping,    // 已解码，等待列映射确认
    Processing, // 归一化 + 汇总中
    Success,    // 汇总完成
    Error,      // 本次运行失败
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStatus::Idle => write!(f, "IDLE"),
            ImportStatus::Mapping => write!(f, "MAPPING"),
            ImportStatus::Processing => write!(f, "PROCESSING"),
            ImportStatus::Success => write!(f, "SUCCESS"),
            ImportStatus::Error => write!(f, "ERROR"),
        }
    }
}

// ==========================================
// 导出格式 (Export Format)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Table, // 屏幕表格
    Csv,   // CSV 文件
    Tsv,   // 制表符分隔（剪贴板）
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Table => write!(f, "table"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(ExportFormat::Table),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" | "clipboard" => Ok(ExportFormat::Tsv),
            other => Err(format!("未知导出格式: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_status_serde() {
        let json = serde_json::to_string(&ImportStatus::Processing).unwrap();
        assert_eq!(json, "\"PROCESSING\"");
        assert_eq!(ImportStatus::Success.to_string(), "SUCCESS");
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("clipboard".parse::<ExportFormat>(), Ok(ExportFormat::Tsv));
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
