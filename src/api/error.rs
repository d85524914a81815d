// ==========================================
// 库存清单合并工具 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入层错误为用户友好的错误消息
// ==========================================

use crate::domain::session::InvalidTransition;
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入与状态错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    /// 上传已被更新的上传取代
    #[error("上传已过期: upload_id={upload_id}")]
    StaleUpload { upload_id: String },

    // ==========================================
    // 导入错误
    // ==========================================
    /// 文件解码失败（格式不支持 / 空文件 / 读取错误）
    #[error("{0}")]
    DecodeFailed(String),

    /// 所选列未提取到任何有效条目
    #[error("{0}")]
    EmptyResult(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        if err.is_decode_failure() {
            return ApiError::DecodeFailed(err.to_string());
        }
        match err {
            ImportError::EmptyResult(msg) => ApiError::EmptyResult(msg),
            ImportError::ConfigReadError { path, message } => {
                ApiError::ConfigError(format!("{}: {}", path, message))
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<InvalidTransition> for ApiError {
    fn from(err: InvalidTransition) -> Self {
        ApiError::InvalidStateTransition {
            from: err.from.to_string(),
            to: err.to.to_string(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应
// ==========================================

/// 错误响应（返回给调用方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::StaleUpload { .. } => "STALE_UPLOAD",
            ApiError::DecodeFailed(_) => "DECODE_FAILED",
            ApiError::EmptyResult(_) => "EMPTY_RESULT",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::FileWriteError(_) => "FILE_WRITE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

/// 将ApiError转换为JSON字符串
pub fn map_api_error(err: &ApiError) -> String {
    let error_response = ErrorResponse {
        code: err.code().to_string(),
        message: err.to_string(),
        details: match err {
            ApiError::InvalidStateTransition { from, to } => {
                Some(serde_json::json!({ "from": from, "to": to }))
            }
            ApiError::StaleUpload { upload_id } => {
                Some(serde_json::json!({ "upload_id": upload_id }))
            }
            _ => None,
        },
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ImportStatus;

    #[test]
    fn test_from_import_error() {
        let err: ApiError = ImportError::EmptySheet("The file appears to be empty.".into()).into();
        assert!(matches!(err, ApiError::DecodeFailed(_)));
        assert_eq!(err.to_string(), "The file appears to be empty.");

        let err: ApiError = ImportError::EmptyResult("none".into()).into();
        assert!(matches!(err, ApiError::EmptyResult(ref m) if m == "none"));

        let err: ApiError = ImportError::InternalError("boom".into()).into();
        assert!(matches!(err, ApiError::InternalError(_)));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_map_api_error_json() {
        let err: ApiError = InvalidTransition {
            from: ImportStatus::Idle,
            to: ImportStatus::Processing,
        }
        .into();

        let json: serde_json::Value = serde_json::from_str(&map_api_error(&err)).unwrap();
        assert_eq!(json["code"], "INVALID_STATE_TRANSITION");
        assert_eq!(json["details"]["from"], "IDLE");
        assert_eq!(json["details"]["to"], "PROCESSING");
    }
}
