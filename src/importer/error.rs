// ==========================================
// 库存清单合并工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 解码失败（文件层） / 空结果（归一化层）
// ==========================================

use crate::i18n::t_with_args;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 解码失败 =====
    /// 文件路径（消息随当前语言）
    #[error("{}", file_not_found_message(.0))]
    FileNotFound(String),

    /// 小写扩展名（消息随当前语言）
    #[error("{}", unsupported_format_message(.0))]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("{0}")]
    EmptySheet(String),

    // ===== 归一化 =====
    #[error("{0}")]
    EmptyResult(String),

    // ===== 配置 =====
    #[error("配置文件读取失败: {path}, 原因: {message}")]
    ConfigReadError { path: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ImportError {
    /// 文件无有效数据行（消息随当前语言）
    pub fn empty_sheet() -> Self {
        ImportError::EmptySheet(crate::i18n::t("import.empty_file"))
    }

    /// 所选列未提取到任何有效条目（消息随当前语言）
    pub fn empty_result() -> Self {
        ImportError::EmptyResult(crate::i18n::t("import.no_valid_items"))
    }

    /// 是否属于解码失败
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            ImportError::FileNotFound(_)
                | ImportError::UnsupportedFormat(_)
                | ImportError::FileReadError(_)
                | ImportError::ExcelParseError(_)
                | ImportError::CsvParseError(_)
                | ImportError::EmptySheet(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileReadError(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

fn file_not_found_message(path: &str) -> String {
    t_with_args("import.file_not_found", &[("path", path)])
}

fn unsupported_format_message(ext: &str) -> String {
    t_with_args("import.unsupported_format", &[("ext", ext)])
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
