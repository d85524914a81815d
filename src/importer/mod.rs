// ==========================================
// 库存清单合并工具 - 导入层
// ==========================================
// 职责: 外部文件解码、列映射猜测、条目归一化
// 支持: Excel, CSV, 分隔文本（含粘贴数据）
// ==========================================

// 模块声明
pub mod column_guesser;
pub mod error;
pub mod file_parser;
pub mod item_importer_impl;
pub mod item_importer_trait;
pub mod item_normalizer;
pub mod value_coercion;

// 重导出核心类型
pub use column_guesser::ColumnGuesser as ColumnGuesserImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, TextParser, UniversalFileParser};
pub use item_importer_impl::ItemImporterImpl;
pub use item_normalizer::ItemNormalizer as ItemNormalizerImpl;

// 重导出 Trait 接口
pub use item_importer_trait::{ColumnGuesser, FileParser, ItemImporter, ItemNormalizer};
