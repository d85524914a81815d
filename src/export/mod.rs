// ==========================================
// 库存清单合并工具 - 展示与导出层
// ==========================================
// 职责: 汇总结果 → 表格 / CSV / 剪贴板文本
// ==========================================

pub mod clipboard;
pub mod csv_export;
pub mod number_format;
pub mod table;

pub use clipboard::to_tsv_string;
pub use csv_export::to_csv_string;
pub use number_format::format_number;
pub use table::{render_text_table, table_rows, TableRow};
