// ==========================================
// 库存清单合并工具 - 物料条目领域模型
// ==========================================
// 职责: 原始行记录 / 列角色映射 / 校验后条目 / 汇总条目
// 生命周期: RawRecord 由解码层创建 → 归一化层只读 → 汇总层消费 ValidatedItem
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::export::number_format::format_number;

/// 空白字符判定（去首尾空白、空白折叠、数值转换共用）
///
/// Unicode 空白 + BOM (U+FEFF)，不含 NEL (U+0085)
pub fn is_blank_char(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}

// ==========================================
// CellValue - 单元格原始值
// ==========================================
// 空单元格统一为 Empty（不跳过，保持列结构）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 原始真值判定
    ///
    /// - Empty / 空字符串 / 0 / NaN / false → false
    /// - 其余 → true
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Bool(b) => *b,
        }
    }

    /// 文本形式（数字按表格显示口径格式化）
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

// ==========================================
// RawRecord - 原始行记录
// ==========================================
// 按列顺序保存 (表头, 值)，表头在单条记录内唯一
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub cells: Vec<(String, CellValue)>,
    pub row_number: usize, // 数据行号（从 1 开始，不含表头行）
}

impl RawRecord {
    pub fn new(row_number: usize) -> Self {
        Self {
            cells: Vec::new(),
            row_number,
        }
    }

    /// 构造器风格追加单元格（同名表头覆盖旧值）
    pub fn with_cell(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(header, value);
        self
    }

    pub fn set(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        let header = header.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((header, value)),
        }
    }

    /// 读取单元格；表头不存在时返回 None
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    /// 所有单元格均为空
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| match v {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim_matches(is_blank_char).is_empty(),
            _ => false,
        })
    }
}

// ==========================================
// DecodedSheet - 解码结果（第一个工作表）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedSheet {
    pub file_name: String,
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl DecodedSheet {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}

// ==========================================
// ColumnRoleMapping - 列角色映射
// ==========================================
/// 单位列哨兵值（文本形式）
pub const UNIT_COLUMN_NONE: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitColumn {
    None,
    Column(String),
}

impl UnitColumn {
    /// 从文本形式解析："none" 或空串 → None
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == UNIT_COLUMN_NONE {
            UnitColumn::None
        } else {
            UnitColumn::Column(value.to_string())
        }
    }

    pub fn as_column(&self) -> Option<&str> {
        match self {
            UnitColumn::None => None,
            UnitColumn::Column(c) => Some(c.as_str()),
        }
    }
}

impl fmt::Display for UnitColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitColumn::None => write!(f, "{}", UNIT_COLUMN_NONE),
            UnitColumn::Column(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMapping {
    pub description_col: String,
    pub quantity_col: String,
    pub unit_col: UnitColumn,
}

impl ColumnRoleMapping {
    pub fn new(
        description_col: impl Into<String>,
        quantity_col: impl Into<String>,
        unit_col: UnitColumn,
    ) -> Self {
        Self {
            description_col: description_col.into(),
            quantity_col: quantity_col.into(),
            unit_col,
        }
    }

    /// 校验映射引用的表头是否存在
    ///
    /// # 返回
    /// - Ok(()): 全部存在
    /// - Err((角色, 列名)): 第一个不存在的列
    pub fn validate(&self, headers: &[String]) -> Result<(), (&'static str, String)> {
        let exists = |col: &str| headers.iter().any(|h| h == col);

        if self.description_col.is_empty() || !exists(&self.description_col) {
            return Err(("description", self.description_col.clone()));
        }
        if self.quantity_col.is_empty() || !exists(&self.quantity_col) {
            return Err(("quantity", self.quantity_col.clone()));
        }
        if let Some(unit) = self.unit_col.as_column() {
            if !exists(unit) {
                return Err(("unit", unit.to_string()));
            }
        }
        Ok(())
    }
}

// ==========================================
// ValidatedItem - 校验通过的条目
// ==========================================
// 由归一化层从单条 RawRecord 创建，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedItem {
    pub description: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub row_number: usize,
}

impl ValidatedItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit: Option<&str>) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: unit.map(str::to_string),
            row_number: 0,
        }
    }
}

// ==========================================
// AggregatedItem - 汇总条目
// ==========================================
// 不变式: id 只由描述归一化得到；单次汇总内每个 id 仅一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedItem {
    pub id: String,               // 归一化键
    pub description: String,      // 首次出现的去空白原文
    pub total_quantity: f64,      // 数量合计
    pub unit: String,             // 首个非空单位（可能为空串）
    pub occurrence_count: u32,    // 合并行数
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_char_set() {
        assert!(is_blank_char(' '));
        assert!(is_blank_char('\t'));
        assert!(is_blank_char('\u{00A0}'));
        assert!(is_blank_char('\u{3000}'));
        assert!(is_blank_char('\u{FEFF}'));
        assert!(!is_blank_char('\u{0085}'));
        assert!(!is_blank_char('a'));
    }

    #[test]
    fn test_cell_truthiness() {
        assert!(!CellValue::Empty.is_truthy());
        assert!(!CellValue::Text(String::new()).is_truthy());
        assert!(CellValue::Text(" ".to_string()).is_truthy());
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::Number(f64::NAN).is_truthy());
        assert!(CellValue::Number(-1.0).is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
        assert!(CellValue::Bool(true).is_truthy());
    }

    #[test]
    fn test_cell_text_form() {
        assert_eq!(CellValue::Number(12.0).to_text(), "12");
        assert_eq!(CellValue::Number(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Bool(true).to_text(), "true");
        assert_eq!(CellValue::Text("  Bolt ".into()).to_text(), "  Bolt ");
        assert_eq!(CellValue::Empty.to_text(), "");
    }

    #[test]
    fn test_raw_record_lookup() {
        let record = RawRecord::new(1)
            .with_cell("item", "Bolt")
            .with_cell("qty", 5.0)
            .with_cell("item", "Nut");

        assert_eq!(record.get("item"), Some(&CellValue::Text("Nut".into())));
        assert_eq!(record.get("qty"), Some(&CellValue::Number(5.0)));
        assert_eq!(record.get("unit"), None);
        assert_eq!(record.headers().collect::<Vec<_>>(), vec!["item", "qty"]);
    }

    #[test]
    fn test_unit_column_sentinel() {
        assert_eq!(UnitColumn::parse("none"), UnitColumn::None);
        assert_eq!(UnitColumn::parse(""), UnitColumn::None);
        assert_eq!(
            UnitColumn::parse("UOM"),
            UnitColumn::Column("UOM".to_string())
        );
        assert_eq!(UnitColumn::None.to_string(), "none");
    }

    #[test]
    fn test_mapping_validate() {
        let headers = vec!["item".to_string(), "qty".to_string()];

        let ok = ColumnRoleMapping::new("item", "qty", UnitColumn::None);
        assert!(ok.validate(&headers).is_ok());

        let bad_unit = ColumnRoleMapping::new("item", "qty", UnitColumn::parse("uom"));
        assert_eq!(
            bad_unit.validate(&headers),
            Err(("unit", "uom".to_string()))
        );

        let bad_qty = ColumnRoleMapping::new("item", "", UnitColumn::None);
        assert_eq!(bad_qty.validate(&headers), Err(("quantity", String::new())));
    }
}
