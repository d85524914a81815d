// ==========================================
// 库存清单合并工具 - 文件解析器实现
// ==========================================
// 职责: 字节流 → 表头 + 行记录（仅第一个工作表）
// 支持: Excel (.xlsx/.xls) / CSV (.csv) / 分隔文本 (.txt/.tsv)
// ==========================================
// 表头规则: 去首尾空白；空表头 → __EMPTY, __EMPTY_1 ...；
//           重复表头 H → H_1, H_2 ...
// 单元格规则: 原值保留（不去空白）；空单元格 → Empty；整行空白跳过
// 分隔文本定型: TRUE/FALSE → Bool；数值样式文本（千分位 / $ / % / 括号负数）
//               → Number；其余保留 Text
// ==========================================

use crate::domain::item::{CellValue, DecodedSheet, RawRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::item_importer_trait::FileParser;
use crate::importer::value_coercion::parse_fuzzy_number;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Cursor;

/// 支持的扩展名
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "csv", "txt", "tsv"];

const EMPTY_HEADER: &str = "__EMPTY";
const UTF8_BOM: &str = "\u{FEFF}";

/// 取小写扩展名（无扩展名返回空串）
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// 是否为支持的文件类型
pub fn is_supported_file(file_name: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&file_extension(file_name).as_str())
}

/// 表头规范化（保证唯一）
fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for header in raw {
        let base = match header.trim() {
            "" => EMPTY_HEADER.to_string(),
            h => h.to_string(),
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}

/// 表头行 + 数据行 → DecodedSheet
///
/// 列宽取表头与最长数据行的最大值；短行补 Empty
fn build_sheet(
    file_name: &str,
    header_row: Vec<String>,
    data_rows: Vec<Vec<CellValue>>,
) -> ImportResult<DecodedSheet> {
    let width = data_rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(header_row.len());

    let mut raw_headers = header_row;
    raw_headers.resize(width, String::new());
    let headers = normalize_headers(raw_headers);

    let mut records = Vec::new();
    for (idx, row) in data_rows.into_iter().enumerate() {
        let mut record = RawRecord::new(idx + 1);
        let mut cells = row.into_iter();
        for header in &headers {
            record
                .cells
                .push((header.clone(), cells.next().unwrap_or(CellValue::Empty)));
        }

        // 跳过完全空白的行
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(ImportError::empty_sheet());
    }

    Ok(DecodedSheet {
        file_name: file_name.to_string(),
        headers,
        records,
    })
}

/// 字节 → 文本（去 BOM，非法 UTF-8 有损替换）
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_string()
}

/// 分隔文本单元格定型
fn cell_from_text(raw: &str) -> CellValue {
    match raw {
        "" => CellValue::Empty,
        "TRUE" => CellValue::Bool(true),
        "FALSE" => CellValue::Bool(false),
        _ => match parse_fuzzy_number(raw) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(raw.to_string()),
        },
    }
}

/// 分隔文本解析
fn parse_delimited(text: &str, delimiter: u8, file_name: &str) -> ImportResult<DecodedSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = reader.records();
    let header_row: Vec<String> = match rows.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(ImportError::empty_sheet()),
    };

    let mut data_rows = Vec::new();
    for result in rows {
        let record = result?;
        data_rows.push(record.iter().map(cell_from_text).collect());
    }

    build_sheet(file_name, header_row, data_rows)
}

/// 按首个非空行推断分隔符：制表符 → 分号 → 逗号
pub fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if first_line.contains('\t') {
        b'\t'
    } else if first_line.contains(';') {
        b';'
    } else {
        b','
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8], file_name: &str) -> ImportResult<DecodedSheet> {
        parse_delimited(&decode_text(bytes), b',', file_name)
    }
}

// ==========================================
// 分隔文本 Parser 实现（粘贴数据 / .txt / .tsv）
// ==========================================
pub struct TextParser;

impl FileParser for TextParser {
    fn parse_bytes(&self, bytes: &[u8], file_name: &str) -> ImportResult<DecodedSheet> {
        let text = decode_text(bytes);
        let delimiter = sniff_delimiter(&text);
        parse_delimited(&text, delimiter, file_name)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8], file_name: &str) -> ImportResult<DecodedSheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row: Vec<String> = match rows.next() {
            Some(row) => row.iter().map(|cell| cell.to_string()).collect(),
            None => return Err(ImportError::empty_sheet()),
        };

        let data_rows = rows
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();

        build_sheet(file_name, header_row, data_rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_bytes(&self, bytes: &[u8], file_name: &str) -> ImportResult<DecodedSheet> {
        match file_extension(file_name).as_str() {
            "csv" => CsvParser.parse_bytes(bytes, file_name),
            "txt" | "tsv" => TextParser.parse_bytes(bytes, file_name),
            "xlsx" | "xls" => ExcelParser.parse_bytes(bytes, file_name),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
