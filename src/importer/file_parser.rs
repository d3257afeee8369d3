// ==========================================
// 火鸡订单分配系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 带行号的原始记录（表头统一小写）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始记录（row 为文件中的行号,表头为第 1 行）
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub row: usize,
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// 取字段值（空字符串视为缺失）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// 解析结果: 表头（小写）+ 数据记录
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl ParsedTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// 文件解析接口
pub trait FileParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<ParsedTable>;
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<ParsedTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut fields = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord {
                row: row_idx + 2,
                fields,
            });
        }

        Ok(ParsedTable { headers, records })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<ParsedTable> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| normalize_header(&cell.to_string()))
            .collect();

        let mut records = Vec::new();
        for (row_idx, data_row) in rows.enumerate() {
            let mut fields = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord {
                row: row_idx + 2,
                fields,
            });
        }

        Ok(ParsedTable { headers, records })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ParsedTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
