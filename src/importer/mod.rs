// ==========================================
// 火鸡订单分配系统 - 导入层
// ==========================================
// 职责: 从外部表格批量读取订单/火鸡
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod inventory_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{
    CsvParser, ExcelParser, FileParser, ParsedTable, RawRecord, UniversalFileParser,
};
pub use inventory_importer::{
    ImportSummary, InventoryImporter, OrderRow, RowRejection, TurkeyRow,
};
