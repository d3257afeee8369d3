// ==========================================
// 火鸡订单分配系统 - 库存导入映射
// ==========================================
// 职责: 原始记录 -> 订单行/火鸡行 的字段映射与类型转换
// 说明: 行级问题记录为 RowRejection,不中断整个文件
// ==========================================

use crate::domain::types::{EntityKind, HamPortion, OrderId, TurkeyId};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{ParsedTable, RawRecord, UniversalFileParser};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 订单表必需列
pub const ORDER_COLUMNS: [&str; 2] = ["oid", "target_weight"];
/// 火鸡表必需列
pub const TURKEY_COLUMNS: [&str; 2] = ["tid", "weight"];

/// 订单行
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub row: usize,
    pub oid: OrderId,
    pub target_weight: f64,
    pub name: String,
    pub ham: HamPortion,
    pub notes: String,
}

/// 火鸡行
#[derive(Debug, Clone, PartialEq)]
pub struct TurkeyRow {
    pub row: usize,
    pub tid: TurkeyId,
    pub weight: f64,
}

/// 被拒绝的行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row: usize,
    pub id: Option<i64>,
    pub reason: String,
}

/// 导入汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub entity: EntityKind,
    pub imported: usize,
    pub rejected: Vec<RowRejection>,
}

impl ImportSummary {
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            imported: 0,
            rejected: Vec::new(),
        }
    }

    pub fn reject(&mut self, row: usize, id: Option<i64>, reason: impl Into<String>) {
        self.rejected.push(RowRejection {
            row,
            id,
            reason: reason.into(),
        });
    }
}

// ==========================================
// InventoryImporter - 库存导入器
// ==========================================
#[derive(Default)]
pub struct InventoryImporter;

impl InventoryImporter {
    pub fn new() -> Self {
        Self
    }

    /// 读取订单文件
    ///
    /// 列: oid, target_weight（必需）; name, ham, notes（可选）
    pub fn read_orders(&self, path: &Path) -> ImportResult<(Vec<OrderRow>, Vec<RowRejection>)> {
        let table = UniversalFileParser.parse(path)?;
        ensure_columns(&table, &ORDER_COLUMNS)?;

        let mut rows = Vec::new();
        let mut rejected = Vec::new();
        for record in &table.records {
            match map_order(record) {
                Ok(row) => rows.push(row),
                Err(rejection) => rejected.push(rejection),
            }
        }

        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            rejected = rejected.len(),
            "订单文件读取完成"
        );
        Ok((rows, rejected))
    }

    /// 读取火鸡文件
    ///
    /// 列: tid, weight（必需）
    pub fn read_turkeys(&self, path: &Path) -> ImportResult<(Vec<TurkeyRow>, Vec<RowRejection>)> {
        let table = UniversalFileParser.parse(path)?;
        ensure_columns(&table, &TURKEY_COLUMNS)?;

        let mut rows = Vec::new();
        let mut rejected = Vec::new();
        for record in &table.records {
            match map_turkey(record) {
                Ok(row) => rows.push(row),
                Err(rejection) => rejected.push(rejection),
            }
        }

        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            rejected = rejected.len(),
            "火鸡文件读取完成"
        );
        Ok((rows, rejected))
    }
}

/// 按表头检查必需列（只有表头的文件同样校验）
fn ensure_columns(table: &ParsedTable, columns: &[&str]) -> ImportResult<()> {
    match columns.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(ImportError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

fn map_order(record: &RawRecord) -> Result<OrderRow, RowRejection> {
    let oid = parse_id(record, "oid")?;
    let reject = |reason: String| RowRejection {
        row: record.row,
        id: Some(oid),
        reason,
    };

    let target_weight = parse_weight(record, "target_weight").map_err(reject)?;
    let ham = match record.get("ham") {
        Some(raw) => raw.parse::<HamPortion>().map_err(reject)?,
        None => HamPortion::None,
    };

    Ok(OrderRow {
        row: record.row,
        oid,
        target_weight,
        name: record.get("name").unwrap_or_default().to_string(),
        ham,
        notes: record.get("notes").unwrap_or_default().to_string(),
    })
}

fn map_turkey(record: &RawRecord) -> Result<TurkeyRow, RowRejection> {
    let tid = parse_id(record, "tid")?;
    let weight = parse_weight(record, "weight").map_err(|reason| RowRejection {
        row: record.row,
        id: Some(tid),
        reason,
    })?;

    Ok(TurkeyRow {
        row: record.row,
        tid,
        weight,
    })
}

/// 解析整数标识（兼容 Excel 数值单元格的 "7.0" 形式）
fn parse_id(record: &RawRecord, column: &str) -> Result<i64, RowRejection> {
    let reject = |reason: String| RowRejection {
        row: record.row,
        id: None,
        reason,
    };
    let raw = record
        .get(column)
        .ok_or_else(|| reject(format!("{} 为空", column)))?;

    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    // i64::MAX as f64 会舍入到 2^63,上界必须取开区间
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => Ok(v as i64),
        _ => Err(reject(format!("{} 不是整数: {}", column, raw))),
    }
}

fn parse_weight(record: &RawRecord, column: &str) -> Result<f64, String> {
    let raw = record
        .get(column)
        .ok_or_else(|| format!("{} 为空", column))?;
    raw.parse::<f64>()
        .map_err(|_| format!("{} 不是数字: {}", column, raw))
}
