// ==========================================
// 火鸡订单分配系统 - 库存存储错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 任何错误返回时存储状态保持调用前不变
// ==========================================

use crate::domain::types::EntityKind;
use thiserror::Error;

/// 库存存储错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InventoryError {
    // ===== 标识错误 =====
    #[error("主键重复: {entity} id={id} 已存在")]
    DuplicateKey { entity: EntityKind, id: i64 },

    #[error("记录未找到: {entity} id={id} 不存在")]
    NotFound { entity: EntityKind, id: i64 },

    // ===== 匹配状态错误 =====
    #[error("已匹配: {entity} id={id} 已有匹配")]
    AlreadyAssigned { entity: EntityKind, id: i64 },

    #[error("未匹配: {entity} id={id} 当前没有匹配")]
    NotAssigned { entity: EntityKind, id: i64 },

    // ===== 防御性检查 =====
    #[error("不变量被破坏: {0}")]
    InvariantViolation(String),
}

impl InventoryError {
    pub fn order_not_found(oid: i64) -> Self {
        InventoryError::NotFound {
            entity: EntityKind::Order,
            id: oid,
        }
    }

    pub fn turkey_not_found(tid: i64) -> Self {
        InventoryError::NotFound {
            entity: EntityKind::Turkey,
            id: tid,
        }
    }
}

/// Result 类型别名
pub type InventoryResult<T> = Result<T, InventoryError>;
