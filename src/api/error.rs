// ==========================================
// 火鸡订单分配系统 - API层错误类型
// ==========================================
// 职责: 将存储层错误转换为用户可读的错误消息
// 红线: 错误返回时存储状态保持不变,由界面层负责展示
// ==========================================

use crate::importer::ImportError;
use crate::repository::InventoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 存储层错误（一一对应）
    // ==========================================
    #[error("主键重复: {0}")]
    DuplicateKey(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("已有匹配: {0}")]
    AlreadyAssigned(String),

    #[error("没有匹配: {0}")]
    NotAssigned(String),

    #[error("数据不一致: {0}")]
    InvariantViolation(String),

    // ==========================================
    // 输入与外部数据错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 InventoryError 转换
// ==========================================
impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::DuplicateKey { entity, id } => {
                ApiError::DuplicateKey(format!("{}(id={})已存在", entity, id))
            }
            InventoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            InventoryError::AlreadyAssigned { entity, id } => {
                ApiError::AlreadyAssigned(format!("{}(id={})已有匹配", entity, id))
            }
            InventoryError::NotAssigned { entity, id } => {
                ApiError::NotAssigned(format!("{}(id={})当前没有匹配", entity, id))
            }
            InventoryError::InvariantViolation(msg) => ApiError::InvariantViolation(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
