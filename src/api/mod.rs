// ==========================================
// 火鸡订单分配系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供界面层/命令行调用
// ==========================================

pub mod error;
pub mod inventory_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use inventory_api::InventoryApi;
