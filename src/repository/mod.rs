// ==========================================
// 火鸡订单分配系统 - 库存存储层
// ==========================================
// 红线: 存储层独占订单/火鸡集合,外部只能通过声明的操作访问
// ==========================================
// 职责: 实体增删查 + 原子匹配/解除匹配原语
// ==========================================

pub mod error;
pub mod inventory_store;

// 重导出核心类型
pub use error::{InventoryError, InventoryResult};
pub use inventory_store::InventoryStore;
