// ==========================================
// 火鸡订单分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含存储逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod order;
pub mod turkey;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use order::Order;
pub use turkey::Turkey;
pub use types::{EntityKind, HamPortion, OrderId, TurkeyId};
