// ==========================================
// 火鸡订单分配系统 - 引擎层
// ==========================================
// 职责: 自动分配算法、列表排序与报表查询
// 红线: 引擎只通过存储层原语写入,不直接修改集合
// ==========================================

pub mod auto_allocator;
pub mod listing;
pub mod strategy;

// 重导出核心引擎
pub use auto_allocator::{AllocationMatch, AllocationOutcome, AllocationResult, AutoAllocator};
pub use listing::{
    ham_orders_without_turkey, orders_by_name, unassigned_turkeys_by_weight, OrderSortMode,
    TurkeySortMode,
};
pub use strategy::AllocationStrategy;
