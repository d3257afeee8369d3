// ==========================================
// 火鸡订单分配系统 - 核心库
// ==========================================
// 职责: 订单与火鸡的一对一匹配（人工 + 自动分配）
// 技术栈: Rust（内存存储,单线程引擎,API 层串行化）
// 系统定位: 录入辅助工具 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 存储层 - 订单/火鸡 内存存储
pub mod repository;

// 引擎层 - 自动分配与列表排序
pub mod engine;

// 导入层 - CSV/Excel
pub mod importer;

// 配置层 - 分配参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EntityKind, HamPortion, OrderId, TurkeyId};

// 领域实体
pub use domain::{ActionLog, ActionType, Order, Turkey};

// 存储
pub use repository::{InventoryError, InventoryResult, InventoryStore};

// 引擎
pub use engine::{
    AllocationMatch, AllocationOutcome, AllocationResult, AllocationStrategy, AutoAllocator,
    OrderSortMode, TurkeySortMode,
};

// 配置
pub use config::{AllocatorConfig, ConfigError};

// 导入
pub use importer::{ImportError, ImportSummary, InventoryImporter, RowRejection};

// API
pub use api::{ApiError, ApiResult, InventoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "火鸡订单分配系统";
