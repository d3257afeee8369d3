// ==========================================
// 火鸡订单分配系统 - 配置层
// ==========================================
// 职责: 分配参数管理（宿主层读取,引擎本身不读环境变量）
// ==========================================

pub mod allocator_config;

// 重导出核心配置
pub use allocator_config::{default_config_path, AllocatorConfig, ConfigError, CONFIG_PATH_ENV};
