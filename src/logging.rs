// ==========================================
// 火鸡订单分配系统 - 日志初始化
// ==========================================
// 输出: stderr（stdout 留给命令行的分配结果）
// 级别: RUST_LOG 环境变量,缺省 info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 测试默认只放开本 crate 的 debug 日志
const TEST_FILTER: &str = "turkey_allocator=debug";

/// 初始化日志系统（进程内只调用一次）
///
/// # 示例
/// ```no_run
/// // RUST_LOG=turkey_allocator::engine=debug turkey-allocator --orders o.csv --turkeys t.csv
/// turkey_allocator::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// 测试用日志: 写入测试捕获输出,可重复调用
///
/// RUST_LOG 存在时以其为准
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(TEST_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
