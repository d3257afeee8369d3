// ==========================================
// 火鸡订单分配系统 - 命令行入口
// ==========================================
// 用法: turkey-allocator --orders <file> --turkeys <file> [--config <file>] [--json]
// 流程: 初始化日志 -> 加载配置 -> 导入订单/火鸡 -> 自动分配 -> 输出结果
// ==========================================

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use turkey_allocator::{
    logging, AllocationOutcome, AllocationResult, AllocatorConfig, ImportSummary, InventoryApi,
};

/// 将订单与火鸡文件导入后执行一次自动分配
#[derive(Parser)]
#[command(name = "turkey-allocator")]
#[command(version, about = "火鸡订单分配系统 - 订单与火鸡一对一自动匹配")]
struct Args {
    /// 订单文件 (CSV/XLSX, 列: oid, target_weight, name, ham, notes)
    #[arg(long)]
    orders: PathBuf,

    /// 火鸡文件 (CSV/XLSX, 列: tid, weight)
    #[arg(long)]
    turkeys: PathBuf,

    /// 分配配置文件 (JSON); 未指定时按环境变量/用户配置目录解析
    #[arg(long)]
    config: Option<PathBuf>,

    /// 以 JSON 输出分配结果
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init();

    tracing::info!("{} v{}", turkey_allocator::APP_NAME, turkey_allocator::VERSION);

    let config = match &args.config {
        Some(path) => AllocatorConfig::load(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => AllocatorConfig::resolve().context("解析分配配置失败")?,
    };

    let api = InventoryApi::new(config);

    let order_summary = api
        .import_orders(&args.orders)
        .with_context(|| format!("导入订单失败: {}", args.orders.display()))?;
    let turkey_summary = api
        .import_turkeys(&args.turkeys)
        .with_context(|| format!("导入火鸡失败: {}", args.turkeys.display()))?;

    let result = api.auto_match().context("自动分配失败")?;

    if args.json {
        let report = serde_json::json!({
            "imports": [order_summary, turkey_summary],
            "allocation": result,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_import(&order_summary);
        print_import(&turkey_summary);
        print_allocation(&result);
    }

    Ok(())
}

fn print_import(summary: &ImportSummary) {
    println!(
        "{}: 导入 {} 条, 拒绝 {} 条",
        summary.entity,
        summary.imported,
        summary.rejected.len()
    );
    for rejection in &summary.rejected {
        let id = rejection
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  第 {} 行 (id={}): {}", rejection.row, id, rejection.reason);
    }
}

fn print_allocation(result: &AllocationResult) {
    println!();
    println!("分配策略: {}", result.strategy.title_cn());

    match result.outcome {
        AllocationOutcome::NoUnassignedOrders => {
            println!("没有需要分配的订单");
            return;
        }
        AllocationOutcome::NoUnassignedTurkeys => {
            println!("没有可分配的火鸡");
            return;
        }
        AllocationOutcome::Completed => {}
    }

    println!(
        "{:>8} {:>8} {:>10} {:>10} {:>8}",
        "订单", "火鸡", "目标重量", "火鸡重量", "偏差"
    );
    for m in &result.matches {
        println!(
            "{:>8} {:>8} {:>10.2} {:>10.2} {:>8.2}{}",
            m.oid,
            m.tid,
            m.target_weight,
            m.turkey_weight,
            m.deviation,
            if m.fallback { " *" } else { "" }
        );
    }

    println!(
        "共匹配 {} 单, 总偏差 {:.2}",
        result.matched_count(),
        result.total_deviation()
    );
    if !result.unmatched_orders.is_empty() {
        println!("火鸡不足, 未分配订单: {:?}", result.unmatched_orders);
    }
    if !result.excluded_orders.is_empty() {
        println!("目标重量为 0 (不分配火鸡): {:?}", result.excluded_orders);
    }
}
