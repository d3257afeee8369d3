// ==========================================
// 火鸡订单分配系统 - 自动分配引擎
// ==========================================
// 职责: 将全部未匹配订单一次性分配给未分配火鸡
// 输入: 库存存储当前状态 + 分配配置
// 输出: 通过 match 原语写回的匹配 + 分配结果摘要
// ==========================================
// 红线: 只通过 InventoryStore::match_pair 修改存储
// 红线: 同一输入必须产生同一结果（排序与平局规则确定）
// ==========================================

use crate::config::AllocatorConfig;
use crate::domain::order::Order;
use crate::domain::turkey::Turkey;
use crate::domain::types::{OrderId, TurkeyId};
use crate::engine::strategy::AllocationStrategy;
use crate::repository::{InventoryResult, InventoryStore};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

// ==========================================
// 分配结果
// ==========================================

/// 本次分配的整体结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationOutcome {
    /// 已处理完候选订单（或火鸡池耗尽）
    Completed,
    /// 没有可参与分配的订单（提示信息,非错误）
    NoUnassignedOrders,
    /// 没有未分配的火鸡（提示信息,非错误）
    NoUnassignedTurkeys,
}

/// 单条自动匹配记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationMatch {
    pub oid: OrderId,
    pub tid: TurkeyId,
    pub target_weight: f64,
    pub turkey_weight: f64,
    pub deviation: f64, // |turkey_weight - target_weight|
    pub fallback: bool, // 分档策略下无足重火鸡,退而取最重火鸡
}

/// 自动分配结果摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub strategy: AllocationStrategy,
    pub outcome: AllocationOutcome,
    pub matches: Vec<AllocationMatch>,
    /// 参与分配但因火鸡池耗尽而未匹配的订单
    pub unmatched_orders: Vec<OrderId>,
    /// 因目标重量为 0 被排除的订单
    pub excluded_orders: Vec<OrderId>,
}

impl AllocationResult {
    fn empty(strategy: AllocationStrategy, outcome: AllocationOutcome) -> Self {
        Self {
            strategy,
            outcome,
            matches: Vec::new(),
            unmatched_orders: Vec::new(),
            excluded_orders: Vec::new(),
        }
    }

    pub fn matched_count(&self) -> usize {
        self.matches.len()
    }

    /// 是否未做任何匹配
    pub fn is_noop(&self) -> bool {
        self.matches.is_empty()
    }

    /// 总重量偏差
    pub fn total_deviation(&self) -> f64 {
        self.matches.iter().map(|m| m.deviation).sum()
    }
}

// ==========================================
// 候选快照（分配器本地工作副本）
// ==========================================
#[derive(Debug, Clone, Copy)]
struct OrderCandidate {
    oid: OrderId,
    target_weight: f64,
}

#[derive(Debug, Clone, Copy)]
struct TurkeyCandidate {
    tid: TurkeyId,
    weight: f64,
}

impl From<&Order> for OrderCandidate {
    fn from(order: &Order) -> Self {
        Self {
            oid: order.oid,
            target_weight: order.target_weight,
        }
    }
}

impl From<&Turkey> for TurkeyCandidate {
    fn from(turkey: &Turkey) -> Self {
        Self {
            tid: turkey.tid,
            weight: turkey.weight,
        }
    }
}

// ==========================================
// AutoAllocator - 自动分配引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AutoAllocator {
    config: AllocatorConfig,
}

impl AutoAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 自动分配
    ///
    /// 流程:
    /// 1) 候选订单 = 未匹配且(可选)目标重量非 0; 候选火鸡 = 未分配
    /// 2) 按策略确定订单处理顺序（oid 升序作平局规则）
    /// 3) 逐单从火鸡池选取一只并立即 match,选中的火鸡移出本地池
    /// 4) 订单处理完或火鸡池耗尽即结束
    ///
    /// # 错误
    /// match 失败时立即返回该错误,之前已提交的匹配保留（不回滚）
    #[instrument(skip(self, store), fields(
        strategy = %self.config.strategy,
        orders = store.order_count(),
        turkeys = store.turkey_count()
    ))]
    pub fn auto_match(&self, store: &mut InventoryStore) -> InventoryResult<AllocationResult> {
        let strategy = self.config.strategy;
        info!("=== 自动分配开始 ===");

        // 1. 候选集合
        let mut excluded_orders = Vec::new();
        let mut orders: Vec<OrderCandidate> = Vec::new();
        for order in store.unassigned_orders() {
            if self.config.exclude_zero_target && order.target_weight == 0.0 {
                excluded_orders.push(order.oid);
            } else {
                orders.push(OrderCandidate::from(&order));
            }
        }
        let mut pool: Vec<TurkeyCandidate> = store
            .unassigned_turkeys()
            .iter()
            .map(TurkeyCandidate::from)
            .collect();

        if orders.is_empty() {
            info!(excluded = excluded_orders.len(), "没有可分配的订单，跳过自动分配");
            let mut result =
                AllocationResult::empty(strategy, AllocationOutcome::NoUnassignedOrders);
            result.excluded_orders = excluded_orders;
            return Ok(result);
        }
        if pool.is_empty() {
            info!(orders = orders.len(), "没有未分配的火鸡，跳过自动分配");
            let mut result =
                AllocationResult::empty(strategy, AllocationOutcome::NoUnassignedTurkeys);
            result.unmatched_orders = orders.iter().map(|o| o.oid).collect();
            result.excluded_orders = excluded_orders;
            return Ok(result);
        }

        // 2. 处理顺序
        self.sort_orders(&mut orders);

        // 3. 逐单选取
        let mut result = AllocationResult::empty(strategy, AllocationOutcome::Completed);
        result.excluded_orders = excluded_orders;

        for (idx, order) in orders.iter().enumerate() {
            if pool.is_empty() {
                info!(remaining = orders.len() - idx, "火鸡已分完，剩余订单保持未匹配");
                result
                    .unmatched_orders
                    .extend(orders[idx..].iter().map(|o| o.oid));
                break;
            }

            let (pick, fallback) = match strategy {
                AllocationStrategy::NearestWeight => {
                    (pick_nearest(&pool, order.target_weight), false)
                }
                AllocationStrategy::Bucket => pick_bucket(&pool, order.target_weight),
            };
            let Some(pick) = pick else {
                break;
            };
            let turkey = pool.swap_remove(pick);

            store.match_pair(order.oid, turkey.tid)?;

            let deviation = (turkey.weight - order.target_weight).abs();
            if fallback {
                warn!(
                    oid = order.oid,
                    tid = turkey.tid,
                    target_weight = order.target_weight,
                    weight = turkey.weight,
                    "无足重火鸡，改用剩余最重火鸡"
                );
            } else {
                info!(
                    oid = order.oid,
                    tid = turkey.tid,
                    target_weight = order.target_weight,
                    weight = turkey.weight,
                    deviation,
                    "自动匹配"
                );
            }

            result.matches.push(AllocationMatch {
                oid: order.oid,
                tid: turkey.tid,
                target_weight: order.target_weight,
                turkey_weight: turkey.weight,
                deviation,
                fallback,
            });
        }

        info!(
            matched = result.matched_count(),
            unmatched = result.unmatched_orders.len(),
            excluded = result.excluded_orders.len(),
            total_deviation = result.total_deviation(),
            "=== 自动分配结束 ==="
        );
        Ok(result)
    }

    // ==========================================
    // 排序与选取
    // ==========================================

    /// 订单处理顺序
    ///
    /// - NearestWeight: target_weight 升序, oid 升序
    /// - Bucket: 档位升序, oid 升序
    fn sort_orders(&self, orders: &mut [OrderCandidate]) {
        match self.config.strategy {
            AllocationStrategy::NearestWeight => orders.sort_by(|a, b| {
                a.target_weight
                    .total_cmp(&b.target_weight)
                    .then(a.oid.cmp(&b.oid))
            }),
            AllocationStrategy::Bucket => orders.sort_by(|a, b| {
                self.bucket_of(a.target_weight)
                    .total_cmp(&self.bucket_of(b.target_weight))
                    .then(a.oid.cmp(&b.oid))
            }),
        }
    }

    /// 订单所属重量档位
    ///
    /// target <= start 归入 start 档; 否则向上取整到 start + k*size
    fn bucket_of(&self, target_weight: f64) -> f64 {
        let start = self.config.bucket_start_weight;
        let size = self.config.bucket_size;
        if target_weight <= start {
            return start;
        }
        start + (((target_weight - start - 1.0) / size).floor() + 1.0) * size
    }
}

/// 重量差最小的火鸡（平局取 tid 较小者）
fn pick_nearest(pool: &[TurkeyCandidate], target_weight: f64) -> Option<usize> {
    pool.iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (a.weight - target_weight)
                .abs()
                .total_cmp(&(b.weight - target_weight).abs())
                .then(a.tid.cmp(&b.tid))
        })
        .map(|(idx, _)| idx)
}

/// 不低于目标重量的最轻火鸡; 没有则取最重火鸡（平局均取 tid 较小者）
///
/// # 返回
/// (池内下标, 是否为兜底选择)
fn pick_bucket(pool: &[TurkeyCandidate], target_weight: f64) -> (Option<usize>, bool) {
    let suitable = pool
        .iter()
        .enumerate()
        .filter(|(_, t)| t.weight >= target_weight)
        .min_by(|(_, a), (_, b)| a.weight.total_cmp(&b.weight).then(a.tid.cmp(&b.tid)))
        .map(|(idx, _)| idx);
    if suitable.is_some() {
        return (suitable, false);
    }

    let heaviest = pool
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| b.weight.total_cmp(&a.weight).then(a.tid.cmp(&b.tid)))
        .map(|(idx, _)| idx);
    (heaviest, true)
}
