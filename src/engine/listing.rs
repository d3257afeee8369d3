// ==========================================
// 火鸡订单分配系统 - 列表排序与报表查询
// ==========================================
// 职责: 对存储快照做过滤/排序,供界面列表与报表使用
// 红线: 只读快照,不修改存储; 渲染由外部负责
// ==========================================

use crate::domain::order::Order;
use crate::domain::turkey::Turkey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// 订单列表排序模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSortMode {
    #[default]
    OidAsc,
    OidDesc,
    TargetWeightAsc,
    TargetWeightDesc,
    UnassignedWeightAsc,  // 仅未匹配订单,目标重量升序
    UnassignedWeightDesc, // 仅未匹配订单,目标重量降序
}

impl OrderSortMode {
    const ALL: [OrderSortMode; 6] = [
        OrderSortMode::OidAsc,
        OrderSortMode::OidDesc,
        OrderSortMode::TargetWeightAsc,
        OrderSortMode::TargetWeightDesc,
        OrderSortMode::UnassignedWeightAsc,
        OrderSortMode::UnassignedWeightDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSortMode::OidAsc => "oid_asc",
            OrderSortMode::OidDesc => "oid_desc",
            OrderSortMode::TargetWeightAsc => "target_weight_asc",
            OrderSortMode::TargetWeightDesc => "target_weight_desc",
            OrderSortMode::UnassignedWeightAsc => "unassigned_weight_asc",
            OrderSortMode::UnassignedWeightDesc => "unassigned_weight_desc",
        }
    }

    /// 循环切换到下一个模式
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// 按当前模式过滤并排序订单快照
    pub fn apply(&self, mut orders: Vec<Order>) -> Vec<Order> {
        match self {
            OrderSortMode::OidAsc => orders.sort_by_key(|o| o.oid),
            OrderSortMode::OidDesc => orders.sort_by(|a, b| b.oid.cmp(&a.oid)),
            OrderSortMode::TargetWeightAsc => orders.sort_by(by_target_weight),
            OrderSortMode::TargetWeightDesc => orders.sort_by(|a, b| by_target_weight(b, a)),
            OrderSortMode::UnassignedWeightAsc => {
                orders.retain(|o| !o.is_assigned());
                orders.sort_by(by_target_weight);
            }
            OrderSortMode::UnassignedWeightDesc => {
                orders.retain(|o| !o.is_assigned());
                orders.sort_by(|a, b| by_target_weight(b, a));
            }
        }
        orders
    }
}

impl std::str::FromStr for OrderSortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| format!("未知订单排序模式: {}", s))
    }
}

// ==========================================
// 火鸡列表排序模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurkeySortMode {
    #[default]
    TidAsc,
    TidDesc,
    WeightAsc,
    WeightDesc,
    UnassignedWeightAsc,  // 仅未分配火鸡,重量升序
    UnassignedWeightDesc, // 仅未分配火鸡,重量降序
}

impl TurkeySortMode {
    const ALL: [TurkeySortMode; 6] = [
        TurkeySortMode::TidAsc,
        TurkeySortMode::TidDesc,
        TurkeySortMode::WeightAsc,
        TurkeySortMode::WeightDesc,
        TurkeySortMode::UnassignedWeightAsc,
        TurkeySortMode::UnassignedWeightDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TurkeySortMode::TidAsc => "tid_asc",
            TurkeySortMode::TidDesc => "tid_desc",
            TurkeySortMode::WeightAsc => "weight_asc",
            TurkeySortMode::WeightDesc => "weight_desc",
            TurkeySortMode::UnassignedWeightAsc => "unassigned_weight_asc",
            TurkeySortMode::UnassignedWeightDesc => "unassigned_weight_desc",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn apply(&self, mut turkeys: Vec<Turkey>) -> Vec<Turkey> {
        match self {
            TurkeySortMode::TidAsc => turkeys.sort_by_key(|t| t.tid),
            TurkeySortMode::TidDesc => turkeys.sort_by(|a, b| b.tid.cmp(&a.tid)),
            TurkeySortMode::WeightAsc => turkeys.sort_by(by_weight),
            TurkeySortMode::WeightDesc => turkeys.sort_by(|a, b| by_weight(b, a)),
            TurkeySortMode::UnassignedWeightAsc => {
                turkeys.retain(|t| !t.assigned);
                turkeys.sort_by(by_weight);
            }
            TurkeySortMode::UnassignedWeightDesc => {
                turkeys.retain(|t| !t.assigned);
                turkeys.sort_by(|a, b| by_weight(b, a));
            }
        }
        turkeys
    }
}

impl std::str::FromStr for TurkeySortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| format!("未知火鸡排序模式: {}", s))
    }
}

fn by_target_weight(a: &Order, b: &Order) -> Ordering {
    a.target_weight
        .total_cmp(&b.target_weight)
        .then(a.oid.cmp(&b.oid))
}

fn by_weight(a: &Turkey, b: &Turkey) -> Ordering {
    a.weight.total_cmp(&b.weight).then(a.tid.cmp(&b.tid))
}

// ==========================================
// 报表查询
// ==========================================

/// 取货单: 目标重量非 0 的订单,按姓名排序
pub fn orders_by_name(orders: Vec<Order>) -> Vec<Order> {
    let mut rows: Vec<Order> = orders
        .into_iter()
        .filter(|o| o.target_weight != 0.0)
        .collect();
    rows.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.oid.cmp(&b.oid))
    });
    rows
}

/// 剩余库存: 未分配火鸡,按重量升序
pub fn unassigned_turkeys_by_weight(turkeys: Vec<Turkey>) -> Vec<Turkey> {
    TurkeySortMode::UnassignedWeightAsc.apply(turkeys)
}

/// 只订火腿: 选了火腿且未匹配火鸡的订单,按 oid 升序
pub fn ham_orders_without_turkey(orders: Vec<Order>) -> Vec<Order> {
    let mut rows: Vec<Order> = orders
        .into_iter()
        .filter(|o| o.ham.is_selected() && !o.is_assigned())
        .collect();
    rows.sort_by_key(|o| o.oid);
    rows
}
