// ==========================================
// 火鸡订单分配系统 - 订单领域模型
// ==========================================
// 红线: assigned_tid / assigned_weight 只能由匹配/解除匹配原语修改
// ==========================================

use crate::domain::types::{HamPortion, OrderId, TurkeyId};
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 订单
// ==========================================
// 用途: 客户对某一目标重量火鸡的需求（可附带火腿）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub oid: OrderId, // 订单号（调用方分配）

    // ===== 需求信息 =====
    pub target_weight: f64, // 目标重量 (非负)
    pub name: String,       // 客户姓名
    pub ham: HamPortion,    // 火腿份量
    pub notes: String,      // 备注

    // ===== 匹配信息 =====
    pub assigned_tid: Option<TurkeyId>, // 已匹配火鸡 (None 表示未匹配)
    pub assigned_weight: Option<f64>,   // 匹配时火鸡重量快照
}

impl Order {
    /// 创建未匹配的订单
    pub fn new(
        oid: OrderId,
        target_weight: f64,
        name: impl Into<String>,
        ham: HamPortion,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            oid,
            target_weight,
            name: name.into(),
            ham,
            notes: notes.into(),
            assigned_tid: None,
            assigned_weight: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_tid.is_some()
    }
}
