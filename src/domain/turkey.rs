// ==========================================
// 火鸡订单分配系统 - 火鸡领域模型
// ==========================================

use crate::domain::types::TurkeyId;
use serde::{Deserialize, Serialize};

// ==========================================
// Turkey - 火鸡（实物库存单元）
// ==========================================
// 红线: weight 入库后不可变; assigned 只能由匹配/解除匹配原语修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turkey {
    pub tid: TurkeyId, // 火鸡编号（调用方分配）
    pub weight: f64,   // 重量 (正数)
    pub assigned: bool, // 是否已分配给订单
}

impl Turkey {
    /// 创建未分配的火鸡
    pub fn new(tid: TurkeyId, weight: f64) -> Self {
        Self {
            tid,
            weight,
            assigned: false,
        }
    }
}
