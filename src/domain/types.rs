// ==========================================
// 火鸡订单分配系统 - 领域类型定义
// ==========================================
// 职责: 实体标识、火腿份量等基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 订单标识（调用方分配，唯一且稳定）
pub type OrderId = i64;

/// 火鸡标识（调用方分配，唯一）
pub type TurkeyId = i64;

// ==========================================
// 实体类别 (Entity Kind)
// ==========================================
// 用途: 错误信息与日志中区分订单/火鸡
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Order,  // 订单
    Turkey, // 火鸡
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Order => write!(f, "订单"),
            EntityKind::Turkey => write!(f, "火鸡"),
        }
    }
}

// ==========================================
// 火腿份量 (Ham Portion)
// ==========================================
// 序列化格式与界面选项一致: None / Whole / 1/2 / 1/4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HamPortion {
    #[default]
    None,
    Whole,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "1/4")]
    Quarter,
}

impl HamPortion {
    pub fn as_str(&self) -> &'static str {
        match self {
            HamPortion::None => "None",
            HamPortion::Whole => "Whole",
            HamPortion::Half => "1/2",
            HamPortion::Quarter => "1/4",
        }
    }

    /// 是否附带火腿
    pub fn is_selected(&self) -> bool {
        *self != HamPortion::None
    }
}

impl fmt::Display for HamPortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HamPortion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(HamPortion::None),
            "whole" => Ok(HamPortion::Whole),
            "1/2" | "half" => Ok(HamPortion::Half),
            "1/4" | "quarter" => Ok(HamPortion::Quarter),
            other => Err(format!("未知火腿份量: {}", other)),
        }
    }
}
