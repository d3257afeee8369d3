// ==========================================
// 火鸡订单分配系统 - 操作日志领域模型
// ==========================================
// 红线: 所有成功的写操作必须记录
// 用途: 审计追踪（仅内存，不落盘）
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,              // 日志ID (uuid v4)
    pub action_type: ActionType,        // 操作类型
    pub action_ts: NaiveDateTime,       // 操作时间戳
    pub actor: String,                  // 操作人
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)
    pub detail: Option<String>,         // 详细描述
}

impl ActionLog {
    pub fn new(action_type: ActionType, actor: &str, payload_json: Option<JsonValue>) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            action_ts: chrono::Local::now().naive_local(),
            actor: actor.to_string(),
            payload_json,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AddOrder,        // 新增订单
    AddTurkey,       // 新增火鸡
    Match,           // 人工匹配
    UnmatchByOrder,  // 按订单解除匹配
    UnmatchByTurkey, // 按火鸡解除匹配
    RemoveOrder,     // 删除订单
    RemoveTurkey,    // 删除火鸡
    AutoMatch,       // 自动分配
    Import,          // 批量导入
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionType::AddOrder => "ADD_ORDER",
            ActionType::AddTurkey => "ADD_TURKEY",
            ActionType::Match => "MATCH",
            ActionType::UnmatchByOrder => "UNMATCH_BY_ORDER",
            ActionType::UnmatchByTurkey => "UNMATCH_BY_TURKEY",
            ActionType::RemoveOrder => "REMOVE_ORDER",
            ActionType::RemoveTurkey => "REMOVE_TURKEY",
            ActionType::AutoMatch => "AUTO_MATCH",
            ActionType::Import => "IMPORT",
        };
        f.write_str(s)
    }
}
