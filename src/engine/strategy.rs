// ==========================================
// 火鸡订单分配系统 - 分配策略定义
// ==========================================
// 用途：
// - NearestWeight（默认）：按目标重量升序处理订单,每单取重量最接近的火鸡；
// - Bucket：按重量档位处理订单,每单取不低于目标的最轻火鸡,否则取最重火鸡。

use serde::{Deserialize, Serialize};

/// 自动分配策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    #[default]
    NearestWeight,
    Bucket,
}

impl AllocationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStrategy::NearestWeight => "nearest_weight",
            AllocationStrategy::Bucket => "bucket",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            AllocationStrategy::NearestWeight => "最近重量",
            AllocationStrategy::Bucket => "重量分档",
        }
    }
}

impl std::fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AllocationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest_weight" | "nearest-weight" | "nearest" => {
                Ok(AllocationStrategy::NearestWeight)
            }
            "bucket" | "buckets" => Ok(AllocationStrategy::Bucket),
            other => Err(format!("未知分配策略: {}", other)),
        }
    }
}
