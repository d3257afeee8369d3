// ==========================================
// 火鸡订单分配系统 - 分配配置
// ==========================================
// 职责: 分配策略参数的加载与校验
// 存储: JSON 文件（可选）,缺省字段取默认值
// ==========================================

use crate::engine::strategy::AllocationStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "TURKEY_ALLOCATOR_CONFIG";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值无效 (field={field}): {message}")]
    Invalid { field: String, message: String },
}

// ==========================================
// AllocatorConfig - 分配配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// 自动分配策略
    pub strategy: AllocationStrategy,

    /// 目标重量为 0 的订单不参与自动分配
    pub exclude_zero_target: bool,

    /// 分档策略: 目标重量不超过该值的订单归入第一档
    pub bucket_start_weight: f64,

    /// 分档策略: 档宽
    pub bucket_size: f64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            strategy: AllocationStrategy::NearestWeight,
            exclude_zero_target: true,
            bucket_start_weight: 8.0,
            bucket_size: 2.0,
        }
    }
}

impl AllocatorConfig {
    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: AllocatorConfig = serde_json::from_str(&raw)?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            strategy = %config.strategy,
            "已加载分配配置"
        );
        Ok(config)
    }

    /// 解析配置来源
    ///
    /// 1) 环境变量 TURKEY_ALLOCATOR_CONFIG 指定的文件（必须存在）
    /// 2) 用户配置目录下 turkey-allocator/config.json（存在时）
    /// 3) 默认值
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load(Path::new(trimmed));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("未找到配置文件，使用默认分配配置");
                Ok(Self::default())
            }
        }
    }

    /// 校验参数范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bucket_size.is_finite() || self.bucket_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "bucket_size".to_string(),
                message: format!("档宽必须为正数, 实际 {}", self.bucket_size),
            });
        }
        if !self.bucket_start_weight.is_finite() || self.bucket_start_weight < 0.0 {
            return Err(ConfigError::Invalid {
                field: "bucket_start_weight".to_string(),
                message: format!("起始档位必须为非负数, 实际 {}", self.bucket_start_weight),
            });
        }
        Ok(())
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("turkey-allocator").join("config.json"))
}
