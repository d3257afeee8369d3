// ==========================================
// 火鸡订单分配系统 - 输入校验器
// ==========================================
// 职责: 人工录入/导入数据的取值范围校验
// 规则: 目标重量为有限非负数; 火鸡重量为有限正数
// ==========================================

use crate::api::error::{ApiError, ApiResult};

/// 校验订单目标重量
pub fn validate_target_weight(target_weight: f64) -> ApiResult<()> {
    if !target_weight.is_finite() || target_weight < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "目标重量必须为非负数, 实际 {}",
            target_weight
        )));
    }
    Ok(())
}

/// 校验火鸡重量
pub fn validate_turkey_weight(weight: f64) -> ApiResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "火鸡重量必须为正数, 实际 {}",
            weight
        )));
    }
    Ok(())
}

/// 规范化客户姓名/备注（去除首尾空白）
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_string()
}
