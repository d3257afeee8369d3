// ==========================================
// 火鸡订单分配系统 - 库存 API
// ==========================================
// 职责: 界面层调用的唯一入口（录入/匹配/解除/删除/自动分配/查询/导入）
// 红线: 每次调用在同一把锁内完成,引擎本身无并发控制
// 红线: 不持有界面刷新回调,调用方根据返回值自行重新查询
// ==========================================

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{normalize_text, validate_target_weight, validate_turkey_weight};
use crate::config::AllocatorConfig;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::order::Order;
use crate::domain::turkey::Turkey;
use crate::domain::types::{EntityKind, HamPortion, OrderId, TurkeyId};
use crate::engine::auto_allocator::{AllocationResult, AutoAllocator};
use crate::engine::listing::{self, OrderSortMode, TurkeySortMode};
use crate::importer::{ImportSummary, InventoryImporter};
use crate::repository::InventoryStore;

/// 默认操作人
const DEFAULT_ACTOR: &str = "system";

// ==========================================
// InventoryApi - 库存 API
// ==========================================

/// 库存API
///
/// 职责：
/// 1. 输入校验
/// 2. 串行化访问库存存储
/// 3. 存储层错误转换为 ApiError
/// 4. ActionLog 记录
pub struct InventoryApi {
    store: Mutex<InventoryStore>,
    allocator: AutoAllocator,
    importer: InventoryImporter,
    action_logs: Mutex<Vec<ActionLog>>,
    actor: String,
}

impl InventoryApi {
    /// 创建空库存的 API 实例
    pub fn new(config: AllocatorConfig) -> Self {
        Self {
            store: Mutex::new(InventoryStore::new()),
            allocator: AutoAllocator::new(config),
            importer: InventoryImporter::new(),
            action_logs: Mutex::new(Vec::new()),
            actor: DEFAULT_ACTOR.to_string(),
        }
    }

    /// 指定操作人（写入 ActionLog）
    pub fn with_actor(mut self, actor: &str) -> Self {
        self.actor = actor.to_string();
        self
    }

    pub fn config(&self) -> &AllocatorConfig {
        self.allocator.config()
    }

    fn lock_store(&self) -> ApiResult<MutexGuard<'_, InventoryStore>> {
        self.store
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    // 日志只追加,锁中毒后内容仍完整,直接取回继续使用
    fn logs(&self) -> MutexGuard<'_, Vec<ActionLog>> {
        self.action_logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, log: ActionLog) {
        self.logs().push(log);
    }

    // ==========================================
    // 录入
    // ==========================================

    /// 新增订单
    pub fn add_order(
        &self,
        oid: OrderId,
        target_weight: f64,
        name: &str,
        ham: HamPortion,
        notes: &str,
    ) -> ApiResult<()> {
        validate_target_weight(target_weight)?;
        let name = normalize_text(name);
        let notes = normalize_text(notes);

        self.lock_store()?.add_order(oid, target_weight, &name, ham, &notes)?;

        self.record(ActionLog::new(
            ActionType::AddOrder,
            &self.actor,
            Some(json!({
                "oid": oid,
                "target_weight": target_weight,
                "name": name,
                "ham": ham,
            })),
        ));
        Ok(())
    }

    /// 新增火鸡
    pub fn add_turkey(&self, tid: TurkeyId, weight: f64) -> ApiResult<()> {
        validate_turkey_weight(weight)?;

        self.lock_store()?.add_turkey(tid, weight)?;

        self.record(ActionLog::new(
            ActionType::AddTurkey,
            &self.actor,
            Some(json!({ "tid": tid, "weight": weight })),
        ));
        Ok(())
    }

    // ==========================================
    // 匹配 / 解除匹配
    // ==========================================

    /// 人工匹配
    pub fn match_pair(&self, oid: OrderId, tid: TurkeyId) -> ApiResult<()> {
        self.lock_store()?.match_pair(oid, tid)?;

        self.record(ActionLog::new(
            ActionType::Match,
            &self.actor,
            Some(json!({ "oid": oid, "tid": tid })),
        ));
        Ok(())
    }

    /// 按订单解除匹配,返回被释放的火鸡编号
    pub fn unmatch_by_order(&self, oid: OrderId) -> ApiResult<TurkeyId> {
        let tid = self.lock_store()?.unmatch_by_order(oid)?;

        self.record(ActionLog::new(
            ActionType::UnmatchByOrder,
            &self.actor,
            Some(json!({ "oid": oid, "tid": tid })),
        ));
        Ok(tid)
    }

    /// 按火鸡解除匹配,返回原订单号
    pub fn unmatch_by_turkey(&self, tid: TurkeyId) -> ApiResult<OrderId> {
        let oid = self.lock_store()?.unmatch_by_turkey(tid)?;

        self.record(ActionLog::new(
            ActionType::UnmatchByTurkey,
            &self.actor,
            Some(json!({ "oid": oid, "tid": tid })),
        ));
        Ok(oid)
    }

    // ==========================================
    // 删除
    // ==========================================

    /// 删除订单（已匹配时先释放火鸡）
    pub fn remove_order(&self, oid: OrderId) -> ApiResult<Order> {
        let (removed, freed_tid) = self.lock_store()?.remove_order(oid)?;

        self.record(ActionLog::new(
            ActionType::RemoveOrder,
            &self.actor,
            Some(json!({ "oid": oid, "freed_tid": freed_tid })),
        ));
        Ok(removed)
    }

    /// 删除火鸡（已分配时先清除订单侧匹配）
    pub fn remove_turkey(&self, tid: TurkeyId) -> ApiResult<Turkey> {
        let (removed, cleared_oid) = self.lock_store()?.remove_turkey(tid)?;

        self.record(ActionLog::new(
            ActionType::RemoveTurkey,
            &self.actor,
            Some(json!({ "tid": tid, "cleared_oid": cleared_oid })),
        ));
        Ok(removed)
    }

    // ==========================================
    // 自动分配
    // ==========================================

    /// 自动分配全部未匹配订单
    ///
    /// 空池不视为错误,通过 AllocationResult.outcome 返回提示
    pub fn auto_match(&self) -> ApiResult<AllocationResult> {
        let result = {
            let mut store = self.lock_store()?;
            let result = self.allocator.auto_match(&mut store)?;
            if cfg!(debug_assertions) {
                store.check_invariants()?;
            }
            result
        };

        let detail = format!(
            "strategy={}, matched={}, unmatched={}, excluded={}",
            result.strategy,
            result.matched_count(),
            result.unmatched_orders.len(),
            result.excluded_orders.len()
        );
        let log = ActionLog::new(ActionType::AutoMatch, &self.actor, payload(&result));
        self.record(log.with_detail(detail));
        Ok(result)
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.lock_store()?.list_orders())
    }

    pub fn list_turkeys(&self) -> ApiResult<Vec<Turkey>> {
        Ok(self.lock_store()?.list_turkeys())
    }

    /// 按界面排序模式查询订单
    pub fn list_orders_sorted(&self, mode: OrderSortMode) -> ApiResult<Vec<Order>> {
        Ok(mode.apply(self.list_orders()?))
    }

    /// 按界面排序模式查询火鸡
    pub fn list_turkeys_sorted(&self, mode: TurkeySortMode) -> ApiResult<Vec<Turkey>> {
        Ok(mode.apply(self.list_turkeys()?))
    }

    pub fn get_order(&self, oid: OrderId) -> ApiResult<Order> {
        self.lock_store()?
            .get_order(oid)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{}(id={})不存在", EntityKind::Order, oid)))
    }

    pub fn get_turkey(&self, tid: TurkeyId) -> ApiResult<Turkey> {
        self.lock_store()?
            .get_turkey(tid)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{}(id={})不存在", EntityKind::Turkey, tid)))
    }

    /// 报表: 取货单（目标重量非 0,按姓名）
    pub fn pickup_report(&self) -> ApiResult<Vec<Order>> {
        Ok(listing::orders_by_name(self.list_orders()?))
    }

    /// 报表: 剩余火鸡（按重量）
    pub fn leftover_turkeys_report(&self) -> ApiResult<Vec<Turkey>> {
        Ok(listing::unassigned_turkeys_by_weight(self.list_turkeys()?))
    }

    /// 报表: 只订火腿的订单
    pub fn ham_only_report(&self) -> ApiResult<Vec<Order>> {
        Ok(listing::ham_orders_without_turkey(self.list_orders()?))
    }

    /// 校验存储一致性
    pub fn check_invariants(&self) -> ApiResult<()> {
        Ok(self.lock_store()?.check_invariants()?)
    }

    /// 操作日志快照
    pub fn action_logs(&self) -> Vec<ActionLog> {
        self.logs().clone()
    }

    // ==========================================
    // 批量导入
    // ==========================================

    /// 从文件导入订单（逐行校验,非法行记录后跳过）
    pub fn import_orders(&self, path: &Path) -> ApiResult<ImportSummary> {
        let (rows, rejected) = self.importer.read_orders(path)?;
        let mut summary = ImportSummary::new(EntityKind::Order);
        summary.rejected = rejected;

        {
            let mut store = self.lock_store()?;
            for row in rows {
                let outcome = validate_target_weight(row.target_weight).and_then(|_| {
                    store
                        .add_order(
                            row.oid,
                            row.target_weight,
                            &normalize_text(&row.name),
                            row.ham,
                            &normalize_text(&row.notes),
                        )
                        .map_err(ApiError::from)
                });
                match outcome {
                    Ok(()) => summary.imported += 1,
                    Err(e) => summary.reject(row.row, Some(row.oid), e.to_string()),
                }
            }
        }

        self.log_import(path, &summary);
        Ok(summary)
    }

    /// 从文件导入火鸡
    pub fn import_turkeys(&self, path: &Path) -> ApiResult<ImportSummary> {
        let (rows, rejected) = self.importer.read_turkeys(path)?;
        let mut summary = ImportSummary::new(EntityKind::Turkey);
        summary.rejected = rejected;

        {
            let mut store = self.lock_store()?;
            for row in rows {
                let outcome = validate_turkey_weight(row.weight).and_then(|_| {
                    store
                        .add_turkey(row.tid, row.weight)
                        .map_err(ApiError::from)
                });
                match outcome {
                    Ok(()) => summary.imported += 1,
                    Err(e) => summary.reject(row.row, Some(row.tid), e.to_string()),
                }
            }
        }

        self.log_import(path, &summary);
        Ok(summary)
    }

    fn log_import(&self, path: &Path, summary: &ImportSummary) {
        info!(
            path = %path.display(),
            entity = %summary.entity,
            imported = summary.imported,
            rejected = summary.rejected.len(),
            "导入完成"
        );
        self.record(
            ActionLog::new(ActionType::Import, &self.actor, payload(summary))
                .with_detail(path.display().to_string()),
        );
    }
}

/// 结构体转为日志参数; 失败时记录告警,日志条目照常写入
fn payload<T: Serialize>(value: &T) -> Option<JsonValue> {
    match serde_json::to_value(value) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("操作日志参数序列化失败: {}", e);
            None
        }
    }
}

impl Default for InventoryApi {
    fn default() -> Self {
        Self::new(AllocatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_with_pair() -> InventoryApi {
        let api = InventoryApi::default();
        api.add_order(1, 12.0, "  Alice ", HamPortion::None, "")
            .unwrap();
        api.add_turkey(10, 12.5).unwrap();
        api
    }

    #[test]
    fn test_add_order_trims_name_and_validates() {
        let api = api_with_pair();
        assert_eq!(api.get_order(1).unwrap().name, "Alice");

        let err = api
            .add_order(2, -1.0, "Bob", HamPortion::None, "")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(api.list_orders().unwrap().len(), 1);
    }

    #[test]
    fn test_add_turkey_rejects_non_positive_weight() {
        let api = InventoryApi::default();
        assert!(matches!(
            api.add_turkey(1, 0.0),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(api.list_turkeys().unwrap().is_empty());
    }

    #[test]
    fn test_store_errors_are_mapped() {
        let api = api_with_pair();
        assert!(matches!(
            api.add_turkey(10, 9.0),
            Err(ApiError::DuplicateKey(_))
        ));
        assert!(matches!(api.match_pair(1, 99), Err(ApiError::NotFound(_))));
        assert!(matches!(
            api.unmatch_by_order(1),
            Err(ApiError::NotAssigned(_))
        ));
    }

    #[test]
    fn test_action_log_records_successful_mutations_only() {
        let api = api_with_pair();
        api.match_pair(1, 10).unwrap();
        let _ = api.match_pair(1, 10);
        assert_eq!(api.unmatch_by_turkey(10).unwrap(), 1);

        let types: Vec<ActionType> = api.action_logs().iter().map(|l| l.action_type).collect();
        assert_eq!(
            types,
            vec![
                ActionType::AddOrder,
                ActionType::AddTurkey,
                ActionType::Match,
                ActionType::UnmatchByTurkey,
            ]
        );
    }

    #[test]
    fn test_action_log_survives_poisoned_lock() {
        let api = api_with_pair();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = api.action_logs.lock().unwrap();
            panic!("持锁期间崩溃");
        }));
        assert!(api.action_logs.is_poisoned());

        api.add_turkey(11, 9.0).unwrap();

        let logs = api.action_logs();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[2].action_type, ActionType::AddTurkey);
    }

    #[test]
    fn test_payload_serialization_failure_yields_none() {
        use std::collections::BTreeMap;

        // 非字符串键无法转为 JSON 对象
        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "x");
        assert!(payload(&bad).is_none());

        let summary = ImportSummary::new(EntityKind::Turkey);
        assert_eq!(payload(&summary).unwrap()["imported"], 0);
    }

    #[test]
    fn test_remove_turkey_clears_order_side() {
        let api = api_with_pair();
        api.match_pair(1, 10).unwrap();

        let removed = api.remove_turkey(10).unwrap();
        assert_eq!(removed.tid, 10);

        let order = api.get_order(1).unwrap();
        assert!(!order.is_assigned());
        assert_eq!(order.assigned_weight, None);
        api.check_invariants().unwrap();

        let log = api.action_logs().pop().unwrap();
        assert_eq!(log.action_type, ActionType::RemoveTurkey);
        assert_eq!(log.payload_json.unwrap()["cleared_oid"], 1);
    }

    #[test]
    fn test_auto_match_records_action() {
        let api = api_with_pair();
        let result = api.auto_match().unwrap();
        assert_eq!(result.matched_count(), 1);
        assert!(api.get_turkey(10).unwrap().assigned);

        let log = api.action_logs().pop().unwrap();
        assert_eq!(log.action_type, ActionType::AutoMatch);
        assert!(log.detail.unwrap().contains("matched=1"));
    }
}
