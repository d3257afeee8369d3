// ==========================================
// 火鸡订单分配系统 - 库存存储
// ==========================================
// 职责: 独占订单/火鸡两个集合,维护双向匹配一致性
// 红线: 订单侧指针与火鸡侧标志只能通过 match/unmatch 原语同时修改
// 红线: 失败的操作不得留下部分修改
// ==========================================

use crate::domain::order::Order;
use crate::domain::turkey::Turkey;
use crate::domain::types::{EntityKind, HamPortion, OrderId, TurkeyId};
use crate::repository::error::{InventoryError, InventoryResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

// ==========================================
// InventoryStore - 库存存储
// ==========================================
#[derive(Debug, Default)]
pub struct InventoryStore {
    orders: BTreeMap<OrderId, Order>,
    turkeys: BTreeMap<TurkeyId, Turkey>,
}

impl InventoryStore {
    /// 创建空的库存存储（不加载任何持久化数据）
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 新增
    // ==========================================

    /// 新增订单
    ///
    /// # 错误
    /// - `DuplicateKey`: oid 已存在
    pub fn add_order(
        &mut self,
        oid: OrderId,
        target_weight: f64,
        name: &str,
        ham: HamPortion,
        notes: &str,
    ) -> InventoryResult<()> {
        if self.orders.contains_key(&oid) {
            return Err(InventoryError::DuplicateKey {
                entity: EntityKind::Order,
                id: oid,
            });
        }

        self.orders
            .insert(oid, Order::new(oid, target_weight, name, ham, notes));
        debug!(oid, target_weight, "订单已新增");
        Ok(())
    }

    /// 新增火鸡
    ///
    /// # 错误
    /// - `DuplicateKey`: tid 已存在
    pub fn add_turkey(&mut self, tid: TurkeyId, weight: f64) -> InventoryResult<()> {
        if self.turkeys.contains_key(&tid) {
            return Err(InventoryError::DuplicateKey {
                entity: EntityKind::Turkey,
                id: tid,
            });
        }

        self.turkeys.insert(tid, Turkey::new(tid, weight));
        debug!(tid, weight, "火鸡已新增");
        Ok(())
    }

    // ==========================================
    // 匹配原语
    // ==========================================

    /// 匹配订单与火鸡
    ///
    /// 先完成全部校验,再一次性写入三个字段:
    /// order.assigned_tid / order.assigned_weight / turkey.assigned
    ///
    /// # 错误
    /// - `NotFound`: 订单或火鸡不存在
    /// - `AlreadyAssigned`: 火鸡已分配,或订单已有匹配
    pub fn match_pair(&mut self, oid: OrderId, tid: TurkeyId) -> InventoryResult<()> {
        let order = self
            .orders
            .get_mut(&oid)
            .ok_or_else(|| InventoryError::order_not_found(oid))?;
        let turkey = self
            .turkeys
            .get_mut(&tid)
            .ok_or_else(|| InventoryError::turkey_not_found(tid))?;

        if turkey.assigned {
            return Err(InventoryError::AlreadyAssigned {
                entity: EntityKind::Turkey,
                id: tid,
            });
        }
        if order.assigned_tid.is_some() {
            return Err(InventoryError::AlreadyAssigned {
                entity: EntityKind::Order,
                id: oid,
            });
        }

        order.assigned_tid = Some(tid);
        order.assigned_weight = Some(turkey.weight);
        turkey.assigned = true;

        info!(oid, tid, weight = turkey.weight, "订单与火鸡匹配成功");
        Ok(())
    }

    /// 按订单解除匹配
    ///
    /// # 返回
    /// 被释放的火鸡编号
    ///
    /// # 错误
    /// - `NotFound`: 订单不存在
    /// - `NotAssigned`: 订单没有匹配
    /// - `InvariantViolation`: 订单指向的火鸡不存在或未标记为已分配
    pub fn unmatch_by_order(&mut self, oid: OrderId) -> InventoryResult<TurkeyId> {
        let order = self
            .orders
            .get_mut(&oid)
            .ok_or_else(|| InventoryError::order_not_found(oid))?;
        let tid = order.assigned_tid.ok_or(InventoryError::NotAssigned {
            entity: EntityKind::Order,
            id: oid,
        })?;

        let turkey = match self.turkeys.get_mut(&tid) {
            Some(turkey) if turkey.assigned => turkey,
            Some(_) => {
                return Err(InventoryError::InvariantViolation(format!(
                    "订单 {} 指向火鸡 {}, 但该火鸡未标记为已分配",
                    oid, tid
                )))
            }
            None => {
                return Err(InventoryError::InvariantViolation(format!(
                    "订单 {} 指向不存在的火鸡 {}",
                    oid, tid
                )))
            }
        };

        order.assigned_tid = None;
        order.assigned_weight = None;
        turkey.assigned = false;

        info!(oid, tid, "已按订单解除匹配");
        Ok(tid)
    }

    /// 按火鸡解除匹配
    ///
    /// # 返回
    /// 原先持有该火鸡的订单号
    ///
    /// # 错误
    /// - `NotFound`: 火鸡不存在
    /// - `NotAssigned`: 火鸡未分配
    /// - `InvariantViolation`: 没有任何订单指向该火鸡
    pub fn unmatch_by_turkey(&mut self, tid: TurkeyId) -> InventoryResult<OrderId> {
        let turkey = self
            .turkeys
            .get_mut(&tid)
            .ok_or_else(|| InventoryError::turkey_not_found(tid))?;
        if !turkey.assigned {
            return Err(InventoryError::NotAssigned {
                entity: EntityKind::Turkey,
                id: tid,
            });
        }

        let order = self
            .orders
            .values_mut()
            .find(|o| o.assigned_tid == Some(tid))
            .ok_or_else(|| {
                InventoryError::InvariantViolation(format!(
                    "火鸡 {} 标记为已分配, 但没有订单引用它",
                    tid
                ))
            })?;

        let oid = order.oid;
        order.assigned_tid = None;
        order.assigned_weight = None;
        turkey.assigned = false;

        info!(oid, tid, "已按火鸡解除匹配");
        Ok(oid)
    }

    // ==========================================
    // 删除（级联解除匹配）
    // ==========================================

    /// 删除订单（如已匹配,先释放火鸡）
    ///
    /// # 返回
    /// (被删除的订单, 被释放的火鸡编号)
    pub fn remove_order(&mut self, oid: OrderId) -> InventoryResult<(Order, Option<TurkeyId>)> {
        let assigned = self
            .orders
            .get(&oid)
            .ok_or_else(|| InventoryError::order_not_found(oid))?
            .is_assigned();

        let freed_tid = if assigned {
            Some(self.unmatch_by_order(oid)?)
        } else {
            None
        };

        let removed = self
            .orders
            .remove(&oid)
            .ok_or_else(|| InventoryError::order_not_found(oid))?;
        info!(oid, ?freed_tid, "订单已删除");
        Ok((removed, freed_tid))
    }

    /// 删除火鸡（如已分配,先清除订单侧匹配）
    ///
    /// # 返回
    /// (被删除的火鸡, 被清除匹配的订单号)
    pub fn remove_turkey(&mut self, tid: TurkeyId) -> InventoryResult<(Turkey, Option<OrderId>)> {
        let assigned = self
            .turkeys
            .get(&tid)
            .ok_or_else(|| InventoryError::turkey_not_found(tid))?
            .assigned;

        let cleared_oid = if assigned {
            Some(self.unmatch_by_turkey(tid)?)
        } else {
            None
        };

        let removed = self
            .turkeys
            .remove(&tid)
            .ok_or_else(|| InventoryError::turkey_not_found(tid))?;
        info!(tid, ?cleared_oid, "火鸡已删除");
        Ok((removed, cleared_oid))
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 全部订单快照（按 oid 升序）
    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.values().cloned().collect()
    }

    /// 全部火鸡快照（按 tid 升序）
    pub fn list_turkeys(&self) -> Vec<Turkey> {
        self.turkeys.values().cloned().collect()
    }

    pub fn get_order(&self, oid: OrderId) -> Option<&Order> {
        self.orders.get(&oid)
    }

    pub fn get_turkey(&self, tid: TurkeyId) -> Option<&Turkey> {
        self.turkeys.get(&tid)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn turkey_count(&self) -> usize {
        self.turkeys.len()
    }

    /// 未匹配订单快照
    pub fn unassigned_orders(&self) -> Vec<Order> {
        self.orders
            .values()
            .filter(|o| !o.is_assigned())
            .cloned()
            .collect()
    }

    /// 未分配火鸡快照
    pub fn unassigned_turkeys(&self) -> Vec<Turkey> {
        self.turkeys
            .values()
            .filter(|t| !t.assigned)
            .cloned()
            .collect()
    }

    // ==========================================
    // 一致性自检
    // ==========================================

    /// 校验双向匹配一致性
    ///
    /// 1) 火鸡 assigned=true 当且仅当恰好一个订单引用它
    /// 2) 订单的 assigned_tid 必须指向存在且已分配的火鸡
    /// 3) 订单的 assigned_weight 与所指火鸡重量一致,未匹配时为空
    pub fn check_invariants(&self) -> InventoryResult<()> {
        let mut references: HashMap<TurkeyId, Vec<OrderId>> = HashMap::new();

        for order in self.orders.values() {
            match (order.assigned_tid, order.assigned_weight) {
                (None, None) => {}
                (None, Some(_)) => {
                    return Err(InventoryError::InvariantViolation(format!(
                        "订单 {} 未匹配但存在 assigned_weight",
                        order.oid
                    )))
                }
                (Some(tid), weight) => {
                    let turkey = self.turkeys.get(&tid).ok_or_else(|| {
                        InventoryError::InvariantViolation(format!(
                            "订单 {} 指向不存在的火鸡 {}",
                            order.oid, tid
                        ))
                    })?;
                    if !turkey.assigned {
                        return Err(InventoryError::InvariantViolation(format!(
                            "订单 {} 指向的火鸡 {} 未标记为已分配",
                            order.oid, tid
                        )));
                    }
                    if weight != Some(turkey.weight) {
                        return Err(InventoryError::InvariantViolation(format!(
                            "订单 {} 的 assigned_weight={:?} 与火鸡 {} 重量 {} 不一致",
                            order.oid, weight, tid, turkey.weight
                        )));
                    }
                    references.entry(tid).or_default().push(order.oid);
                }
            }
        }

        for turkey in self.turkeys.values() {
            let count = references.get(&turkey.tid).map_or(0, Vec::len);
            match (turkey.assigned, count) {
                (true, 1) | (false, 0) => {}
                (assigned, count) => {
                    return Err(InventoryError::InvariantViolation(format!(
                        "火鸡 {} assigned={} 但被 {} 个订单引用",
                        turkey.tid, assigned, count
                    )))
                }
            }
        }

        Ok(())
    }

    /// 仅供测试构造不一致状态
    #[cfg(test)]
    pub(crate) fn turkey_mut_for_test(&mut self, tid: TurkeyId) -> Option<&mut Turkey> {
        self.turkeys.get_mut(&tid)
    }
}

#[cfg(test)]
mod tests;
