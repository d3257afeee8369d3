// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use turkey_allocator::domain::types::{HamPortion, OrderId, TurkeyId};
use turkey_allocator::repository::InventoryStore;

// ==========================================
// 订单构建器
// ==========================================

pub struct OrderBuilder {
    oid: OrderId,
    target_weight: f64,
    name: String,
    ham: HamPortion,
    notes: String,
}

impl OrderBuilder {
    pub fn new(oid: OrderId) -> Self {
        Self {
            oid,
            target_weight: 12.0,
            name: format!("客户{}", oid),
            ham: HamPortion::None,
            notes: String::new(),
        }
    }

    pub fn target(mut self, target_weight: f64) -> Self {
        self.target_weight = target_weight;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn ham(mut self, ham: HamPortion) -> Self {
        self.ham = ham;
        self
    }

    pub fn insert(self, store: &mut InventoryStore) {
        store
            .add_order(self.oid, self.target_weight, &self.name, self.ham, &self.notes)
            .expect("新增订单失败");
    }
}

// ==========================================
// 库存场景构建器
// ==========================================

/// 按 (oid, target) 与 (tid, weight) 列表构建存储
pub fn store_with(orders: &[(OrderId, f64)], turkeys: &[(TurkeyId, f64)]) -> InventoryStore {
    let mut store = InventoryStore::new();
    for &(oid, target) in orders {
        OrderBuilder::new(oid).target(target).insert(&mut store);
    }
    for &(tid, weight) in turkeys {
        store.add_turkey(tid, weight).expect("新增火鸡失败");
    }
    store
}

/// 所有匹配对 (oid, tid),按 oid 升序
pub fn pairs(store: &InventoryStore) -> Vec<(OrderId, TurkeyId)> {
    store
        .list_orders()
        .iter()
        .filter_map(|o| o.assigned_tid.map(|tid| (o.oid, tid)))
        .collect()
}
