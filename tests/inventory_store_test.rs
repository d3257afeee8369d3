// ==========================================
// InventoryStore 集成测试
// ==========================================
// 测试目标: 脚本化操作序列下,每一步后双向匹配一致性成立
// ==========================================

mod helpers;

use helpers::test_data_builder::{pairs, store_with, OrderBuilder};
use turkey_allocator::config::AllocatorConfig;
use turkey_allocator::domain::HamPortion;
use turkey_allocator::engine::AutoAllocator;
use turkey_allocator::repository::{InventoryError, InventoryStore};

enum Step {
    Match(i64, i64),
    UnmatchOrder(i64),
    UnmatchTurkey(i64),
    RemoveOrder(i64),
    RemoveTurkey(i64),
    AddTurkey(i64, f64),
    Auto,
}

fn apply(store: &mut InventoryStore, step: &Step) -> Result<(), InventoryError> {
    match *step {
        Step::Match(oid, tid) => store.match_pair(oid, tid),
        Step::UnmatchOrder(oid) => store.unmatch_by_order(oid).map(|_| ()),
        Step::UnmatchTurkey(tid) => store.unmatch_by_turkey(tid).map(|_| ()),
        Step::RemoveOrder(oid) => store.remove_order(oid).map(|_| ()),
        Step::RemoveTurkey(tid) => store.remove_turkey(tid).map(|_| ()),
        Step::AddTurkey(tid, weight) => store.add_turkey(tid, weight),
        Step::Auto => AutoAllocator::new(AllocatorConfig::default())
            .auto_match(store)
            .map(|_| ()),
    }
}

#[test]
fn test_invariants_hold_across_mixed_sequence() {
    turkey_allocator::logging::init_test();

    let mut store = store_with(
        &[(1, 10.0), (2, 12.0), (3, 0.0), (4, 16.0)],
        &[(1, 9.5), (2, 12.5), (3, 17.0)],
    );
    OrderBuilder::new(5)
        .target(11.0)
        .name("Ham Lover")
        .ham(HamPortion::Whole)
        .insert(&mut store);

    let steps = [
        Step::Match(2, 3),
        Step::Match(2, 1),     // 失败: 订单已匹配
        Step::Match(4, 3),     // 失败: 火鸡已分配
        Step::UnmatchTurkey(3),
        Step::Auto,
        Step::RemoveTurkey(2),
        Step::UnmatchOrder(3), // 失败: 0 目标订单未匹配
        Step::AddTurkey(4, 11.0),
        Step::Auto,
        Step::RemoveOrder(1),
        Step::Match(99, 1),    // 失败: 订单不存在
        Step::Auto,
    ];

    for step in &steps {
        let _ = apply(&mut store, step);
        store.check_invariants().unwrap();
    }

    assert!(!store.get_order(3).unwrap().is_assigned());
    for (oid, tid) in pairs(&store) {
        let order = store.get_order(oid).unwrap();
        let turkey = store.get_turkey(tid).unwrap();
        assert!(turkey.assigned);
        assert_eq!(order.assigned_weight, Some(turkey.weight));
    }
}

#[test]
fn test_match_then_unmatch_restores_records() {
    let mut store = store_with(&[(1, 10.0)], &[(1, 11.0)]);
    let order_before = store.get_order(1).unwrap().clone();
    let turkey_before = store.get_turkey(1).unwrap().clone();

    store.match_pair(1, 1).unwrap();
    assert_eq!(store.unmatch_by_order(1).unwrap(), 1);

    assert_eq!(store.get_order(1).unwrap(), &order_before);
    assert_eq!(store.get_turkey(1).unwrap(), &turkey_before);
}
