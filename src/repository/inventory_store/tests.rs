use super::InventoryStore;
use crate::domain::types::{EntityKind, HamPortion};
use crate::repository::error::InventoryError;

// ==========================================
// 测试辅助函数
// ==========================================

fn store_with(orders: &[(i64, f64)], turkeys: &[(i64, f64)]) -> InventoryStore {
    let mut store = InventoryStore::new();
    for (oid, target) in orders {
        store
            .add_order(*oid, *target, &format!("客户{}", oid), HamPortion::None, "")
            .unwrap();
    }
    for (tid, weight) in turkeys {
        store.add_turkey(*tid, *weight).unwrap();
    }
    store
}

// ==========================================
// 新增
// ==========================================

#[test]
fn test_add_order_duplicate_rejected() {
    let mut store = store_with(&[(1, 12.0)], &[]);
    let err = store
        .add_order(1, 15.0, "重复", HamPortion::Whole, "")
        .unwrap_err();
    assert_eq!(
        err,
        InventoryError::DuplicateKey {
            entity: EntityKind::Order,
            id: 1
        }
    );
    // 原记录保持不变
    assert_eq!(store.get_order(1).unwrap().target_weight, 12.0);
    assert_eq!(store.order_count(), 1);
}

#[test]
fn test_add_turkey_duplicate_rejected() {
    let mut store = store_with(&[], &[(5, 14.0)]);
    let err = store.add_turkey(5, 20.0).unwrap_err();
    assert!(matches!(err, InventoryError::DuplicateKey { entity: EntityKind::Turkey, id: 5 }));
    assert_eq!(store.get_turkey(5).unwrap().weight, 14.0);
}

#[test]
fn test_new_records_are_unassigned() {
    let store = store_with(&[(1, 12.0)], &[(5, 14.0)]);
    let order = store.get_order(1).unwrap();
    assert_eq!(order.assigned_tid, None);
    assert_eq!(order.assigned_weight, None);
    assert!(!store.get_turkey(5).unwrap().assigned);
}

// ==========================================
// 匹配
// ==========================================

#[test]
fn test_match_sets_both_sides() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    store.match_pair(1, 5).unwrap();

    let order = store.get_order(1).unwrap();
    assert_eq!(order.assigned_tid, Some(5));
    assert_eq!(order.assigned_weight, Some(13.5));
    assert!(store.get_turkey(5).unwrap().assigned);
    store.check_invariants().unwrap();
}

#[test]
fn test_match_missing_ids() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    assert_eq!(
        store.match_pair(2, 5).unwrap_err(),
        InventoryError::order_not_found(2)
    );
    assert_eq!(
        store.match_pair(1, 6).unwrap_err(),
        InventoryError::turkey_not_found(6)
    );
    assert!(!store.get_turkey(5).unwrap().assigned);
    assert!(!store.get_order(1).unwrap().is_assigned());
}

#[test]
fn test_match_twice_rejected() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    store.match_pair(1, 5).unwrap();
    let err = store.match_pair(1, 5).unwrap_err();
    assert!(matches!(err, InventoryError::AlreadyAssigned { .. }));
    store.check_invariants().unwrap();
}

#[test]
fn test_match_order_already_assigned_leaves_other_turkey_free() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5), (6, 11.0)]);
    store.match_pair(1, 5).unwrap();

    let err = store.match_pair(1, 6).unwrap_err();
    assert_eq!(
        err,
        InventoryError::AlreadyAssigned {
            entity: EntityKind::Order,
            id: 1
        }
    );
    assert!(!store.get_turkey(6).unwrap().assigned);
    assert_eq!(store.get_order(1).unwrap().assigned_tid, Some(5));
}

#[test]
fn test_match_turkey_already_assigned() {
    let mut store = store_with(&[(1, 12.0), (2, 14.0)], &[(5, 13.5)]);
    store.match_pair(1, 5).unwrap();

    let err = store.match_pair(2, 5).unwrap_err();
    assert_eq!(
        err,
        InventoryError::AlreadyAssigned {
            entity: EntityKind::Turkey,
            id: 5
        }
    );
    assert!(!store.get_order(2).unwrap().is_assigned());
}

// ==========================================
// 解除匹配
// ==========================================

#[test]
fn test_match_then_unmatch_restores_records() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    let order_before = store.get_order(1).unwrap().clone();
    let turkey_before = store.get_turkey(5).unwrap().clone();

    store.match_pair(1, 5).unwrap();
    assert_eq!(store.unmatch_by_order(1).unwrap(), 5);

    assert_eq!(store.get_order(1).unwrap(), &order_before);
    assert_eq!(store.get_turkey(5).unwrap(), &turkey_before);
}

#[test]
fn test_unmatch_by_order_errors() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    assert_eq!(
        store.unmatch_by_order(9).unwrap_err(),
        InventoryError::order_not_found(9)
    );
    assert_eq!(
        store.unmatch_by_order(1).unwrap_err(),
        InventoryError::NotAssigned {
            entity: EntityKind::Order,
            id: 1
        }
    );
}

#[test]
fn test_unmatch_by_turkey() {
    let mut store = store_with(&[(1, 12.0), (2, 10.0)], &[(5, 13.5), (6, 9.0)]);
    store.match_pair(1, 5).unwrap();
    store.match_pair(2, 6).unwrap();

    assert_eq!(store.unmatch_by_turkey(6).unwrap(), 2);
    assert!(!store.get_turkey(6).unwrap().assigned);
    assert!(!store.get_order(2).unwrap().is_assigned());
    // 其他匹配不受影响
    assert_eq!(store.get_order(1).unwrap().assigned_tid, Some(5));
    store.check_invariants().unwrap();
}

#[test]
fn test_unmatch_by_turkey_errors() {
    let mut store = store_with(&[], &[(5, 13.5)]);
    assert_eq!(
        store.unmatch_by_turkey(7).unwrap_err(),
        InventoryError::turkey_not_found(7)
    );
    assert_eq!(
        store.unmatch_by_turkey(5).unwrap_err(),
        InventoryError::NotAssigned {
            entity: EntityKind::Turkey,
            id: 5
        }
    );
}

#[test]
fn test_unmatch_by_turkey_without_back_reference() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    store.turkey_mut_for_test(5).unwrap().assigned = true;

    let err = store.unmatch_by_turkey(5).unwrap_err();
    assert!(matches!(err, InventoryError::InvariantViolation(_)));
    // 失败时不修改任何状态
    assert!(store.get_turkey(5).unwrap().assigned);
    assert!(store.check_invariants().is_err());
}

#[test]
fn test_unmatch_by_order_with_unflagged_turkey() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    store.match_pair(1, 5).unwrap();
    store.turkey_mut_for_test(5).unwrap().assigned = false;

    let err = store.unmatch_by_order(1).unwrap_err();
    assert!(matches!(err, InventoryError::InvariantViolation(_)));
    assert_eq!(store.get_order(1).unwrap().assigned_tid, Some(5));
}

// ==========================================
// 删除级联
// ==========================================

#[test]
fn test_remove_assigned_order_frees_turkey() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    store.match_pair(1, 5).unwrap();

    let (removed, freed_tid) = store.remove_order(1).unwrap();
    assert_eq!(removed.oid, 1);
    assert_eq!(freed_tid, Some(5));
    assert!(!removed.is_assigned());
    assert!(store.get_order(1).is_none());
    assert!(!store.get_turkey(5).unwrap().assigned);
    store.check_invariants().unwrap();
}

#[test]
fn test_remove_assigned_turkey_clears_order() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);
    store.match_pair(1, 5).unwrap();

    let (removed, cleared_oid) = store.remove_turkey(5).unwrap();
    assert_eq!(removed.tid, 5);
    assert_eq!(cleared_oid, Some(1));
    let order = store.get_order(1).unwrap();
    assert_eq!(order.assigned_tid, None);
    assert_eq!(order.assigned_weight, None);
    assert_eq!(store.turkey_count(), 0);
    store.check_invariants().unwrap();
}

#[test]
fn test_remove_missing_records() {
    let mut store = InventoryStore::new();
    assert_eq!(
        store.remove_order(1).unwrap_err(),
        InventoryError::order_not_found(1)
    );
    assert_eq!(
        store.remove_turkey(1).unwrap_err(),
        InventoryError::turkey_not_found(1)
    );
}

#[test]
fn test_remove_unassigned_records_report_no_cascade() {
    let mut store = store_with(&[(1, 12.0)], &[(5, 13.5)]);

    let (_, freed_tid) = store.remove_order(1).unwrap();
    let (_, cleared_oid) = store.remove_turkey(5).unwrap();

    assert_eq!(freed_tid, None);
    assert_eq!(cleared_oid, None);
    assert_eq!(store.order_count(), 0);
    assert_eq!(store.turkey_count(), 0);
}

#[test]
fn test_remove_turkey_aborts_on_broken_back_reference() {
    let mut store = store_with(&[], &[(5, 13.5)]);
    store.turkey_mut_for_test(5).unwrap().assigned = true;

    assert!(store.remove_turkey(5).is_err());
    assert!(store.get_turkey(5).is_some());
}

// ==========================================
// 查询
// ==========================================

#[test]
fn test_list_and_unassigned_snapshots() {
    let mut store = store_with(&[(3, 12.0), (1, 0.0), (2, 15.0)], &[(7, 13.0), (5, 16.0)]);
    store.match_pair(2, 5).unwrap();

    let oids: Vec<i64> = store.list_orders().iter().map(|o| o.oid).collect();
    assert_eq!(oids, vec![1, 2, 3]);
    let tids: Vec<i64> = store.list_turkeys().iter().map(|t| t.tid).collect();
    assert_eq!(tids, vec![5, 7]);

    let free_orders: Vec<i64> = store.unassigned_orders().iter().map(|o| o.oid).collect();
    assert_eq!(free_orders, vec![1, 3]);
    let free_turkeys: Vec<i64> = store.unassigned_turkeys().iter().map(|t| t.tid).collect();
    assert_eq!(free_turkeys, vec![7]);
}

#[test]
fn test_invariants_hold_over_operation_sequence() {
    let mut store = InventoryStore::new();
    let steps: Vec<Box<dyn Fn(&mut InventoryStore)>> = vec![
        Box::new(|s| s.add_order(1, 12.0, "A", HamPortion::Half, "").unwrap()),
        Box::new(|s| s.add_order(2, 16.0, "B", HamPortion::None, "").unwrap()),
        Box::new(|s| s.add_turkey(10, 12.5).unwrap()),
        Box::new(|s| s.add_turkey(11, 15.0).unwrap()),
        Box::new(|s| s.match_pair(1, 10).unwrap()),
        Box::new(|s| assert!(s.match_pair(2, 10).is_err())),
        Box::new(|s| s.match_pair(2, 11).unwrap()),
        Box::new(|s| assert_eq!(s.unmatch_by_turkey(10).unwrap(), 1)),
        Box::new(|s| s.match_pair(1, 10).unwrap()),
        Box::new(|s| {
            s.remove_turkey(11).unwrap();
        }),
        Box::new(|s| {
            s.remove_order(1).unwrap();
        }),
        Box::new(|s| s.add_turkey(11, 17.0).unwrap()),
        Box::new(|s| s.match_pair(2, 11).unwrap()),
    ];

    for (i, step) in steps.iter().enumerate() {
        step(&mut store);
        if let Err(e) = store.check_invariants() {
            panic!("第 {} 步后不变量被破坏: {}", i, e);
        }
    }

    assert_eq!(store.get_order(2).unwrap().assigned_weight, Some(17.0));
    assert!(!store.get_turkey(10).unwrap().assigned);
}
