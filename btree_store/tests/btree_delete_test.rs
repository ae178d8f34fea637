mod common;

use btree_store::BTree;

#[test]
fn tombstones_and_revival_t_3() {
    common::init_log();
    let (_guard, path) = common::scratch_path();

    let mut tree = BTree::open(&path, 3).unwrap();
    for k in (10..=120).step_by(10) {
        tree.put(k, k * 10).unwrap();
    }
    tree.check_invariants().unwrap();

    tree.delete(15).unwrap();
    tree.delete(3).unwrap();
    tree.delete(30).unwrap();
    tree.delete(99).unwrap();
    tree.check_invariants().unwrap();

    assert_eq!(tree.get(15).unwrap(), None);
    assert_eq!(tree.get(20).unwrap(), Some(200));

    tree.put(15, 155).unwrap();
    assert_eq!(tree.get(15).unwrap(), Some(155));
}

#[test]
fn delete_is_idempotent_and_never_errors() {
    common::init_log();
    let (_guard, path) = common::scratch_path();

    let mut tree = BTree::open(&path, 3).unwrap();
    tree.put(1, 10).unwrap();

    tree.delete(1).unwrap();
    tree.delete(1).unwrap();
    assert_eq!(tree.get(1).unwrap(), None);

    // Deleting an absent key is a no-op, not an error.
    tree.delete(42).unwrap();
    assert_eq!(tree.get(42).unwrap(), None);
}

#[test]
fn delete_never_causes_structural_underflow() {
    common::init_log();
    let (_guard, path) = common::scratch_path();

    let mut tree = BTree::open(&path, 3).unwrap();
    let keys: Vec<i32> = (0..200).collect();
    for &k in &keys {
        tree.put(k, k).unwrap();
    }
    for &k in keys.iter().step_by(2) {
        tree.delete(k).unwrap();
        // The delete invariant check alone proves node fill factors
        // (t-1 <= n <= 2t-1) are untouched by tombstoning.
        tree.check_invariants().unwrap();
    }
    for &k in &keys {
        if k % 2 == 0 {
            assert_eq!(tree.get(k).unwrap(), None);
        } else {
            assert_eq!(tree.get(k).unwrap(), Some(k));
        }
    }
}
