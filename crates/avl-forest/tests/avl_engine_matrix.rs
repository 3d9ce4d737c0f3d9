//! Drives the engine's free functions directly over a hand-managed arena,
//! the way an embedding data structure (rather than `AvlMap`) would.

use avl_forest::avl::{assert_avl, insert, remove};
use avl_forest::{AvlNode, InvariantError};

fn cmp(a: &i32, b: &i32) -> i32 {
    a - b
}

fn build(keys: &[i32]) -> (Vec<AvlNode<i32, i32>>, Option<u32>) {
    let mut arena = Vec::new();
    let mut root = None;
    for &k in keys {
        arena.push(AvlNode::new(k, k));
        let n = (arena.len() - 1) as u32;
        root = Some(insert(&mut arena, root, n, &cmp));
    }
    (arena, root)
}

#[test]
fn engine_insert_and_remove_by_index() {
    let (mut arena, mut root) = build(&[10, 20, 30, 40, 50]);
    assert_avl(&arena, root, &cmp).unwrap();

    // Remove by node index, not by key.
    let thirty = (0..arena.len() as u32)
        .find(|&i| arena[i as usize].k == 30)
        .unwrap();
    root = remove(&mut arena, root.unwrap(), thirty);
    assert_avl(&arena, root, &cmp).unwrap();

    // The detached node is fully unlinked.
    let n = &arena[thirty as usize];
    assert_eq!((n.p, n.l, n.r, n.bf), (None, None, None, 0));
}

#[test]
fn engine_empties_down_to_none() {
    let (mut arena, root) = build(&[2, 1, 3]);
    let mut root = root;
    for k in [1, 3, 2] {
        let i = (0..arena.len() as u32)
            .find(|&i| arena[i as usize].k == k)
            .unwrap();
        root = remove(&mut arena, root.unwrap(), i);
        assert_avl(&arena, root, &cmp).unwrap();
    }
    assert_eq!(root, None);
}

#[test]
fn audit_rejects_stale_balance_factor() {
    let (mut arena, root) = build(&[2, 1, 3]);
    let root_idx = root.unwrap();
    arena[root_idx as usize].bf = 1;

    assert_eq!(
        assert_avl(&arena, root, &cmp),
        Err(InvariantError::BalanceFactorMismatch {
            node: root_idx,
            cached: 1,
            actual: 0,
        })
    );
}

#[test]
fn audit_rejects_broken_parent_link() {
    let (mut arena, root) = build(&[2, 1, 3]);
    let root_idx = root.unwrap();
    let left = arena[root_idx as usize].l.unwrap();
    arena[left as usize].p = None;

    assert_eq!(
        assert_avl(&arena, root, &cmp),
        Err(InvariantError::BrokenParentLink {
            parent: root_idx,
            child: left,
        })
    );
}

#[test]
fn audit_rejects_rooted_parent() {
    let (mut arena, root) = build(&[2, 1, 3]);
    let root_idx = root.unwrap();
    let left = arena[root_idx as usize].l.unwrap();
    arena[root_idx as usize].p = Some(left);

    assert_eq!(
        assert_avl(&arena, root, &cmp),
        Err(InvariantError::RootHasParent)
    );
}

#[test]
fn audit_rejects_key_disorder() {
    let (mut arena, root) = build(&[2, 1, 3]);
    let root_idx = root.unwrap();
    // Falsify the BST order without touching any link or factor.
    arena[root_idx as usize].k = 100;

    let err = assert_avl(&arena, root, &cmp).unwrap_err();
    assert!(matches!(err, InvariantError::OrderViolation { .. }));
}
