//! Equal-leaf-depth predicate over arbitrary arena binary trees.
//!
//! Independent of the balance engine: works on any [`Node`] arena,
//! balanced or not. The recursion threads its verdict through the return
//! value, so sibling subtrees never share mutable state.

use crate::bst::{get_l, get_r};
use crate::types::Node;

/// Verdict of a leaf-depth scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafDepth {
    /// No leaf observed yet (empty subtree).
    Pending,
    /// Every leaf observed so far sits at this depth.
    Uniform(u32),
    /// Two different leaf depths observed; absorbing.
    Mixed,
}

impl LeafDepth {
    fn merge(self, other: LeafDepth) -> LeafDepth {
        match (self, other) {
            (LeafDepth::Pending, d) | (d, LeafDepth::Pending) => d,
            (LeafDepth::Uniform(a), LeafDepth::Uniform(b)) if a == b => LeafDepth::Uniform(a),
            _ => LeafDepth::Mixed,
        }
    }
}

/// Scans the subtree under `root` and reports its leaf-depth verdict.
pub fn leaf_depths<N: Node>(arena: &[N], root: Option<u32>) -> LeafDepth {
    walk(arena, root, 0)
}

/// `true` when every root-to-leaf path has the same length. Empty trees
/// and single nodes qualify.
pub fn equal_leaf_depths<N: Node>(arena: &[N], root: Option<u32>) -> bool {
    leaf_depths(arena, root) != LeafDepth::Mixed
}

fn walk<N: Node>(arena: &[N], node: Option<u32>, depth: u32) -> LeafDepth {
    let Some(i) = node else {
        return LeafDepth::Pending;
    };
    let l = get_l(arena, i);
    let r = get_r(arena, i);
    if l.is_none() && r.is_none() {
        return LeafDepth::Uniform(depth);
    }
    walk(arena, l, depth + 1).merge(walk(arena, r, depth + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;

    fn link(arena: &mut [AvlNode<i32, ()>], parent: u32, left: Option<u32>, right: Option<u32>) {
        arena[parent as usize].l = left;
        arena[parent as usize].r = right;
        for child in [left, right].into_iter().flatten() {
            arena[child as usize].p = Some(parent);
        }
    }

    fn nodes(n: usize) -> Vec<AvlNode<i32, ()>> {
        (0..n as i32).map(|k| AvlNode::new(k, ())).collect()
    }

    #[test]
    fn empty_tree_is_uniform() {
        let arena: Vec<AvlNode<i32, ()>> = Vec::new();
        assert!(equal_leaf_depths(&arena, None));
        assert_eq!(leaf_depths(&arena, None), LeafDepth::Pending);
    }

    #[test]
    fn single_node_is_uniform_at_zero() {
        let arena = nodes(1);
        assert_eq!(leaf_depths(&arena, Some(0)), LeafDepth::Uniform(0));
    }

    #[test]
    fn full_two_level_tree_is_uniform() {
        let mut arena = nodes(3);
        link(&mut arena, 0, Some(1), Some(2));
        assert_eq!(leaf_depths(&arena, Some(0)), LeafDepth::Uniform(1));
    }

    #[test]
    fn lopsided_tree_is_mixed() {
        // Leaf at depth 1 on the right, leaf at depth 2 down the left.
        let mut arena = nodes(4);
        link(&mut arena, 0, Some(1), Some(2));
        link(&mut arena, 1, Some(3), None);
        assert_eq!(leaf_depths(&arena, Some(0)), LeafDepth::Mixed);
        assert!(!equal_leaf_depths(&arena, Some(0)));
    }

    #[test]
    fn single_chain_is_uniform() {
        // One path only: its sole leaf defines the depth.
        let mut arena = nodes(3);
        link(&mut arena, 0, Some(1), None);
        link(&mut arena, 1, Some(2), None);
        assert_eq!(leaf_depths(&arena, Some(0)), LeafDepth::Uniform(2));
    }
}
