//! The balance engine: rotations, fix walks and invariant checking.
//!
//! Every mutation is a plain structural change through the [`crate::bst`]
//! substrate followed by an upward walk that re-derives cached balance
//! factors and rotates at the first node whose factor leaves `-1..=1`.
//! Rotations update the two factors involved in closed form; subtree
//! heights are never recounted.

use std::fmt::Debug;

use thiserror::Error;

use crate::bst::{self, get_l, get_p, get_r, set_l, set_p, set_r};
use crate::types::{AvlNodeLike, KvNode, Node};

/// A structural invariant found broken by [`assert_avl`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("root node has a parent link")]
    RootHasParent,
    #[error("node {child} is a child of {parent} but does not point back to it")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("node {node} caches balance factor {cached}, subtree heights give {actual}")]
    BalanceFactorMismatch { node: u32, cached: i8, actual: i8 },
    #[error("node {node} has balance factor {bf}, outside -1..=1")]
    OutOfBalance { node: u32, bf: i8 },
    #[error("in-order key sequence decreases entering node {node}")]
    OrderViolation { node: u32 },
}

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Promotes `n`'s right child over `n`. Returns the promoted child, which
/// now roots the rotated neighborhood and has adopted `n`'s former parent.
fn rotate_left<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let c = get_r(arena, n).expect("rotate_left requires a right child");
    let p = get_p(arena, n);
    let cl = get_l(arena, c);

    set_r(arena, n, cl);
    if let Some(cl) = cl {
        set_p(arena, cl, Some(n));
    }
    set_p(arena, c, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(c));
        } else {
            set_r(arena, p, Some(c));
        }
    }
    set_l(arena, c, Some(n));
    set_p(arena, n, Some(c));

    // Closed-form factor updates; `n` first, `c` from `n`'s new value.
    let cbf = bf(arena, c);
    let nbf = bf(arena, n) - 1 - cbf.max(0);
    set_bf(arena, n, nbf);
    set_bf(arena, c, cbf - 1 + nbf.min(0));
    c
}

/// Mirror of [`rotate_left`]: promotes `n`'s left child over `n`.
fn rotate_right<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let c = get_l(arena, n).expect("rotate_right requires a left child");
    let p = get_p(arena, n);
    let cr = get_r(arena, c);

    set_l(arena, n, cr);
    if let Some(cr) = cr {
        set_p(arena, cr, Some(n));
    }
    set_p(arena, c, p);
    if let Some(p) = p {
        if get_l(arena, p) == Some(n) {
            set_l(arena, p, Some(c));
        } else {
            set_r(arena, p, Some(c));
        }
    }
    set_r(arena, c, Some(n));
    set_p(arena, n, Some(c));

    let cbf = bf(arena, c);
    let nbf = bf(arena, n) + 1 - cbf.min(0);
    set_bf(arena, n, nbf);
    set_bf(arena, c, cbf + 1 + nbf.max(0));
    c
}

/// Resolves a left-subtree-is-right-heavy imbalance: rotate `n`'s left
/// child left, then `n` right.
fn rotate_left_right<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let l = get_l(arena, n).expect("rotate_left_right requires a left child");
    rotate_left(arena, l);
    rotate_right(arena, n)
}

/// Mirror of [`rotate_left_right`], for a right-subtree-is-left-heavy
/// imbalance.
fn rotate_right_left<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let r = get_r(arena, n).expect("rotate_right_left requires a right child");
    rotate_right(arena, r);
    rotate_left(arena, n)
}

/// Dispatches the single rotation that restores balance at a ±2 node,
/// picking the double variant when the taller child leans the opposite
/// way. Returns the new root of the rotated neighborhood.
fn rebalance<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    match bf(arena, n) {
        -2 => {
            let l = get_l(arena, n).expect("left-heavy node has a left child");
            if bf(arena, l) <= 0 {
                rotate_right(arena, n)
            } else {
                rotate_left_right(arena, n)
            }
        }
        2 => {
            let r = get_r(arena, n).expect("right-heavy node has a right child");
            if bf(arena, r) >= 0 {
                rotate_left(arena, n)
            } else {
                rotate_right_left(arena, n)
            }
        }
        other => unreachable!("rebalance invoked at factor {other}"),
    }
}

/// Attaches the detached node `n` at its key-ordered slot under `root` and
/// restores the AVL invariant. Returns the new root.
///
/// `n`'s key must not already be present; the map layer resolves duplicate
/// keys to a value overwrite before ever allocating a node.
pub fn insert<K, V, N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> u32
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return n;
    };

    let mut curr = root;
    loop {
        let cmp = comparator(arena[n as usize].key(), arena[curr as usize].key());
        let slot = if cmp < 0 {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match slot {
            Some(next) => curr = next,
            None => {
                if cmp < 0 {
                    set_l(arena, curr, Some(n));
                } else {
                    set_r(arena, curr, Some(n));
                }
                break;
            }
        }
    }
    set_p(arena, n, Some(curr));
    insert_fix(arena, root, n)
}

/// Upward walk after an insertion. A growing subtree tilts each ancestor
/// by one; the walk ends at the first ancestor that absorbs the growth
/// (factor 0) or after the single rotation a ±2 ancestor needs.
fn insert_fix<K, V, N>(arena: &mut [N], root: u32, inserted: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut child = inserted;
    while let Some(p) = get_p(arena, child) {
        let tilt = if get_l(arena, p) == Some(child) { -1 } else { 1 };
        let pbf = bf(arena, p) + tilt;
        set_bf(arena, p, pbf);
        match pbf {
            0 => break,
            -1 | 1 => child = p,
            _ => {
                let sub = rebalance(arena, p);
                if get_p(arena, sub).is_none() {
                    return sub;
                }
                break;
            }
        }
    }
    root
}

/// Detaches node `n` from the tree rooted at `root` and restores the AVL
/// invariant. Returns the new root, `None` when the tree became empty.
///
/// `n` is left fully unlinked (no parent, children or tilt); its slot is
/// the caller's to recycle.
pub fn remove<K, V, N>(arena: &mut [N], root: u32, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;

    // Two children: exchange positions with an in-order neighbor so the
    // node to splice has at most one child. Predecessor when the right
    // child has no left child (skips a pointless rotation), successor
    // otherwise. Balance factors travel with the position, not the node.
    if let (Some(_), Some(r)) = (get_l(arena, n), get_r(arena, n)) {
        let target = if get_l(arena, r).is_none() {
            bst::prev(arena, n).expect("node with a left child has a predecessor")
        } else {
            bst::next(arena, n).expect("node with a right child has a successor")
        };
        root = bst::swap(arena, root, n, target);
        let nbf = bf(arena, n);
        set_bf(arena, n, bf(arena, target));
        set_bf(arena, target, nbf);
    }

    let child = get_l(arena, n).or_else(|| get_r(arena, n));
    let parent = get_p(arena, n);
    if let Some(c) = child {
        set_p(arena, c, parent);
    }
    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    let Some(p) = parent else {
        return child;
    };

    // Shrinking the left subtree tilts the parent right (+1), and the
    // mirror; the opposite sign convention from insertion.
    let delta = if get_l(arena, p) == Some(n) {
        set_l(arena, p, child);
        1
    } else {
        set_r(arena, p, child);
        -1
    };
    Some(remove_fix(arena, root, p, delta))
}

/// Upward walk after a splice. Unlike insertion, a deletion may shorten
/// subtrees all the way up, so the walk keeps going while rotated or
/// re-tilted subtrees report a height drop.
fn remove_fix<K, V, N>(arena: &mut [N], mut root: u32, start: u32, mut delta: i8) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut node = start;
    loop {
        let nbf = bf(arena, node) + delta;
        set_bf(arena, node, nbf);
        match nbf {
            -2 | 2 => {
                let sub = rebalance(arena, node);
                let Some(p) = get_p(arena, sub) else {
                    root = sub;
                    break;
                };
                if bf(arena, sub) != 0 {
                    // Rotation left the subtree height unchanged.
                    break;
                }
                delta = if get_l(arena, p) == Some(sub) { 1 } else { -1 };
                node = p;
            }
            0 => {
                // Subtree height dropped by one; the parent tilts next.
                let Some(p) = get_p(arena, node) else {
                    break;
                };
                delta = if get_l(arena, p) == Some(node) { 1 } else { -1 };
                node = p;
            }
            _ => break,
        }
    }
    root
}

fn subtree_height<K, V, N>(arena: &[N], node: u32) -> i32
where
    N: AvlNodeLike<K, V>,
{
    let l = get_l(arena, node).map_or(0, |i| subtree_height(arena, i));
    let r = get_r(arena, node).map_or(0, |i| subtree_height(arena, i));
    1 + l.max(r)
}

/// Full structural audit: parent links mirror child links, every cached
/// balance factor matches the recounted subtree heights and stays in
/// `-1..=1`, and in-order traversal never decreases.
pub fn assert_avl<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(InvariantError::RootHasParent);
    }

    fn check_node<K, V, N>(arena: &[N], node: u32) -> Result<(), InvariantError>
    where
        N: AvlNodeLike<K, V>,
    {
        for child in [get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(InvariantError::BrokenParentLink {
                    parent: node,
                    child,
                });
            }
            check_node(arena, child)?;
        }

        let lh = get_l(arena, node).map_or(0, |i| subtree_height(arena, i));
        let rh = get_r(arena, node).map_or(0, |i| subtree_height(arena, i));
        let actual = (rh - lh) as i8;
        let cached = bf(arena, node);
        if cached != actual {
            return Err(InvariantError::BalanceFactorMismatch {
                node,
                cached,
                actual,
            });
        }
        if !(-1..=1).contains(&cached) {
            return Err(InvariantError::OutOfBalance { node, bf: cached });
        }
        Ok(())
    }

    check_node(arena, root)?;

    let mut prev_node = None;
    let mut curr = bst::first(arena, Some(root));
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(
                arena[prev as usize].key(),
                arena[i as usize].key(),
            );
            if cmp >= 0 {
                return Err(InvariantError::OrderViolation { node: i });
            }
        }
        prev_node = Some(i);
        curr = bst::next(arena, i);
    }

    Ok(())
}

/// Debug printer: one line per node with its tilt, indented by depth.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
