//! Node trait definitions shared by the substrate and the balance engine.
//!
//! All trees in this crate are arena-backed: nodes live in a caller-owned
//! `Vec<N>` and every "pointer" is an `Option<u32>` index into it. The
//! parent index is a back-reference for upward walks only; ownership always
//! flows through the arena, never through links.

/// Structural links of a binary-tree node (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Comparator used by map-like structures.
///
/// Returns a negative number when `a < b`, zero when equal, positive when
/// `a > b`.
pub type Comparator<K> = dyn Fn(&K, &K) -> i32;

/// A [`Node`] that carries a key/value pair.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
    fn set_value(&mut self, value: V);
}

/// A [`KvNode`] that additionally caches an AVL balance factor,
/// `height(right) - height(left)`.
pub trait AvlNodeLike<K, V>: KvNode<K, V> {
    fn bf(&self) -> i8;
    fn set_bf(&mut self, bf: i8);
}
