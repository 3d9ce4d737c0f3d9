use std::fmt::Debug;

use crate::avl::balance::{self, InvariantError};
use crate::avl::node::AvlNode;
use crate::bst;

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Height-balanced ordered map.
///
/// Keys are unique under the comparator; lookups, insertions and removals
/// are O(log n) regardless of operation order. Nodes live in an owned
/// arena and are addressed by stable `u32` indices, which the traversal
/// methods (`first` / `next` / …) hand out directly. Removed slots are
/// recycled by later insertions.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    free: Vec<u32>,
    len: usize,
    comparator: C,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            free: Vec::new(),
            len: 0,
            comparator,
        }
    }

    fn alloc(&mut self, key: K, value: V) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = AvlNode::new(key, value);
                i
            }
            None => {
                self.arena.push(AvlNode::new(key, value));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Inserts `key` → `value`, or overwrites the value in place when the
    /// key is already present (no structural change, no rebalancing).
    /// Returns the slot index of the key's node.
    pub fn insert(&mut self, key: K, value: V) -> u32 {
        if let Some(i) = bst::find(&self.arena, self.root, &key, &self.comparator) {
            self.arena[i as usize].v = value;
            return i;
        }
        let n = self.alloc(key, value);
        self.root = Some(balance::insert(&mut self.arena, self.root, n, &self.comparator));
        self.len += 1;
        n
    }

    /// Removes `key`. Absent keys are a no-op returning `false`.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(n) = bst::find(&self.arena, self.root, key, &self.comparator) else {
            return false;
        };
        let root = self.root.expect("found a node, so the tree is non-empty");
        self.root = balance::remove(&mut self.arena, root, n);
        self.free.push(n);
        self.len -= 1;
        true
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = bst::find(&self.arena, self.root, key, &self.comparator)?;
        Some(&mut self.arena[i as usize].v)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Slot index of `key`'s node, or `None`.
    pub fn find(&self, key: &K) -> Option<u32> {
        bst::find(&self.arena, self.root, key, &self.comparator)
    }

    /// Slot index of the node with the greatest key `<= key`.
    pub fn get_or_next_lower(&self, key: &K) -> Option<u32> {
        bst::find_or_next_lower(&self.arena, self.root, key, &self.comparator)
    }

    pub fn first(&self) -> Option<u32> {
        bst::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        bst::last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        bst::next(&self.arena, curr)
    }

    pub fn prev(&self, curr: u32) -> Option<u32> {
        bst::prev(&self.arena, curr)
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn value_mut(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx as usize].v
    }

    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn for_each<G: FnMut(u32, &AvlNode<K, V>)>(&self, mut f: G) {
        let mut curr = self.first();
        while let Some(i) = curr {
            f(i, &self.arena[i as usize]);
            curr = self.next(i);
        }
    }

    /// In-order key/value iteration.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let mut curr = self.first();
        std::iter::from_fn(move || {
            let i = curr?;
            curr = self.next(i);
            let n = &self.arena[i as usize];
            Some((&n.k, &n.v))
        })
    }

    /// Audits every structural invariant; see [`InvariantError`].
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        balance::assert_avl(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        balance::print(&self.arena, self.root, "")
    }
}
