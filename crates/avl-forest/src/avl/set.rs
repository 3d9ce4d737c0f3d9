use super::map::AvlMap;
use crate::avl::balance::InvariantError;

/// Ordered set backed by [`AvlMap<K, ()>`].
pub struct AvlSet<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    inner: AvlMap<K, (), C>,
}

impl<K> AvlSet<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self {
            inner: AvlMap::new(),
        }
    }
}

impl<K> Default for AvlSet<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlSet<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlMap::with_comparator(comparator),
        }
    }

    /// Adds `key`; re-adding an existing key is a no-op. Returns the slot
    /// index of the key's node.
    pub fn add(&mut self, key: K) -> u32 {
        self.inner.insert(key, ())
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.inner.remove(key)
    }

    pub fn has(&self, key: &K) -> bool {
        self.inner.has(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn first(&self) -> Option<u32> {
        self.inner.first()
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        self.inner.next(curr)
    }

    pub fn key(&self, idx: u32) -> &K {
        self.inner.key(idx)
    }

    /// In-order key iteration.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.inner.iter().map(|(k, _)| k)
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        self.inner.assert_valid()
    }
}
