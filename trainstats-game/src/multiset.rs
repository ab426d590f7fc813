//! Map keyed by multisets of ordered labels.
//!
//! A key is the *shape* of a label collection: which labels appear and how many
//! times each one repeats. Insertion order never matters, so `[a, b]` and
//! `[b, a]` name the same entry while `[a]` and `[a, a]` name different ones.
//!
//! Internally labels are sorted and walked through a trie, one level per label.
//! Every node has a dedicated terminal slot for the value registered at exactly
//! that shape, so a value can never be confused with a child label. Shapes that
//! share a sorted prefix share the nodes for it.
use std::collections::BTreeMap;
use std::fmt;

struct Node<K, V> {
    value: Option<V>,
    children: BTreeMap<K, Node<K, V>>,
}

impl<K, V> Node<K, V> {
    const fn new() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

impl<K: Clone, V: Clone> Clone for Node<K, V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            children: self.children.clone(),
        }
    }
}

pub struct MultisetMap<K, V> {
    root: Node<K, V>,
    len: usize,
}

impl<K: Ord, V> MultisetMap<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Number of registered shapes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Register `value` for the multiset formed by `labels`, returning any value it replaces.
    ///
    /// Repeated labels count as repeated membership. An empty `labels` registers
    /// the empty multiset.
    pub fn insert<I>(&mut self, labels: I, value: V) -> Option<V>
    where
        I: IntoIterator<Item = K>,
    {
        let mut sorted: Vec<K> = labels.into_iter().collect();
        sorted.sort_unstable();

        let mut node = &mut self.root;
        for label in sorted {
            node = node.children.entry(label).or_insert_with(Node::new);
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Look up the value registered for exactly this multiset shape.
    #[must_use]
    pub fn get<'a, I>(&self, labels: I) -> Option<&V>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut sorted: Vec<&K> = labels.into_iter().collect();
        sorted.sort_unstable();

        let mut node = &self.root;
        for label in sorted {
            node = node.children.get(label)?;
        }
        node.value.as_ref()
    }

    #[must_use]
    pub fn contains_key<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        self.get(labels).is_some()
    }
}

impl<K: Ord, V> Default for MultisetMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for MultisetMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K, V> fmt::Debug for MultisetMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultisetMap")
            .field("shapes", &self.len)
            .finish_non_exhaustive()
    }
}

impl<K, V, I> FromIterator<(I, V)> for MultisetMap<K, V>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    fn from_iter<T: IntoIterator<Item = (I, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (labels, value) in iter {
            map.insert(labels, value);
        }
        map
    }
}
