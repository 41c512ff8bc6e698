//! Grouped aggregation primitives.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A running reduction over the items of one group.
pub trait Accumulator<T> {
    /// Starts a group from its first item.
    fn start(item: &T) -> Self;

    /// Folds another item into the group.
    fn update(&mut self, item: &T);
}

/// Groups items by key, reducing each group with an [`Accumulator`].
///
/// Groups are kept ordered by key.
#[derive(Debug, Clone)]
pub struct GroupBy<K, A> {
    groups: BTreeMap<K, A>,
}

impl<K: Ord, A> Default for GroupBy<K, A> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<K: Ord, A> GroupBy<K, A> {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item to the group identified by `key`.
    pub fn push<T>(&mut self, key: K, item: &T)
    where
        A: Accumulator<T>,
    {
        match self.groups.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(A::start(item));
            }
            Entry::Occupied(mut entry) => entry.get_mut().update(item),
        }
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no item has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consumes the grouping, yielding groups in key order.
    pub fn into_groups(self) -> impl Iterator<Item = (K, A)> {
        self.groups.into_iter()
    }
}

/// Keeps the value with the smallest ordering key.
///
/// On equal keys the value seen first is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct First<O, V> {
    order: O,
    value: V,
}

impl<O: PartialOrd, V> First<O, V> {
    /// Starts with one value.
    pub const fn new(order: O, value: V) -> Self {
        Self { order, value }
    }

    /// Offers another value.
    pub fn push(&mut self, order: O, value: V) {
        if order < self.order {
            self.order = order;
            self.value = value;
        }
    }

    /// Returns the kept value.
    pub const fn value(&self) -> &V {
        &self.value
    }
}

/// Keeps the value with the largest ordering key.
///
/// On equal keys the value seen last is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Last<O, V> {
    order: O,
    value: V,
}

impl<O: PartialOrd, V> Last<O, V> {
    /// Starts with one value.
    pub const fn new(order: O, value: V) -> Self {
        Self { order, value }
    }

    /// Offers another value.
    pub fn push(&mut self, order: O, value: V) {
        if order >= self.order {
            self.order = order;
            self.value = value;
        }
    }

    /// Returns the kept value.
    pub const fn value(&self) -> &V {
        &self.value
    }
}

/// Running minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Min(f64);

impl Min {
    /// Starts with one value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Offers another value.
    pub const fn push(&mut self, value: f64) {
        self.0 = self.0.min(value);
    }

    /// Returns the minimum.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

/// Running maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Max(f64);

impl Max {
    /// Starts with one value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Offers another value.
    pub const fn push(&mut self, value: f64) {
        self.0 = self.0.max(value);
    }

    /// Returns the maximum.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

/// Running integer sum, saturating at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sum(u64);

impl Sum {
    /// Starts with one value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Adds another value.
    pub const fn push(&mut self, value: u64) {
        self.0 = self.0.saturating_add(value);
    }

    /// Returns the sum.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}
