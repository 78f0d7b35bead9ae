// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A vector kept sorted ascending by z, with an id → position map.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

/// Something that occupies a z slot.
pub(crate) trait Stacked {
    type Id: Copy + Eq + Hash + Debug;

    fn key(&self) -> Self::Id;

    fn z(&self) -> f64;
}

/// Items ordered ascending by [`Stacked::z`].
///
/// Ties keep insertion order: the sort is stable and new items are appended
/// before sorting. Positions are rebuilt after every sort, so they are valid
/// whenever a caller can observe the list.
#[derive(Clone, Debug)]
pub(crate) struct ZList<T: Stacked> {
    items: Vec<T>,
    positions: HashMap<T::Id, usize>,
}

impl<T: Stacked> Default for ZList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Stacked> ZList<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `item` and restore order. Returns the item's new position.
    pub(crate) fn insert(&mut self, item: T) -> usize {
        let id = item.key();
        self.items.push(item);
        self.sort();
        self.positions[&id]
    }

    pub(crate) fn remove(&mut self, id: T::Id) -> Option<T> {
        let idx = self.position(id)?;
        let item = self.items.remove(idx);
        self.reindex();
        Some(item)
    }

    /// Stable sort ascending by z, then rebuild the position map.
    pub(crate) fn sort(&mut self) {
        self.items.sort_by(|a, b| a.z().total_cmp(&b.z()));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.positions.clear();
        for (idx, item) in self.items.iter().enumerate() {
            self.positions.insert(item.key(), idx);
        }
    }

    pub(crate) fn position(&self, id: T::Id) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub(crate) fn get(&self, id: T::Id) -> Option<&T> {
        self.position(id).map(|idx| &self.items[idx])
    }

    pub(crate) fn at(&self, idx: usize) -> &T {
        &self.items[idx]
    }

    /// Mutable access by position. Callers that change z must call [`ZList::sort`].
    pub(crate) fn at_mut(&mut self, idx: usize) -> &mut T {
        &mut self.items[idx]
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Mutable iteration in z order. Callers must not change z.
    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
