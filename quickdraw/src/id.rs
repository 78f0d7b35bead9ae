// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-unique identifiers for nodes and layers.

use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);
static NEXT_LAYER: AtomicU64 = AtomicU64::new(1);

/// Identifier of a [`Node`](crate::Node), assigned at construction.
///
/// Ids are never reused within a process, so a stale id simply fails to
/// resolve instead of aliasing a newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_NODE.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of a [`Layer`](crate::Layer), assigned at construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LAYER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}
