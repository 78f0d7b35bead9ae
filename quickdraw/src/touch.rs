// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch-target index: touchable nodes in hit priority order.

use kurbo::Point;

use crate::hit::HitParams;
use crate::layer::Layer;
use crate::zorder::ZList;
use crate::{LayerId, NodeId};

/// A touchable node and the layer it was found in at index time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TouchTarget {
    /// Owning layer when the index was built.
    pub layer: LayerId,
    /// The node.
    pub node: NodeId,
}

/// Flat list of touchable nodes, topmost first.
///
/// Rebuilt from scratch after every render; it holds ids, not references, so a
/// node removed since the last render simply fails to resolve.
#[derive(Clone, Debug, Default)]
pub(crate) struct TouchTargets {
    targets: Vec<TouchTarget>,
}

impl TouchTargets {
    /// Walk layers from highest z to lowest, skipping hidden or empty ones, and
    /// within each layer walk members from highest z to lowest, keeping the
    /// touchable ones.
    pub(crate) fn rebuild<S>(&mut self, layers: &ZList<Layer<S>>) {
        self.targets.clear();
        for layer in layers.as_slice().iter().rev() {
            if !layer.is_visible() || layer.is_empty() {
                continue;
            }
            self.targets.extend(
                layer
                    .members()
                    .iter()
                    .rev()
                    .filter(|node| node.is_touchable())
                    .map(|node| TouchTarget {
                        layer: layer.id(),
                        node: node.id(),
                    }),
            );
        }
    }

    pub(crate) fn as_slice(&self) -> &[TouchTarget] {
        &self.targets
    }

    /// First target, in priority order, whose geometry contains `pt`.
    ///
    /// Targets whose layer or node no longer exists are skipped.
    pub(crate) fn resolve<S>(
        &self,
        layers: &ZList<Layer<S>>,
        pt: Point,
        params: &HitParams,
    ) -> Option<NodeId> {
        self.targets
            .iter()
            .find(|target| {
                layers
                    .get(target.layer)
                    .and_then(|layer| layer.node(target.node))
                    .is_some_and(|node| node.hit_test(pt, params))
            })
            .map(|target| target.node)
    }
}
