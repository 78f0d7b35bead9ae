// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers: z-ordered node groups sharing one offscreen surface and dirty flag.

use core::ops::Deref;

use kurbo::{Affine, Point};
use quickdraw_surface::{Surface, TextMetrics};

use crate::node::{self, Node, NodeMut};
use crate::zorder::{Stacked, ZList};
use crate::{HandlerError, HandlerKind, LayerId, NodeId};

/// An ordered group of nodes drawn together onto one offscreen surface.
///
/// Members are kept sorted ascending by z at all times. The layer redraws its
/// surface only when dirty; any render-affecting change to a member made
/// through [`NodeMut`] sets the flag.
pub struct Layer<S> {
    id: LayerId,
    name: String,
    z: f64,
    visible: bool,
    dirty: bool,
    surface: S,
    members: ZList<Node>,
}

impl<S> core::fmt::Debug for Layer<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Layer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("z", &self.z)
            .field("visible", &self.visible)
            .field("dirty", &self.dirty)
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

impl<S> Stacked for Layer<S> {
    type Id = LayerId;

    fn key(&self) -> LayerId {
        self.id
    }

    fn z(&self) -> f64 {
        self.z
    }
}

impl<S: Surface + Default> Layer<S> {
    /// Create an empty, visible, dirty layer at z 1 with a default surface.
    ///
    /// The surface is sized when the layer is added to a stage.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_surface(name, S::default())
    }
}

impl<S: Surface> Layer<S> {
    /// Create an empty, visible, dirty layer at z 1 drawing onto `surface`.
    pub fn with_surface(name: impl Into<String>, surface: S) -> Self {
        Self {
            id: LayerId::next(),
            name: name.into(),
            z: 1.0,
            visible: true,
            dirty: true,
            surface,
            members: ZList::new(),
        }
    }

    /// Measure a text member with this layer's surface.
    ///
    /// Returns `None` if `id` is not a text member.
    pub fn text_metrics(&self, id: NodeId) -> Option<TextMetrics> {
        let text = self.members.get(id)?.as_text()?;
        Some(text.metrics(&self.surface))
    }

    /// Shrink a text member's font until it fits `max_width` as measured by
    /// this layer's surface, stopping at size 1.
    ///
    /// Returns the resulting font size, or `None` if `id` is not a text member.
    pub fn shrink_text_to_fit(&mut self, id: NodeId, max_width: f64) -> Option<f64> {
        let idx = self.members.position(id)?;
        let text = self.members.at_mut(idx).as_text_mut()?;
        if text.shrink_to_fit(max_width, &self.surface) {
            self.dirty = true;
        }
        Some(text.font_size())
    }

    pub(crate) fn resize_surface(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.dirty = true;
    }

    /// Repaint every member in z order and clear the dirty flag.
    ///
    /// Returns the number of nodes drawn.
    pub(crate) fn redraw(&mut self) -> usize {
        self.surface.clear();
        for node in self.members.as_slice() {
            node.draw(&mut self.surface);
        }
        self.surface.set_transform(Affine::IDENTITY);
        self.dirty = false;
        self.members.len()
    }
}

impl<S> Layer<S> {
    /// Builder form of [`Layer::set_z`].
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// This layer's id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The name given at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stacking order within the stage; higher composites on top.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Whether the layer is composited and hit tested.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the layer's surface is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next render.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The offscreen surface, as of the last redraw.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Members in ascending z order.
    pub fn members(&self) -> &[Node] {
        self.members.as_slice()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the layer has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look up a member.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.members.get(id)
    }

    /// Set z. On a detached layer this only writes; layers in a stage are
    /// re-sorted by [`LayerMut::set_z`].
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Show or hide the layer. Takes effect on the next render.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Take ownership of `node`, insert it in z order, and mark the layer dirty.
    pub fn add(&mut self, mut node: Node) -> NodeId {
        let id = node.id();
        node.set_parent_layer(Some(self.id));
        self.members.insert(node);
        self.dirty = true;
        id
    }

    /// Detach and return a member, marking the layer dirty.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let mut node = self.members.remove(id)?;
        node.set_parent_layer(None);
        self.dirty = true;
        Some(node)
    }

    /// Mutable access to a member.
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_>> {
        let idx = self.members.position(id)?;
        Some(NodeMut::new(&mut self.members, &mut self.dirty, idx))
    }

    /// Whether render composites and hit tests this layer.
    pub(crate) fn is_active(&self) -> bool {
        self.visible && !self.members.is_empty()
    }

    pub(crate) fn invoke(
        &mut self,
        id: NodeId,
        kind: HandlerKind,
        at: Point,
    ) -> Result<(), HandlerError> {
        node::invoke(&mut self.members, &mut self.dirty, id, kind, at)
    }
}

/// Mutable access to a layer owned by a [`Stage`](crate::Stage).
///
/// Like [`Layer`], but [`LayerMut::set_z`] re-sorts the stage's layers
/// immediately. Dereferences to [`Layer`] for reads.
pub struct LayerMut<'a, S> {
    layers: &'a mut ZList<Layer<S>>,
    idx: usize,
}

impl<S> core::fmt::Debug for LayerMut<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("LayerMut")
            .field(self.layers.at(self.idx))
            .finish()
    }
}

impl<S> Deref for LayerMut<'_, S> {
    type Target = Layer<S>;

    fn deref(&self) -> &Layer<S> {
        self.layers.at(self.idx)
    }
}

impl<'a, S: Surface> LayerMut<'a, S> {
    pub(crate) fn new(layers: &'a mut ZList<Layer<S>>, idx: usize) -> Self {
        Self { layers, idx }
    }

    fn layer(&mut self) -> &mut Layer<S> {
        self.layers.at_mut(self.idx)
    }

    /// Set z and re-sort the stage's layers.
    pub fn set_z(&mut self, z: f64) {
        let id = self.id();
        self.layer().set_z(z);
        self.layers.sort();
        if let Some(idx) = self.layers.position(id) {
            self.idx = idx;
        }
    }

    /// See [`Layer::set_visible`].
    pub fn set_visible(&mut self, visible: bool) {
        self.layer().set_visible(visible);
    }

    /// See [`Layer::mark_dirty`].
    pub fn mark_dirty(&mut self) {
        self.layer().mark_dirty();
    }

    /// See [`Layer::add`].
    pub fn add(&mut self, node: Node) -> NodeId {
        self.layer().add(node)
    }

    /// See [`Layer::remove`].
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.layer().remove(id)
    }

    /// See [`Layer::node_mut`].
    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_>> {
        self.layers.at_mut(self.idx).node_mut(id)
    }

    /// See [`Layer::shrink_text_to_fit`].
    pub fn shrink_text_to_fit(&mut self, id: NodeId, max_width: f64) -> Option<f64> {
        self.layer().shrink_text_to_fit(id, max_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, Rect, Shape};
    use peniko::Color;
    use quickdraw_surface::{Command, DisplayList};

    fn square(x0: f64, y0: f64, size: f64) -> BezPath {
        Rect::new(x0, y0, x0 + size, y0 + size).to_path(0.1)
    }

    fn z_order(layer: &Layer<DisplayList>) -> Vec<f64> {
        layer.members().iter().map(Node::z).collect()
    }

    #[test]
    fn new_layer_is_dirty_and_visible() {
        let layer: Layer<DisplayList> = Layer::new("bg");
        assert!(layer.is_dirty());
        assert!(layer.is_visible());
        assert_eq!(layer.z(), 1.0);
        assert_eq!(layer.name(), "bg");
        assert!(!layer.is_active(), "empty layers are skipped");
    }

    #[test]
    fn add_sets_parent_and_sorts() {
        let mut layer: Layer<DisplayList> = Layer::new("l");
        let a = layer.add(Node::shape(square(0.0, 0.0, 1.0)).with_z(3.0));
        let b = layer.add(Node::shape(square(0.0, 0.0, 1.0)).with_z(1.0));
        let c = layer.add(Node::shape(square(0.0, 0.0, 1.0)).with_z(2.0));
        assert_eq!(z_order(&layer), vec![1.0, 2.0, 3.0]);
        for id in [a, b, c] {
            assert_eq!(layer.node(id).unwrap().parent_layer(), Some(layer.id()));
        }
    }

    #[test]
    fn member_z_change_resorts_immediately() {
        let mut layer: Layer<DisplayList> = Layer::new("l");
        let a = layer.add(Node::shape(square(0.0, 0.0, 1.0)).with_z(1.0));
        let b = layer.add(Node::shape(square(0.0, 0.0, 1.0)).with_z(2.0));
        layer.node_mut(a).unwrap().set_z(5.0);
        let order: Vec<NodeId> = layer.members().iter().map(Node::id).collect();
        assert_eq!(order, vec![b, a]);
        assert_eq!(z_order(&layer), vec![2.0, 5.0]);
    }

    #[test]
    fn redraw_clears_dirty_and_draws_in_z_order() {
        let mut layer: Layer<DisplayList> =
            Layer::with_surface("l", DisplayList::new(100, 100));
        layer.add(
            Node::shape(square(0.0, 0.0, 50.0))
                .with_z(2.0)
                .with_fill(Color::from_rgb8(0, 0, 255)),
        );
        layer.add(
            Node::shape(square(25.0, 25.0, 50.0))
                .with_z(1.0)
                .with_fill(Color::from_rgb8(255, 0, 0)),
        );
        assert_eq!(layer.redraw(), 2);
        assert!(!layer.is_dirty());

        // Higher z draws later, so it wins in the overlap.
        match layer.surface().fill_at(Point::new(30.0, 30.0)) {
            Some(Command::FillPath {
                paint: quickdraw_surface::RecordedPaint::Solid(c),
                ..
            }) => assert_eq!(c.to_rgba8().to_u8_array(), [0, 0, 255, 255]),
            other => panic!("unexpected sample {other:?}"),
        }
    }

    #[test]
    fn remove_detaches_and_dirties() {
        let mut layer: Layer<DisplayList> = Layer::new("l");
        let a = layer.add(Node::shape(square(0.0, 0.0, 1.0)));
        layer.redraw();
        let node = layer.remove(a).unwrap();
        assert!(node.parent_layer().is_none());
        assert!(layer.is_dirty());
        assert!(layer.remove(a).is_none());
        assert!(layer.node_mut(a).is_none());
    }

    #[test]
    fn detached_node_mutation_is_silent() {
        let mut layer: Layer<DisplayList> = Layer::new("l");
        layer.add(Node::shape(square(0.0, 0.0, 1.0)));
        layer.redraw();

        let mut loose = Node::shape(square(0.0, 0.0, 1.0));
        loose.set_fill(Color::from_rgb8(1, 1, 1));
        loose.set_z(9.0);
        assert!(!layer.is_dirty());
    }

    #[test]
    fn text_helpers_use_layer_surface() {
        let mut layer: Layer<DisplayList> = Layer::with_surface("l", DisplayList::new(100, 100));
        let t = layer.add(Node::text("abcdefghij", (0.0, 20.0)).with_font_size(20.0));
        let s = layer.add(Node::shape(square(0.0, 0.0, 1.0)));
        layer.redraw();

        let m = layer.text_metrics(t).unwrap();
        assert!((m.width - 120.0).abs() < 1e-9);
        assert!(layer.text_metrics(s).is_none());

        assert_eq!(layer.shrink_text_to_fit(t, 60.0), Some(10.0));
        assert!(layer.is_dirty());
        assert_eq!(layer.shrink_text_to_fit(s, 60.0), None);
    }
}
