// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable nodes: shapes and text.

use core::ops::Deref;
use std::panic::{self, AssertUnwindSafe};

use kurbo::{Affine, BezPath, Point};
use peniko::Color;
use quickdraw_surface::{Font, PatternImage, Surface, TextMetrics};

use crate::hit::{HitParams, PreciseHitTest};
use crate::style::{FillPriority, NodeStyle};
use crate::zorder::{Stacked, ZList};
use crate::{HandlerError, HandlerKind, LayerId, NodeId};

/// An interaction handler.
///
/// Handlers receive the node they are attached to, so they can restyle it,
/// and the pointer position in surface coordinates. Changes made here are
/// drawn on the next render.
pub type Handler = Box<dyn FnMut(&mut NodeMut<'_>, Point)>;

#[derive(Default)]
struct Handlers {
    click: Option<Handler>,
    over: Option<Handler>,
    moved: Option<Handler>,
    out: Option<Handler>,
}

impl Handlers {
    fn slot(&mut self, kind: HandlerKind) -> &mut Option<Handler> {
        match kind {
            HandlerKind::Click => &mut self.click,
            HandlerKind::MouseOver => &mut self.over,
            HandlerKind::MouseMove => &mut self.moved,
            HandlerKind::MouseOut => &mut self.out,
        }
    }
}

/// Geometry of a shape node.
#[derive(Clone, Debug)]
pub struct Geometry {
    path: BezPath,
    line_width: f64,
}

impl Geometry {
    /// Outline in surface coordinates, before the node's rotation.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Stroke width.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }
}

/// Content of a text node.
#[derive(Clone, Debug)]
pub struct Text {
    content: String,
    font_size: f64,
    typeface: String,
}

impl Text {
    /// The string drawn.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Typeface family.
    pub fn typeface(&self) -> &str {
        &self.typeface
    }

    /// The font this text is drawn with.
    pub fn font(&self) -> Font {
        Font::new(self.font_size, self.typeface.as_str())
    }

    /// Measure this text on `surface`.
    pub fn metrics<S: Surface + ?Sized>(&self, surface: &S) -> TextMetrics {
        surface.measure_text(&self.content, &self.font())
    }

    /// Measured advance width on `surface`.
    pub fn width<S: Surface + ?Sized>(&self, surface: &S) -> f64 {
        self.metrics(surface).width
    }

    /// Step the font size down by one pixel while the measured width exceeds
    /// `max_width`, never going below 1. Returns whether the size changed.
    ///
    /// Large sizes first jump to just above the size that would fit if width
    /// scaled linearly with font size, then step down from there. A
    /// non-finite size becomes 1.
    pub fn shrink_to_fit<S: Surface + ?Sized>(&mut self, max_width: f64, surface: &S) -> bool {
        let start = self.font_size;
        if !start.is_finite() {
            self.font_size = 1.0;
            return true;
        }
        let width = self.width(surface);
        if start <= 1.0 || width <= max_width {
            return false;
        }
        if width.is_finite() && max_width > 0.0 {
            let target = start * max_width / width;
            let steps = ((start - target).floor() - 1.0).max(0.0);
            self.font_size = (start - steps).max(1.0);
        }
        while self.font_size > 1.0 && self.width(surface) > max_width {
            let next = (self.font_size - 1.0).max(1.0);
            // Below f64 resolution a whole-pixel step is a no-op.
            self.font_size = if next < self.font_size { next } else { 1.0 };
        }
        self.font_size != start
    }
}

/// The drawable variant of a node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A filled and stroked path.
    Shape(Geometry),
    /// A run of text drawn at the node position.
    Text(Text),
}

/// An atomic renderable: a shape or a run of text, with position, rotation,
/// z, paint, and interaction handlers.
///
/// A `Node` owned by the caller is detached: its setters only write. Once
/// passed to [`Layer::add`](crate::Layer::add) it belongs to the layer, and
/// mutation goes through [`NodeMut`], which also marks the layer dirty.
pub struct Node {
    id: NodeId,
    layer: Option<LayerId>,
    position: Point,
    rotation: f64,
    z: f64,
    touchable: bool,
    style: NodeStyle,
    kind: NodeKind,
    handlers: Handlers,
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("layer", &self.layer)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("z", &self.z)
            .field("touchable", &self.touchable)
            .field("style", &self.style)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Stacked for Node {
    type Id = NodeId;

    fn key(&self) -> NodeId {
        self.id
    }

    fn z(&self) -> f64 {
        self.z
    }
}

impl Node {
    fn with_kind(kind: NodeKind, touchable: bool) -> Self {
        Self {
            id: NodeId::next(),
            layer: None,
            position: Point::ZERO,
            rotation: 0.0,
            z: 1.0,
            touchable,
            style: NodeStyle::default(),
            kind,
            handlers: Handlers::default(),
        }
    }

    /// A touchable shape with a 1px black outline and black fill.
    ///
    /// `path` is in surface coordinates. The node position is the pivot for
    /// rotation; it does not offset the path.
    pub fn shape(path: BezPath) -> Self {
        Self::with_kind(
            NodeKind::Shape(Geometry {
                path,
                line_width: 1.0,
            }),
            true,
        )
    }

    /// Text drawn with its baseline starting at `position`, in
    /// `10px sans-serif`. Text is never a hit-test target.
    pub fn text(content: impl Into<String>, position: impl Into<Point>) -> Self {
        let mut node = Self::with_kind(
            NodeKind::Text(Text {
                content: content.into(),
                font_size: 10.0,
                typeface: "sans-serif".into(),
            }),
            false,
        );
        node.position = position.into();
        node
    }

    /// Builder form of [`Node::set_z`].
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Builder form of [`Node::set_position`].
    pub fn with_position(mut self, position: impl Into<Point>) -> Self {
        self.set_position(position);
        self
    }

    /// Builder form of [`Node::set_rotation`].
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.set_rotation(degrees);
        self
    }

    /// Builder form of [`Node::set_fill`].
    pub fn with_fill(mut self, color: Color) -> Self {
        self.set_fill(color);
        self
    }

    /// Builder form of [`Node::set_stroke`].
    pub fn with_stroke(mut self, color: Color) -> Self {
        self.set_stroke(color);
        self
    }

    /// Builder form of [`Node::set_line_width`].
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.set_line_width(width);
        self
    }

    /// Builder form of [`Node::set_touchable`].
    pub fn with_touchable(mut self, touchable: bool) -> Self {
        self.set_touchable(touchable);
        self
    }

    /// Builder form of [`Node::set_font_size`].
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.set_font_size(size);
        self
    }

    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The layer this node belongs to, if attached.
    pub fn parent_layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub(crate) fn set_parent_layer(&mut self, layer: Option<LayerId>) {
        self.layer = layer;
    }

    /// Anchor point: rotation pivot, and text baseline origin.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Rotation in degrees about [`Node::position`].
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Stacking order within the layer; higher draws on top.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Whether pointer hit testing considers this node.
    ///
    /// Always false for text.
    pub fn is_touchable(&self) -> bool {
        self.touchable && matches!(self.kind, NodeKind::Shape(_))
    }

    /// Paint state.
    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    /// Shape or text content.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Shape geometry, if this is a shape.
    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            NodeKind::Shape(g) => Some(g),
            NodeKind::Text(_) => None,
        }
    }

    /// Text content, if this is text.
    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            NodeKind::Shape(_) => None,
        }
    }

    /// Mutable text content, if this is text.
    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match &mut self.kind {
            NodeKind::Text(t) => Some(t),
            NodeKind::Shape(_) => None,
        }
    }

    /// Transform from node space to surface space: rotation about the anchor.
    pub fn transform(&self) -> Affine {
        Affine::rotate_about(self.rotation.to_radians(), self.position)
    }

    /// Set the anchor point.
    pub fn set_position(&mut self, position: impl Into<Point>) {
        self.position = position.into();
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Set z. On a detached node this only writes; attached nodes are
    /// re-sorted by [`NodeMut::set_z`].
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Include or exclude this node from hit testing.
    pub fn set_touchable(&mut self, touchable: bool) {
        self.touchable = touchable;
    }

    /// Set the solid fill color.
    pub fn set_fill(&mut self, color: Color) {
        self.style.fill = color;
    }

    /// Set the outline color.
    pub fn set_stroke(&mut self, color: Color) {
        self.style.stroke = color;
    }

    /// Choose between solid and pattern fill.
    pub fn set_fill_priority(&mut self, priority: FillPriority) {
        self.style.fill_priority = priority;
    }

    /// Set or clear the pattern fill image.
    pub fn set_fill_pattern(&mut self, pattern: Option<PatternImage>) {
        self.style.fill_pattern = pattern;
    }

    /// Replace the whole paint state.
    pub fn set_style(&mut self, style: NodeStyle) {
        self.style = style;
    }

    /// Set the stroke width. Returns false, doing nothing, on text.
    pub fn set_line_width(&mut self, width: f64) -> bool {
        match &mut self.kind {
            NodeKind::Shape(g) => {
                g.line_width = width;
                true
            }
            NodeKind::Text(_) => false,
        }
    }

    /// Replace the outline. Returns false, doing nothing, on text.
    pub fn set_path(&mut self, path: BezPath) -> bool {
        match &mut self.kind {
            NodeKind::Shape(g) => {
                g.path = path;
                true
            }
            NodeKind::Text(_) => false,
        }
    }

    /// Replace the text content. Returns false, doing nothing, on shapes.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        self.as_text_mut()
            .map(|t| t.content = content.into())
            .is_some()
    }

    /// Set the font size. Returns false, doing nothing, on shapes.
    pub fn set_font_size(&mut self, size: f64) -> bool {
        self.as_text_mut().map(|t| t.font_size = size).is_some()
    }

    /// Set the typeface. Returns false, doing nothing, on shapes.
    pub fn set_typeface(&mut self, typeface: impl Into<String>) -> bool {
        self.as_text_mut()
            .map(|t| t.typeface = typeface.into())
            .is_some()
    }

    /// Set the click handler.
    pub fn set_on_click(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.handlers.click = Some(Box::new(handler));
    }

    /// Set the handler for the pointer entering this node.
    pub fn set_on_mouse_over(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.handlers.over = Some(Box::new(handler));
    }

    /// Set the handler for the pointer moving within this node.
    pub fn set_on_mouse_move(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.handlers.moved = Some(Box::new(handler));
    }

    /// Set the handler for the pointer leaving this node.
    pub fn set_on_mouse_out(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.handlers.out = Some(Box::new(handler));
    }

    /// Remove a handler, restoring the no-op default.
    pub fn clear_handler(&mut self, kind: HandlerKind) {
        *self.handlers.slot(kind) = None;
    }

    /// Whether `pt`, in surface coordinates, hits this node's geometry.
    ///
    /// Text never hits.
    pub fn hit_test(&self, pt: Point, params: &HitParams) -> bool {
        match &self.kind {
            NodeKind::Shape(g) => {
                let local = self.transform().inverse() * pt;
                g.path.hit_test_local(local, params)
            }
            NodeKind::Text(_) => false,
        }
    }

    /// Draw onto `surface`: transform, paint, then the variant's geometry.
    ///
    /// Shapes fill before they stroke.
    pub(crate) fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_transform(self.transform());
        let fill = self.style.fill_paint();
        match &self.kind {
            NodeKind::Shape(g) => {
                surface.fill_path(&g.path, &fill);
                surface.stroke_path(&g.path, &self.style.stroke_style(g.line_width));
            }
            NodeKind::Text(t) => {
                surface.fill_text(&t.content, self.position, &t.font(), &fill);
            }
        }
    }
}

/// Mutable access to a node attached to a layer.
///
/// Every setter that changes what is drawn marks the layer dirty in the same
/// call. [`NodeMut::set_z`] also re-sorts the layer's members immediately.
/// Dereferences to [`Node`] for reads.
pub struct NodeMut<'a> {
    nodes: &'a mut ZList<Node>,
    dirty: &'a mut bool,
    idx: usize,
}

impl core::fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeMut")
            .field("node", self.nodes.at(self.idx))
            .field("dirty", &*self.dirty)
            .finish()
    }
}

impl Deref for NodeMut<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.nodes.at(self.idx)
    }
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(nodes: &'a mut ZList<Node>, dirty: &'a mut bool, idx: usize) -> Self {
        Self { nodes, dirty, idx }
    }

    fn redraw_with<R>(&mut self, f: impl FnOnce(&mut Node) -> R) -> R {
        let out = f(self.nodes.at_mut(self.idx));
        *self.dirty = true;
        out
    }

    fn redraw_if(&mut self, f: impl FnOnce(&mut Node) -> bool) -> bool {
        let applied = f(self.nodes.at_mut(self.idx));
        *self.dirty |= applied;
        applied
    }

    /// Set the anchor point.
    pub fn set_position(&mut self, position: impl Into<Point>) {
        self.redraw_with(|n| n.set_position(position));
    }

    /// Set the rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.redraw_with(|n| n.set_rotation(degrees));
    }

    /// Set z and re-sort the layer.
    pub fn set_z(&mut self, z: f64) {
        let id = self.id();
        self.redraw_with(|n| n.set_z(z));
        self.nodes.sort();
        if let Some(idx) = self.nodes.position(id) {
            self.idx = idx;
        }
    }

    /// Include or exclude this node from hit testing. Takes effect when the
    /// touch targets are rebuilt on the next render.
    pub fn set_touchable(&mut self, touchable: bool) {
        self.nodes.at_mut(self.idx).set_touchable(touchable);
    }

    /// Set the solid fill color.
    pub fn set_fill(&mut self, color: Color) {
        self.redraw_with(|n| n.set_fill(color));
    }

    /// Set the outline color.
    pub fn set_stroke(&mut self, color: Color) {
        self.redraw_with(|n| n.set_stroke(color));
    }

    /// Choose between solid and pattern fill.
    pub fn set_fill_priority(&mut self, priority: FillPriority) {
        self.redraw_with(|n| n.set_fill_priority(priority));
    }

    /// Set or clear the pattern fill image.
    pub fn set_fill_pattern(&mut self, pattern: Option<PatternImage>) {
        self.redraw_with(|n| n.set_fill_pattern(pattern));
    }

    /// Replace the whole paint state.
    pub fn set_style(&mut self, style: NodeStyle) {
        self.redraw_with(|n| n.set_style(style));
    }

    /// Set the stroke width. Returns false, doing nothing, on text.
    pub fn set_line_width(&mut self, width: f64) -> bool {
        self.redraw_if(|n| n.set_line_width(width))
    }

    /// Replace the outline. Returns false, doing nothing, on text.
    pub fn set_path(&mut self, path: BezPath) -> bool {
        self.redraw_if(|n| n.set_path(path))
    }

    /// Replace the text content. Returns false, doing nothing, on shapes.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        self.redraw_if(|n| n.set_content(content))
    }

    /// Set the font size. Returns false, doing nothing, on shapes.
    pub fn set_font_size(&mut self, size: f64) -> bool {
        self.redraw_if(|n| n.set_font_size(size))
    }

    /// Set the typeface. Returns false, doing nothing, on shapes.
    pub fn set_typeface(&mut self, typeface: impl Into<String>) -> bool {
        self.redraw_if(|n| n.set_typeface(typeface))
    }

    /// Set the click handler.
    pub fn set_on_click(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.nodes.at_mut(self.idx).set_on_click(handler);
    }

    /// Set the handler for the pointer entering this node.
    pub fn set_on_mouse_over(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.nodes.at_mut(self.idx).set_on_mouse_over(handler);
    }

    /// Set the handler for the pointer moving within this node.
    pub fn set_on_mouse_move(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.nodes.at_mut(self.idx).set_on_mouse_move(handler);
    }

    /// Set the handler for the pointer leaving this node.
    pub fn set_on_mouse_out(&mut self, handler: impl FnMut(&mut NodeMut<'_>, Point) + 'static) {
        self.nodes.at_mut(self.idx).set_on_mouse_out(handler);
    }

    /// Remove a handler, restoring the no-op default.
    pub fn clear_handler(&mut self, kind: HandlerKind) {
        self.nodes.at_mut(self.idx).clear_handler(kind);
    }
}

/// Run one handler of node `id` in isolation.
///
/// The handler is taken out of its slot for the call so it can receive the
/// node mutably, then put back unless it installed a replacement. A panic is
/// caught and reported; the layer stays consistent. Unknown ids and empty
/// slots are no-ops.
pub(crate) fn invoke(
    nodes: &mut ZList<Node>,
    dirty: &mut bool,
    id: NodeId,
    kind: HandlerKind,
    at: Point,
) -> Result<(), HandlerError> {
    let Some(idx) = nodes.position(id) else {
        return Ok(());
    };
    let Some(mut handler) = nodes.at_mut(idx).handlers.slot(kind).take() else {
        return Ok(());
    };
    let result = {
        let mut node = NodeMut::new(nodes, dirty, idx);
        panic::catch_unwind(AssertUnwindSafe(|| handler(&mut node, at)))
    };
    if let Some(idx) = nodes.position(id) {
        let slot = nodes.at_mut(idx).handlers.slot(kind);
        if slot.is_none() {
            *slot = Some(handler);
        }
    }
    result.map_err(|payload| HandlerError::from_panic(id, kind, payload.as_ref()))
}
