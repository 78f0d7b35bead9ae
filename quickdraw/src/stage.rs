// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage: layer ownership, the render loop, and pointer dispatch.

use kurbo::Point;
use log::{debug, trace, warn};
use quickdraw_surface::Surface;

use crate::hit::HitParams;
use crate::layer::{Layer, LayerMut};
use crate::pointer::{PointerEvent, PointerState};
use crate::touch::{TouchTarget, TouchTargets};
use crate::zorder::ZList;
use crate::{HandlerError, LayerId, NodeId};

/// Work done by one [`Stage::render`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Layers whose surfaces were repainted because they were dirty.
    pub layers_redrawn: usize,
    /// Nodes drawn across all repainted layers.
    pub nodes_drawn: usize,
    /// Layers composited onto the display surface.
    pub layers_composited: usize,
    /// Size of the rebuilt touch-target index.
    pub touch_targets: usize,
}

/// Top-level container: z-ordered layers over one display surface.
///
/// Layers are kept sorted ascending by z. Nothing reaches the display until
/// [`Stage::render`] is called; the stage never schedules frames itself.
///
/// ## Example
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use kurbo::{Rect, Shape};
/// use quickdraw::{Layer, Node, Stage};
/// use quickdraw_surface::DisplayList;
///
/// let mut stage: Stage<DisplayList> = Stage::new(400, 300);
/// let mut layer = Layer::new("ui");
///
/// let clicks = Rc::new(Cell::new(0));
/// let mut button = Node::shape(Rect::new(10.0, 10.0, 110.0, 50.0).to_path(0.1));
/// let counter = clicks.clone();
/// button.set_on_click(move |_, _| counter.set(counter.get() + 1));
/// let button = layer.add(button);
/// stage.add(layer);
///
/// // Hit testing uses the touch targets built by the last render.
/// stage.render();
/// assert_eq!(stage.on_click(20.0, 20.0).unwrap(), Some(button));
/// assert_eq!(stage.on_click(200.0, 200.0).unwrap(), None);
/// assert_eq!(clicks.get(), 1);
/// ```
pub struct Stage<S> {
    display: S,
    layers: ZList<Layer<S>>,
    touch: TouchTargets,
    pointer: PointerState,
    hit_params: HitParams,
}

impl<S> core::fmt::Debug for Stage<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stage")
            .field("layers", &self.layers.as_slice())
            .field("touch_targets", &self.touch.as_slice().len())
            .field("pointer", &self.pointer)
            .field("hit_params", &self.hit_params)
            .finish_non_exhaustive()
    }
}

impl<S: Surface + Default> Stage<S> {
    /// Create a stage with a default display surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        let mut display = S::default();
        display.resize(width, height);
        Self::with_surface(display)
    }
}

impl<S: Surface> Stage<S> {
    /// Create a stage drawing onto `display`, keeping its current size.
    pub fn with_surface(display: S) -> Self {
        Self {
            display,
            layers: ZList::new(),
            touch: TouchTargets::default(),
            pointer: PointerState::default(),
            hit_params: HitParams::default(),
        }
    }

    /// Display width in pixels.
    pub fn width(&self) -> u32 {
        self.display.width()
    }

    /// Display height in pixels.
    pub fn height(&self) -> u32 {
        self.display.height()
    }

    /// The display surface, holding the last composited frame.
    pub fn display(&self) -> &S {
        &self.display
    }

    /// Parameters used by pointer hit tests.
    pub fn hit_params(&self) -> HitParams {
        self.hit_params
    }

    /// Replace the parameters used by pointer hit tests.
    pub fn set_hit_params(&mut self, params: HitParams) {
        self.hit_params = params;
    }

    /// Take ownership of `layer`, size its surface to the display, and insert
    /// it in z order.
    pub fn add(&mut self, mut layer: Layer<S>) -> LayerId {
        let id = layer.id();
        layer.resize_surface(self.display.width(), self.display.height());
        self.layers.insert(layer);
        id
    }

    /// Detach and return a layer. Its nodes stop being hit after the next render.
    pub fn remove(&mut self, id: LayerId) -> Option<Layer<S>> {
        self.layers.remove(id)
    }

    /// Layers in ascending z order.
    pub fn layers(&self) -> &[Layer<S>] {
        self.layers.as_slice()
    }

    /// Look up a layer.
    pub fn layer(&self, id: LayerId) -> Option<&Layer<S>> {
        self.layers.get(id)
    }

    /// Mutable access to a layer.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<LayerMut<'_, S>> {
        let idx = self.layers.position(id)?;
        Some(LayerMut::new(&mut self.layers, idx))
    }

    /// Touch targets as of the last render, topmost first.
    pub fn touch_targets(&self) -> &[TouchTarget] {
        self.touch.as_slice()
    }

    /// Draw a frame.
    ///
    /// Clears the display, then for each visible, non-empty layer in ascending
    /// z: repaints its surface if dirty, and composites the surface onto the
    /// display. Finally rebuilds the touch-target index.
    pub fn render(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        self.display.clear();
        for layer in self.layers.iter_mut() {
            if !layer.is_active() {
                continue;
            }
            if layer.is_dirty() {
                report.nodes_drawn += layer.redraw();
                report.layers_redrawn += 1;
            }
            self.display.blit(layer.surface());
            report.layers_composited += 1;
        }
        self.touch.rebuild(&self.layers);
        report.touch_targets = self.touch.as_slice().len();
        debug!(
            "rendered frame: {} layers redrawn ({} nodes), {} composited, {} touch targets",
            report.layers_redrawn,
            report.nodes_drawn,
            report.layers_composited,
            report.touch_targets
        );
        report
    }

    /// Dispatch a click at surface-local coordinates.
    ///
    /// Returns the node that was hit. See [`Stage::handle_pointer`].
    pub fn on_click(&mut self, x: f64, y: f64) -> Result<Option<NodeId>, HandlerError> {
        self.handle_pointer(PointerEvent::Click(Point::new(x, y)))
    }

    /// Dispatch pointer motion at surface-local coordinates.
    ///
    /// Returns the node under the pointer. See [`Stage::handle_pointer`].
    pub fn on_move(&mut self, x: f64, y: f64) -> Result<Option<NodeId>, HandlerError> {
        self.handle_pointer(PointerEvent::Move(Point::new(x, y)))
    }

    /// The pointer left the surface. Clears hover state without calling any
    /// handler.
    pub fn on_leave_canvas(&mut self) {
        self.pointer.leave_canvas();
        trace!("pointer left canvas");
    }

    /// Resolve `event` against the touch targets and run the resulting
    /// handlers.
    ///
    /// The first target containing the point wins. Handlers run in transition
    /// order (leave before enter) and each one is isolated: if one panics the
    /// rest still run, hover state stays consistent, and the first failure is
    /// returned as a [`HandlerError`].
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<NodeId>, HandlerError> {
        let Some(pt) = event.position() else {
            self.on_leave_canvas();
            return Ok(None);
        };
        let click = matches!(event, PointerEvent::Click(_));
        let hit = self.touch.resolve(&self.layers, pt, &self.hit_params);
        let invocations = self.pointer.resolve(click, hit);
        trace!(
            "{event:?} resolved to {:?}, {} handler(s)",
            self.pointer.current(),
            invocations.len()
        );

        let mut first_error = None;
        for inv in invocations {
            let Some(layer) = self
                .layers
                .iter_mut()
                .find(|layer| layer.node(inv.node).is_some())
            else {
                continue;
            };
            if let Err(err) = layer.invoke(inv.node, inv.kind, pt) {
                warn!("{err}");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(hit),
        }
    }

    #[cfg(test)]
    pub(crate) fn hovered(&self) -> Option<NodeId> {
        self.pointer.hovered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FillPriority, HandlerKind, Node, NodeMut};
    use kurbo::{BezPath, Rect, Shape};
    use peniko::Color;
    use quickdraw_surface::{Command, DisplayList, RecordedPaint};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(&'static str, HandlerKind)>>>;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
        Rect::new(x0, y0, x1, y1).to_path(0.1)
    }

    fn record(
        log: &Log,
        name: &'static str,
        kind: HandlerKind,
    ) -> impl FnMut(&mut NodeMut<'_>, Point) + 'static {
        let log = log.clone();
        move |_, _| log.borrow_mut().push((name, kind))
    }

    fn traced(mut node: Node, name: &'static str, log: &Log) -> Node {
        node.set_on_click(record(log, name, HandlerKind::Click));
        node.set_on_mouse_over(record(log, name, HandlerKind::MouseOver));
        node.set_on_mouse_move(record(log, name, HandlerKind::MouseMove));
        node.set_on_mouse_out(record(log, name, HandlerKind::MouseOut));
        node
    }

    fn solid_at(display: &DisplayList, x: f64, y: f64) -> Option<[u8; 4]> {
        match display.fill_at(Point::new(x, y)) {
            Some(Command::FillPath {
                paint: RecordedPaint::Solid(c),
                ..
            }) => Some(c.to_rgba8().to_u8_array()),
            _ => None,
        }
    }

    fn layer_order(stage: &Stage<DisplayList>) -> Vec<f64> {
        stage.layers().iter().map(Layer::z).collect()
    }

    #[test]
    fn add_binds_surface_size_and_sorts() {
        let mut stage: Stage<DisplayList> = Stage::new(400, 300);
        let top = stage.add(Layer::new("top").with_z(5.0));
        stage.add(Layer::new("bottom").with_z(1.0));
        stage.add(Layer::new("middle").with_z(3.0));
        assert_eq!(layer_order(&stage), vec![1.0, 3.0, 5.0]);
        let surface = stage.layer(top).unwrap().surface();
        assert_eq!((surface.width(), surface.height()), (400, 300));
    }

    #[test]
    fn layer_z_change_resorts_immediately() {
        let mut stage: Stage<DisplayList> = Stage::new(10, 10);
        let a = stage.add(Layer::new("a").with_z(1.0));
        let b = stage.add(Layer::new("b").with_z(2.0));
        {
            let mut layer = stage.layer_mut(a).unwrap();
            layer.set_z(3.0);
            assert_eq!(layer.id(), a);
        }
        let ids: Vec<LayerId> = stage.layers().iter().map(Layer::id).collect();
        assert_eq!(ids, vec![b, a]);
    }

    #[test]
    fn dirty_propagates_through_stage() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let s = layer.add(Node::shape(rect(0.0, 0.0, 10.0, 10.0)));
        let l = stage.add(layer);
        stage.render();
        assert!(!stage.layer(l).unwrap().is_dirty());

        stage
            .layer_mut(l)
            .unwrap()
            .node_mut(s)
            .unwrap()
            .set_stroke(Color::from_rgb8(1, 2, 3));
        assert!(stage.layer(l).unwrap().is_dirty());
    }

    #[test]
    fn second_render_without_changes_skips_redraw() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        layer.add(Node::shape(rect(0.0, 0.0, 10.0, 10.0)));
        layer.add(Node::shape(rect(20.0, 0.0, 30.0, 10.0)));
        let l = stage.add(layer);

        let first = stage.render();
        assert_eq!(first.layers_redrawn, 1);
        assert_eq!(first.nodes_drawn, 2);
        let clears = stage.layer(l).unwrap().surface().clear_count();

        let second = stage.render();
        assert_eq!(second.layers_redrawn, 0);
        assert_eq!(second.nodes_drawn, 0);
        assert_eq!(second.layers_composited, 1);
        assert_eq!(second.touch_targets, 2);
        assert_eq!(stage.layer(l).unwrap().surface().clear_count(), clears);
        // The display still shows the cached layer.
        assert_eq!(stage.display().commands().len(), 4);
    }

    #[test]
    fn higher_z_fill_wins_in_overlap() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        layer.add(
            Node::shape(rect(0.0, 0.0, 60.0, 60.0))
                .with_z(2.0)
                .with_fill(Color::from_rgb8(0, 0, 255)),
        );
        layer.add(
            Node::shape(rect(40.0, 40.0, 100.0, 100.0))
                .with_z(1.0)
                .with_fill(Color::from_rgb8(255, 0, 0)),
        );
        stage.add(layer);
        stage.render();
        assert_eq!(
            solid_at(stage.display(), 50.0, 50.0),
            Some([0, 0, 255, 255])
        );
        assert_eq!(
            solid_at(stage.display(), 80.0, 80.0),
            Some([255, 0, 0, 255])
        );
    }

    #[test]
    fn layers_composite_in_ascending_z() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut top = Layer::new("top").with_z(2.0);
        top.add(Node::shape(rect(0.0, 0.0, 50.0, 50.0)).with_fill(Color::from_rgb8(0, 255, 0)));
        let mut bottom = Layer::new("bottom").with_z(1.0);
        bottom.add(
            Node::shape(rect(0.0, 0.0, 50.0, 50.0))
                .with_z(100.0)
                .with_fill(Color::from_rgb8(255, 0, 0)),
        );
        stage.add(top);
        stage.add(bottom);
        stage.render();
        // Layer z beats node z across layers.
        assert_eq!(
            solid_at(stage.display(), 25.0, 25.0),
            Some([0, 255, 0, 255])
        );
    }

    #[test]
    fn pattern_priority_without_image_renders_solid() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let mut node = Node::shape(rect(0.0, 0.0, 10.0, 10.0)).with_fill(Color::from_rgb8(7, 8, 9));
        node.set_fill_priority(FillPriority::Pattern);
        layer.add(node);
        stage.add(layer);
        stage.render();
        assert_eq!(solid_at(stage.display(), 5.0, 5.0), Some([7, 8, 9, 255]));
    }

    #[test]
    fn pattern_priority_with_image_renders_pattern() {
        let image = quickdraw_surface::PatternImage::new(1, 1, vec![1_u8, 2, 3, 255]).unwrap();
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let mut node = Node::shape(rect(0.0, 0.0, 10.0, 10.0));
        node.set_fill_priority(FillPriority::Pattern);
        node.set_fill_pattern(Some(image.clone()));
        layer.add(node);
        stage.add(layer);
        stage.render();
        match stage.display().fill_at(Point::new(5.0, 5.0)) {
            Some(Command::FillPath {
                paint: RecordedPaint::Pattern(p),
                ..
            }) => assert!(p.ptr_eq(&image)),
            other => panic!("expected pattern fill, got {other:?}"),
        }
    }

    #[test]
    fn touch_index_orders_by_stacking_priority() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut low = Layer::new("low").with_z(1.0);
        let a = low.add(Node::shape(rect(0.0, 0.0, 1.0, 1.0)).with_z(1.0));
        let b = low.add(Node::shape(rect(0.0, 0.0, 1.0, 1.0)).with_z(2.0));
        low.add(Node::text("label", (0.0, 0.0)).with_z(3.0));
        low.add(Node::shape(rect(0.0, 0.0, 1.0, 1.0)).with_touchable(false));
        let mut high = Layer::new("high").with_z(2.0);
        let c = high.add(Node::shape(rect(0.0, 0.0, 1.0, 1.0)));
        let mut hidden = Layer::new("hidden").with_z(3.0);
        hidden.add(Node::shape(rect(0.0, 0.0, 1.0, 1.0)));
        hidden.set_visible(false);
        stage.add(low);
        stage.add(high);
        stage.add(hidden);
        stage.add(Layer::new("empty").with_z(4.0));

        stage.render();
        let order: Vec<NodeId> = stage.touch_targets().iter().map(|t| t.node).collect();
        assert_eq!(order, vec![c, b, a]);
    }

    #[test]
    fn hidden_layer_is_skipped_only_after_render() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let s = layer.add(Node::shape(rect(0.0, 0.0, 10.0, 10.0)));
        let l = stage.add(layer);
        stage.render();

        stage.layer_mut(l).unwrap().set_visible(false);
        // Still on screen and still hittable until the next render.
        assert_eq!(stage.display().commands().len(), 2);
        assert_eq!(stage.on_click(5.0, 5.0).unwrap(), Some(s));

        let report = stage.render();
        assert_eq!(report.layers_composited, 0);
        assert!(stage.display().commands().is_empty());
        assert_eq!(stage.on_click(5.0, 5.0).unwrap(), None);
    }

    #[test]
    fn overlapping_click_hits_topmost_only() {
        let log = Log::default();
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        layer.add(traced(Node::shape(rect(0.0, 0.0, 60.0, 60.0)).with_z(1.0), "a", &log));
        let b = layer.add(traced(Node::shape(rect(40.0, 40.0, 100.0, 100.0)).with_z(2.0), "b", &log));
        stage.add(layer);
        stage.render();

        assert_eq!(stage.on_click(50.0, 50.0).unwrap(), Some(b));
        assert_eq!(*log.borrow(), vec![("b", HandlerKind::Click)]);
    }

    #[test]
    fn hover_transitions_fire_in_order() {
        let log = Log::default();
        let mut stage: Stage<DisplayList> = Stage::new(200, 100);
        let mut layer = Layer::new("l");
        layer.add(traced(Node::shape(rect(0.0, 0.0, 50.0, 50.0)), "a", &log));
        layer.add(traced(Node::shape(rect(100.0, 0.0, 150.0, 50.0)), "b", &log));
        stage.add(layer);
        stage.render();

        stage.on_move(10.0, 10.0).unwrap();
        stage.on_move(20.0, 20.0).unwrap();
        stage.on_move(30.0, 30.0).unwrap();
        stage.on_move(110.0, 10.0).unwrap();
        stage.on_move(180.0, 80.0).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                ("a", HandlerKind::MouseOver),
                ("a", HandlerKind::MouseMove),
                ("a", HandlerKind::MouseMove),
                ("a", HandlerKind::MouseOut),
                ("b", HandlerKind::MouseOver),
                ("b", HandlerKind::MouseOut),
            ]
        );
        assert_eq!(stage.hovered(), None);
    }

    #[test]
    fn leaving_canvas_does_not_fire_mouse_out() {
        let log = Log::default();
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let a = layer.add(traced(Node::shape(rect(0.0, 0.0, 50.0, 50.0)), "a", &log));
        stage.add(layer);
        stage.render();

        stage.on_move(10.0, 10.0).unwrap();
        assert_eq!(stage.hovered(), Some(a));
        stage.on_leave_canvas();
        assert_eq!(stage.hovered(), None);
        assert_eq!(*log.borrow(), vec![("a", HandlerKind::MouseOver)]);

        assert_eq!(stage.handle_pointer(PointerEvent::LeaveCanvas).unwrap(), None);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn handler_can_restyle_its_node_for_next_frame() {
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let mut node = Node::shape(rect(0.0, 0.0, 50.0, 50.0)).with_fill(Color::from_rgb8(0, 0, 0));
        node.set_on_mouse_over(|n, _| n.set_fill(Color::from_rgb8(255, 255, 0)));
        layer.add(node);
        let l = stage.add(layer);
        stage.render();

        stage.on_move(10.0, 10.0).unwrap();
        assert!(stage.layer(l).unwrap().is_dirty());
        assert_eq!(solid_at(stage.display(), 10.0, 10.0), Some([0, 0, 0, 255]));

        let report = stage.render();
        assert_eq!(report.layers_redrawn, 1);
        assert_eq!(
            solid_at(stage.display(), 10.0, 10.0),
            Some([255, 255, 0, 255])
        );
    }

    #[test]
    fn panicking_handler_does_not_corrupt_state() {
        let log = Log::default();
        let mut stage: Stage<DisplayList> = Stage::new(200, 100);
        let mut layer = Layer::new("l");
        let mut a = traced(Node::shape(rect(0.0, 0.0, 50.0, 50.0)), "a", &log);
        a.set_on_mouse_out(|_, _| panic!("out failed"));
        let a = layer.add(a);
        let b = layer.add(traced(Node::shape(rect(100.0, 0.0, 150.0, 50.0)), "b", &log));
        stage.add(layer);
        stage.render();

        stage.on_move(10.0, 10.0).unwrap();
        let err = stage.on_move(110.0, 10.0).expect_err("mouse out panicked");
        assert_eq!(err.node, a);
        assert_eq!(err.kind, HandlerKind::MouseOut);
        // b's enter still ran and b is now hovered.
        assert_eq!(stage.hovered(), Some(b));
        assert_eq!(log.borrow().last(), Some(&("b", HandlerKind::MouseOver)));

        // Later frames and events are unaffected.
        stage.render();
        stage.on_move(120.0, 10.0).unwrap();
        assert_eq!(log.borrow().last(), Some(&("b", HandlerKind::MouseMove)));
    }

    #[test]
    fn removed_nodes_and_layers_age_out() {
        let log = Log::default();
        let mut stage: Stage<DisplayList> = Stage::new(100, 100);
        let mut layer = Layer::new("l");
        let a = layer.add(traced(Node::shape(rect(0.0, 0.0, 50.0, 50.0)), "a", &log));
        let l = stage.add(layer);
        stage.render();
        stage.on_move(10.0, 10.0).unwrap();

        // Removing the hovered node leaves a stale target and hover entry.
        let removed = stage.layer_mut(l).unwrap().remove(a).unwrap();
        assert_eq!(stage.touch_targets().len(), 1);
        assert_eq!(stage.on_move(10.0, 10.0).unwrap(), None);
        // The out handler of the removed node cannot be reached; nothing fires.
        assert_eq!(*log.borrow(), vec![("a", HandlerKind::MouseOver)]);
        assert_eq!(stage.hovered(), None);
        assert!(removed.parent_layer().is_none());

        stage.render();
        assert!(stage.touch_targets().is_empty());

        assert!(stage.remove(l).is_some());
        assert!(stage.remove(l).is_none());
        stage.render();
        assert!(stage.display().commands().is_empty());
    }

    #[test]
    fn end_to_end_scene() {
        let log = Log::default();
        let mut stage: Stage<DisplayList> = Stage::new(400, 300);
        let mut layer = Layer::new("L").with_z(1.0);
        let s = layer.add(traced(
            Node::shape(rect(50.0, 50.0, 150.0, 150.0))
                .with_z(1.0)
                .with_fill(Color::from_rgb8(0, 128, 0)),
            "s",
            &log,
        ));
        let t = layer.add(Node::text("hello", (60.0, 100.0)).with_z(2.0));
        stage.add(layer);
        stage.render();

        // S is drawn beneath T.
        let cmds = stage.display().commands();
        let s_fill = cmds
            .iter()
            .position(|c| matches!(c, Command::FillPath { .. }))
            .unwrap();
        let t_fill = cmds
            .iter()
            .position(|c| matches!(c, Command::FillText { .. }))
            .unwrap();
        assert!(s_fill < t_fill);
        assert!(matches!(
            stage.display().fill_at(Point::new(65.0, 97.0)),
            Some(Command::FillText { .. })
        ));

        // Text is excluded from the touch index.
        let targets: Vec<NodeId> = stage.touch_targets().iter().map(|t| t.node).collect();
        assert_eq!(targets, vec![s]);
        assert!(!targets.contains(&t));

        assert_eq!(stage.on_click(100.0, 100.0).unwrap(), Some(s));
        assert_eq!(*log.borrow(), vec![("s", HandlerKind::Click)]);

        // The click left S hovered, so a click outside fires its out handler.
        log.borrow_mut().clear();
        assert_eq!(stage.hovered(), Some(s));
        assert_eq!(stage.on_click(300.0, 250.0).unwrap(), None);
        assert_eq!(*log.borrow(), vec![("s", HandlerKind::MouseOut)]);
        assert_eq!(stage.hovered(), None);

        // With nothing hovered, another miss is silent.
        log.borrow_mut().clear();
        assert_eq!(stage.on_click(300.0, 250.0).unwrap(), None);
        assert!(log.borrow().is_empty());
    }
}
