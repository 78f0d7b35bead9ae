// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quickdraw: a retained-mode 2D scene graph over opaque drawing surfaces.
//!
//! A [`Stage`] owns z-ordered [`Layer`]s; each layer owns z-ordered [`Node`]s
//! (shapes or text) and draws them onto its own offscreen [`Surface`]. A call
//! to [`Stage::render`] repaints only the layers that changed since the last
//! frame, composites every visible layer onto the display in z order, and
//! rebuilds the index used to route pointer input.
//!
//! - Ordering is kept at mutation time: changing a node's or layer's z re-sorts
//!   its container immediately, so rendering and hit testing never sort.
//! - Dirty tracking is per layer. Mutating an attached node through [`NodeMut`]
//!   marks its layer dirty in the same call; detached nodes just hold values.
//! - Pointer input ([`Stage::on_click`], [`Stage::on_move`],
//!   [`Stage::on_leave_canvas`]) resolves to at most one node, the topmost
//!   touchable shape under the point, and fires click and hover handlers.
//!
//! The library never schedules frames. Hosts call [`Stage::render`] when they
//! want the display to catch up, typically once per animation frame.
//!
//! ## Key types
//!
//! - [`Stage`]: layers, the display surface, the touch index, and hover state.
//! - [`Layer`] / [`LayerMut`]: a z-ordered node group with one surface and one
//!   dirty flag.
//! - [`Node`] / [`NodeMut`]: a drawable with position, rotation, z, a
//!   [`NodeStyle`], and a [`NodeKind`] of [`Geometry`] or [`Text`].
//! - [`PreciseHitTest`] and [`HitParams`]: local-space hit tests on outlines.
//! - [`HandlerError`]: a handler panicked during dispatch.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Circle, Shape};
//! use peniko::Color;
//! use quickdraw::{Layer, Node, Stage};
//! use quickdraw_surface::DisplayList;
//!
//! let mut stage: Stage<DisplayList> = Stage::new(400, 300);
//! let mut layer = Layer::new("shapes");
//! let dot = layer.add(
//!     Node::shape(Circle::new((100.0, 100.0), 40.0).to_path(0.1))
//!         .with_fill(Color::from_rgb8(200, 30, 30)),
//! );
//! let layer = stage.add(layer);
//!
//! let first = stage.render();
//! assert_eq!(first.layers_redrawn, 1);
//!
//! // Nothing changed: the layer surface is reused.
//! assert_eq!(stage.render().layers_redrawn, 0);
//!
//! // Mutating through the stage dirties the layer.
//! let mut shapes = stage.layer_mut(layer).unwrap();
//! shapes.node_mut(dot).unwrap().set_fill(Color::from_rgb8(30, 200, 30));
//! assert!(shapes.is_dirty());
//! assert_eq!(stage.render().layers_redrawn, 1);
//!
//! assert_eq!(stage.on_move(100.0, 100.0).unwrap(), Some(dot));
//! ```

mod error;
mod hit;
mod id;
mod layer;
mod node;
mod pointer;
mod stage;
mod style;
mod touch;
mod zorder;

pub use error::HandlerError;
pub use hit::{HitParams, PreciseHitTest};
pub use id::{LayerId, NodeId};
pub use layer::{Layer, LayerMut};
pub use node::{Geometry, Handler, Node, NodeKind, NodeMut, Text};
pub use pointer::{HandlerKind, PointerEvent};
pub use stage::{FrameReport, Stage};
pub use style::{FillPriority, NodeStyle};
pub use touch::TouchTarget;

pub use quickdraw_surface::Surface;
