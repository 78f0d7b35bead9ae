// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer hover and click state machine.
//!
//! The machine only tracks identities. Hit resolution happens in the stage,
//! which feeds the resolved node (or `None`) into [`PointerState::resolve`] and
//! then runs the returned invocations in order.
//!
//! ## Transitions
//!
//! | event | resolved | previous   | invocations                    |
//! |-------|----------|------------|--------------------------------|
//! | click | `n`      | any        | `n.click`                      |
//! | move  | `n`      | none       | `n.over`                       |
//! | move  | `n`      | `p != n`   | `p.out`, then `n.over`         |
//! | move  | `n`      | `n`        | `n.move`                       |
//! | any   | none     | `p`        | `p.out`, hover cleared         |
//! | leave | n/a      | any        | none, hover cleared            |
//!
//! After every resolved event the resolved node becomes the hovered node,
//! including clicks. Leaving the canvas clears hover without an `out`
//! invocation, unlike moving into empty space.

use kurbo::Point;
use smallvec::SmallVec;

use crate::NodeId;

/// A pointer event in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// A click at a point.
    Click(Point),
    /// Pointer motion to a point.
    Move(Point),
    /// The pointer left the surface.
    LeaveCanvas,
}

impl PointerEvent {
    /// Location of the event, if it has one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Click(pt) | Self::Move(pt) => Some(*pt),
            Self::LeaveCanvas => None,
        }
    }
}

/// Which interaction handler of a node is invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// `on_click`.
    Click,
    /// `on_mouse_over`: the pointer entered the node.
    MouseOver,
    /// `on_mouse_move`: the pointer moved within the node.
    MouseMove,
    /// `on_mouse_out`: the pointer left the node.
    MouseOut,
}

/// One handler call produced by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) node: NodeId,
    pub(crate) kind: HandlerKind,
}

impl Invocation {
    fn new(node: NodeId, kind: HandlerKind) -> Self {
        Self { node, kind }
    }
}

pub(crate) type Invocations = SmallVec<[Invocation; 2]>;

/// Hover state: the node hovered as of the last resolved event, and the node
/// resolved by the event in progress.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PointerState {
    previous: Option<NodeId>,
    current: Option<NodeId>,
}

impl PointerState {
    /// Apply a click or move whose hit test resolved to `hit`.
    pub(crate) fn resolve(&mut self, click: bool, hit: Option<NodeId>) -> Invocations {
        let mut out = Invocations::new();
        self.current = hit;
        match hit {
            Some(node) => {
                if click {
                    out.push(Invocation::new(node, HandlerKind::Click));
                } else {
                    match self.previous {
                        None => out.push(Invocation::new(node, HandlerKind::MouseOver)),
                        Some(prev) if prev != node => {
                            out.push(Invocation::new(prev, HandlerKind::MouseOut));
                            out.push(Invocation::new(node, HandlerKind::MouseOver));
                        }
                        Some(_) => out.push(Invocation::new(node, HandlerKind::MouseMove)),
                    }
                }
                self.previous = self.current;
            }
            None => {
                if let Some(prev) = self.previous.take() {
                    out.push(Invocation::new(prev, HandlerKind::MouseOut));
                }
            }
        }
        out
    }

    /// The pointer left the surface: forget hover state silently.
    pub(crate) fn leave_canvas(&mut self) {
        self.previous = None;
        self.current = None;
    }

    #[cfg(test)]
    pub(crate) fn hovered(&self) -> Option<NodeId> {
        self.previous
    }

    pub(crate) fn current(&self) -> Option<NodeId> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(inv: &Invocations) -> Vec<(NodeId, HandlerKind)> {
        inv.iter().map(|i| (i.node, i.kind)).collect()
    }

    #[test]
    fn enter_move_leave() {
        let a = NodeId::next();
        let mut state = PointerState::default();

        let inv = state.resolve(false, Some(a));
        assert_eq!(kinds(&inv), vec![(a, HandlerKind::MouseOver)]);
        assert_eq!(state.hovered(), Some(a));

        let inv = state.resolve(false, Some(a));
        assert_eq!(kinds(&inv), vec![(a, HandlerKind::MouseMove)]);

        let inv = state.resolve(false, None);
        assert_eq!(kinds(&inv), vec![(a, HandlerKind::MouseOut)]);
        assert_eq!(state.hovered(), None);
        assert_eq!(state.current(), None);
    }

    #[test]
    fn crossing_emits_out_before_over() {
        let a = NodeId::next();
        let b = NodeId::next();
        let mut state = PointerState::default();
        state.resolve(false, Some(a));

        let inv = state.resolve(false, Some(b));
        assert_eq!(
            kinds(&inv),
            vec![(a, HandlerKind::MouseOut), (b, HandlerKind::MouseOver)]
        );
        assert_eq!(state.hovered(), Some(b));
    }

    #[test]
    fn click_updates_hover_without_hover_calls() {
        let a = NodeId::next();
        let b = NodeId::next();
        let mut state = PointerState::default();
        state.resolve(false, Some(a));

        let inv = state.resolve(true, Some(b));
        assert_eq!(kinds(&inv), vec![(b, HandlerKind::Click)]);
        assert_eq!(state.hovered(), Some(b));

        // Next move within b is a plain move, since b is now the hovered node.
        let inv = state.resolve(false, Some(b));
        assert_eq!(kinds(&inv), vec![(b, HandlerKind::MouseMove)]);
    }

    #[test]
    fn click_on_empty_space_while_hovering_fires_out() {
        let a = NodeId::next();
        let mut state = PointerState::default();
        state.resolve(false, Some(a));
        let inv = state.resolve(true, None);
        assert_eq!(kinds(&inv), vec![(a, HandlerKind::MouseOut)]);
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn miss_without_hover_is_silent() {
        let mut state = PointerState::default();
        assert!(state.resolve(false, None).is_empty());
        assert!(state.resolve(true, None).is_empty());
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn leave_canvas_clears_without_out() {
        let a = NodeId::next();
        let mut state = PointerState::default();
        state.resolve(false, Some(a));
        state.leave_canvas();
        assert_eq!(state.hovered(), None);
        assert_eq!(state.current(), None);

        // Re-entering the same node counts as a fresh enter.
        let inv = state.resolve(false, Some(a));
        assert_eq!(kinds(&inv), vec![(a, HandlerKind::MouseOver)]);
    }
}
