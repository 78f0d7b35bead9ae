// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by pointer dispatch.

use std::any::Any;

use crate::{HandlerKind, NodeId};

/// An interaction handler panicked while being dispatched.
///
/// The panic is caught at the handler boundary. Hover state has already been
/// updated when this is returned, and the remaining handlers of the same
/// transition still ran.
#[derive(Debug, thiserror::Error)]
#[error("{kind:?} handler of node {} panicked: {message}", .node.get())]
pub struct HandlerError {
    /// Node whose handler failed.
    pub node: NodeId,
    /// Which handler failed.
    pub kind: HandlerKind,
    /// Panic message, when the payload was a string.
    pub message: String,
}

impl HandlerError {
    pub(crate) fn from_panic(node: NodeId, kind: HandlerKind, payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_owned()
        };
        Self {
            node,
            kind,
            message,
        }
    }
}
