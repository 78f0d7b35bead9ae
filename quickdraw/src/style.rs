// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint state carried by every node.

use peniko::Color;
use quickdraw_surface::{Paint, PatternImage, StrokeStyle};

/// Selects between a node's solid fill color and its pattern image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillPriority {
    /// Fill with [`NodeStyle::fill`].
    #[default]
    Color,
    /// Fill with [`NodeStyle::fill_pattern`], falling back to the solid color
    /// when no pattern is set.
    Pattern,
}

/// Fill and stroke paint for a node.
#[derive(Clone, Debug)]
pub struct NodeStyle {
    /// Solid fill color.
    pub fill: Color,
    /// Outline color. Only shapes are stroked.
    pub stroke: Color,
    /// Which fill source wins.
    pub fill_priority: FillPriority,
    /// Optional repeating fill image.
    pub fill_pattern: Option<PatternImage>,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            fill: Color::from_rgb8(0, 0, 0),
            stroke: Color::from_rgb8(0, 0, 0),
            fill_priority: FillPriority::Color,
            fill_pattern: None,
        }
    }
}

impl NodeStyle {
    /// Resolve the paint used for fills.
    ///
    /// A pattern is used only when [`FillPriority::Pattern`] is selected and an
    /// image is present; otherwise the solid color is used.
    pub fn fill_paint(&self) -> Paint<'_> {
        match (self.fill_priority, &self.fill_pattern) {
            (FillPriority::Pattern, Some(image)) => Paint::Pattern(image),
            _ => Paint::Solid(self.fill),
        }
    }

    /// Outline paint at the given line width.
    pub fn stroke_style(&self, width: f64) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke,
            width,
        }
    }
}
