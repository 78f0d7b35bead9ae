// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font selection and text measurement results.

use std::fmt;

/// A resolved font: pixel size plus typeface family.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Font size in pixels.
    pub size: f64,
    /// Typeface family name, for example `sans-serif`.
    pub family: String,
}

impl Font {
    /// Create a font from a pixel size and family name.
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(10.0, "sans-serif")
    }
}

/// Formats as CSS font shorthand, e.g. `16px serif`.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Measured extents of a run of text, relative to its baseline origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Distance from the baseline up to the top of the glyph boxes.
    pub ascent: f64,
    /// Distance from the baseline down to the bottom of the glyph boxes.
    pub descent: f64,
}

impl TextMetrics {
    /// Total line height, `ascent + descent`.
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}
