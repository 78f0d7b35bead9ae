// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke descriptions passed to a [`Surface`](crate::Surface).

use std::sync::Arc;

use peniko::Color;

/// An RGBA8 image used as a repeating fill pattern.
///
/// Pixel data is shared, so cloning a pattern is cheap.
#[derive(Clone)]
pub struct PatternImage {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl PatternImage {
    /// Wrap non-premultiplied RGBA8 pixels in row-major order.
    ///
    /// Returns `None` when either dimension is zero or `pixels` does not hold
    /// exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Option<Self> {
        let pixels = pixels.into();
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True if both patterns share the same pixel buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl core::fmt::Debug for PatternImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PatternImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Paint used for fills.
#[derive(Clone, Copy, Debug)]
pub enum Paint<'a> {
    /// A single color.
    Solid(Color),
    /// An image tiled in both directions from the surface origin.
    Pattern(&'a PatternImage),
}

/// Outline paint for strokes.
#[derive(Clone, Copy, Debug)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Line width in surface units.
    pub width: f64,
}
