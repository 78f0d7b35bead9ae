// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quickdraw Surface: the drawable-surface seam under the Quickdraw scene graph.
//!
//! A [`Surface`] is an opaque, immediate-mode 2D raster target. The scene graph
//! never rasterizes anything itself; it clears surfaces, sets a transform, issues
//! fill/stroke/text commands, measures text, and composites one surface onto
//! another. Hosts bind this trait to whatever they draw with (a canvas, a CPU
//! rasterizer, a GPU texture).
//!
//! ## Key types
//!
//! - [`Surface`]: the drawing operations the scene graph relies on.
//! - [`Paint`]: what a fill uses, either a solid [`Color`] or a repeating [`PatternImage`].
//! - [`StrokeStyle`]: outline color and width.
//! - [`Font`] and [`TextMetrics`]: text resolution and measurement.
//! - [`DisplayList`]: a headless surface that records commands instead of
//!   rasterizing. It answers "which fill is on top at this point" queries, which
//!   makes compositing order observable in tests and tools.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Affine, BezPath, Point, Rect, Shape};
//! use peniko::Color;
//! use quickdraw_surface::{Command, DisplayList, Paint, Surface};
//!
//! let mut surface = DisplayList::new(100, 100);
//! surface.set_transform(Affine::IDENTITY);
//! let path = Rect::new(10.0, 10.0, 50.0, 50.0).to_path(0.1);
//! surface.fill_path(&path, &Paint::Solid(Color::from_rgb8(255, 0, 0)));
//!
//! assert!(matches!(surface.fill_at(Point::new(20.0, 20.0)), Some(Command::FillPath { .. })));
//! assert!(surface.fill_at(Point::new(80.0, 80.0)).is_none());
//! ```

mod display_list;
mod paint;
mod text;

pub use display_list::{Command, DisplayList, GlyphMetrics, RecordedPaint};
pub use paint::{Paint, PatternImage, StrokeStyle};
pub use peniko::Color;
pub use text::{Font, TextMetrics};

use kurbo::{Affine, BezPath, Point};

/// An immediate-mode 2D drawing target.
///
/// Every drawing call is interpreted through the transform most recently set
/// with [`Surface::set_transform`]. [`Surface::clear`] erases pixels but keeps
/// the transform.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Resize the surface. Existing contents may be discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Erase the whole surface to transparent.
    fn clear(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Fill the interior of `path`.
    fn fill_path(&mut self, path: &BezPath, paint: &Paint<'_>);

    /// Stroke the outline of `path`.
    fn stroke_path(&mut self, path: &BezPath, stroke: &StrokeStyle);

    /// Draw `text` with its alphabetic baseline starting at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint<'_>);

    /// Measure `text` as it would be drawn with `font`.
    fn measure_text(&self, text: &str, font: &Font) -> TextMetrics;

    /// Copy the full extent of `source` onto this surface at the origin,
    /// composited over what is already there.
    fn blit(&mut self, source: &Self)
    where
        Self: Sized;
}
