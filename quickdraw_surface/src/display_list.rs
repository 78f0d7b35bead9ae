// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless surface that records drawing commands.

use kurbo::{Affine, BezPath, Point, Rect, Shape};
use peniko::Color;

use crate::{Font, Paint, PatternImage, StrokeStyle, Surface, TextMetrics};

/// Owned copy of a [`Paint`], as stored in a recorded command.
#[derive(Clone, Debug)]
pub enum RecordedPaint {
    /// A single color.
    Solid(Color),
    /// A repeating image.
    Pattern(PatternImage),
}

impl From<&Paint<'_>> for RecordedPaint {
    fn from(paint: &Paint<'_>) -> Self {
        match paint {
            Paint::Solid(color) => Self::Solid(*color),
            Paint::Pattern(image) => Self::Pattern((*image).clone()),
        }
    }
}

/// One recorded drawing operation, in surface coordinates.
///
/// The transform active at record time is already applied.
#[derive(Clone, Debug)]
pub enum Command {
    /// A filled path.
    FillPath {
        /// Path after transformation.
        path: BezPath,
        /// Fill paint.
        paint: RecordedPaint,
    },
    /// A stroked path.
    StrokePath {
        /// Path after transformation.
        path: BezPath,
        /// Outline color.
        color: Color,
        /// Line width.
        width: f64,
    },
    /// A run of text.
    FillText {
        /// The text content.
        text: String,
        /// Baseline origin after transformation.
        origin: Point,
        /// Axis-aligned box covering the transformed glyph extents.
        bounds: Rect,
        /// Font the text was drawn with.
        font: Font,
        /// Fill paint.
        paint: RecordedPaint,
    },
}

impl Command {
    /// Whether the painted interior of this command covers `pt`.
    ///
    /// Strokes never report coverage.
    pub fn covers(&self, pt: Point) -> bool {
        match self {
            Self::FillPath { path, .. } => path.contains(pt),
            Self::FillText { bounds, .. } => bounds.contains(pt),
            Self::StrokePath { .. } => false,
        }
    }
}

/// Em-relative glyph proportions used by [`DisplayList`] to measure text.
///
/// A display list has no font data, so every glyph is assumed to have the same
/// advance.
#[derive(Clone, Copy, Debug)]
pub struct GlyphMetrics {
    /// Advance per character, as a fraction of the font size.
    pub advance: f64,
    /// Ascent as a fraction of the font size.
    pub ascent: f64,
    /// Descent as a fraction of the font size.
    pub descent: f64,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            ascent: 0.8,
            descent: 0.2,
        }
    }
}

/// A [`Surface`] that records commands in paint order.
///
/// Compositing another display list appends its commands, so the display
/// surface of a stage ends up holding the full frame in back-to-front order.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    width: u32,
    height: u32,
    transform: Affine,
    commands: Vec<Command>,
    glyphs: GlyphMetrics,
    clears: u64,
}

impl DisplayList {
    /// Create an empty display list of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Replace the glyph proportions used for text measurement.
    pub fn with_glyph_metrics(mut self, glyphs: GlyphMetrics) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Recorded commands, back to front.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of times [`Surface::clear`] has been called.
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Return the topmost command whose interior covers `pt`.
    pub fn fill_at(&self, pt: Point) -> Option<&Command> {
        self.commands.iter().rev().find(|c| c.covers(pt))
    }
}

impl Surface for DisplayList {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.commands.clear();
        }
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint<'_>) {
        let mut path = path.clone();
        path.apply_affine(self.transform);
        self.commands.push(Command::FillPath {
            path,
            paint: paint.into(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &StrokeStyle) {
        let mut path = path.clone();
        path.apply_affine(self.transform);
        self.commands.push(Command::StrokePath {
            path,
            color: stroke.color,
            width: stroke.width,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, paint: &Paint<'_>) {
        let metrics = self.measure_text(text, font);
        let local = Rect::new(
            origin.x,
            origin.y - metrics.ascent,
            origin.x + metrics.width,
            origin.y + metrics.descent,
        );
        self.commands.push(Command::FillText {
            text: text.into(),
            origin: self.transform * origin,
            bounds: self.transform.transform_rect_bbox(local),
            font: font.clone(),
            paint: paint.into(),
        });
    }

    fn measure_text(&self, text: &str, font: &Font) -> TextMetrics {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Character counts stay far below f64 mantissa range."
        )]
        let chars = text.chars().count() as f64;
        TextMetrics {
            width: chars * self.glyphs.advance * font.size,
            ascent: self.glyphs.ascent * font.size,
            descent: self.glyphs.descent * font.size,
        }
    }

    fn blit(&mut self, source: &Self) {
        self.commands.extend(source.commands.iter().cloned());
    }
}
