//! Diagram views: the targets a [`DiagramLayout`] is bound to.
//!
//! A view is created once for a [`Mount`] and receives a new layout on every
//! redraw. [`SvgView`] keeps its viewport transform across rebinds, so a
//! redraw does not undo an earlier fit-to-screen.

mod svg;

pub use svg::SvgView;

use std::{fmt, path::PathBuf};

use thiserror::Error;

use netview_core::geometry::Point;

use crate::layout::DiagramLayout;

/// Errors raised by diagram views.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("invalid style: {0}")]
    Style(String),

    #[error("failed to write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where a view puts its rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mount {
    /// Keep the output in memory only.
    Memory,
    /// Write the output to a file after every render.
    File(PathBuf),
}

impl Mount {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "<memory>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Scale and translation applied to the diagram content inside the viewport.
///
/// Content coordinates are scaled first, then translated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    scale: f32,
    translate: Point,
}

impl Transform {
    pub fn new(scale: f32, translate: Point) -> Self {
        Self { scale, translate }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Maps a content point to viewport coordinates.
    pub fn apply(&self, point: Point) -> Point {
        point.scale(self.scale).add_point(self.translate)
    }

    /// Returns the value of an SVG `transform` attribute.
    pub fn to_svg_value(&self) -> String {
        format!(
            "translate({} {}) scale({})",
            self.translate.x(),
            self.translate.y(),
            self.scale
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(1.0, Point::default())
    }
}

/// A rendering target for diagram layouts.
pub trait DiagramView {
    /// Returns where the view renders to.
    fn mount(&self) -> &Mount;

    /// Replaces the displayed diagram with `layout`.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the diagram cannot be rendered or written.
    fn bind_data(&mut self, layout: &DiagramLayout) -> Result<(), ViewError>;

    /// Rescales and pans the view so the whole diagram is visible.
    ///
    /// Only the presentation changes; the bound layout is left as is.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the diagram cannot be rendered or written.
    fn fit_to_screen(&mut self) -> Result<(), ViewError>;
}
