//! Line styling for node outlines and links.
//!
//! A [`StrokeDefinition`] bundles what the `stroke-*` attributes of an SVG
//! element need; [`apply_stroke!`](crate::apply_stroke!) writes them out.

use std::{convert::Infallible, str::FromStr};

use serde::Deserialize;

use crate::color::Color;

/// Dash pattern of a line.
///
/// Read from configuration as `"solid"`, `"dashed"`, `"dotted"` or a raw SVG
/// dasharray such as `"6,2"`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            pattern => Self::Custom(pattern.to_string()),
        })
    }
}

impl From<String> for StrokeStyle {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

impl StrokeStyle {
    /// The `stroke-dasharray` value, `None` for a solid line.
    pub fn dasharray(&self) -> Option<&str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
            Self::Dotted => Some("2,3"),
            Self::Custom(pattern) => Some(pattern),
        }
    }
}

/// Corner shape where path segments meet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    /// Sharp corners, used for node boxes.
    #[default]
    Miter,
    /// Rounded corners, used for orthogonal link paths.
    Round,
}

impl StrokeJoin {
    pub fn svg_value(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
        }
    }
}

/// Color, width, dash pattern and corner shape of a line.
///
/// ```
/// use netview_core::color::Color;
/// use netview_core::draw::{StrokeDefinition, StrokeJoin, StrokeStyle};
///
/// let feedback = StrokeDefinition::new(Color::new("steelblue").unwrap(), 1.5)
///     .with_join(StrokeJoin::Round)
///     .with_style(StrokeStyle::Dashed);
/// assert_eq!(feedback.style().dasharray(), Some("6,4"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// A solid line with mitered corners.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            join: StrokeJoin::Miter,
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }
}

/// Sets the `stroke-*` attributes of an SVG element from a [`StrokeDefinition`].
///
/// ```
/// use netview_core::{color::Color, draw::StrokeDefinition};
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::default(), 2.0);
/// let path = svg_element::Path::new().set("d", "M 0 0 L 10 0");
/// let path = netview_core::apply_stroke!(path, &stroke);
/// assert!(path.to_string().contains("stroke-width=\"2\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linejoin", stroke.join().svg_value());

        if let Some(dasharray) = stroke.style().dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
