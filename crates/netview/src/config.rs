//! Configuration types for Netview diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be read
//! from a TOML file. Every field is optional in the file and falls back to the
//! default shown on its accessor.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Text metrics and spacing used by the layout pipeline.
//! - [`StyleConfig`] - Colors, stroke width and viewport used by the SVG view.
//!
//! # Example
//!
//! ```
//! # use netview::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     column_spacing = 120
//!
//!     [style]
//!     background_color = "white"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().column_spacing(), 120.0);
//! assert_eq!(config.layout().row_spacing(), 30.0);
//! assert!(config.style().background_color().unwrap().is_some());
//! ```

use serde::Deserialize;

use netview_core::{color::Color, draw::StrokeStyle};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Text metrics and spacing used to size and place nodes.
///
/// Text is measured as `characters * char_width`; there is no font shaping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    char_width: f32,
    node_padding: f32,
    port_gap_chars: usize,
    min_column_width: f32,
    column_spacing: f32,
    row_spacing: f32,
    header_height: f32,
    port_height: f32,
    min_node_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            node_padding: 10.0,
            port_gap_chars: 2,
            min_column_width: 60.0,
            column_spacing: 80.0,
            row_spacing: 30.0,
            header_height: 24.0,
            port_height: 18.0,
            min_node_height: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Width of one character of label or port text. Default `7.0`.
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// Horizontal padding on each side of a node's text. Default `10.0`.
    pub fn node_padding(&self) -> f32 {
        self.node_padding
    }

    /// Characters kept free between an input and an output port name. Default `2`.
    pub fn port_gap_chars(&self) -> usize {
        self.port_gap_chars
    }

    /// Lower bound for the column width. Default `60.0`.
    pub fn min_column_width(&self) -> f32 {
        self.min_column_width
    }

    /// Horizontal gap between two columns. Default `80.0`.
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Vertical gap between two nodes of a column. Default `30.0`.
    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    /// Height of the label header of a node. Default `24.0`.
    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    /// Height of one port row. Default `18.0`.
    pub fn port_height(&self) -> f32 {
        self.port_height
    }

    /// Lower bound for the node height. Default `40.0`.
    pub fn min_node_height(&self) -> f32 {
        self.min_node_height
    }

    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn with_node_padding(mut self, node_padding: f32) -> Self {
        self.node_padding = node_padding;
        self
    }

    pub fn with_min_column_width(mut self, min_column_width: f32) -> Self {
        self.min_column_width = min_column_width;
        self
    }

    pub fn with_column_spacing(mut self, column_spacing: f32) -> Self {
        self.column_spacing = column_spacing;
        self
    }

    pub fn with_row_spacing(mut self, row_spacing: f32) -> Self {
        self.row_spacing = row_spacing;
        self
    }
}

/// Visual styling of rendered diagrams.
///
/// Colors are kept as strings and parsed on access so that a bad color is
/// reported by the view that uses it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    background_color: Option<String>,
    node_fill_color: String,
    link_color: String,
    link_width: f32,
    feedback_link_style: StrokeStyle,
    viewport_width: f32,
    viewport_height: f32,
    fit_margin: f32,
    max_zoom: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            node_fill_color: "#f5f7fa".to_string(),
            link_color: "#1f2933".to_string(),
            link_width: 1.5,
            feedback_link_style: StrokeStyle::Dashed,
            viewport_width: 1200.0,
            viewport_height: 800.0,
            fit_margin: 20.0,
            max_zoom: 2.0,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed fill [`Color`] of node boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn node_fill_color(&self) -> Result<Color, String> {
        Color::new(&self.node_fill_color)
            .map_err(|err| format!("Invalid node fill color in config: {err}"))
    }

    /// Returns the parsed [`Color`] of links and node borders.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn link_color(&self) -> Result<Color, String> {
        Color::new(&self.link_color).map_err(|err| format!("Invalid link color in config: {err}"))
    }

    /// Stroke width of links. Default `1.5`.
    pub fn link_width(&self) -> f32 {
        self.link_width
    }

    /// Dash pattern of links that run back to an earlier or the same column.
    /// Default `"dashed"`.
    pub fn feedback_link_style(&self) -> &StrokeStyle {
        &self.feedback_link_style
    }

    /// Width of the rendered document. Default `1200.0`.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Height of the rendered document. Default `800.0`.
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Space kept around the content when fitting it to the viewport. Default `20.0`.
    pub fn fit_margin(&self) -> f32 {
        self.fit_margin
    }

    /// Largest scale fit-to-screen may apply. Default `2.0`.
    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_link_color(mut self, color: impl Into<String>) -> Self {
        self.link_color = color.into();
        self
    }

    pub fn with_feedback_link_style(mut self, style: StrokeStyle) -> Self {
        self.feedback_link_style = style;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: f32) -> Self {
        self.max_zoom = max_zoom;
        self
    }
}
