//! Netview - column layout and SVG rendering of component netlists.
//!
//! A netlist lists nodes with input and output ports and the nets connecting
//! them. Netview places the nodes in columns following the direction of the
//! nets and renders the result as SVG.
//!
//! The [`DiagramController`] drives a redraw: it runs the [`layout`] pipeline
//! on an explicit [`Netlist`](netlist::Netlist) and binds the resulting
//! [`DiagramLayout`](layout::DiagramLayout) to a [`view::DiagramView`].
//! [`DiagramBuilder`] wraps the common parse-and-render path.

pub mod config;
pub mod layout;
pub mod view;

mod controller;
mod error;
mod export;

pub use netview_core::{color, draw, geometry, identifier, netlist};

pub use controller::{DiagramApi, DiagramController};
pub use error::NetviewError;

use log::{debug, info, trace};

use config::AppConfig;
use layout::{ColumnPipeline, DiagramLayout, LayoutPipeline};
use netlist::Netlist;
use view::{Mount, SvgView};

/// Builder for parsing and rendering netlist diagrams.
///
/// # Examples
///
/// ```
/// use netview::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
///     [[nodes]]
///     id = "a"
///     outputs = ["q"]
///
///     [[nodes]]
///     id = "b"
///     inputs = ["d"]
///
///     [[nets]]
///     source = "a.q"
///     targets = ["b.d"]
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let netlist = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&netlist).expect("Failed to render");
///
/// assert!(svg.contains("data-node=\"b\""));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a netlist document.
    ///
    /// # Errors
    ///
    /// Returns [`NetviewError::Parse`] carrying the source and every diagnostic
    /// when the document is malformed.
    pub fn parse(&self, source: &str) -> Result<Netlist, NetviewError> {
        info!("Parsing netlist");

        let netlist = netview_netlist::parse(source)
            .map_err(|err| NetviewError::new_parse_error(err, source))?;

        debug!("Netlist parsed successfully");
        trace!(netlist:?; "Parsed netlist");

        Ok(netlist)
    }

    /// Lay out a netlist without rendering it.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing pipeline stage.
    pub fn layout(&self, netlist: &Netlist) -> Result<DiagramLayout, NetviewError> {
        ColumnPipeline::new(self.config.layout().clone()).run(netlist)
    }

    /// Render a netlist to an SVG string, fitted to the configured viewport.
    ///
    /// # Errors
    ///
    /// Returns [`NetviewError`] for inconsistent netlists, unresolvable links
    /// or an invalid style.
    pub fn render_svg(&self, netlist: &Netlist) -> Result<String, NetviewError> {
        let view = SvgView::new(Mount::Memory, self.config.style())?;
        let mut controller = DiagramController::new(view, self.config.layout());

        controller.redraw(netlist)?;
        controller.fit_diagram_to_screen()?;

        info!("SVG rendered successfully");
        Ok(controller.into_view().into_document())
    }
}
