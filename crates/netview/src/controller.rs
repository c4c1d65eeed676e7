//! The diagram controller: runs the layout pipeline and feeds its result to a
//! view.

use log::{debug, info};

use netview_core::netlist::Netlist;

use crate::{
    config::LayoutConfig,
    error::NetviewError,
    layout::{ColumnPipeline, LayoutPipeline},
    view::DiagramView,
};

/// Operations a diagram controller exposes to its callers.
pub trait DiagramApi {
    /// Lays out `netlist` and binds the result to the view.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing pipeline stage, or of the view.
    /// The view is left untouched when a stage fails.
    fn redraw(&mut self, netlist: &Netlist) -> Result<(), NetviewError>;

    /// Asks the view to fit the current diagram into its viewport.
    ///
    /// # Errors
    ///
    /// Returns [`NetviewError::View`] if the view fails to re-render.
    fn fit_diagram_to_screen(&mut self) -> Result<(), NetviewError>;
}

/// Connects a [`LayoutPipeline`] to a [`DiagramView`].
///
/// ```
/// use netview::{
///     DiagramApi, DiagramController,
///     config::{LayoutConfig, StyleConfig},
///     netlist::{Net, Netlist, Node},
///     view::{Mount, SvgView},
/// };
///
/// let view = SvgView::new(Mount::Memory, &StyleConfig::default()).unwrap();
/// let mut controller = DiagramController::new(view, &LayoutConfig::default());
///
/// let netlist = Netlist::new(
///     vec![Node::new("a"), Node::new("b")],
///     vec![Net::new("a".parse().unwrap(), vec!["b".parse().unwrap()])],
/// );
/// controller.redraw(&netlist).unwrap();
/// controller.fit_diagram_to_screen().unwrap();
///
/// assert_eq!(controller.view().layout().unwrap().links().len(), 1);
/// ```
#[derive(Debug)]
pub struct DiagramController<V, P = ColumnPipeline> {
    view: V,
    pipeline: P,
}

impl<V: DiagramView> DiagramController<V> {
    /// Creates a controller using the standard [`ColumnPipeline`].
    pub fn new(view: V, config: &LayoutConfig) -> Self {
        Self::with_pipeline(view, ColumnPipeline::new(config.clone()))
    }
}

impl<V: DiagramView, P: LayoutPipeline> DiagramController<V, P> {
    /// Creates a controller with a custom pipeline.
    pub fn with_pipeline(view: V, pipeline: P) -> Self {
        debug!(mount:% = view.mount(); "Creating diagram controller");
        Self { view, pipeline }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Consumes the controller, returning its view.
    pub fn into_view(self) -> V {
        self.view
    }
}

impl<V: DiagramView, P: LayoutPipeline> DiagramApi for DiagramController<V, P> {
    fn redraw(&mut self, netlist: &Netlist) -> Result<(), NetviewError> {
        info!(
            nodes = netlist.nodes().len(),
            nets = netlist.nets().len();
            "Redrawing diagram"
        );

        let layout = self.pipeline.run(netlist)?;
        self.view.bind_data(&layout)?;

        debug!(mount:% = self.view.mount(); "Diagram redrawn");
        Ok(())
    }

    fn fit_diagram_to_screen(&mut self) -> Result<(), NetviewError> {
        debug!(mount:% = self.view.mount(); "Fitting diagram to screen");
        self.view.fit_to_screen()?;
        Ok(())
    }
}
