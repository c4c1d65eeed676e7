use log::{debug, info};

use netview_core::netlist::{Link, Net, Netlist, Node, UnresolvedLink};

use super::{
    ConsistencyError, DiagramLayout, LayoutError, check_data_consistency, components_to_columns,
    find_column_width, generate_links, resolve_nodes_in_links,
};
use crate::{config::LayoutConfig, error::NetviewError};

/// The stages that turn a netlist into a [`DiagramLayout`].
///
/// Implementors provide the five stages; [`LayoutPipeline::run`] calls them in
/// order and stops at the first failing stage.
pub trait LayoutPipeline {
    fn column_width(&self, nodes: &[Node]) -> f32;

    fn check_consistency(&self, nodes: &[Node], nets: &[Net]) -> Result<(), ConsistencyError>;

    fn generate_links(&self, nets: &[Net]) -> Vec<UnresolvedLink>;

    fn resolve_links(
        &self,
        nodes: &[Node],
        links: &[UnresolvedLink],
    ) -> Result<Vec<Link>, LayoutError>;

    fn assign_columns(&self, nodes: &[Node], links: &[Link], column_width: f32) -> DiagramLayout;

    /// Runs every stage on `netlist`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage; later stages do not run.
    fn run(&self, netlist: &Netlist) -> Result<DiagramLayout, NetviewError> {
        let nodes = netlist.nodes();

        let column_width = self.column_width(nodes);
        self.check_consistency(nodes, netlist.nets())?;
        let unresolved = self.generate_links(netlist.nets());
        let links = self.resolve_links(nodes, &unresolved)?;
        let layout = self.assign_columns(nodes, &links, column_width);

        info!(
            nodes = layout.nodes().len(),
            links = layout.links().len(),
            columns = layout.columns();
            "Layout calculated"
        );
        Ok(layout)
    }
}

/// The standard pipeline, built from the free stage functions.
#[derive(Debug, Clone, Default)]
pub struct ColumnPipeline {
    config: LayoutConfig,
}

impl ColumnPipeline {
    pub fn new(config: LayoutConfig) -> Self {
        debug!(config:?; "Creating column pipeline");
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

impl LayoutPipeline for ColumnPipeline {
    fn column_width(&self, nodes: &[Node]) -> f32 {
        find_column_width(nodes, &self.config)
    }

    fn check_consistency(&self, nodes: &[Node], nets: &[Net]) -> Result<(), ConsistencyError> {
        check_data_consistency(nodes, nets)
    }

    fn generate_links(&self, nets: &[Net]) -> Vec<UnresolvedLink> {
        generate_links(nets)
    }

    fn resolve_links(
        &self,
        nodes: &[Node],
        links: &[UnresolvedLink],
    ) -> Result<Vec<Link>, LayoutError> {
        resolve_nodes_in_links(nodes, links)
    }

    fn assign_columns(&self, nodes: &[Node], links: &[Link], column_width: f32) -> DiagramLayout {
        components_to_columns(nodes, links, column_width, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use netview_core::netlist::Endpoint;

    fn netlist(nets: Vec<Net>) -> Netlist {
        Netlist::new(
            vec![
                Node::new("a").with_outputs(["q"]),
                Node::new("b").with_inputs(["d"]),
            ],
            nets,
        )
    }

    fn endpoint(text: &str) -> Endpoint {
        text.parse().unwrap()
    }

    #[test]
    fn test_run_lays_out_consistent_netlist() {
        let pipeline = ColumnPipeline::default();
        let netlist = netlist(vec![Net::new(endpoint("a.q"), vec![endpoint("b.d")])]);

        let layout = pipeline.run(&netlist).unwrap();

        assert_eq!(layout.links().len(), 1);
        assert_eq!(layout.node(1).unwrap().column(), 1);
        assert_eq!(
            layout.column_width(),
            find_column_width(netlist.nodes(), pipeline.config())
        );
    }

    #[test]
    fn test_run_reports_consistency_error() {
        let pipeline = ColumnPipeline::default();
        let err = pipeline
            .run(&netlist(vec![Net::new(endpoint("a.q"), vec![endpoint("b.x")])]))
            .unwrap_err();

        assert!(matches!(err, NetviewError::Consistency(_)));
    }
}
