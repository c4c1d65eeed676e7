//! Layout pipeline: turns a [`Netlist`](netview_core::netlist::Netlist) into a
//! [`DiagramLayout`] of nodes placed in columns.
//!
//! The stages are pure functions and run in this order:
//!
//! 1. [`find_column_width`]
//! 2. [`check_data_consistency`]
//! 3. [`generate_links`]
//! 4. [`resolve_nodes_in_links`]
//! 5. [`components_to_columns`]
//!
//! [`LayoutPipeline`] composes them; [`ColumnPipeline`] is the standard
//! implementation.

mod column_width;
mod columns;
mod consistency;
mod links;
mod pipeline;

pub use column_width::find_column_width;
pub use columns::components_to_columns;
pub use consistency::{ConsistencyError, ConsistencyIssue, NetRef, check_data_consistency};
pub use links::{LayoutError, generate_links, resolve_nodes_in_links};
pub use pipeline::{ColumnPipeline, LayoutPipeline};

use netview_core::{
    geometry::{Bounds, Point},
    netlist::{Link, Node, PortSide},
};

/// A node with its place in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    node: Node,
    column: usize,
    row: usize,
    bounds: Bounds,
    header_height: f32,
    port_height: f32,
}

impl PlacedNode {
    pub(crate) fn new(
        node: Node,
        column: usize,
        row: usize,
        bounds: Bounds,
        header_height: f32,
        port_height: f32,
    ) -> Self {
        Self {
            node,
            column,
            row,
            bounds,
            header_height,
            port_height,
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Position of the node from the top of its column.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn port_height(&self) -> f32 {
        self.port_height
    }

    /// Returns where a link attaches to the node.
    ///
    /// Input ports sit on the left edge and output ports on the right edge,
    /// one row per port below the header. Without a port the link attaches to
    /// the middle of that edge.
    pub fn port_anchor(&self, side: PortSide, port: Option<usize>) -> Point {
        let x = match side {
            PortSide::Input => self.bounds.min_x(),
            PortSide::Output => self.bounds.max_x(),
        };
        let y = match port {
            Some(index) => {
                self.bounds.min_y() + self.header_height + self.port_height * (index as f32 + 0.5)
            }
            None => self.bounds.center().y(),
        };
        Point::new(x, y)
    }
}

/// Result of a pipeline run: placed nodes, resolved links and the column width
/// they were laid out with.
///
/// Nodes keep the order of the netlist, so the node positions inside each
/// [`Link`] index into [`DiagramLayout::nodes`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    column_width: f32,
    column_spacing: f32,
    columns: usize,
    nodes: Vec<PlacedNode>,
    links: Vec<Link>,
}

impl DiagramLayout {
    pub(crate) fn new(
        column_width: f32,
        column_spacing: f32,
        columns: usize,
        nodes: Vec<PlacedNode>,
        links: Vec<Link>,
    ) -> Self {
        Self {
            column_width,
            column_spacing,
            columns,
            nodes,
            links,
        }
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    /// Horizontal gap between two columns.
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Number of occupied columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, index: usize) -> Option<&PlacedNode> {
        self.nodes.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the smallest bounds containing every node, or `None` for an
    /// empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(PlacedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
