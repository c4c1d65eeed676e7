//! Column assignment and node placement.

use std::collections::HashSet;

use log::{debug, trace, warn};
use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::{DfsEvent, depth_first_search},
};

use netview_core::{
    geometry::{Bounds, Point, Size},
    netlist::{Link, Node},
};

use super::{DiagramLayout, PlacedNode};
use crate::config::LayoutConfig;

/// Assigns each node to a column and places it.
///
/// Links are followed from source to target: a node's column is the length of
/// the longest path reaching it from a node with no incoming links. Links
/// that close a cycle are ignored for this purpose, so feedback loops do not
/// push nodes further right. Inside a column nodes keep their input order and
/// are stacked top to bottom.
///
/// Every column is `column_width` wide; column `c` starts at
/// `c * (column_width + column_spacing)`.
pub fn components_to_columns(
    nodes: &[Node],
    links: &[Link],
    column_width: f32,
    config: &LayoutConfig,
) -> DiagramLayout {
    let columns = assign_columns(nodes, links);
    let column_count = columns.iter().max().map_or(0, |max| max + 1);

    let mut rows = vec![0usize; column_count];
    let mut column_heights = vec![0.0f32; column_count];
    let column_step = column_width + config.column_spacing();

    let placed: Vec<PlacedNode> = nodes
        .iter()
        .zip(&columns)
        .map(|(node, &column)| {
            let height = node_height(node, config);
            let row = rows[column];
            let y = if row == 0 {
                0.0
            } else {
                column_heights[column] + config.row_spacing()
            };

            rows[column] += 1;
            column_heights[column] = y + height;

            let top_left = Point::new(column as f32 * column_step, y);
            let bounds = Bounds::new_from_top_left(top_left, Size::new(column_width, height));
            trace!(node:% = node.id(), column, row; "Node placed");

            PlacedNode::new(
                node.clone(),
                column,
                row,
                bounds,
                config.header_height(),
                config.port_height(),
            )
        })
        .collect();

    debug!(nodes = placed.len(), columns = column_count; "Nodes assigned to columns");

    DiagramLayout::new(
        column_width,
        config.column_spacing(),
        column_count,
        placed,
        links.to_vec(),
    )
}

fn node_height(node: &Node, config: &LayoutConfig) -> f32 {
    let ports = node.port_rows() as f32;
    (config.header_height() + ports * config.port_height()).max(config.min_node_height())
}

/// Returns the column of each node, by node position.
fn assign_columns(nodes: &[Node], links: &[Link]) -> Vec<usize> {
    let mut graph = DiGraph::<usize, ()>::with_capacity(nodes.len(), links.len());
    let indices: Vec<NodeIndex> = (0..nodes.len()).map(|idx| graph.add_node(idx)).collect();

    for link in links {
        if link.is_self_loop() || link.source() >= nodes.len() || link.target() >= nodes.len() {
            continue;
        }
        graph.add_edge(indices[link.source()], indices[link.target()], ());
    }

    let back_edges = find_back_edges(&graph);
    if !back_edges.is_empty() {
        debug!(back_edges = back_edges.len(); "Ignoring links that close cycles");
    }

    let mut forward = DiGraph::<usize, ()>::with_capacity(nodes.len(), links.len());
    for &idx in &indices {
        forward.add_node(graph[idx]);
    }
    for edge in graph.edge_indices() {
        if let Some((source, target)) = graph.edge_endpoints(edge) {
            if !back_edges.contains(&(source, target)) {
                forward.add_edge(source, target, ());
            }
        }
    }

    let order = match toposort(&forward, None) {
        Ok(order) => order,
        Err(cycle) => {
            // Removing DFS back edges always leaves a DAG.
            warn!(node = cycle.node_id().index(); "Cycle left after removing back edges");
            forward.node_indices().collect()
        }
    };

    let mut columns = vec![0usize; nodes.len()];
    for node in order {
        let column = forward
            .neighbors_directed(node, Direction::Incoming)
            .map(|pred| columns[forward[pred]] + 1)
            .max()
            .unwrap_or(0);
        columns[forward[node]] = column;
    }

    columns
}

/// Finds the edges that close a cycle in a depth-first search started from
/// the nodes without incoming edges, then from every other node in order.
fn find_back_edges(graph: &DiGraph<usize, ()>) -> HashSet<(NodeIndex, NodeIndex)> {
    let roots = graph
        .node_indices()
        .filter(|&idx| graph.neighbors_directed(idx, Direction::Incoming).next().is_none());
    let starts: Vec<NodeIndex> = roots.chain(graph.node_indices()).collect();

    let mut back_edges = HashSet::new();
    depth_first_search(graph, starts, |event| {
        if let DfsEvent::BackEdge(source, target) = event {
            back_edges.insert((source, target));
        }
    });

    back_edges
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;
    use netview_core::identifier::Id;
    use proptest::prelude::*;

    fn link(source: usize, target: usize) -> Link {
        Link::new(Id::new("n"), source, None, target, None)
    }

    fn nodes(count: usize) -> Vec<Node> {
        (0..count).map(|idx| Node::new(&format!("n{idx}"))).collect()
    }

    fn columns_of(layout: &DiagramLayout) -> Vec<usize> {
        layout.nodes().iter().map(PlacedNode::column).collect()
    }

    #[test]
    fn test_chain_moves_right() {
        let layout = components_to_columns(
            &nodes(3),
            &[link(0, 1), link(1, 2)],
            100.0,
            &LayoutConfig::default(),
        );

        assert_eq!(columns_of(&layout), vec![0, 1, 2]);
        assert_eq!(layout.columns(), 3);
    }

    #[test]
    fn test_longest_path_wins() {
        // 0 -> 1 -> 2 and 0 -> 2: node 2 goes after node 1.
        let layout = components_to_columns(
            &nodes(3),
            &[link(0, 2), link(0, 1), link(1, 2)],
            100.0,
            &LayoutConfig::default(),
        );

        assert_eq!(columns_of(&layout), vec![0, 1, 2]);
    }

    #[test]
    fn test_feedback_loop_keeps_layering() {
        let layout = components_to_columns(
            &nodes(3),
            &[link(0, 1), link(1, 2), link(2, 1)],
            100.0,
            &LayoutConfig::default(),
        );

        assert_eq!(columns_of(&layout), vec![0, 1, 2]);
    }

    #[test]
    fn test_pure_cycle_and_self_loop() {
        let layout = components_to_columns(
            &nodes(2),
            &[link(0, 1), link(1, 0), link(1, 1)],
            100.0,
            &LayoutConfig::default(),
        );

        assert_eq!(columns_of(&layout), vec![0, 1]);
    }

    #[test]
    fn test_unconnected_nodes_share_first_column() {
        let layout = components_to_columns(&nodes(3), &[], 80.0, &LayoutConfig::default());

        assert_eq!(columns_of(&layout), vec![0, 0, 0]);
        let rows: Vec<usize> = layout.nodes().iter().map(PlacedNode::row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_positions() {
        let config = LayoutConfig::default()
            .with_column_spacing(50.0)
            .with_row_spacing(10.0);
        let nodes = vec![
            Node::new("a").with_outputs(["q"]),
            Node::new("b").with_inputs(["d0", "d1", "d2"]),
            Node::new("c"),
        ];

        let layout = components_to_columns(&nodes, &[link(0, 1)], 100.0, &config);

        let a = layout.node(0).unwrap().bounds();
        let b = layout.node(1).unwrap().bounds();
        let c = layout.node(2).unwrap().bounds();

        assert_approx_eq!(f32, a.min_x(), 0.0);
        assert_approx_eq!(f32, a.width(), 100.0);
        // header 24 + 1 * 18 = 42
        assert_approx_eq!(f32, a.height(), 42.0);

        assert_approx_eq!(f32, b.min_x(), 150.0);
        // header 24 + 3 * 18 = 78
        assert_approx_eq!(f32, b.height(), 78.0);

        // c has no ports: minimum height, stacked under a
        assert_approx_eq!(f32, c.min_x(), 0.0);
        assert_approx_eq!(f32, c.min_y(), 52.0);
        assert_approx_eq!(f32, c.height(), 40.0);
    }

    #[test]
    fn test_empty_input() {
        let layout = components_to_columns(&[], &[], 60.0, &LayoutConfig::default());
        assert!(layout.is_empty());
        assert_eq!(layout.columns(), 0);
        assert_approx_eq!(f32, layout.column_width(), 60.0);
    }

    proptest! {
        #[test]
        fn forward_links_never_point_left(
            count in 1usize..12,
            raw_links in prop::collection::vec((0usize..12, 0usize..12), 0..30),
        ) {
            let links: Vec<Link> = raw_links
                .into_iter()
                .filter(|(source, target)| source < target && *target < count)
                .map(|(source, target)| link(source, target))
                .collect();

            let layout = components_to_columns(&nodes(count), &links, 100.0, &LayoutConfig::default());

            // Without cycles every link goes strictly right.
            for link in layout.links() {
                let source = layout.node(link.source()).unwrap().column();
                let target = layout.node(link.target()).unwrap().column();
                prop_assert!(source < target);
            }
        }

        #[test]
        fn nodes_in_a_column_do_not_overlap(
            count in 1usize..12,
            raw_links in prop::collection::vec((0usize..12, 0usize..12), 0..30),
        ) {
            let links: Vec<Link> = raw_links
                .into_iter()
                .filter(|(source, target)| *source < count && *target < count)
                .map(|(source, target)| link(source, target))
                .collect();

            let layout = components_to_columns(&nodes(count), &links, 100.0, &LayoutConfig::default());

            for (idx, first) in layout.nodes().iter().enumerate() {
                for second in &layout.nodes()[idx + 1..] {
                    prop_assert!(!first.bounds().intersects(&second.bounds()));
                }
            }
        }
    }
}
