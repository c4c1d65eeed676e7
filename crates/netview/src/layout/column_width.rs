use log::debug;

use netview_core::{identifier::Id, netlist::Node};

use crate::config::LayoutConfig;

/// Computes the width shared by every column: the width of the widest node box.
///
/// A node box must fit its label, and its longest input and longest output
/// port names side by side with `port_gap_chars` between them. The result is
/// never below `min_column_width`, which is also the width for an empty node
/// set.
pub fn find_column_width(nodes: &[Node], config: &LayoutConfig) -> f32 {
    let widest_chars = nodes.iter().map(|node| content_chars(node, config)).max();

    let width = match widest_chars {
        Some(chars) => chars as f32 * config.char_width() + 2.0 * config.node_padding(),
        None => 0.0,
    };
    let width = width.max(config.min_column_width());

    debug!(nodes = nodes.len(), column_width = width; "Column width computed");
    width
}

fn content_chars(node: &Node, config: &LayoutConfig) -> usize {
    let label_chars = node.label().chars().count();
    let max_in = longest_name(node.inputs());
    let max_out = longest_name(node.outputs());

    let ports_chars = if max_in > 0 && max_out > 0 {
        max_in + max_out + config.port_gap_chars()
    } else {
        max_in + max_out
    };

    label_chars.max(ports_chars)
}

fn longest_name(ports: &[Id]) -> usize {
    ports.iter().map(Id::char_count).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
            .with_char_width(10.0)
            .with_node_padding(5.0)
            .with_min_column_width(0.0)
    }

    #[test]
    fn test_empty_node_set_uses_minimum() {
        let config = LayoutConfig::default().with_min_column_width(42.0);
        assert_approx_eq!(f32, find_column_width(&[], &config), 42.0);
    }

    #[test]
    fn test_label_dominates() {
        let nodes = [Node::new("n").with_label("Accumulator")];
        // 11 chars * 10 + 2 * 5
        assert_approx_eq!(f32, find_column_width(&nodes, &config()), 120.0);
    }

    #[test]
    fn test_ports_side_by_side_dominate() {
        let nodes = [Node::new("n")
            .with_inputs(["data_in", "en"])
            .with_outputs(["data_out"])];
        // (7 + 8 + 2) chars * 10 + 2 * 5
        assert_approx_eq!(f32, find_column_width(&nodes, &config()), 180.0);
    }

    #[test]
    fn test_single_sided_ports_have_no_gap() {
        let nodes = [Node::new("n").with_outputs(["result"])];
        assert_approx_eq!(f32, find_column_width(&nodes, &config()), 70.0);
    }

    #[test]
    fn test_widest_node_wins() {
        let nodes = [
            Node::new("a"),
            Node::new("b").with_label("Bee"),
            Node::new("c").with_label("Cc"),
        ];
        assert_approx_eq!(f32, find_column_width(&nodes, &config()), 40.0);
    }

    proptest! {
        #[test]
        fn width_is_never_below_minimum(labels in prop::collection::vec("[a-zA-Z]{0,20}", 0..8), min in 0.0f32..500.0) {
            let config = LayoutConfig::default().with_min_column_width(min);
            let nodes: Vec<Node> = labels
                .iter()
                .enumerate()
                .map(|(idx, label)| Node::new(&format!("n{idx}")).with_label(label.clone()))
                .collect();

            prop_assert!(find_column_width(&nodes, &config) >= min);
        }
    }
}
