//! Consistency checks between the nodes and nets of a netlist.

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use log::{debug, warn};
use thiserror::Error;

use netview_core::{
    identifier::Id,
    netlist::{Endpoint, Net, Node, PortSide},
};

/// A single problem found in a netlist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyIssue {
    #[error("node `{0}` is declared more than once")]
    DuplicateNode(Id),

    #[error("node `{node}` declares {side} port `{port}` more than once")]
    DuplicatePort { node: Id, side: PortSide, port: Id },

    #[error("net `{0}` is declared more than once")]
    DuplicateNet(Id),

    #[error("net {net} has no targets")]
    NetWithoutTargets { net: NetRef },

    #[error("net {net} refers to unknown node `{}`", .endpoint.node())]
    UnknownNode { net: NetRef, endpoint: Endpoint },

    #[error("net {net} refers to `{endpoint}`, which is not an {side} port")]
    UnknownPort {
        net: NetRef,
        endpoint: Endpoint,
        side: PortSide,
    },
}

/// How a net is named in diagnostics: its name, or its position when unnamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetRef {
    Named(Id),
    Index(usize),
}

impl NetRef {
    fn of(index: usize, net: &Net) -> Self {
        net.name().map_or(Self::Index(index), Self::Named)
    }
}

impl fmt::Display for NetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "`{name}`"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// Every issue found by [`check_data_consistency`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("netlist is inconsistent: {}{}", .issues[0], more(.issues.len()))]
pub struct ConsistencyError {
    issues: Vec<ConsistencyIssue>,
}

fn more(count: usize) -> String {
    if count > 1 {
        format!(" (+{} more)", count - 1)
    } else {
        String::new()
    }
}

impl ConsistencyError {
    pub fn issues(&self) -> &[ConsistencyIssue] {
        &self.issues
    }
}

/// Checks that the nets only refer to declared nodes and ports.
///
/// Sources must name an output port and targets an input port; an endpoint
/// without a port only needs its node to exist. Node ids, port names within
/// one side of a node and net names must be unique, and every net needs at
/// least one target.
///
/// # Errors
///
/// Returns a [`ConsistencyError`] listing every issue when at least one is
/// found: duplicate ports in node order, then each duplicated node id once in
/// order of its first declaration, then net issues in net order.
pub fn check_data_consistency(nodes: &[Node], nets: &[Net]) -> Result<(), ConsistencyError> {
    let mut issues = Vec::new();

    // Endpoints are checked against the first declaration of each id, the
    // same one link resolution picks.
    let mut by_id: IndexMap<Id, (&Node, usize)> = IndexMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(node.id()).or_insert((node, 0)).1 += 1;
        for side in [PortSide::Input, PortSide::Output] {
            let mut seen = HashSet::new();
            for port in node.ports(side) {
                if !seen.insert(*port) {
                    issues.push(ConsistencyIssue::DuplicatePort {
                        node: node.id(),
                        side,
                        port: *port,
                    });
                }
            }
        }
    }

    issues.extend(
        by_id
            .iter()
            .filter(|(_, (_, count))| *count > 1)
            .map(|(id, _)| ConsistencyIssue::DuplicateNode(*id)),
    );

    let mut net_names = HashSet::new();
    for (index, net) in nets.iter().enumerate() {
        let net_ref = NetRef::of(index, net);

        if let Some(name) = net.name() {
            if !net_names.insert(name) {
                issues.push(ConsistencyIssue::DuplicateNet(name));
            }
        }
        if net.targets().is_empty() {
            issues.push(ConsistencyIssue::NetWithoutTargets { net: net_ref });
        }

        check_endpoint(&by_id, net_ref, net.source(), PortSide::Output, &mut issues);
        for target in net.targets() {
            check_endpoint(&by_id, net_ref, target, PortSide::Input, &mut issues);
        }
    }

    if issues.is_empty() {
        debug!(nodes = nodes.len(), nets = nets.len(); "Netlist is consistent");
        return Ok(());
    }

    warn!(issues = issues.len(); "Netlist is inconsistent");
    Err(ConsistencyError { issues })
}

fn check_endpoint(
    nodes: &IndexMap<Id, (&Node, usize)>,
    net: NetRef,
    endpoint: &Endpoint,
    side: PortSide,
    issues: &mut Vec<ConsistencyIssue>,
) {
    let Some((node, _)) = nodes.get(&endpoint.node()) else {
        issues.push(ConsistencyIssue::UnknownNode {
            net,
            endpoint: *endpoint,
        });
        return;
    };

    if let Some(port) = endpoint.port() {
        if node.port_index(side, port).is_none() {
            issues.push(ConsistencyIssue::UnknownPort {
                net,
                endpoint: *endpoint,
                side,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(text: &str) -> Endpoint {
        text.parse().unwrap()
    }

    fn nodes() -> Vec<Node> {
        vec![
            Node::new("a").with_outputs(["q"]),
            Node::new("b").with_inputs(["d"]).with_outputs(["q"]),
        ]
    }

    #[test]
    fn test_consistent_netlist() {
        let nets = vec![
            Net::new(endpoint("a.q"), vec![endpoint("b.d")]).with_name("n1"),
            Net::new(endpoint("b"), vec![endpoint("a")]),
        ];
        assert!(check_data_consistency(&nodes(), &nets).is_ok());
    }

    #[test]
    fn test_empty_netlist_is_consistent() {
        assert!(check_data_consistency(&[], &[]).is_ok());
    }

    #[test]
    fn test_unknown_node() {
        let nets = vec![Net::new(endpoint("a.q"), vec![endpoint("c.d")])];
        let err = check_data_consistency(&nodes(), &nets).unwrap_err();

        assert_eq!(
            err.issues(),
            &[ConsistencyIssue::UnknownNode {
                net: NetRef::Index(0),
                endpoint: endpoint("c.d"),
            }]
        );
    }

    #[test]
    fn test_port_on_wrong_side() {
        // `b.d` is an input, so it cannot drive a net; `a.q` is an output.
        let nets = vec![Net::new(endpoint("b.d"), vec![endpoint("a.q")]).with_name("bad")];
        let err = check_data_consistency(&nodes(), &nets).unwrap_err();

        assert_eq!(err.issues().len(), 2);
        assert!(matches!(
            err.issues()[0],
            ConsistencyIssue::UnknownPort {
                side: PortSide::Output,
                ..
            }
        ));
        assert!(matches!(
            err.issues()[1],
            ConsistencyIssue::UnknownPort {
                side: PortSide::Input,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicates_are_all_reported() {
        let nodes = vec![
            Node::new("a").with_inputs(["x", "x"]),
            Node::new("a"),
        ];
        let nets = vec![
            Net::new(endpoint("a"), vec![endpoint("a")]).with_name("n"),
            Net::new(endpoint("a"), vec![]).with_name("n"),
        ];

        let err = check_data_consistency(&nodes, &nets).unwrap_err();
        assert_eq!(
            err.issues(),
            &[
                ConsistencyIssue::DuplicatePort {
                    node: Id::new("a"),
                    side: PortSide::Input,
                    port: Id::new("x"),
                },
                ConsistencyIssue::DuplicateNode(Id::new("a")),
                ConsistencyIssue::DuplicateNet(Id::new("n")),
                ConsistencyIssue::NetWithoutTargets {
                    net: NetRef::Named(Id::new("n")),
                },
            ]
        );
    }

    #[test]
    fn test_endpoints_use_first_declaration_of_duplicate_node() {
        let nodes = vec![
            Node::new("a").with_outputs(["q"]),
            Node::new("a"),
            Node::new("b"),
        ];
        let nets = vec![Net::new(endpoint("a.q"), vec![endpoint("b")])];

        let err = check_data_consistency(&nodes, &nets).unwrap_err();
        assert_eq!(err.issues(), &[ConsistencyIssue::DuplicateNode(Id::new("a"))]);
    }

    #[test]
    fn test_duplicate_nodes_reported_once_in_declaration_order() {
        let nodes = vec![
            Node::new("b"),
            Node::new("a"),
            Node::new("b"),
            Node::new("a"),
            Node::new("b"),
        ];

        let err = check_data_consistency(&nodes, &[]).unwrap_err();
        assert_eq!(
            err.issues(),
            &[
                ConsistencyIssue::DuplicateNode(Id::new("b")),
                ConsistencyIssue::DuplicateNode(Id::new("a")),
            ]
        );
    }

    #[test]
    fn test_error_message_counts_remaining_issues() {
        let nets = vec![Net::new(endpoint("x"), vec![endpoint("y")])];
        let err = check_data_consistency(&[], &nets).unwrap_err();

        assert_eq!(
            err.to_string(),
            "netlist is inconsistent: net #0 refers to unknown node `x` (+1 more)"
        );
    }
}
