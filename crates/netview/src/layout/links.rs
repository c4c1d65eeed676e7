//! Link generation from nets and endpoint resolution against the node set.

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use netview_core::{
    identifier::Id,
    netlist::{Endpoint, Link, Net, Node, PortSide, UnresolvedLink},
};

/// Errors raised while resolving link endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("link of net `{net}` refers to unknown node `{}`", .endpoint.node())]
    UnknownNode { net: Id, endpoint: Endpoint },

    #[error("link of net `{net}` refers to `{endpoint}`, which is not an {side} port")]
    UnknownPort {
        net: Id,
        endpoint: Endpoint,
        side: PortSide,
    },
}

/// Expands every net into one link per target.
///
/// Links come out in net order, then target order. Unnamed nets are given an
/// anonymous name derived from their position.
pub fn generate_links(nets: &[Net]) -> Vec<UnresolvedLink> {
    let links: Vec<UnresolvedLink> = nets
        .iter()
        .enumerate()
        .flat_map(|(index, net)| {
            let name = net.name().unwrap_or_else(|| Id::from_anonymous(index));
            net.targets()
                .iter()
                .map(move |target| UnresolvedLink::new(name, *net.source(), *target))
        })
        .collect();

    debug!(nets = nets.len(), links = links.len(); "Links generated");
    links
}

/// Replaces the endpoint names of each link with positions in `nodes`.
///
/// Source ports are looked up among the node's outputs and target ports among
/// its inputs. An endpoint without a port resolves to `None`.
///
/// # Errors
///
/// Returns the first [`LayoutError`] found when an endpoint names a node or
/// port that does not exist.
pub fn resolve_nodes_in_links(
    nodes: &[Node],
    links: &[UnresolvedLink],
) -> Result<Vec<Link>, LayoutError> {
    let mut positions = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        // First declaration wins, matching the order nodes are drawn in.
        positions.entry(node.id()).or_insert(index);
    }

    let resolved = links
        .iter()
        .map(|link| {
            let (source, source_port) =
                resolve_endpoint(nodes, &positions, link.net(), link.source(), PortSide::Output)?;
            let (target, target_port) =
                resolve_endpoint(nodes, &positions, link.net(), link.target(), PortSide::Input)?;
            trace!(net:% = link.net(), source, target; "Link resolved");
            Ok(Link::new(link.net(), source, source_port, target, target_port))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(links = resolved.len(); "Links resolved");
    Ok(resolved)
}

fn resolve_endpoint(
    nodes: &[Node],
    positions: &HashMap<Id, usize>,
    net: Id,
    endpoint: &Endpoint,
    side: PortSide,
) -> Result<(usize, Option<usize>), LayoutError> {
    let index = *positions
        .get(&endpoint.node())
        .ok_or(LayoutError::UnknownNode {
            net,
            endpoint: *endpoint,
        })?;

    let port = match endpoint.port() {
        Some(port) => Some(nodes[index].port_index(side, port).ok_or(
            LayoutError::UnknownPort {
                net,
                endpoint: *endpoint,
                side,
            },
        )?),
        None => None,
    };

    Ok((index, port))
}
