//! Raw TOML document shape and its conversion into the netlist model.

use log::{debug, trace};
use serde::Deserialize;
use toml::Spanned;

use netview_core::netlist::{Endpoint, Net, Netlist, Node, PORT_SEPARATOR};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct NetlistDocument {
    #[serde(default)]
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    nets: Vec<NetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    id: Spanned<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    inputs: Vec<Spanned<String>>,
    #[serde(default)]
    outputs: Vec<Spanned<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetEntry {
    #[serde(default)]
    name: Option<Spanned<String>>,
    #[serde(alias = "from")]
    source: Spanned<String>,
    #[serde(alias = "to", default)]
    targets: Vec<Spanned<String>>,
}

impl NetlistDocument {
    /// Converts the document into a [`Netlist`], emitting a diagnostic for
    /// every malformed identifier or endpoint.
    ///
    /// Entries with errors are left out of the result; the caller decides
    /// whether the collected diagnostics make the load fail.
    pub(crate) fn into_netlist(self, collector: &mut DiagnosticCollector) -> Netlist {
        debug!(nodes = self.nodes.len(), nets = self.nets.len(); "Converting netlist document");

        let nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .filter_map(|entry| entry.into_node(collector))
            .collect();

        let nets: Vec<Net> = self
            .nets
            .into_iter()
            .filter_map(|entry| entry.into_net(collector))
            .collect();

        trace!(nodes:? = nodes, nets:? = nets; "Converted netlist");

        Netlist::new(nodes, nets)
    }
}

impl NodeEntry {
    fn into_node(self, collector: &mut DiagnosticCollector) -> Option<Node> {
        let mut valid = check_identifier(&self.id, "node id", collector);
        for port in self.inputs.iter().chain(&self.outputs) {
            valid &= check_identifier(port, "port name", collector);
        }
        if !valid {
            return None;
        }

        let mut node = Node::new(self.id.get_ref())
            .with_inputs(self.inputs.iter().map(|port| port.get_ref().as_str()))
            .with_outputs(self.outputs.iter().map(|port| port.get_ref().as_str()));
        if let Some(label) = self.label {
            node = node.with_label(label);
        }
        Some(node)
    }
}

impl NetEntry {
    fn into_net(self, collector: &mut DiagnosticCollector) -> Option<Net> {
        let mut valid = self
            .name
            .as_ref()
            .is_none_or(|name| check_identifier(name, "net name", collector));

        let source = parse_endpoint(&self.source, collector);
        let targets: Vec<Option<Endpoint>> = self
            .targets
            .iter()
            .map(|target| parse_endpoint(target, collector))
            .collect();

        valid &= source.is_some() && targets.iter().all(Option::is_some);
        if !valid {
            return None;
        }

        if targets.is_empty() {
            let net_name = self
                .name
                .as_ref()
                .map_or_else(|| self.source.get_ref().clone(), |name| name.get_ref().clone());
            collector.emit(
                Diagnostic::warning(format!("net `{net_name}` has no targets"))
                    .with_code(ErrorCode::W001)
                    .with_label(span_of(&self.source), "driven here but never read")
                    .with_help("the net is kept; drawing the netlist will reject it"),
            );
        }

        let mut net = Net::new(source?, targets.into_iter().flatten().collect());
        if let Some(name) = &self.name {
            net = net.with_name(name.get_ref());
        }
        Some(net)
    }
}

fn span_of<T>(spanned: &Spanned<T>) -> Span {
    Span::new(spanned.span())
}

fn parse_endpoint(
    value: &Spanned<String>,
    collector: &mut DiagnosticCollector,
) -> Option<Endpoint> {
    match value.get_ref().parse::<Endpoint>() {
        Ok(endpoint) => Some(endpoint),
        Err(err) => {
            collector.emit(
                Diagnostic::error(format!("invalid endpoint `{}`", value.get_ref()))
                    .with_code(ErrorCode::E100)
                    .with_label(span_of(value), err.to_string())
                    .with_help("write endpoints as `node` or `node.port`"),
            );
            None
        }
    }
}

fn check_identifier(
    value: &Spanned<String>,
    what: &str,
    collector: &mut DiagnosticCollector,
) -> bool {
    let text = value.get_ref();
    let problem = if text.is_empty() {
        Some(format!("{what} is empty"))
    } else if text.chars().any(char::is_whitespace) {
        Some(format!("{what} contains whitespace"))
    } else if text.contains(PORT_SEPARATOR) {
        Some(format!("{what} contains `{PORT_SEPARATOR}`"))
    } else {
        None
    };

    match problem {
        Some(message) => {
            collector.emit(
                Diagnostic::error(format!("invalid {what} `{text}`"))
                    .with_code(ErrorCode::E101)
                    .with_label(span_of(value), message)
                    .with_help(format!(
                        "{what}s must be non-empty and free of whitespace and `{PORT_SEPARATOR}`"
                    )),
            );
            false
        }
        None => true,
    }
}
