//! Netlist model: nodes with ports, nets between ports, and the links derived
//! from nets.
//!
//! # Overview
//!
//! - [`Node`] - A component with ordered input and output ports
//! - [`Endpoint`] - A `node` or `node.port` reference
//! - [`Net`] - One source endpoint driving one or more target endpoints
//! - [`Netlist`] - The nodes and nets of one diagram
//! - [`UnresolvedLink`] - A single source/target pair taken from a net
//! - [`Link`] - An [`UnresolvedLink`] whose endpoints point at concrete nodes
//!
//! # Example
//!
//! ```
//! use netview_core::netlist::{Endpoint, Net, Netlist, Node};
//!
//! let netlist = Netlist::new(
//!     vec![
//!         Node::new("a").with_outputs(["q"]),
//!         Node::new("b").with_inputs(["d"]),
//!     ],
//!     vec![Net::new("a.q".parse().unwrap(), vec!["b.d".parse().unwrap()])],
//! );
//!
//! assert_eq!(netlist.nodes().len(), 2);
//! assert_eq!(netlist.nets()[0].source(), &Endpoint::new("a").with_port("q"));
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::identifier::Id;

/// Separator between the node and port parts of an endpoint.
pub const PORT_SEPARATOR: char = '.';

/// Which side of a node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortSide {
    /// Ports drawn on the left edge; targets of nets.
    Input,
    /// Ports drawn on the right edge; sources of nets.
    Output,
}

impl fmt::Display for PortSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSide::Input => write!(f, "input"),
            PortSide::Output => write!(f, "output"),
        }
    }
}

/// A component in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    label: Option<String>,
    inputs: Vec<Id>,
    outputs: Vec<Id>,
}

impl Node {
    /// Creates a node without ports whose label is its id.
    pub fn new(id: &str) -> Self {
        Self {
            id: Id::new(id),
            label: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the input port names, in drawing order.
    pub fn with_inputs<'a>(mut self, inputs: impl IntoIterator<Item = &'a str>) -> Self {
        self.inputs = inputs.into_iter().map(Id::new).collect();
        self
    }

    /// Sets the output port names, in drawing order.
    pub fn with_outputs<'a>(mut self, outputs: impl IntoIterator<Item = &'a str>) -> Self {
        self.outputs = outputs.into_iter().map(Id::new).collect();
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the display label, falling back to the node id.
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn inputs(&self) -> &[Id] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Id] {
        &self.outputs
    }

    /// Returns the ports on the given side.
    pub fn ports(&self, side: PortSide) -> &[Id] {
        match side {
            PortSide::Input => &self.inputs,
            PortSide::Output => &self.outputs,
        }
    }

    /// Returns the position of `port` among the ports on `side`.
    pub fn port_index(&self, side: PortSide, port: Id) -> Option<usize> {
        self.ports(side).iter().position(|candidate| *candidate == port)
    }

    /// Number of port rows the node needs when inputs and outputs are drawn side by side.
    pub fn port_rows(&self) -> usize {
        self.inputs.len().max(self.outputs.len())
    }
}

/// Errors produced when parsing an [`Endpoint`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("endpoint is empty")]
    Empty,

    #[error("endpoint `{0}` has an empty node name")]
    EmptyNode(String),

    #[error("endpoint `{0}` has an empty port name")]
    EmptyPort(String),

    #[error("endpoint `{0}` has more than one `.` separator")]
    TooManySeparators(String),

    #[error("endpoint `{0}` contains whitespace")]
    Whitespace(String),
}

/// A reference to a node, optionally narrowed to one of its ports.
///
/// The textual form is `node` or `node.port`.
///
/// ```
/// use netview_core::netlist::Endpoint;
///
/// let endpoint: Endpoint = "fifo.dout".parse().unwrap();
/// assert_eq!(endpoint.node(), "fifo");
/// assert_eq!(endpoint.port().unwrap(), "dout");
/// assert_eq!(endpoint.to_string(), "fifo.dout");
///
/// assert!("fifo.".parse::<Endpoint>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    node: Id,
    port: Option<Id>,
}

impl Endpoint {
    /// Creates an endpoint referring to the node as a whole.
    pub fn new(node: &str) -> Self {
        Self {
            node: Id::new(node),
            port: None,
        }
    }

    /// Narrows the endpoint to a port of the node.
    pub fn with_port(mut self, port: &str) -> Self {
        self.port = Some(Id::new(port));
        self
    }

    pub fn node(&self) -> Id {
        self.node
    }

    pub fn port(&self) -> Option<Id> {
        self.port
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EndpointError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EndpointError::Whitespace(s.to_string()));
        }

        match s.split_once(PORT_SEPARATOR) {
            None => Ok(Self::new(s)),
            Some(("", _)) => Err(EndpointError::EmptyNode(s.to_string())),
            Some((_, "")) => Err(EndpointError::EmptyPort(s.to_string())),
            Some((_, port)) if port.contains(PORT_SEPARATOR) => {
                Err(EndpointError::TooManySeparators(s.to_string()))
            }
            Some((node, port)) => Ok(Self::new(node).with_port(port)),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}{PORT_SEPARATOR}{}", self.node, port),
            None => write!(f, "{}", self.node),
        }
    }
}

/// A named connection from one source endpoint to one or more targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    name: Option<Id>,
    source: Endpoint,
    targets: Vec<Endpoint>,
}

impl Net {
    /// Creates an unnamed net.
    pub fn new(source: Endpoint, targets: Vec<Endpoint>) -> Self {
        Self {
            name: None,
            source,
            targets,
        }
    }

    /// Sets the net name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(Id::new(name));
        self
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }

    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    pub fn targets(&self) -> &[Endpoint] {
        &self.targets
    }
}

/// Nodes and nets of a single diagram.
///
/// This is the explicit input of every redraw; nothing else is read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netlist {
    nodes: Vec<Node>,
    nets: Vec<Net>,
}

impl Netlist {
    pub fn new(nodes: Vec<Node>, nets: Vec<Net>) -> Self {
        Self { nodes, nets }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.nets.is_empty()
    }
}

/// One source/target pair of a net before its endpoints are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedLink {
    net: Id,
    source: Endpoint,
    target: Endpoint,
}

impl UnresolvedLink {
    pub fn new(net: Id, source: Endpoint, target: Endpoint) -> Self {
        Self {
            net,
            source,
            target,
        }
    }

    /// Name of the net this link was generated from.
    pub fn net(&self) -> Id {
        self.net
    }

    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    pub fn target(&self) -> &Endpoint {
        &self.target
    }
}

/// A link whose endpoints refer to concrete nodes.
///
/// `source` and `target` are positions in the node sequence the link was
/// resolved against; ports are positions among the node's outputs (source)
/// and inputs (target). A `None` port attaches to the node side as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link {
    net: Id,
    source: usize,
    source_port: Option<usize>,
    target: usize,
    target_port: Option<usize>,
}

impl Link {
    pub fn new(
        net: Id,
        source: usize,
        source_port: Option<usize>,
        target: usize,
        target_port: Option<usize>,
    ) -> Self {
        Self {
            net,
            source,
            source_port,
            target,
            target_port,
        }
    }

    pub fn net(&self) -> Id {
        self.net
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn source_port(&self) -> Option<usize> {
        self.source_port
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn target_port(&self) -> Option<usize> {
        self.target_port
    }

    /// Returns true if the link starts and ends on the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
