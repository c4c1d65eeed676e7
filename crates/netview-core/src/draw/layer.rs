//! Layer-based rendering for SVG output.
//!
//! Diagram elements emit their SVG nodes into a [`LayeredOutput`], tagging each
//! node with a [`RenderLayer`]. Rendering sorts the nodes by layer so links are
//! always drawn above node boxes and labels above everything else, no matter
//! in which order the elements were visited.
//!
//! # Example
//!
//! ```
//! # use netview_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! output.add_to_layer(RenderLayer::Link, Box::new(Path::new()));
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//!
//! // One `<g>` per non-empty layer: nodes first, then links
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Diagram background fill
    Background,
    /// Node boxes and header bars
    Node,
    /// Port markers on node edges
    Port,
    /// Links between ports
    Link,
    /// Node labels and port names
    Text,
}

impl RenderLayer {
    /// Returns the name written into the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Node => "node",
            Self::Port => "port",
            Self::Link => "link",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected per rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes within one layer keep their insertion order.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element. Groups
    /// are returned bottom to top.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
