use svg::node::element as svg_element;

use netview_core::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    netlist::PortSide,
};

use crate::layout::PlacedNode;

const FONT_FAMILY: &str = "monospace";
const LABEL_FONT_SIZE: f32 = 12.0;
const PORT_FONT_SIZE: f32 = 10.0;
const PORT_RADIUS: f32 = 3.0;
const PORT_LABEL_INSET: f32 = 6.0;
const CORNER_RADIUS: f32 = 3.0;

/// Draws a node box, its header, port markers and names.
pub fn render_node(
    placed: &PlacedNode,
    fill: Color,
    stroke: &StrokeDefinition,
    output: &mut LayeredOutput,
) {
    let node = placed.node();
    let bounds = placed.bounds();

    let body = svg_element::Rectangle::new()
        .set("data-node", node.id().to_string())
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("rx", CORNER_RADIUS)
        .set("fill", fill.to_string())
        .set("fill-opacity", fill.alpha());
    output.add_to_layer(RenderLayer::Node, Box::new(apply_stroke!(body, stroke)));

    let header_y = bounds.min_y() + placed.header_height();
    let separator = svg_element::Line::new()
        .set("x1", bounds.min_x())
        .set("y1", header_y)
        .set("x2", bounds.max_x())
        .set("y2", header_y);
    output.add_to_layer(RenderLayer::Node, Box::new(apply_stroke!(separator, stroke)));

    let label = svg_element::Text::new(node.label())
        .set("x", bounds.center().x())
        .set("y", bounds.min_y() + placed.header_height() / 2.0)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", FONT_FAMILY)
        .set("font-size", LABEL_FONT_SIZE)
        .set("fill", stroke.color().to_string());
    output.add_to_layer(RenderLayer::Text, Box::new(label));

    for side in [PortSide::Input, PortSide::Output] {
        for (index, port) in node.ports(side).iter().enumerate() {
            let anchor = placed.port_anchor(side, Some(index));

            let marker = svg_element::Circle::new()
                .set("cx", anchor.x())
                .set("cy", anchor.y())
                .set("r", PORT_RADIUS)
                .set("fill", stroke.color().to_string());
            output.add_to_layer(RenderLayer::Port, Box::new(marker));

            let (x, text_anchor) = match side {
                PortSide::Input => (anchor.x() + PORT_LABEL_INSET, "start"),
                PortSide::Output => (anchor.x() - PORT_LABEL_INSET, "end"),
            };
            let name = svg_element::Text::new(port.to_string())
                .set("x", x)
                .set("y", anchor.y())
                .set("text-anchor", text_anchor)
                .set("dominant-baseline", "central")
                .set("font-family", FONT_FAMILY)
                .set("font-size", PORT_FONT_SIZE)
                .set("fill", stroke.color().to_string());
            output.add_to_layer(RenderLayer::Text, Box::new(name));
        }
    }
}
