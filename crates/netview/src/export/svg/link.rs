use log::warn;
use svg::node::element as svg_element;

use netview_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
    netlist::{Link, PortSide},
};

use super::arrows;
use crate::layout::DiagramLayout;

/// Vertical distance a returning link keeps below the nodes it connects.
const DETOUR_CLEARANCE: f32 = 12.0;

/// Draws a link as an orthogonal path from its source port to its target port.
///
/// Links whose target does not lie to the right of the source are feedback
/// links and use `feedback_stroke`.
pub fn render_link(
    layout: &DiagramLayout,
    link: &Link,
    stroke: &StrokeDefinition,
    feedback_stroke: &StrokeDefinition,
    output: &mut LayeredOutput,
) {
    let (Some(source), Some(target)) = (layout.node(link.source()), layout.node(link.target()))
    else {
        warn!(net:% = link.net(), source = link.source(), target = link.target(); "Skipping link to a missing node");
        return;
    };

    let start = source.port_anchor(PortSide::Output, link.source_port());
    let end = target.port_anchor(PortSide::Input, link.target_port());
    let lane = layout.column_spacing() / 2.0;

    let (data, stroke) = if end.x() - start.x() >= lane {
        (create_forward_path_data(start, end, end.x() - lane), stroke)
    } else {
        let detour_y = source.bounds().max_y().max(target.bounds().max_y()) + DETOUR_CLEARANCE;
        (
            create_return_path_data(start, end, lane, detour_y),
            feedback_stroke,
        )
    };

    let path = svg_element::Path::new()
        .set("data-net", link.net().to_string())
        .set("d", data)
        .set("fill", "none")
        .set("marker-end", arrows::marker_url(&stroke.color()));
    output.add_to_layer(RenderLayer::Link, Box::new(apply_stroke!(path, stroke)));
}

/// Path for a link whose target lies to the right: horizontal, vertical in the
/// gap before the target column, horizontal into the target.
fn create_forward_path_data(start: Point, end: Point, turn_x: f32) -> String {
    format!(
        "M {} {} L {} {} L {} {} L {} {}",
        start.x(),
        start.y(),
        turn_x,
        start.y(),
        turn_x,
        end.y(),
        end.x(),
        end.y()
    )
}

/// Path for a link whose target is in the same or an earlier column: leaves to
/// the right, runs below both nodes and enters the target from the left.
fn create_return_path_data(start: Point, end: Point, lane: f32, detour_y: f32) -> String {
    let out_x = start.x() + lane;
    let in_x = end.x() - lane;
    format!(
        "M {} {} L {} {} L {} {} L {} {} L {} {} L {} {}",
        start.x(),
        start.y(),
        out_x,
        start.y(),
        out_x,
        detour_y,
        in_x,
        detour_y,
        in_x,
        end.y(),
        end.x(),
        end.y()
    )
}
