use svg::node::element::{Definitions, Marker, Path};

use netview_core::color::Color;

/// Creates one arrow-head marker per color.
pub fn create_marker_definitions<'a, I>(colors: I) -> Definitions
where
    I: Iterator<Item = &'a Color>,
{
    let mut defs = Definitions::new();

    for color in colors {
        let arrow = Marker::new()
            .set("id", marker_id(color))
            .set("viewBox", "0 0 10 10")
            .set("refX", 9)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 z")
                    .set("fill", color.to_string()),
            );

        defs = defs.add(arrow);
    }

    defs
}

/// Returns the `marker-end` reference for an arrow of the given color.
pub fn marker_url(color: &Color) -> String {
    format!("url(#{})", marker_id(color))
}

fn marker_id(color: &Color) -> String {
    format!("arrow-{}", color.to_id_safe_string())
}
