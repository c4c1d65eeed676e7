//! SVG rendering of diagram layouts.

mod arrows;
mod link;
mod node;

use log::debug;
use svg::{Document, node::element as svg_element};

use netview_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, StrokeJoin},
    geometry::Size,
};

use crate::{
    config::StyleConfig,
    layout::DiagramLayout,
    view::{Transform, ViewError},
};

/// Renders layouts into SVG documents with a fixed style.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background: Option<Color>,
    node_fill: Color,
    node_stroke: StrokeDefinition,
    link_stroke: StrokeDefinition,
    feedback_stroke: StrokeDefinition,
}

impl SvgRenderer {
    /// Creates a renderer from the style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Style`] if a configured color cannot be parsed.
    pub fn new(style: &StyleConfig) -> Result<Self, ViewError> {
        let background = style.background_color().map_err(ViewError::Style)?;
        let node_fill = style.node_fill_color().map_err(ViewError::Style)?;
        let link_color = style.link_color().map_err(ViewError::Style)?;

        let link_stroke =
            StrokeDefinition::new(link_color, style.link_width()).with_join(StrokeJoin::Round);
        let feedback_stroke = link_stroke
            .clone()
            .with_style(style.feedback_link_style().clone());

        Ok(Self {
            background,
            node_fill,
            node_stroke: StrokeDefinition::new(link_color, 1.0),
            link_stroke,
            feedback_stroke,
        })
    }

    /// Renders `layout` into a document of `viewport` size, placing the
    /// content with `transform`. Without a layout only the background is drawn.
    pub fn render(
        &self,
        layout: Option<&DiagramLayout>,
        viewport: Size,
        transform: Transform,
    ) -> Document {
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", viewport.width(), viewport.height()),
            )
            .set("width", viewport.width())
            .set("height", viewport.height());

        if let Some(background) = self.background {
            let mut backdrop = LayeredOutput::new();
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", viewport.width())
                .set("height", viewport.height())
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            backdrop.add_to_layer(RenderLayer::Background, Box::new(rect));
            for group in backdrop.render() {
                doc = doc.add(group);
            }
        }

        doc = doc.add(arrows::create_marker_definitions(
            [self.link_stroke.color()].iter(),
        ));

        let mut content = svg_element::Group::new().set("transform", transform.to_svg_value());
        if let Some(layout) = layout {
            for group in self.render_layout(layout).render() {
                content = content.add(group);
            }
            debug!(
                nodes = layout.nodes().len(),
                links = layout.links().len(),
                scale = transform.scale();
                "SVG document rendered"
            );
        }

        doc.add(content)
    }

    fn render_layout(&self, layout: &DiagramLayout) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for placed in layout.nodes() {
            node::render_node(placed, self.node_fill, &self.node_stroke, &mut output);
        }
        for link in layout.links() {
            link::render_link(
                layout,
                link,
                &self.link_stroke,
                &self.feedback_stroke,
                &mut output,
            );
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use netview_core::{
        draw::StrokeStyle,
        netlist::{Endpoint, Net, Netlist, Node},
    };

    use crate::layout::{ColumnPipeline, LayoutPipeline};

    fn layout() -> DiagramLayout {
        let a_q: Endpoint = "a.q".parse().unwrap();
        let b_d: Endpoint = "b.d".parse().unwrap();
        let netlist = Netlist::new(
            vec![
                Node::new("a").with_outputs(["q"]),
                Node::new("b").with_label("Sink").with_inputs(["d"]),
            ],
            vec![Net::new(a_q, vec![b_d]).with_name("wire")],
        );
        ColumnPipeline::default().run(&netlist).unwrap()
    }

    fn viewport() -> Size {
        Size::new(400.0, 300.0)
    }

    #[test]
    fn test_render_layout_contents() {
        let renderer = SvgRenderer::new(&StyleConfig::default()).unwrap();
        let doc = renderer
            .render(Some(&layout()), viewport(), Transform::default())
            .to_string();

        assert!(doc.contains("data-node=\"a\""));
        assert!(doc.contains("data-node=\"b\""));
        assert!(doc.contains("data-net=\"wire\""));
        assert!(doc.contains("Sink"));
        assert!(doc.contains("marker-end=\"url(#arrow-"));
        assert!(doc.contains("data-layer=\"link\""));
        assert!(doc.contains("viewBox=\"0 0 400 300\""));
    }

    #[test]
    fn test_layers_are_ordered() {
        let renderer = SvgRenderer::new(&StyleConfig::default()).unwrap();
        let doc = renderer
            .render(Some(&layout()), viewport(), Transform::default())
            .to_string();

        let node_layer = doc.find("data-layer=\"node\"").unwrap();
        let link_layer = doc.find("data-layer=\"link\"").unwrap();
        let text_layer = doc.find("data-layer=\"text\"").unwrap();
        assert!(node_layer < link_layer);
        assert!(link_layer < text_layer);
    }

    #[test]
    fn test_background_only_when_configured() {
        let plain = SvgRenderer::new(&StyleConfig::default()).unwrap();
        let doc = plain.render(None, viewport(), Transform::default()).to_string();
        assert!(!doc.contains("data-layer=\"background\""));

        let style = StyleConfig::default().with_background_color("white");
        let filled = SvgRenderer::new(&style).unwrap();
        let doc = filled.render(None, viewport(), Transform::default()).to_string();
        assert!(doc.contains("data-layer=\"background\""));
    }

    #[test]
    fn test_only_feedback_links_are_dashed() {
        let netlist = Netlist::new(
            vec![
                Node::new("a").with_inputs(["d"]).with_outputs(["q"]),
                Node::new("b").with_inputs(["d"]).with_outputs(["q"]),
            ],
            vec![
                Net::new("a.q".parse().unwrap(), vec!["b.d".parse().unwrap()]).with_name("fwd"),
                Net::new("b.q".parse().unwrap(), vec!["a.d".parse().unwrap()]).with_name("back"),
            ],
        );
        let layout = ColumnPipeline::default().run(&netlist).unwrap();

        let renderer = SvgRenderer::new(&StyleConfig::default()).unwrap();
        let doc = renderer
            .render(Some(&layout), viewport(), Transform::default())
            .to_string();
        assert_eq!(doc.matches("stroke-dasharray").count(), 1);
        assert_eq!(doc.matches("stroke-dasharray=\"6,4\"").count(), 1);

        let style = StyleConfig::default().with_feedback_link_style(StrokeStyle::Solid);
        let renderer = SvgRenderer::new(&style).unwrap();
        let doc = renderer
            .render(Some(&layout), viewport(), Transform::default())
            .to_string();
        assert!(!doc.contains("stroke-dasharray"));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style = StyleConfig::default().with_background_color("nope");
        assert!(matches!(SvgRenderer::new(&style), Err(ViewError::Style(_))));
    }
}
