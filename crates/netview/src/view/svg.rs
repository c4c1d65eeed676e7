use std::fs;

use log::{debug, error, info};

use netview_core::geometry::{Insets, Point, Size};

use super::{DiagramView, Mount, Transform, ViewError};
use crate::{config::StyleConfig, export::svg::SvgRenderer, layout::DiagramLayout};

/// A view rendering diagrams to an SVG document of fixed viewport size.
///
/// The view keeps the last bound layout and its viewport transform. Binding a
/// new layout re-renders with the current transform; only
/// [`fit_to_screen`](DiagramView::fit_to_screen) changes the transform.
///
/// ```
/// use netview::{
///     config::StyleConfig,
///     view::{Mount, SvgView},
/// };
///
/// let view = SvgView::new(Mount::Memory, &StyleConfig::default()).unwrap();
/// assert!(view.layout().is_none());
/// assert!(view.document().starts_with("<svg"));
/// ```
#[derive(Debug)]
pub struct SvgView {
    mount: Mount,
    renderer: SvgRenderer,
    viewport: Size,
    fit_margin: f32,
    max_zoom: f32,
    transform: Transform,
    layout: Option<DiagramLayout>,
    document: String,
}

impl SvgView {
    /// Mounts a new, empty view.
    ///
    /// Nothing is written to a file mount until the first render.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Style`] if the style contains an invalid color.
    pub fn new(mount: Mount, style: &StyleConfig) -> Result<Self, ViewError> {
        let renderer = SvgRenderer::new(style)?;
        let viewport = Size::new(style.viewport_width(), style.viewport_height());
        let transform = Transform::default();
        let document = renderer.render(None, viewport, transform).to_string();

        debug!(mount:% = mount, width = viewport.width(), height = viewport.height(); "SVG view mounted");

        Ok(Self {
            mount,
            renderer,
            viewport,
            fit_margin: style.fit_margin(),
            max_zoom: style.max_zoom(),
            transform,
            layout: None,
            document,
        })
    }

    /// The currently bound layout.
    pub fn layout(&self) -> Option<&DiagramLayout> {
        self.layout.as_ref()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The last rendered SVG document.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Consumes the view, returning the last rendered document.
    pub fn into_document(self) -> String {
        self.document
    }

    fn refresh(&mut self) -> Result<(), ViewError> {
        self.document = self
            .renderer
            .render(self.layout.as_ref(), self.viewport, self.transform)
            .to_string();

        if let Mount::File(path) = &self.mount {
            info!(path:% = path.display(); "Writing SVG file");
            if let Err(source) = fs::write(path, &self.document) {
                error!(path:% = path.display(), err:% = source; "Failed to write SVG file");
                return Err(ViewError::Write {
                    path: path.clone(),
                    source,
                });
            }
        }

        Ok(())
    }

    /// Computes the transform that fits the bound layout into the viewport.
    fn fitted_transform(&self) -> Transform {
        let Some(bounds) = self.layout.as_ref().and_then(DiagramLayout::bounds) else {
            return Transform::default();
        };

        let content = bounds.add_padding(Insets::uniform(self.fit_margin));
        if content.to_size().is_empty() {
            return Transform::default();
        }

        let scale = (self.viewport.width() / content.width())
            .min(self.viewport.height() / content.height())
            .min(self.max_zoom);

        let translate = Point::new(
            (self.viewport.width() - content.width() * scale) / 2.0 - content.min_x() * scale,
            (self.viewport.height() - content.height() * scale) / 2.0 - content.min_y() * scale,
        );

        Transform::new(scale, translate)
    }
}

impl DiagramView for SvgView {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn bind_data(&mut self, layout: &DiagramLayout) -> Result<(), ViewError> {
        debug!(nodes = layout.nodes().len(), links = layout.links().len(); "Binding layout to SVG view");
        self.layout = Some(layout.clone());
        self.refresh()
    }

    fn fit_to_screen(&mut self) -> Result<(), ViewError> {
        self.transform = self.fitted_transform();
        debug!(
            scale = self.transform.scale(),
            x = self.transform.translate().x(),
            y = self.transform.translate().y();
            "Fitted diagram to screen"
        );
        self.refresh()
    }
}
