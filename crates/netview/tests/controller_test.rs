//! Integration tests for the diagram controller: stage order, failure
//! handling and delegation to the view.

use std::{cell::RefCell, rc::Rc};

use netview::{
    DiagramApi, DiagramController, NetviewError,
    config::{LayoutConfig, StyleConfig},
    layout::{
        ColumnPipeline, ConsistencyError, DiagramLayout, LayoutError, LayoutPipeline,
    },
    netlist::{Endpoint, Link, Net, Netlist, Node, UnresolvedLink},
    view::{DiagramView, Mount, SvgView, ViewError},
};

type Calls = Rc<RefCell<Vec<&'static str>>>;

/// Pipeline delegating to [`ColumnPipeline`] while recording each stage call.
struct RecordingPipeline {
    inner: ColumnPipeline,
    calls: Calls,
}

impl LayoutPipeline for RecordingPipeline {
    fn column_width(&self, nodes: &[Node]) -> f32 {
        self.calls.borrow_mut().push("column_width");
        self.inner.column_width(nodes)
    }

    fn check_consistency(&self, nodes: &[Node], nets: &[Net]) -> Result<(), ConsistencyError> {
        self.calls.borrow_mut().push("check_consistency");
        self.inner.check_consistency(nodes, nets)
    }

    fn generate_links(&self, nets: &[Net]) -> Vec<UnresolvedLink> {
        self.calls.borrow_mut().push("generate_links");
        self.inner.generate_links(nets)
    }

    fn resolve_links(
        &self,
        nodes: &[Node],
        links: &[UnresolvedLink],
    ) -> Result<Vec<Link>, LayoutError> {
        self.calls.borrow_mut().push("resolve_links");
        self.inner.resolve_links(nodes, links)
    }

    fn assign_columns(&self, nodes: &[Node], links: &[Link], column_width: f32) -> DiagramLayout {
        self.calls.borrow_mut().push("assign_columns");
        self.inner.assign_columns(nodes, links, column_width)
    }
}

/// View recording every bound layout and fit request.
struct RecordingView {
    mount: Mount,
    calls: Calls,
    bound: Vec<DiagramLayout>,
    fits: usize,
}

impl DiagramView for RecordingView {
    fn mount(&self) -> &Mount {
        &self.mount
    }

    fn bind_data(&mut self, layout: &DiagramLayout) -> Result<(), ViewError> {
        self.calls.borrow_mut().push("bind_data");
        self.bound.push(layout.clone());
        Ok(())
    }

    fn fit_to_screen(&mut self) -> Result<(), ViewError> {
        self.calls.borrow_mut().push("fit_to_screen");
        self.fits += 1;
        Ok(())
    }
}

fn recording_controller() -> (DiagramController<RecordingView, RecordingPipeline>, Calls) {
    let calls = Calls::default();
    let view = RecordingView {
        mount: Mount::Memory,
        calls: Rc::clone(&calls),
        bound: Vec::new(),
        fits: 0,
    };
    let pipeline = RecordingPipeline {
        inner: ColumnPipeline::default(),
        calls: Rc::clone(&calls),
    };
    (DiagramController::with_pipeline(view, pipeline), calls)
}

fn endpoint(text: &str) -> Endpoint {
    text.parse().unwrap()
}

fn a_to_b() -> Netlist {
    Netlist::new(
        vec![Node::new("A"), Node::new("B")],
        vec![Net::new(endpoint("A"), vec![endpoint("B")])],
    )
}

#[test]
fn test_redraw_runs_stages_in_order() {
    let (mut controller, calls) = recording_controller();

    controller.redraw(&a_to_b()).unwrap();

    assert_eq!(
        *calls.borrow(),
        vec![
            "column_width",
            "check_consistency",
            "generate_links",
            "resolve_links",
            "assign_columns",
            "bind_data",
        ]
    );
}

#[test]
fn test_each_redraw_binds_once() {
    let (mut controller, _calls) = recording_controller();

    controller.redraw(&a_to_b()).unwrap();
    controller.redraw(&a_to_b()).unwrap();

    assert_eq!(controller.view().bound.len(), 2);
    assert_eq!(controller.view().bound[0], controller.view().bound[1]);
}

#[test]
fn test_a_to_b_scenario() {
    let (mut controller, _calls) = recording_controller();

    controller.redraw(&a_to_b()).unwrap();

    let layout = &controller.view().bound[0];
    let names: Vec<String> = layout
        .nodes()
        .iter()
        .map(|placed| placed.node().id().to_string())
        .collect();
    assert_eq!(names, vec!["A", "B"]);

    assert_eq!(layout.links().len(), 1);
    let link = layout.links()[0];
    assert_eq!(link.source(), 0);
    assert_eq!(link.target(), 1);
    assert_eq!(link.source_port(), None);
    assert_eq!(link.target_port(), None);

    assert_eq!(layout.node(0).unwrap().column(), 0);
    assert_eq!(layout.node(1).unwrap().column(), 1);
}

#[test]
fn test_inconsistent_netlist_stops_before_links() {
    let (mut controller, calls) = recording_controller();
    let netlist = Netlist::new(
        vec![Node::new("A")],
        vec![Net::new(endpoint("A"), vec![endpoint("ghost")])],
    );

    let err = controller.redraw(&netlist).unwrap_err();

    assert!(matches!(err, NetviewError::Consistency(_)));
    assert_eq!(*calls.borrow(), vec!["column_width", "check_consistency"]);
    assert!(controller.view().bound.is_empty());
}

#[test]
fn test_fit_delegates_to_view_without_touching_data() {
    let (mut controller, calls) = recording_controller();
    controller.redraw(&a_to_b()).unwrap();
    let bound_before = controller.view().bound.clone();
    calls.borrow_mut().clear();

    controller.fit_diagram_to_screen().unwrap();

    assert_eq!(*calls.borrow(), vec!["fit_to_screen"]);
    assert_eq!(controller.view().fits, 1);
    assert_eq!(controller.view().bound, bound_before);
}

#[test]
fn test_empty_netlist_binds_empty_layout() {
    let (mut controller, _calls) = recording_controller();

    controller.redraw(&Netlist::default()).unwrap();

    let layout = &controller.view().bound[0];
    assert!(layout.is_empty());
    assert_eq!(layout.column_width(), LayoutConfig::default().min_column_width());
}

#[test]
fn test_svg_view_writes_to_file_mount() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.svg");

    let view = SvgView::new(Mount::file(&path), &StyleConfig::default()).unwrap();
    let mut controller = DiagramController::new(view, &LayoutConfig::default());
    assert!(!path.exists());

    controller.redraw(&a_to_b()).unwrap();
    controller.fit_diagram_to_screen().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, controller.view().document());
    assert!(written.contains("data-node=\"A\""));
}

#[test]
fn test_svg_view_reports_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("diagram.svg");

    let view = SvgView::new(Mount::file(&path), &StyleConfig::default()).unwrap();
    let mut controller = DiagramController::new(view, &LayoutConfig::default());

    let err = controller.redraw(&a_to_b()).unwrap_err();
    assert!(matches!(err, NetviewError::View(ViewError::Write { .. })));
}
