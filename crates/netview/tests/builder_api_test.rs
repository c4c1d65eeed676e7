//! Integration tests for the DiagramBuilder API

use netview::{
    DiagramBuilder, NetviewError,
    config::{AppConfig, LayoutConfig, StyleConfig},
};

const PIPELINE: &str = r#"
[[nodes]]
id = "fetch"
label = "Fetch"
outputs = ["instr"]

[[nodes]]
id = "decode"
label = "Decode"
inputs = ["instr"]
outputs = ["op", "regs"]

[[nodes]]
id = "execute"
label = "Execute"
inputs = ["op", "regs"]
outputs = ["result"]

[[nets]]
name = "instr"
source = "fetch.instr"
targets = ["decode.instr"]

[[nets]]
name = "op"
source = "decode.op"
targets = ["execute.op"]

[[nets]]
name = "regs"
source = "decode.regs"
targets = ["execute.regs"]
"#;

#[test]
fn test_parse_simple_netlist() {
    let builder = DiagramBuilder::default();
    let result = builder.parse(PIPELINE);
    assert!(
        result.is_ok(),
        "Should parse valid netlist: {:?}",
        result.err()
    );
}

#[test]
fn test_render_simple_netlist() {
    let builder = DiagramBuilder::default();
    let netlist = builder.parse(PIPELINE).expect("Failed to parse netlist");
    let svg = builder.render_svg(&netlist).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    for net in ["instr", "op", "regs"] {
        assert!(svg.contains(&format!("data-net=\"{net}\"")), "missing net {net}");
    }
}

#[test]
fn test_layout_places_stages_left_to_right() {
    let builder = DiagramBuilder::default();
    let netlist = builder.parse(PIPELINE).unwrap();
    let layout = builder.layout(&netlist).unwrap();

    let columns: Vec<usize> = layout.nodes().iter().map(|node| node.column()).collect();
    assert_eq!(columns, vec![0, 1, 2]);
    assert_eq!(layout.links().len(), 3);
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "[[nets]]\nsource = \"a.\"\ntargets = [\"b\"]\n";
    let builder = DiagramBuilder::default();

    match builder.parse(source) {
        Err(NetviewError::Parse { err, src }) => {
            assert_eq!(src, source);
            assert_eq!(err.diagnostics().len(), 1);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_inconsistent_netlist_is_rejected() {
    let source = r#"
        [[nodes]]
        id = "a"

        [[nets]]
        source = "a"
        targets = ["missing"]
    "#;

    let builder = DiagramBuilder::default();
    let netlist = builder.parse(source).unwrap();
    let err = builder.render_svg(&netlist).unwrap_err();

    assert!(matches!(err, NetviewError::Consistency(_)));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_builder_with_config() {
    let config = AppConfig::new(
        LayoutConfig::default().with_column_spacing(200.0),
        StyleConfig::default().with_background_color("white"),
    );
    let builder = DiagramBuilder::new(config);
    let netlist = builder.parse(PIPELINE).unwrap();

    let layout = builder.layout(&netlist).unwrap();
    let second = layout.node(1).unwrap().bounds();
    assert_eq!(second.min_x(), layout.column_width() + 200.0);

    let svg = builder.render_svg(&netlist).unwrap();
    assert!(svg.contains("data-layer=\"background\""));
}

#[test]
fn test_invalid_style_is_a_view_error() {
    let config = AppConfig::new(
        LayoutConfig::default(),
        StyleConfig::default().with_link_color("???"),
    );
    let builder = DiagramBuilder::new(config);
    let netlist = builder.parse(PIPELINE).unwrap();

    assert!(matches!(
        builder.render_svg(&netlist),
        Err(NetviewError::View(_))
    ));
}

#[test]
fn test_net_without_targets_is_rejected() {
    let source = r#"
        [[nodes]]
        id = "a"
        outputs = ["q"]

        [[nets]]
        name = "n"
        source = "a.q"
        targets = []
    "#;

    let builder = DiagramBuilder::default();
    let netlist = builder.parse(source).unwrap();
    assert_eq!(netlist.nets().len(), 1);

    match builder.render_svg(&netlist) {
        Err(NetviewError::Consistency(err)) => {
            assert_eq!(err.to_string(), "netlist is inconsistent: net `n` has no targets");
        }
        other => panic!("Expected a consistency error, got {other:?}"),
    }
}
