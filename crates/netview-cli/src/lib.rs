//! CLI logic for the Netview diagram tool.
//!
//! Reads a netlist document, draws it through a [`DiagramController`] bound
//! to an SVG view mounted on the output file, and optionally fits the result
//! to the configured viewport.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use netview::{
    DiagramApi, DiagramBuilder, DiagramController, NetviewError,
    view::{Mount, SvgView},
};

/// Run the Netview CLI application
///
/// This function processes the input file through the Netview pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `NetviewError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Consistency and layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), NetviewError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        fit = args.fit;
        "Processing netlist"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let netlist = builder.parse(&source)?;

    // The view rewrites the output file on every redraw and fit
    let view = SvgView::new(Mount::file(&args.output), builder.config().style())?;
    let mut controller = DiagramController::new(view, builder.config().layout());

    controller.redraw(&netlist)?;
    if args.fit {
        controller.fit_diagram_to_screen()?;
    }

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
