//! SVG drawing primitives shared by diagram views.
//!
//! - [`RenderLayer`] and [`LayeredOutput`] group SVG nodes by z-order.
//! - [`StrokeDefinition`] and [`apply_stroke!`](crate::apply_stroke!) describe
//!   and apply line styles.

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeJoin, StrokeStyle};
