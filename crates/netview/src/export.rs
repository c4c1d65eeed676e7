//! Conversion of laid-out diagrams into output documents.

pub mod svg;
