//! Netview Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Netview crates:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Netlist**: Nodes, ports, nets and links ([`netlist`] module)
//! - **Draw**: Render layers and strokes for SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod netlist;
