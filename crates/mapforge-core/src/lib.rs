//! Core Types for the mapforge Level Compiler Front End
//!
//! This crate provides the foundational value types shared by the mapforge
//! pipeline. It includes:
//!
//! - **Parameters**: Per-stage compiler parameter records ([`parms`] module)
//! - **Paths**: Artifact path transforms ([`path`] module)
//! - **Vectors**: The RGB color triple used by lighting ([`vector`] module)
//!
//! Everything here is a plain value type with no I/O; the compiler gateway
//! and the stage orchestrator live in the `mapforge` crate.

pub mod parms;
pub mod path;
pub mod vector;
