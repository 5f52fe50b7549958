//! Core types and utilities for the Graft component engine.
//!
//! This crate provides the foundational types used across all other graft crates:
//! - Node tree types for documents, elements, and inert templates
//! - Component definitions and display modes
//! - The runtime value type for expression evaluation
//! - Error types

pub mod attrs;
pub mod component;
pub mod errors;
pub mod node;
pub mod value;

pub use component::*;
pub use errors::*;
pub use node::*;
pub use value::*;
