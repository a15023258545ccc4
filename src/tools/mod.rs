//! MCP tool implementations for Raide.
//!
//! This module contains the input types and helper functions for
//! MCP tools that expose Raide operations.

mod inputs;

pub use inputs::*;
