//! Graph IR - Common Types and Errors
//! 
//! This crate contains the value types and error definitions shared by
//! the node primitive and the graph container that owns it.

pub mod error;
pub mod types;

pub use error::GraphError;
pub use types::*;
