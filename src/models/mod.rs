//! Models module for the annotation graph
//!
//! This module contains the token, edge and instance types that
//! every layout strategy and the diff engine consume.

pub mod token;
pub mod edge;
pub mod instance;

// Re-export commonly used types
pub use token::{Token, TokenProperty};
pub use edge::{Edge, RenderCategory};
pub use instance::{InstanceDocument, NlpInstance, RenderMode, TOKEN_INDEX_LIMIT};
