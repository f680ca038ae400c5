//! Annotation graph layout and diff WASM Module
//!
//! Models NLP annotations (tokens with properties plus typed, labelled
//! edges), compares gold and guess annotations, and lays them out as arcs
//! above and spans below a token row, or as links between two aligned rows.

pub mod api;
pub mod diff;
pub mod error;
pub mod filter;
pub mod models;
pub mod renderers;

// Re-export commonly used types
pub use diff::{diff, DiffCategory, DiffSummary};
pub use error::{ConfigError, ModelError};
pub use filter::{EdgeLabelFilter, EdgeTokenFilter, EdgeTypeFilter, FilterChain, InstanceFilter};
pub use models::{Edge, NlpInstance, RenderCategory, RenderMode, Token, TokenProperty};
pub use renderers::{render, Dimensions, DisplayList, RenderConfig, Scene, SvgWriter};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // a second init (module re-instantiated) keeps the first logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("annotation layout WASM module initialized");
}
