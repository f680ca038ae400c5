//! WASM API
//!
//! JavaScript-facing functions. Instances, configurations and filters are
//! passed as plain JS objects in their serde form.
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion shared by all calls
//! - `render`: layout into display lists, SVG and JSON
//! - `compare`: diff and filtering of instances

pub mod compare;
pub mod helpers;
pub mod render;

pub use compare::{diff_instances, filter_instance, FilterOptions};
pub use render::{export_display_list_json, layout_instance, load_render_config, render_svg};
