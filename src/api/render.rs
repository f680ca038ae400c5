//! Layout operations for the WASM API
//!
//! - Display list: primitives for a JS canvas front end
//! - SVG: a standalone drawing
//! - JSON: the display list as a string, for inspection/debugging

use super::compare::FilterOptions;
use super::helpers::{deserialize, deserialize_or_default, render_config, serialize, to_js_error};
use crate::filter::InstanceFilter;
use crate::models::NlpInstance;
use crate::renderers::{DisplayList, RenderConfig, SvgWriter};
use wasm_bindgen::prelude::*;

/// Filter and lay out an instance
pub fn layout(instance: &NlpInstance, config: &RenderConfig, filter: &FilterOptions) -> DisplayList {
    let visible = filter.filter(instance);
    if visible.edge_count() == 0 && instance.edge_count() > 0 {
        log::warn!("layout: filter hides all {} edges", instance.edge_count());
    }
    let list = DisplayList::render(&visible, config);
    log::debug!(
        "layout: {} of {} edges visible, {} primitives, {:.1}x{:.1}",
        visible.edge_count(),
        instance.edge_count(),
        list.len(),
        list.width,
        list.height
    );
    list
}

/// Lay out an instance into a display list
///
/// # Parameters
/// - `instance`: instance document (`tokens`, `edges`, `split_points`, `render_mode`)
/// - `config`: optional render configuration
/// - `filter`: optional edge filter
#[wasm_bindgen(js_name = layoutInstance)]
pub fn layout_instance(instance: JsValue, config: JsValue, filter: JsValue) -> Result<JsValue, JsValue> {
    let instance: NlpInstance = deserialize(instance, "Invalid instance")?;
    let config = render_config(config)?;
    let filter: FilterOptions = deserialize_or_default(filter, "Invalid filter")?;

    let list = layout(&instance, &config, &filter);
    serialize(&list, "Failed to serialize display list")
}

/// Lay out an instance and return it as an SVG document
#[wasm_bindgen(js_name = renderSvg)]
pub fn render_svg(instance: JsValue, config: JsValue, filter: JsValue) -> Result<String, JsValue> {
    let instance: NlpInstance = deserialize(instance, "Invalid instance")?;
    let config = render_config(config)?;
    let filter: FilterOptions = deserialize_or_default(filter, "Invalid filter")?;

    Ok(SvgWriter::write(&layout(&instance, &config, &filter)))
}

/// Lay out an instance and return the display list as JSON text
#[wasm_bindgen(js_name = exportDisplayListJson)]
pub fn export_display_list_json(instance: JsValue, config: JsValue) -> Result<String, JsValue> {
    let instance: NlpInstance = deserialize(instance, "Invalid instance")?;
    let config = render_config(config)?;

    let list = layout(&instance, &config, &FilterOptions::default());
    serde_json::to_string_pretty(&list).map_err(|e| to_js_error("Failed to serialize display list", e))
}

/// Parse a YAML render configuration into its JS object form
#[wasm_bindgen(js_name = loadRenderConfig)]
pub fn load_render_config(yaml: &str) -> Result<JsValue, JsValue> {
    let config = RenderConfig::from_yaml_str(yaml).map_err(|e| to_js_error("Invalid render configuration", e))?;
    serialize(&config, "Failed to serialize render configuration")
}
