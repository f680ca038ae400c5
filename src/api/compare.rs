//! Diff and filter operations for the WASM API

use super::helpers::{deserialize, serialize, to_js_error};
use crate::diff::{diff, DiffSummary};
use crate::filter::{EdgeLabelFilter, EdgeTokenFilter, EdgeTypeFilter, FilterChain, InstanceFilter};
use crate::models::NlpInstance;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Edge filter settings accepted from JavaScript
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FilterOptions {
    pub edge_types: EdgeTypeFilter,
    pub edge_labels: EdgeLabelFilter,
    pub edge_tokens: EdgeTokenFilter,
}

impl InstanceFilter for FilterOptions {
    fn filter(&self, instance: &NlpInstance) -> NlpInstance {
        FilterChain::new()
            .with(self.edge_types.clone())
            .with(self.edge_labels.clone())
            .with(self.edge_tokens.clone())
            .filter(instance)
    }
}

/// Result of comparing two instances
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DiffResult {
    pub instance: NlpInstance,
    pub summary: DiffSummary,
}

/// Compare a gold and a guess instance
///
/// # Returns
/// `{ instance, summary }` where every edge type of `instance` carries a
/// `:Match`, `:FN` or `:FP` suffix
#[wasm_bindgen(js_name = diffInstances)]
pub fn diff_instances(gold: JsValue, guess: JsValue) -> Result<JsValue, JsValue> {
    let gold: NlpInstance = deserialize(gold, "Invalid gold instance")?;
    let guess: NlpInstance = deserialize(guess, "Invalid guess instance")?;

    let instance = diff(&gold, &guess).map_err(|e| to_js_error("Diff failed", e))?;
    let summary = DiffSummary::of(&instance);
    log::info!(
        "diffInstances: {} matches, {} FN, {} FP",
        summary.matches,
        summary.false_negatives,
        summary.false_positives
    );
    serialize(&DiffResult { instance, summary }, "Failed to serialize diff")
}

/// Apply an edge filter to an instance
#[wasm_bindgen(js_name = filterInstance)]
pub fn filter_instance(instance: JsValue, filter: JsValue) -> Result<JsValue, JsValue> {
    let instance: NlpInstance = deserialize(instance, "Invalid instance")?;
    let filter: FilterOptions = deserialize(filter, "Invalid filter")?;
    serialize(&filter.filter(&instance), "Failed to serialize instance")
}
