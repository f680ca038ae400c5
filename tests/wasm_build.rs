//! WASM build test
//!
//! Runs the JavaScript-facing API in a browser.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use whatswrong_wasm::api::{diff_instances, layout_instance, render_svg};
use whatswrong_wasm::{NlpInstance, TokenProperty};

wasm_bindgen_test_configure!(run_in_browser);

fn instance() -> JsValue {
    let mut instance = NlpInstance::new();
    for word in ["John", "sees", "Mary"] {
        instance.add_token_with_properties([TokenProperty::new("word", word)]);
    }
    instance.add_dependency(1, 0, "SBJ", "dep").unwrap();
    serde_wasm_bindgen::to_value(&instance).unwrap()
}

#[wasm_bindgen_test]
fn test_layout_instance_with_defaults() {
    let result = layout_instance(instance(), JsValue::UNDEFINED, JsValue::NULL);
    assert!(result.is_ok());
}

#[wasm_bindgen_test]
fn test_render_svg() {
    let svg = render_svg(instance(), JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
    assert!(svg.contains(">SBJ</text>"));
}

#[wasm_bindgen_test]
fn test_diff_instances() {
    assert!(diff_instances(instance(), instance()).is_ok());
}

#[wasm_bindgen_test]
fn test_invalid_instance_is_rejected() {
    let result = layout_instance(JsValue::from_str("nope"), JsValue::UNDEFINED, JsValue::UNDEFINED);
    assert!(result.is_err());
}
