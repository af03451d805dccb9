//! Reads `window.SMART_LAUNDRY_CONFIG` on top of the build-time defaults.

use laundry_shared::config::{AppConfig, RuntimeConfig};

pub fn load() -> AppConfig {
    AppConfig::load_with(runtime_config())
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use laundry_shared::config::RUNTIME_CONFIG_GLOBAL;
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str(RUNTIME_CONFIG_GLOBAL)).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        google_auth_url: read_runtime_value(&object, "google_auth_url"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    laundry_shared::config::normalize_runtime_value(&value)
}
