//! Target routing for the browser bridge.

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn fetch_text(url: &str) -> Result<Option<String>, String> {
    imp::fetch_text(url).await
}

pub fn measure_text(text: &str, font: &str) -> Option<f64> {
    imp::measure_text(text, font)
}

pub fn set_body_theme(theme: &str) -> Result<(), String> {
    imp::set_body_theme(theme)
}

pub fn set_body_attribute(name: &str, value: &str) -> Result<(), String> {
    imp::set_body_attribute(name, value)
}

pub fn local_storage_get(key: &str) -> Option<String> {
    imp::local_storage_get(key)
}

pub fn local_storage_set(key: &str, value: &str) -> Result<(), String> {
    imp::local_storage_set(key, value)
}
