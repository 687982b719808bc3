use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

const THEME_CLASSES: [&str; 2] = ["theme-terminal", "theme-blog"];

#[wasm_bindgen(inline_js = r#"
export async function jsFetchText(url) {
  const res = await fetch(url, { cache: 'no-store' });
  if (res.status === 404) return null;
  if (!res.ok) throw new Error(`HTTP ${res.status} for ${url}`);
  return await res.text();
}

let measureContext = null;

export function jsMeasureText(text, font) {
  if (typeof document === 'undefined') return -1;
  if (!measureContext) {
    measureContext = document.createElement('canvas').getContext('2d');
  }
  if (!measureContext) return -1;
  measureContext.font = font;
  return measureContext.measureText(text).width;
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsFetchText)]
    fn js_fetch_text(url: &str) -> Promise;
    #[wasm_bindgen(js_name = jsMeasureText)]
    fn js_measure_text(text: &str, font: &str) -> f64;
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn body() -> Result<web_sys::HtmlElement, String> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
        .ok_or_else(|| "document body unavailable".to_string())
}

pub async fn fetch_text(url: &str) -> Result<Option<String>, String> {
    let value = JsFuture::from(js_fetch_text(url))
        .await
        .map_err(js_error_to_string)?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    value
        .as_string()
        .map(Some)
        .ok_or_else(|| format!("non-text response body for {url}"))
}

pub fn measure_text(text: &str, font: &str) -> Option<f64> {
    let width = js_measure_text(text, font);
    (width.is_finite() && width >= 0.0).then_some(width)
}

pub fn set_body_theme(theme: &str) -> Result<(), String> {
    let classes = body()?.class_list();
    for class in THEME_CLASSES {
        classes.remove_1(class).map_err(js_error_to_string)?;
    }
    classes
        .add_1(&format!("theme-{theme}"))
        .map_err(js_error_to_string)
}

pub fn set_body_attribute(name: &str, value: &str) -> Result<(), String> {
    body()?
        .set_attribute(name, value)
        .map_err(js_error_to_string)
}

pub fn local_storage_get(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok().flatten()?;
    storage.get_item(key).ok().flatten()
}

pub fn local_storage_set(key: &str, value: &str) -> Result<(), String> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())?;
    storage
        .set_item(key, value)
        .map_err(|e| format!("localStorage set_item failed: {e:?}"))
}
