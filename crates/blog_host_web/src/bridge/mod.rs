//! Browser capability bridge used by the `blog_host_web` adapters.
//!
//! Each function forwards to `interop`, which picks the `wasm32` or native implementation.

mod interop;

/// Fetches `url` as text, bypassing the HTTP cache. `Ok(None)` means the server answered 404.
pub async fn fetch_text(url: &str) -> Result<Option<String>, String> {
    interop::fetch_text(url).await
}

/// Canvas width of `text` in the CSS `font`, or `None` when no canvas is available.
pub fn measure_text(text: &str, font: &str) -> Option<f64> {
    interop::measure_text(text, font)
}

/// Replaces the `theme-*` class on `<body>`.
pub fn set_body_theme(theme: &str) -> Result<(), String> {
    interop::set_body_theme(theme)
}

/// Sets a `data-*` style attribute on `<body>`.
pub fn set_body_attribute(name: &str, value: &str) -> Result<(), String> {
    interop::set_body_attribute(name, value)
}

pub fn local_storage_get(key: &str) -> Option<String> {
    interop::local_storage_get(key)
}

pub fn local_storage_set(key: &str, value: &str) -> Result<(), String> {
    interop::local_storage_set(key, value)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_bridge_reports_missing_browser() {
        assert!(block_on(fetch_text("./blog/en/manifest.json")).is_err());
        assert_eq!(measure_text("ls", "400 14px monospace"), None);
        assert!(set_body_theme("blog").is_ok());
        assert!(set_body_attribute("data-lang", "en").is_ok());
        assert_eq!(local_storage_get("missing"), None);
        assert!(local_storage_set("key", "{}").is_ok());
    }
}
