fn unsupported() -> String {
    "Browser fetch is only available when compiled for wasm32".to_string()
}

pub async fn fetch_text(_url: &str) -> Result<Option<String>, String> {
    Err(unsupported())
}

pub fn measure_text(_text: &str, _font: &str) -> Option<f64> {
    None
}

pub fn set_body_theme(_theme: &str) -> Result<(), String> {
    Ok(())
}

pub fn set_body_attribute(_name: &str, _value: &str) -> Result<(), String> {
    Ok(())
}

pub fn local_storage_get(_key: &str) -> Option<String> {
    None
}

pub fn local_storage_set(_key: &str, _value: &str) -> Result<(), String> {
    Ok(())
}
