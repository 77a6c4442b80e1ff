// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime configuration.
//!
//! The hosting page injects a frozen `window.__APP_CONFIG` object before the
//! WASM bundle starts; nothing is baked in at compile time.

use serde::Deserialize;
use serde_wasm_bindgen::from_value as from_js_value;
use videocall_meeting_setup::SetupConfig;
use wasm_bindgen::JsValue;
use web_sys::window;

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(rename = "apiBaseUrl")]
    pub api_base_url: String,
    #[serde(rename = "meetingApiBaseUrl")]
    #[serde(default)]
    pub meeting_api_base_url: Option<String>,
    #[serde(rename = "displayName")]
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub setup: SetupConfig,
}

impl RuntimeConfig {
    /// The meeting API lives next to the main API unless configured apart.
    pub fn meeting_api_base_url(&self) -> &str {
        self.meeting_api_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.api_base_url)
    }
}

pub fn app_config() -> Result<RuntimeConfig, String> {
    let win = window().ok_or_else(|| "No window available".to_string())?;
    let config = js_sys::Reflect::get(&win, &JsValue::from_str("__APP_CONFIG"))
        .unwrap_or(JsValue::UNDEFINED);
    if config.is_undefined() || config.is_null() {
        return Err("Runtime configuration not found (window.__APP_CONFIG missing)".to_string());
    }
    from_js_value::<RuntimeConfig>(config)
        .map_err(|e| format!("Failed to parse __APP_CONFIG: {e:?}"))
}
