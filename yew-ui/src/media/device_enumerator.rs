// SPDX-License-Identifier: MIT OR Apache-2.0

use futures::future::LocalBoxFuture;
use gloo_utils::window;
use js_sys::Array;
use videocall_meeting_setup::{DeviceEnumerator, InputDevice, MediaKind, SetupError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaDeviceInfo, MediaDeviceKind};

/// Lists devices through `navigator.mediaDevices.enumerateDevices()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserDeviceEnumerator;

impl DeviceEnumerator for BrowserDeviceEnumerator {
    fn enumerate(&self) -> LocalBoxFuture<'_, Result<Vec<InputDevice>, SetupError>> {
        Box::pin(enumerate_devices())
    }
}

pub async fn enumerate_devices() -> Result<Vec<InputDevice>, SetupError> {
    let media_devices = window()
        .navigator()
        .media_devices()
        .map_err(|e| SetupError::DeviceEnumeration(js_error_message(&e)))?;
    let promise = media_devices
        .enumerate_devices()
        .map_err(|e| SetupError::DeviceEnumeration(js_error_message(&e)))?;
    let devices = JsFuture::from(promise)
        .await
        .map_err(|e| SetupError::DeviceEnumeration(js_error_message(&e)))?
        .unchecked_into::<Array>();

    Ok(devices
        .iter()
        .map(|device| device.unchecked_into::<MediaDeviceInfo>())
        .map(|device| {
            InputDevice::new(device.device_id(), device.label(), media_kind(device.kind()))
        })
        .collect())
}

fn media_kind(kind: MediaDeviceKind) -> MediaKind {
    match kind {
        MediaDeviceKind::Audioinput => MediaKind::AudioInput,
        MediaDeviceKind::Videoinput => MediaKind::VideoInput,
        MediaDeviceKind::Audiooutput => MediaKind::AudioOutput,
        _ => MediaKind::Other,
    }
}

/// Best-effort human readable text for a rejected promise.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
