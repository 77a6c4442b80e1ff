// SPDX-License-Identifier: MIT OR Apache-2.0

//! Camera and microphone pickers shown on the setup screen.

use std::rc::Rc;

use videocall_meeting_setup::{DeviceEnumerator, InputDevice, MediaKind};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::context::DevicesCtx;
use crate::media::{BrowserDeviceEnumerator, LocalTracks};

pub enum Msg {
    LoadDevices,
    DevicesLoaded(Vec<InputDevice>),
    LoadFailed(String),
    OnCameraSelect(String),
    OnMicSelect(String),
}

pub struct DeviceSettings {
    devices: Vec<InputDevice>,
    error: Option<String>,
    selected_camera: Option<String>,
    selected_mic: Option<String>,
}

impl DeviceSettings {
    fn enumerator(ctx: &Context<Self>) -> Rc<dyn DeviceEnumerator> {
        match ctx.link().context::<DevicesCtx>(Callback::noop()) {
            Some((DevicesCtx(devices), _)) => devices,
            None => Rc::new(BrowserDeviceEnumerator),
        }
    }

    fn tracks(ctx: &Context<Self>) -> Option<LocalTracks> {
        ctx.link()
            .context::<LocalTracks>(Callback::noop())
            .map(|(tracks, _)| tracks)
    }

    fn of_kind(&self, kind: MediaKind) -> impl Iterator<Item = &InputDevice> {
        self.devices.iter().filter(move |d| d.kind == kind)
    }

    fn select(ctx: &Context<Self>, kind: MediaKind, device_id: String) {
        let Some(tracks) = Self::tracks(ctx) else {
            log::debug!("no local tracks in context, {kind} selection not applied");
            return;
        };
        spawn_local(async move {
            if let Err(e) = tracks.select_device(kind, device_id).await {
                log::error!("failed to switch {kind}: {e}");
            }
        });
    }
}

impl Component for DeviceSettings {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::LoadDevices);
        let tracks = Self::tracks(ctx);
        Self {
            devices: Vec::new(),
            error: None,
            selected_camera: tracks
                .as_ref()
                .and_then(|t| t.selected_device(MediaKind::VideoInput)),
            selected_mic: tracks.and_then(|t| t.selected_device(MediaKind::AudioInput)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::LoadDevices => {
                let enumerator = Self::enumerator(ctx);
                let link = ctx.link().clone();
                spawn_local(async move {
                    match enumerator.enumerate().await {
                        Ok(devices) => link.send_message(Msg::DevicesLoaded(devices)),
                        Err(e) => link.send_message(Msg::LoadFailed(e.to_string())),
                    }
                });
                false
            }
            Msg::DevicesLoaded(devices) => {
                self.devices = devices;
                self.error = None;
                true
            }
            Msg::LoadFailed(error) => {
                log::error!("{error}");
                self.error = Some(error);
                true
            }
            Msg::OnCameraSelect(camera) => {
                self.selected_camera = Some(camera.clone());
                Self::select(ctx, MediaKind::VideoInput, camera);
                true
            }
            Msg::OnMicSelect(mic) => {
                self.selected_mic = Some(mic.clone());
                Self::select(ctx, MediaKind::AudioInput, mic);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        fn selection(event: Event) -> Option<String> {
            event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|select| select.value())
        }
        let options = |kind: MediaKind, selected: &Option<String>| -> Html {
            self.of_kind(kind)
                .map(|device| {
                    let label = if device.label.is_empty() {
                        format!("{kind} {}", device.device_id)
                    } else {
                        device.label.clone()
                    };
                    html! {
                        <option
                            value={device.device_id.clone()}
                            selected={selected.as_deref() == Some(device.device_id.as_str())}
                        >
                            { label }
                        </option>
                    }
                })
                .collect()
        };

        html! {
            <div class="device-settings">
                <label for="video-select">{ "Camera" }</label>
                <select
                    id="video-select"
                    class="device-selector"
                    onchange={ctx.link().batch_callback(|e: Event| selection(e).map(Msg::OnCameraSelect))}
                >
                    { options(MediaKind::VideoInput, &self.selected_camera) }
                </select>
                <label for="audio-select">{ "Microphone" }</label>
                <select
                    id="audio-select"
                    class="device-selector"
                    onchange={ctx.link().batch_callback(|e: Event| selection(e).map(Msg::OnMicSelect))}
                >
                    { options(MediaKind::AudioInput, &self.selected_mic) }
                </select>
                {
                    if let Some(error) = &self.error {
                        html! { <p class="device-settings-error">{ error.clone() }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}
