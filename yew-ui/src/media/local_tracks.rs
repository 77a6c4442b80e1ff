// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local capture tracks shared between the call session and the preview.
//!
//! Enabling a device opens a `getUserMedia` stream for it; disabling stops
//! every track in that stream so the browser's capture indicator goes off.
//! Components subscribe to camera stream changes instead of polling.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use gloo_utils::window;
use videocall_meeting_setup::{DeviceAction, DeviceControl, MediaKind, SetupError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};
use yew::Callback;

use super::js_error_message;

#[derive(Default)]
struct LocalTracksInner {
    camera: Option<MediaStream>,
    microphone: Option<MediaStream>,
    camera_device: Option<String>,
    microphone_device: Option<String>,
    camera_subscribers: Vec<(usize, Callback<Option<MediaStream>>)>,
    next_subscriber_id: usize,
    camera_generation: u64,
    microphone_generation: u64,
}

impl LocalTracksInner {
    fn slot(&mut self, kind: MediaKind) -> Option<&mut Option<MediaStream>> {
        match kind {
            MediaKind::VideoInput => Some(&mut self.camera),
            MediaKind::AudioInput => Some(&mut self.microphone),
            MediaKind::AudioOutput | MediaKind::Other => None,
        }
    }

    /// Bumped on every release so a capture that resolves afterwards can
    /// tell it was cancelled.
    fn generation(&mut self, kind: MediaKind) -> Option<&mut u64> {
        match kind {
            MediaKind::VideoInput => Some(&mut self.camera_generation),
            MediaKind::AudioInput => Some(&mut self.microphone_generation),
            MediaKind::AudioOutput | MediaKind::Other => None,
        }
    }

    fn device(&self, kind: MediaKind) -> Option<String> {
        match kind {
            MediaKind::VideoInput => self.camera_device.clone(),
            MediaKind::AudioInput => self.microphone_device.clone(),
            MediaKind::AudioOutput | MediaKind::Other => None,
        }
    }
}

/// Shared handle to the local camera and microphone streams.
#[derive(Clone, Default)]
pub struct LocalTracks {
    inner: Rc<RefCell<LocalTracksInner>>,
}

impl PartialEq for LocalTracks {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl LocalTracks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera_stream(&self) -> Option<MediaStream> {
        self.inner.borrow().camera.clone()
    }

    pub fn is_active(&self, kind: MediaKind) -> bool {
        self.inner
            .borrow_mut()
            .slot(kind)
            .is_some_and(|stream| stream.is_some())
    }

    pub fn selected_device(&self, kind: MediaKind) -> Option<String> {
        self.inner.borrow().device(kind)
    }

    /// Open a capture stream for `kind` unless one is already open.
    ///
    /// If `kind` is released while `getUserMedia` is pending, the new
    /// stream is stopped instead of stored.
    pub async fn acquire(&self, kind: MediaKind) -> Result<(), SetupError> {
        if self.is_active(kind) {
            return Ok(());
        }
        let device_id = self.selected_device(kind);
        let constraints = MediaStreamConstraints::new();
        let track = track_constraint(device_id.as_deref());
        match kind {
            MediaKind::VideoInput => constraints.set_video(&track),
            MediaKind::AudioInput => constraints.set_audio(&track),
            MediaKind::AudioOutput | MediaKind::Other => {
                return Err(SetupError::device(
                    kind,
                    DeviceAction::Enable,
                    "not a capture device",
                ))
            }
        }

        let generation = self.current_generation(kind);
        let media_devices = window()
            .navigator()
            .media_devices()
            .map_err(|e| capture_error(kind, &e))?;
        let promise = media_devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| capture_error(kind, &e))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| capture_error(kind, &e))?
            .unchecked_into::<MediaStream>();

        if self.current_generation(kind) != generation {
            log::info!("{kind} was released while capture was starting, stopping it");
            stop_stream(&stream);
            return Ok(());
        }
        log::info!("{kind} capture started");
        self.store(kind, Some(stream));
        Ok(())
    }

    /// Stop and forget the stream for `kind`.
    pub fn release(&self, kind: MediaKind) {
        if self.is_active(kind) {
            log::info!("{kind} capture stopped");
        }
        if let Some(generation) = self.inner.borrow_mut().generation(kind) {
            *generation += 1;
        }
        self.store(kind, None);
    }

    fn current_generation(&self, kind: MediaKind) -> u64 {
        self.inner
            .borrow_mut()
            .generation(kind)
            .map_or(0, |generation| *generation)
    }

    pub fn release_all(&self) {
        self.release(MediaKind::VideoInput);
        self.release(MediaKind::AudioInput);
    }

    /// Switch `kind` to `device_id`, reopening the stream if it is live.
    pub async fn select_device(&self, kind: MediaKind, device_id: String) -> Result<(), SetupError> {
        let was_active = {
            let mut inner = self.inner.borrow_mut();
            match kind {
                MediaKind::VideoInput => inner.camera_device = Some(device_id),
                MediaKind::AudioInput => inner.microphone_device = Some(device_id),
                MediaKind::AudioOutput | MediaKind::Other => return Ok(()),
            }
            inner.slot(kind).is_some_and(|stream| stream.is_some())
        };
        if was_active {
            self.release(kind);
            self.acquire(kind).await?;
        }
        Ok(())
    }

    /// Subscribe to camera stream changes. The current stream is delivered
    /// immediately. Returns an id for [`unsubscribe_camera`](Self::unsubscribe_camera).
    pub fn subscribe_camera(&self, callback: Callback<Option<MediaStream>>) -> usize {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.camera_subscribers.push((id, callback.clone()));

        let current = inner.camera.clone();
        drop(inner);
        callback.emit(current);
        id
    }

    pub fn unsubscribe_camera(&self, id: usize) {
        self.inner
            .borrow_mut()
            .camera_subscribers
            .retain(|(sub_id, _)| *sub_id != id);
    }

    fn store(&self, kind: MediaKind, stream: Option<MediaStream>) {
        let (previous, subscribers) = {
            let mut inner = self.inner.borrow_mut();
            let previous = match inner.slot(kind) {
                Some(slot) => std::mem::replace(slot, stream.clone()),
                None => return,
            };
            let subscribers = if kind == MediaKind::VideoInput {
                inner.camera_subscribers.clone()
            } else {
                Vec::new()
            };
            (previous, subscribers)
        };

        if let Some(previous) = previous {
            stop_stream(&previous);
        }
        for (_, callback) in subscribers {
            callback.emit(stream.clone());
        }
    }
}

/// `true`, or `{ deviceId: { exact: id } }` once a device was picked.
fn track_constraint(device_id: Option<&str>) -> JsValue {
    let Some(device_id) = device_id else {
        return JsValue::TRUE;
    };
    let exact = js_sys::Object::new();
    let constraint = js_sys::Object::new();
    let set = js_sys::Reflect::set(&exact, &"exact".into(), &device_id.into())
        .and_then(|_| js_sys::Reflect::set(&constraint, &"deviceId".into(), &exact));
    match set {
        Ok(_) => constraint.into(),
        Err(_) => JsValue::TRUE,
    }
}

fn stop_stream(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        track.unchecked_into::<MediaStreamTrack>().stop();
    }
}

fn capture_error(kind: MediaKind, error: &JsValue) -> SetupError {
    let name = js_sys::Reflect::get(error, &"name".into())
        .ok()
        .and_then(|name| name.as_string());
    let message = js_error_message(error);
    match name.as_deref() {
        Some("NotAllowedError") | Some("SecurityError") => SetupError::PermissionDenied(message),
        _ => SetupError::device(kind, DeviceAction::Enable, message),
    }
}

/// [`DeviceControl`] over one kind of local track.
#[derive(Clone)]
pub struct LocalTrackControl {
    kind: MediaKind,
    tracks: LocalTracks,
}

impl LocalTrackControl {
    pub fn new(kind: MediaKind, tracks: LocalTracks) -> Self {
        Self { kind, tracks }
    }
}

impl DeviceControl for LocalTrackControl {
    fn enable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(self.tracks.acquire(self.kind))
    }

    fn disable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(async move {
            self.tracks.release(self.kind);
            Ok(())
        })
    }
}
