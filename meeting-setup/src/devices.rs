/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Media device inventory.
//!
//! Mirrors the `kind` classification of the browser's
//! `MediaDeviceInfo` without depending on `web-sys`, so availability checks
//! can be unit tested natively.

use std::fmt;

use futures::future::LocalBoxFuture;

use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    AudioInput,
    VideoInput,
    AudioOutput,
    Other,
}

impl MediaKind {
    /// Parse the `kind` string reported by `enumerateDevices()`.
    pub fn from_kind_str(kind: &str) -> Self {
        match kind {
            "audioinput" => MediaKind::AudioInput,
            "videoinput" => MediaKind::VideoInput,
            "audiooutput" => MediaKind::AudioOutput,
            _ => MediaKind::Other,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::AudioInput => write!(f, "microphone"),
            MediaKind::VideoInput => write!(f, "camera"),
            MediaKind::AudioOutput => write!(f, "speaker"),
            MediaKind::Other => write!(f, "device"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub device_id: String,
    pub label: String,
    pub kind: MediaKind,
}

impl InputDevice {
    pub fn new(device_id: impl Into<String>, label: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            device_id: device_id.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Which capture devices are physically present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceAvailability {
    pub has_camera: bool,
    pub has_microphone: bool,
}

impl DeviceAvailability {
    pub fn from_devices<'a>(devices: impl IntoIterator<Item = &'a InputDevice>) -> Self {
        devices
            .into_iter()
            .fold(Self::default(), |mut availability, device| {
                match device.kind {
                    MediaKind::VideoInput => availability.has_camera = true,
                    MediaKind::AudioInput => availability.has_microphone = true,
                    MediaKind::AudioOutput | MediaKind::Other => {}
                }
                availability
            })
    }

    /// Both a camera and a microphone are present.
    pub fn is_complete(&self) -> bool {
        self.has_camera && self.has_microphone
    }

    /// Neither a camera nor a microphone is present.
    pub fn is_empty(&self) -> bool {
        !self.has_camera && !self.has_microphone
    }
}

/// Lists the host's media devices.
pub trait DeviceEnumerator {
    fn enumerate(&self) -> LocalBoxFuture<'_, Result<Vec<InputDevice>, SetupError>>;

    fn availability(&self) -> LocalBoxFuture<'_, Result<DeviceAvailability, SetupError>> {
        Box::pin(async move {
            let devices = self.enumerate().await?;
            Ok(DeviceAvailability::from_devices(&devices))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_map_to_media_kinds() {
        assert_eq!(MediaKind::from_kind_str("videoinput"), MediaKind::VideoInput);
        assert_eq!(MediaKind::from_kind_str("audioinput"), MediaKind::AudioInput);
        assert_eq!(MediaKind::from_kind_str("audiooutput"), MediaKind::AudioOutput);
        assert_eq!(MediaKind::from_kind_str("bogus"), MediaKind::Other);
    }

    #[test]
    fn availability_ignores_speakers() {
        let devices = vec![
            InputDevice::new("s1", "Speaker", MediaKind::AudioOutput),
            InputDevice::new("m1", "Mic", MediaKind::AudioInput),
        ];
        let availability = DeviceAvailability::from_devices(&devices);
        assert!(!availability.has_camera);
        assert!(availability.has_microphone);
        assert!(!availability.is_complete());
        assert!(!availability.is_empty());
    }

    #[test]
    fn empty_inventory_has_nothing() {
        let availability = DeviceAvailability::from_devices(&Vec::<InputDevice>::new());
        assert!(availability.is_empty());
    }
}
