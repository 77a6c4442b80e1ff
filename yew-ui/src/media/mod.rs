// SPDX-License-Identifier: MIT OR Apache-2.0

//! Browser media: device enumeration and local capture tracks.

mod device_enumerator;
mod local_tracks;

pub use device_enumerator::{enumerate_devices, js_error_message, BrowserDeviceEnumerator};
pub use local_tracks::{LocalTrackControl, LocalTracks};
