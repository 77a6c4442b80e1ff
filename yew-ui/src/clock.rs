// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wall clock and local offset from the browser.

use chrono::{DateTime, FixedOffset, Utc};
use videocall_meeting_setup::schedule::offset_from_minutes_west;
use wasm_bindgen::JsValue;

pub fn now_utc() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Browser's UTC offset in effect at `at`, which differs from today's offset
/// when a daylight saving change falls in between.
pub fn local_offset(at: DateTime<Utc>) -> FixedOffset {
    let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
    offset_from_minutes_west(date.get_timezone_offset() as i32)
}
