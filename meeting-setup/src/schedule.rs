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

//! Pre-call alerts.
//!
//! The schedule is read from the call session on every evaluation and never
//! cached, so a refreshed session is picked up on the next render.

use std::fmt::{self, Write};

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::call::CallSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallSchedule {
    pub starts_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// What the setup screen should show for a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupView {
    /// The scheduled start is still ahead. Terminal for this render.
    NotStarted { starts_at: DateTime<Utc> },
    /// The host ended the call. Terminal.
    Ended { ended_at: DateTime<Utc> },
    /// Interactive setup with preview, toggles and the join button.
    Ready,
}

impl fmt::Display for SetupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupView::NotStarted { starts_at } => {
                write!(f, "call is scheduled for {}", starts_at.to_rfc3339())
            }
            SetupView::Ended { ended_at } => write!(f, "call ended at {}", ended_at.to_rfc3339()),
            SetupView::Ready => write!(f, "call is ready"),
        }
    }
}

impl CallSchedule {
    pub fn of(session: &dyn CallSession) -> Self {
        Self {
            starts_at: session.starts_at(),
            ended_at: session.ended_at(),
        }
    }

    /// An ended call wins over a future start: once the host has ended it
    /// there is nothing left to wait for.
    pub fn evaluate(&self, now: DateTime<Utc>) -> SetupView {
        if let Some(ended_at) = self.ended_at {
            return SetupView::Ended { ended_at };
        }
        match self.starts_at {
            Some(starts_at) if starts_at > now => SetupView::NotStarted { starts_at },
            _ => SetupView::Ready,
        }
    }
}

/// Format an instant in the viewer's local offset.
///
/// Falls back to RFC 3339 when `pattern` is not a valid `strftime` pattern.
pub fn format_start_time(starts_at: DateTime<Utc>, offset: FixedOffset, pattern: &str) -> String {
    let local = starts_at.with_timezone(&offset);
    let mut out = String::new();
    if write!(out, "{}", local.format(pattern)).is_err() {
        log::warn!("invalid start time format {pattern:?}, falling back to RFC 3339");
        return local.to_rfc3339();
    }
    out
}

/// Build an offset from a JavaScript `Date.getTimezoneOffset()` value,
/// which counts minutes *west* of UTC.
pub fn offset_from_minutes_west(minutes_west: i32) -> FixedOffset {
    FixedOffset::west_opt(minutes_west.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}
