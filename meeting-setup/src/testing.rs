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

//! Recording doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::call::{CallSession, DeviceControl};
use crate::devices::{DeviceEnumerator, InputDevice, MediaKind};
use crate::error::{DeviceAction, SetupError};
use crate::notify::{Notice, Notifier};

/// Ordered log of every command the call handle received.
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct MockDevice {
    kind: MediaKind,
    log: CallLog,
    pub fail: Cell<bool>,
    /// Whether the device is currently capturing.
    pub on: Cell<bool>,
    /// When set, the next command waits for the sender before completing.
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl DeviceControl for MockDevice {
    fn enable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(self.record(DeviceAction::Enable))
    }

    fn disable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(self.record(DeviceAction::Disable))
    }
}

impl MockDevice {
    fn new(kind: MediaKind, log: CallLog) -> Self {
        Self {
            kind,
            log,
            fail: Cell::new(false),
            on: Cell::new(false),
            gate: RefCell::new(None),
        }
    }

    /// Hold the next enable or disable until the returned sender fires.
    pub fn gate_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.borrow_mut() = Some(rx);
        tx
    }

    async fn record(&self, action: DeviceAction) -> Result<(), SetupError> {
        self.log.borrow_mut().push(format!("{}:{action}", self.kind));
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail.get() {
            return Err(SetupError::device(self.kind, action, "mock failure"));
        }
        self.on.set(action == DeviceAction::Enable);
        Ok(())
    }
}

pub struct MockSession {
    pub id: String,
    pub log: CallLog,
    pub camera: MockDevice,
    pub microphone: MockDevice,
    pub starts_at: Cell<Option<DateTime<Utc>>>,
    pub ended_at: Cell<Option<DateTime<Utc>>>,
    pub join_error: RefCell<Option<SetupError>>,
    pub refresh_error: RefCell<Option<SetupError>>,
    /// Copied into `ended_at` by the next successful refresh.
    pub ended_on_refresh: Cell<Option<DateTime<Utc>>>,
    /// When set, `join` waits for the sender before resolving.
    pub join_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockSession {
    pub fn new(id: &str) -> Self {
        let log: CallLog = Rc::default();
        Self {
            id: id.to_string(),
            camera: MockDevice::new(MediaKind::VideoInput, log.clone()),
            microphone: MockDevice::new(MediaKind::AudioInput, log.clone()),
            log,
            starts_at: Cell::new(None),
            ended_at: Cell::new(None),
            join_error: RefCell::new(None),
            refresh_error: RefCell::new(None),
            ended_on_refresh: Cell::new(None),
            join_gate: RefCell::new(None),
        }
    }

    pub fn failing_join(id: &str, reason: &str) -> Self {
        let session = Self::new(id);
        *session.join_error.borrow_mut() = Some(SetupError::Join(reason.to_string()));
        session
    }

    pub fn gated(id: &str) -> (Self, oneshot::Sender<()>) {
        let session = Self::new(id);
        let (tx, rx) = oneshot::channel();
        *session.join_gate.borrow_mut() = Some(rx);
        (session, tx)
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl CallSession for MockSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn camera(&self) -> &dyn DeviceControl {
        &self.camera
    }

    fn microphone(&self) -> &dyn DeviceControl {
        &self.microphone
    }

    fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at.get()
    }

    fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at.get()
    }

    fn join(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(async move {
            self.log.borrow_mut().push("join".to_string());
            let gate = self.join_gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match self.join_error.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }

    fn refresh(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        Box::pin(async move {
            if let Some(err) = self.refresh_error.borrow().clone() {
                return Err(err);
            }
            if let Some(ended_at) = self.ended_on_refresh.get() {
                self.ended_at.set(Some(ended_at));
            }
            Ok(())
        })
    }
}

pub struct MockDevices {
    pub devices: RefCell<Vec<InputDevice>>,
    pub error: RefCell<Option<SetupError>>,
}

impl MockDevices {
    pub fn with(kinds: &[MediaKind]) -> Self {
        let devices = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| InputDevice::new(format!("dev-{i}"), format!("{kind} {i}"), *kind))
            .collect();
        Self {
            devices: RefCell::new(devices),
            error: RefCell::new(None),
        }
    }

    pub fn both() -> Self {
        Self::with(&[MediaKind::VideoInput, MediaKind::AudioInput])
    }

    pub fn none() -> Self {
        Self::with(&[])
    }
}

impl DeviceEnumerator for MockDevices {
    fn enumerate(&self) -> LocalBoxFuture<'_, Result<Vec<InputDevice>, SetupError>> {
        Box::pin(async move {
            if let Some(err) = self.error.borrow().clone() {
                return Err(err);
            }
            Ok(self.devices.borrow().clone())
        })
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
