// Copyright 2025 Security Union LLC
// Licensed under MIT OR Apache-2.0
//
// Shared test harness for the setup UI component tests.
//
// Provides mount/cleanup helpers, a recording call session, a fixed device
// list and a wrapper component that installs both in context.
//
// Each test file that does `mod support;` compiles its own copy, so not every
// function is used in every compilation unit.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::LocalBoxFuture;
use videocall_meeting_setup::{
    CallSession, DeviceControl, DeviceEnumerator, InputDevice, MediaKind, Notice, SetupConfig,
    SetupError,
};
use videocall_setup_ui::components::call_room::CallRoom;
use videocall_setup_ui::components::meeting_setup::MeetingSetup;
use videocall_setup_ui::context::{CallSessionCtx, DevicesCtx};
use yew::platform::time::sleep;
use yew::prelude::*;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Create a fresh `<div>`, attach it to `<body>`, and return it.
pub fn create_mount_point() -> web_sys::Element {
    let document = gloo_utils::document();
    let div = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

/// Remove the mount-point from `<body>` so subsequent tests start clean.
pub fn cleanup(mount: &web_sys::Element) {
    gloo_utils::document()
        .body()
        .unwrap()
        .remove_child(mount)
        .ok();
}

/// Let spawned futures finish and Yew re-render.
pub async fn settle() {
    for _ in 0..3 {
        sleep(Duration::from_millis(5)).await;
    }
}

pub fn click(mount: &web_sys::Element, selector: &str) {
    use wasm_bindgen::JsCast;
    mount
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("{selector} should be rendered"))
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap()
        .click();
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct FakeDevice {
    name: &'static str,
    log: CallLog,
}

impl DeviceControl for FakeDevice {
    fn enable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        self.log.borrow_mut().push(format!("{}:enable", self.name));
        Box::pin(async { Ok(()) })
    }

    fn disable(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        self.log.borrow_mut().push(format!("{}:disable", self.name));
        Box::pin(async { Ok(()) })
    }
}

/// Call session that records every device and join request.
pub struct FakeSession {
    pub log: CallLog,
    pub starts_at: Cell<Option<DateTime<Utc>>>,
    pub ended_at: Cell<Option<DateTime<Utc>>>,
    pub join_error: RefCell<Option<String>>,
    /// Copied into `ended_at` by the next refresh.
    pub ended_on_refresh: Cell<Option<DateTime<Utc>>>,
    pub refreshes: Cell<usize>,
    camera: FakeDevice,
    microphone: FakeDevice,
}

impl FakeSession {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            camera: FakeDevice {
                name: "camera",
                log: log.clone(),
            },
            microphone: FakeDevice {
                name: "microphone",
                log: log.clone(),
            },
            log,
            starts_at: Cell::new(None),
            ended_at: Cell::new(None),
            join_error: RefCell::new(None),
            ended_on_refresh: Cell::new(None),
            refreshes: Cell::new(0),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl CallSession for FakeSession {
    fn id(&self) -> &str {
        "test-call"
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
        self.log.borrow_mut().push("join".to_string());
        let result = match self.join_error.borrow().clone() {
            Some(reason) => Err(SetupError::Join(reason)),
            None => Ok(()),
        };
        Box::pin(async move { result })
    }

    fn refresh(&self) -> LocalBoxFuture<'_, Result<(), SetupError>> {
        self.refreshes.set(self.refreshes.get() + 1);
        if let Some(ended_at) = self.ended_on_refresh.get() {
            self.ended_at.set(Some(ended_at));
        }
        Box::pin(async { Ok(()) })
    }
}

pub struct FakeDevices(pub Vec<InputDevice>);

impl FakeDevices {
    pub fn with(kinds: &[MediaKind]) -> Self {
        Self(
            kinds
                .iter()
                .enumerate()
                .map(|(i, kind)| InputDevice::new(format!("dev-{i}"), format!("{kind} {i}"), *kind))
                .collect(),
        )
    }

    pub fn both() -> Self {
        Self::with(&[MediaKind::VideoInput, MediaKind::AudioInput])
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }
}

impl DeviceEnumerator for FakeDevices {
    fn enumerate(&self) -> LocalBoxFuture<'_, Result<Vec<InputDevice>, SetupError>> {
        let devices = self.0.clone();
        Box::pin(async move { Ok(devices) })
    }
}

/// Setup config for tests: no polling, no modal alerts.
pub fn test_config() -> SetupConfig {
    SetupConfig {
        schedule_refresh_ms: 0,
        blocking_alerts: false,
        ..SetupConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

#[derive(Properties, PartialEq)]
pub struct HarnessProps {
    pub session: CallSessionCtx,
    pub devices: DevicesCtx,
    pub on_setup_complete: Callback<bool>,
    #[prop_or_else(test_config)]
    pub config: SetupConfig,
}

/// `MeetingSetup` with the given session and devices in context.
#[function_component(Harness)]
pub fn harness(props: &HarnessProps) -> Html {
    html! {
        <ContextProvider<DevicesCtx> context={props.devices.clone()}>
            <ContextProvider<CallSessionCtx> context={props.session.clone()}>
                <MeetingSetup
                    on_setup_complete={props.on_setup_complete.clone()}
                    config={props.config.clone()}
                />
            </ContextProvider<CallSessionCtx>>
        </ContextProvider<DevicesCtx>>
    }
}

/// Mount a [`Harness`] and return the mount point plus the recorded
/// completion callback values.
pub async fn mount_setup(
    session: Rc<FakeSession>,
    devices: FakeDevices,
    config: SetupConfig,
) -> (web_sys::Element, Rc<RefCell<Vec<bool>>>) {
    let completions: Rc<RefCell<Vec<bool>>> = Rc::default();
    let sink = completions.clone();
    let props = HarnessProps {
        session: CallSessionCtx::new(session),
        devices: DevicesCtx(Rc::new(devices)),
        on_setup_complete: Callback::from(move |done| sink.borrow_mut().push(done)),
        config,
    };

    let mount = create_mount_point();
    yew::Renderer::<Harness>::with_root_and_props(mount.clone(), props).render();
    settle().await;
    (mount, completions)
}

// ---------------------------------------------------------------------------
// Page-like harnesses
// ---------------------------------------------------------------------------

#[derive(Properties, PartialEq)]
pub struct SwappingHarnessProps {
    pub session: CallSessionCtx,
    pub devices: DevicesCtx,
}

/// Replaces the setup screen with [`CallRoom`] once setup completes and
/// hands it the last notice, the way the meeting page does.
#[function_component(SwappingHarness)]
pub fn swapping_harness(props: &SwappingHarnessProps) -> Html {
    let complete = use_state(|| false);
    let notice = use_state(|| None::<Notice>);
    let on_setup_complete = {
        let complete = complete.clone();
        Callback::from(move |done: bool| complete.set(done))
    };
    let on_notice = {
        let notice = notice.clone();
        Callback::from(move |next: Option<Notice>| notice.set(next))
    };

    let content = if *complete {
        html! {
            <CallRoom
                meeting_id={"test-call"}
                on_leave={Callback::noop()}
                notice={(*notice).clone()}
            />
        }
    } else {
        html! {
            <MeetingSetup {on_setup_complete} {on_notice} config={test_config()} />
        }
    };

    html! {
        <ContextProvider<DevicesCtx> context={props.devices.clone()}>
            <ContextProvider<CallSessionCtx> context={props.session.clone()}>
                { content }
            </ContextProvider<CallSessionCtx>>
        </ContextProvider<DevicesCtx>>
    }
}

pub async fn mount_swapping(session: Rc<FakeSession>, devices: FakeDevices) -> web_sys::Element {
    let props = SwappingHarnessProps {
        session: CallSessionCtx::new(session),
        devices: DevicesCtx(Rc::new(devices)),
    };
    let mount = create_mount_point();
    yew::Renderer::<SwappingHarness>::with_root_and_props(mount.clone(), props).render();
    settle().await;
    mount
}

#[derive(Properties, PartialEq)]
pub struct ConfigSwitchHarnessProps {
    pub session: CallSessionCtx,
    pub devices: DevicesCtx,
    pub first: SetupConfig,
    pub second: SetupConfig,
}

/// `MeetingSetup` whose config prop changes from `first` to `second` when
/// `#switch-config` is clicked.
#[function_component(ConfigSwitchHarness)]
pub fn config_switch_harness(props: &ConfigSwitchHarnessProps) -> Html {
    let switched = use_state(|| false);
    let config = if *switched {
        props.second.clone()
    } else {
        props.first.clone()
    };
    let onclick = {
        let switched = switched.clone();
        Callback::from(move |_: MouseEvent| switched.set(true))
    };

    html! {
        <ContextProvider<DevicesCtx> context={props.devices.clone()}>
            <ContextProvider<CallSessionCtx> context={props.session.clone()}>
                <button id="switch-config" {onclick}>{ "switch" }</button>
                <MeetingSetup on_setup_complete={Callback::noop()} {config} />
            </ContextProvider<CallSessionCtx>>
        </ContextProvider<DevicesCtx>>
    }
}

pub async fn mount_config_switch(
    session: Rc<FakeSession>,
    devices: FakeDevices,
    first: SetupConfig,
    second: SetupConfig,
) -> web_sys::Element {
    let props = ConfigSwitchHarnessProps {
        session: CallSessionCtx::new(session),
        devices: DevicesCtx(Rc::new(devices)),
        first,
        second,
    };
    let mount = create_mount_point();
    yew::Renderer::<ConfigSwitchHarness>::with_root_and_props(mount.clone(), props).render();
    settle().await;
    mount
}
