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

//! Pre-call setup screen.
//!
//! Shows a scheduled-start or call-ended alert when the call cannot be
//! joined, and otherwise a preview, device pickers, the "join muted"
//! checkbox and the join button. The behavior lives in
//! [`MeetingSetupController`]; this component only renders it and feeds it
//! user input.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use gloo_utils::window;
use videocall_meeting_setup::{
    format_start_time, MeetingSetupController, Notice, NoticeLevel, Notifier, SetupConfig,
    SetupView,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::clock::{local_offset, now_utc};
use crate::components::config_error::ConfigError;
use crate::components::device_settings::DeviceSettings;
use crate::components::setup_alert::SetupAlert;
use crate::components::video_preview::VideoPreview;
use crate::context::{use_call_session, use_device_enumerator, CallSessionCtx};

#[derive(Properties, Clone, PartialEq)]
pub struct MeetingSetupProps {
    /// Emitted with `true` once the call has been joined.
    pub on_setup_complete: Callback<bool>,
    /// Receives every notice shown on the setup screen, and `None` when the
    /// banner is cleared, so the parent can keep it visible after the swap
    /// to the in-call view.
    #[prop_or_default]
    pub on_notice: Callback<Option<Notice>>,
    #[prop_or_default]
    pub config: SetupConfig,
}

/// Setup screen for the call session found in context.
#[function_component(MeetingSetup)]
pub fn meeting_setup(props: &MeetingSetupProps) -> Html {
    match use_call_session() {
        Ok(session) => html! {
            <SetupScreen
                {session}
                on_setup_complete={props.on_setup_complete.clone()}
                on_notice={props.on_notice.clone()}
                config={props.config.clone()}
            />
        },
        Err(err) => {
            log::error!("{err}");
            html! { <ConfigError message={err.to_string()} /> }
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
struct SetupScreenProps {
    session: CallSessionCtx,
    on_setup_complete: Callback<bool>,
    on_notice: Callback<Option<Notice>>,
    config: SetupConfig,
}

/// Shows a notice in the inline banner and forwards it to the parent.
#[derive(Clone)]
struct Banner {
    state: UseStateSetter<Option<Notice>>,
    forward: Rc<RefCell<Callback<Option<Notice>>>>,
}

impl Banner {
    fn show(&self, notice: Option<Notice>) {
        self.state.set(notice.clone());
        self.forward.borrow().emit(notice);
    }
}

/// Routes notices into the banner. Errors also raise a browser alert when
/// `blocking` is set.
struct BannerNotifier {
    banner: Banner,
    blocking: bool,
}

impl Notifier for BannerNotifier {
    fn notify(&self, notice: Notice) {
        if self.blocking && notice.is_error() {
            if let Err(e) = window().alert_with_message(&notice.message) {
                log::warn!("failed to show alert: {e:?}");
            }
        }
        self.banner.show(Some(notice));
    }
}

#[function_component(SetupScreen)]
fn setup_screen(props: &SetupScreenProps) -> Html {
    let devices = use_device_enumerator();
    let notice = use_state(|| None::<Notice>);
    let join_muted = use_state(|| props.config.join_muted_by_default);
    let joining = use_state(|| false);
    let now = use_state(now_utc);

    // The controller outlives renders, so it reads parent callbacks through
    // these cells to always see the latest props.
    let on_complete = use_mut_ref(|| props.on_setup_complete.clone());
    *on_complete.borrow_mut() = props.on_setup_complete.clone();
    let on_notice = use_mut_ref(|| props.on_notice.clone());
    *on_notice.borrow_mut() = props.on_notice.clone();

    let banner = Banner {
        state: notice.setter(),
        forward: on_notice,
    };

    let controller = {
        let devices = devices.clone();
        let banner = banner.clone();
        let on_complete = on_complete.clone();
        use_memo(
            (props.session.clone(), props.config.clone()),
            move |(session, config)| {
                let notifier = BannerNotifier {
                    banner,
                    blocking: config.blocking_alerts,
                };
                let on_complete: Rc<RefCell<Callback<bool>>> = on_complete;
                MeetingSetupController::new(
                    session.0.clone(),
                    devices,
                    Rc::new(notifier),
                    config.clone(),
                    Box::new(move |done| on_complete.borrow().emit(done)),
                )
            },
        )
    };

    // Re-apply the checkbox whenever the controller is rebuilt.
    {
        let controller = controller.clone();
        let flag = *join_muted;
        use_effect_with((props.session.clone(), props.config.clone()), move |_| {
            spawn_local(async move {
                // Failures are logged by the controller.
                let _ = controller.set_join_muted(flag).await;
            });
        });
    }

    {
        let controller = controller.clone();
        let now = now.setter();
        let period = props.config.schedule_refresh_ms;
        use_effect_with((props.session.clone(), props.config.clone()), move |_| {
            let interval = (period > 0).then(|| {
                Interval::new(period, move || {
                    let controller = controller.clone();
                    let now = now.clone();
                    spawn_local(async move {
                        controller.refresh().await;
                        now.set(now_utc());
                    });
                })
            });
            move || drop(interval)
        });
    }

    let config = &props.config;
    match controller.view(*now) {
        SetupView::NotStarted { starts_at } => {
            let start = format_start_time(
                starts_at,
                local_offset(starts_at),
                &config.start_time_format,
            );
            html! { <SetupAlert title={config.not_started_title(&start)} /> }
        }
        SetupView::Ended { .. } => html! {
            <SetupAlert
                title={config.ended_message.clone()}
                icon_url={config.ended_icon_url.clone()}
            />
        },
        SetupView::Ready => {
            let on_toggle = {
                let controller = controller.clone();
                let join_muted = join_muted.clone();
                Callback::from(move |e: Event| {
                    let Some(input) = e
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    else {
                        return;
                    };
                    let checked = input.checked();
                    join_muted.set(checked);
                    let controller = controller.clone();
                    spawn_local(async move {
                        let _ = controller.set_join_muted(checked).await;
                    });
                })
            };

            let on_join = {
                let controller = controller.clone();
                let joining = joining.clone();
                let banner = banner.clone();
                Callback::from(move |_: MouseEvent| {
                    joining.set(true);
                    banner.show(None);
                    let controller = controller.clone();
                    let joining = joining.clone();
                    spawn_local(async move {
                        if let Err(err) = controller.join(now_utc()).await {
                            log::warn!("join did not complete: {err}");
                            joining.set(false);
                        }
                    });
                })
            };

            html! {
                <div class="meeting-setup">
                    <h1>{ "Setup" }</h1>
                    <VideoPreview />
                    <label class="setup-join-muted">
                        <input
                            type="checkbox"
                            id="join-muted"
                            checked={*join_muted}
                            onchange={on_toggle}
                        />
                        { "Join with mic and camera off" }
                    </label>
                    <DeviceSettings />
                    {
                        if let Some(notice) = &*notice {
                            let class = match notice.level {
                                NoticeLevel::Warning => "setup-notice setup-notice-warning",
                                NoticeLevel::Error => "setup-notice setup-notice-error",
                            };
                            html! { <div {class} role="alert">{ notice.message.clone() }</div> }
                        } else {
                            html! {}
                        }
                    }
                    <button
                        class="btn-apple btn-primary setup-join-btn"
                        disabled={*joining}
                        onclick={on_join}
                    >
                        { "Join meeting" }
                    </button>
                </div>
            }
        }
    }
}
