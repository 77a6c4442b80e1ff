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

//! Meeting page: loads the call session, runs setup, then shows the call.

use std::rc::Rc;

use videocall_meeting_setup::{CallSession, Notice, SetupError};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::call_room::CallRoom;
use crate::components::config_error::ConfigError;
use crate::components::meeting_setup::MeetingSetup;
use crate::constants::app_config;
use crate::context::CallSessionCtx;
use crate::media::LocalTracks;
use crate::meeting_api::MeetingApiClient;
use crate::routing::Route;
use crate::session::ApiCallSession;

#[derive(Properties, Clone, PartialEq)]
pub struct MeetingPageProps {
    pub id: String,
}

enum Loading {
    Pending,
    Ready(CallSessionCtx),
    Failed(String),
}

#[function_component(MeetingPage)]
pub fn meeting_page(props: &MeetingPageProps) -> Html {
    let tracks = use_memo((), |_| LocalTracks::new());
    let session = use_state(|| Loading::Pending);
    let is_setup_complete = use_state(|| false);
    let notice = use_state(|| None::<Notice>);
    let navigator = use_navigator();

    let runtime = app_config();

    {
        let session = session.clone();
        let tracks = (*tracks).clone();
        let is_setup_complete = is_setup_complete.clone();
        let notice = notice.clone();
        use_effect_with(props.id.clone(), move |id| {
            session.set(Loading::Pending);
            is_setup_complete.set(false);
            notice.set(None);
            let id = id.clone();
            spawn_local(async move {
                let loaded = match app_config() {
                    Ok(config) => {
                        let api = MeetingApiClient::new(config.meeting_api_base_url());
                        ApiCallSession::connect(&id, config.display_name, api, tracks)
                            .await
                            .map_err(|e| e.to_string())
                    }
                    Err(e) => Err(SetupError::Config(e).to_string()),
                };
                match loaded {
                    Ok(call) => {
                        let call: Rc<dyn CallSession> = Rc::new(call);
                        session.set(Loading::Ready(CallSessionCtx::new(call)));
                    }
                    Err(e) => {
                        log::error!("failed to load meeting {id}: {e}");
                        session.set(Loading::Failed(e));
                    }
                }
            });
        });
    }

    {
        let tracks = (*tracks).clone();
        use_effect_with((), move |_| move || tracks.release_all());
    }

    let on_setup_complete = {
        let is_setup_complete = is_setup_complete.clone();
        Callback::from(move |complete: bool| is_setup_complete.set(complete))
    };

    let on_notice = {
        let notice = notice.clone();
        Callback::from(move |next: Option<Notice>| notice.set(next))
    };

    let on_leave = {
        let tracks = (*tracks).clone();
        Callback::from(move |_: ()| {
            tracks.release_all();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Home);
            }
        })
    };

    let setup = match runtime {
        Ok(config) => config.setup,
        Err(e) => {
            let err = SetupError::Config(e);
            log::error!("{err}");
            return html! { <ConfigError message={err.to_string()} /> };
        }
    };

    let body = match &*session {
        Loading::Pending => html! {
            <div class="meeting-loading">{ "Loading meeting..." }</div>
        },
        Loading::Failed(message) => html! { <ConfigError message={message.clone()} /> },
        Loading::Ready(call) => {
            let content = if *is_setup_complete {
                html! {
                    <CallRoom
                        meeting_id={props.id.clone()}
                        {on_leave}
                        notice={(*notice).clone()}
                    />
                }
            } else {
                html! { <MeetingSetup {on_setup_complete} {on_notice} config={setup} /> }
            };
            html! {
                <ContextProvider<CallSessionCtx> context={call.clone()}>
                    { content }
                </ContextProvider<CallSessionCtx>>
            }
        }
    };

    html! {
        <ContextProvider<LocalTracks> context={(*tracks).clone()}>
            { body }
        </ContextProvider<LocalTracks>>
    }
}
