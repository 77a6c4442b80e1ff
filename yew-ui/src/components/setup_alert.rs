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

//! Full-screen card shown instead of the setup view when the call cannot be
//! joined yet (or any more).

use yew::prelude::*;

#[derive(Properties, Debug, PartialEq)]
pub struct SetupAlertProps {
    pub title: String,
    /// Icon shown above the title. A clock is drawn when absent.
    #[prop_or_default]
    pub icon_url: Option<String>,
}

#[function_component(SetupAlert)]
pub fn setup_alert(props: &SetupAlertProps) -> Html {
    let icon = match &props.icon_url {
        Some(url) => html! {
            <img class="setup-alert-icon" src={url.clone()} alt="" width="72" height="72" />
        },
        None => html! {
            <svg class="setup-alert-icon" xmlns="http://www.w3.org/2000/svg" width="72" height="72"
                 viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5"
                 stroke-linecap="round" stroke-linejoin="round">
                <circle cx="12" cy="12" r="10"></circle>
                <polyline points="12 6 12 12 16 14"></polyline>
            </svg>
        },
    };

    html! {
        <div class="glass-backdrop setup-alert" role="alert">
            <div class="card-apple setup-alert-card" style="width: 420px; text-align: center;">
                { icon }
                <p class="setup-alert-title" style="font-size: 1.25rem; margin: 1.5rem 0;">
                    { &props.title }
                </p>
            </div>
        </div>
    }
}
