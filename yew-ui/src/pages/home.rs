// SPDX-License-Identifier: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::routing::Route;

static MEETING_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Whether `id` can be used as a meeting id in a URL path segment.
pub fn is_valid_meeting_id(id: &str) -> bool {
    MEETING_ID_RE.is_match(id)
}

#[function_component(Home)]
pub fn home() -> Html {
    let navigator = use_navigator();
    let input_ref = use_node_ref();
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let input_ref = input_ref.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let id = input.value().trim().to_string();
            if !is_valid_meeting_id(&id) {
                error.set(Some(
                    "Meeting IDs may only contain letters, numbers, '-' and '_'.".to_string(),
                ));
                return;
            }
            error.set(None);
            match &navigator {
                Some(navigator) => navigator.push(&Route::Meeting { id }),
                None => log::error!("no router available to open meeting {id}"),
            }
        })
    };

    html! {
        <div class="home-page">
            <h1>{ "videocall.rs" }</h1>
            <form class="home-form" {onsubmit}>
                <input
                    ref={input_ref}
                    id="meeting-id"
                    type="text"
                    placeholder="Meeting ID"
                    required=true
                />
                <input type="submit" class="btn-apple btn-primary" value="Continue" />
            </form>
            {
                if let Some(error) = &*error {
                    html! { <p class="home-error">{ error.clone() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
