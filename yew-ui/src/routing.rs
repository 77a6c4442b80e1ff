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

//! Application routes, shared by the binary and the integration tests.

use enum_display::EnumDisplay;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::home::Home;
use crate::pages::meeting::MeetingPage;

#[derive(Clone, Routable, PartialEq, Debug, EnumDisplay)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/meeting/:id")]
    Meeting { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(route: Route) -> Html {
    log::debug!("route: {route}");
    match route {
        Route::Home => html! { <Home /> },
        Route::Meeting { id } => html! { <MeetingPage {id} /> },
        Route::NotFound => html! { <h1>{ "404" }</h1> },
    }
}
