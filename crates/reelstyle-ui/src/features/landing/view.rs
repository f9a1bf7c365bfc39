//! Public landing page.

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

use crate::app::api::SessionCtx;
use crate::app::{PendingAnalysis, Route};
use crate::components::typewriter::TypewriterText;
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(LandingPage)]
pub(crate) fn landing_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let authenticated = use_selector(|store: &AppStore| store.session.is_authenticated());
    let url = use_state(String::new);

    let on_input = {
        let url = url.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            url.set(input.value());
        })
    };
    let on_submit = {
        let url = url.clone();
        let navigator = navigator.clone();
        let authenticated = *authenticated;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(navigator) = &navigator else {
                return;
            };
            let target = url.trim().to_string();
            if !authenticated {
                navigator.push(&Route::Login);
            } else if target.is_empty() {
                navigator.push(&Route::Analysis);
            } else {
                navigator.push_with_state(&Route::Analysis, PendingAnalysis { url: target });
            }
        })
    };
    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(session) = &session {
            session.controller.logout();
        }
    });

    html! {
        <div class="landing-page">
            <nav class="landing-nav">
                <strong class="brand">{"Reelstyle"}</strong>
                <div class="nav-actions">
                    {if *authenticated {
                        html! {
                            <>
                                <Link<Route> to={Route::Analysis} classes="primary">
                                    {bundle.text("landing.dashboard", "Open dashboard")}
                                </Link<Route>>
                                <button class="ghost" onclick={on_logout}>
                                    {bundle.text("nav.logout", "Log out")}
                                </button>
                            </>
                        }
                    } else {
                        html! {
                            <>
                                <Link<Route> to={Route::Login} classes="ghost">
                                    {bundle.text("landing.login", "Sign in")}
                                </Link<Route>>
                                <Link<Route> to={Route::Register} classes="primary">
                                    {bundle.text("landing.register", "Get started")}
                                </Link<Route>>
                            </>
                        }
                    }}
                </div>
            </nav>
            <header class="hero">
                <h1>
                    {bundle.text("landing.headline_prefix", "Decode the style of")}{" "}
                    <TypewriterText phrases={bundle.list("landing.phrases")} />
                </h1>
                <p class="muted">
                    {bundle.text("landing.subtitle", "Paste a short video and get its style passport, then write new scripts in the same voice.")}
                </p>
                <form class="url-form hero-form" onsubmit={on_submit}>
                    <input
                        type="url"
                        placeholder={bundle.text("analysis.placeholder", "https://youtube.com/shorts/...")}
                        value={(*url).clone()}
                        oninput={on_input}
                    />
                    <button class="primary" type="submit">
                        {bundle.text("landing.cta", "Analyse")}
                    </button>
                </form>
            </header>
        </div>
    }
}
