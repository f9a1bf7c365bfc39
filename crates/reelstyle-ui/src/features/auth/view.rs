//! Login and registration pages.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::{Link, Redirect, use_location, use_navigator};
use yewdux::prelude::use_selector;

use crate::app::api::{ApiCtx, SessionCtx};
use crate::app::{LoginNotice, Route};
use crate::components::atoms::ErrorBanner;
use crate::core::store::AppStore;
use crate::features::auth::state::{FormError, LoginFormState, RegisterFormState};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

fn form_error_text(error: Option<&FormError>, bundle: &TranslationBundle) -> Option<AttrValue> {
    error.map(|error| match error {
        FormError::Invalid(invalid) => {
            AttrValue::from(bundle.text(invalid.message_key(), &invalid.to_string()))
        }
        FormError::Rejected(message) => AttrValue::from(message.clone()),
    })
}

/// Input handler writing the field selected by `apply` into shared form state.
fn bind<S: 'static>(
    state: &Rc<RefCell<S>>,
    redraw: &UseForceUpdateHandle,
    apply: fn(&mut S, String),
) -> Callback<InputEvent> {
    let state = state.clone();
    let redraw = redraw.clone();
    Callback::from(move |event: InputEvent| {
        let input: HtmlInputElement = event.target_unchecked_into();
        apply(&mut state.borrow_mut(), input.value());
        redraw.force_update();
    })
}

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let location = use_location();
    let authenticated = use_selector(|store: &AppStore| store.session.is_authenticated());
    let state = use_mut_ref(LoginFormState::default);
    let redraw = use_force_update();
    let notice = location
        .and_then(|location| location.state::<LoginNotice>())
        .map(|notice| notice.message.clone());

    if *authenticated && !state.borrow().busy {
        return html! { <Redirect<Route> to={Route::Analysis} /> };
    }
    let Some(session) = session else {
        return html! { <ErrorBanner message={Some(AttrValue::from("Missing session context."))} /> };
    };

    let on_submit = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let credentials = state.borrow_mut().submit();
            redraw.force_update();
            let Some((username, password)) = credentials else {
                return;
            };
            let controller = session.controller.clone();
            let navigator = navigator.clone();
            let state = state.clone();
            let redraw = redraw.clone();
            yew::platform::spawn_local(async move {
                let outcome = controller.login(&username, &password).await;
                state.borrow_mut().finish(&outcome);
                redraw.force_update();
                if outcome.is_success() {
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Analysis);
                    }
                }
            });
        })
    };

    let current = state.borrow();
    html! {
        <section class="auth-page">
            <form class="card auth-form" onsubmit={on_submit}>
                <h1>{bundle.text("auth.login_title", "Sign in")}</h1>
                {notice.map(|message| html! { <div class="notice success">{message}</div> }).unwrap_or_default()}
                <ErrorBanner message={form_error_text(current.error.as_ref(), &bundle)} />
                <label>
                    {bundle.text("auth.username", "Username")}
                    <input
                        type="text"
                        autocomplete="username"
                        value={current.username.clone()}
                        oninput={bind(&state, &redraw, |form: &mut LoginFormState, value| form.username = value)}
                        disabled={current.busy}
                    />
                </label>
                <label>
                    {bundle.text("auth.password", "Password")}
                    <input
                        type="password"
                        autocomplete="current-password"
                        value={current.password.clone()}
                        oninput={bind(&state, &redraw, |form: &mut LoginFormState, value| form.password = value)}
                        disabled={current.busy}
                    />
                </label>
                <button class="primary" type="submit" disabled={current.busy}>
                    {if current.busy {
                        bundle.text("auth.signing_in", "Signing in...")
                    } else {
                        bundle.text("auth.login_submit", "Sign in")
                    }}
                </button>
                <p class="muted">
                    {bundle.text("auth.no_account", "No account yet?")}{" "}
                    <Link<Route> to={Route::Register}>{bundle.text("auth.register_link", "Create one")}</Link<Route>>
                </p>
            </form>
        </section>
    }
}

#[function_component(RegisterPage)]
pub(crate) fn register_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let state = use_mut_ref(RegisterFormState::default);
    let redraw = use_force_update();

    let (Some(api), Some(session)) = (api, session) else {
        return html! { <ErrorBanner message={Some(AttrValue::from("Missing session context."))} /> };
    };

    let on_submit = {
        let state = state.clone();
        let redraw = redraw.clone();
        let min_password_len = api.config.min_password_len;
        let notice = bundle.text(
            "auth.registered",
            "Account created. Sign in with your new credentials.",
        );
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = state.borrow_mut().submit(min_password_len);
            redraw.force_update();
            let Some(form) = form else {
                return;
            };
            let controller = session.controller.clone();
            let navigator = navigator.clone();
            let state = state.clone();
            let redraw = redraw.clone();
            let notice = LoginNotice {
                message: notice.clone(),
            };
            yew::platform::spawn_local(async move {
                let outcome = controller.register(&form).await;
                state.borrow_mut().finish(&outcome);
                redraw.force_update();
                if outcome.is_success() {
                    if let Some(navigator) = &navigator {
                        navigator.push_with_state(&Route::Login, notice);
                    }
                }
            });
        })
    };

    let current = state.borrow();
    html! {
        <section class="auth-page">
            <form class="card auth-form" onsubmit={on_submit}>
                <h1>{bundle.text("auth.register_title", "Create an account")}</h1>
                <ErrorBanner message={form_error_text(current.error.as_ref(), &bundle)} />
                <label>
                    {bundle.text("auth.username", "Username")}
                    <input
                        type="text"
                        autocomplete="username"
                        value={current.form.username.clone()}
                        oninput={bind(&state, &redraw, |state: &mut RegisterFormState, value| state.form.username = value)}
                        disabled={current.busy}
                    />
                </label>
                <label>
                    {bundle.text("auth.email", "Email")}
                    <input
                        type="email"
                        autocomplete="email"
                        value={current.form.email.clone()}
                        oninput={bind(&state, &redraw, |state: &mut RegisterFormState, value| state.form.email = value)}
                        disabled={current.busy}
                    />
                </label>
                <label>
                    {bundle.text("auth.password", "Password")}
                    <input
                        type="password"
                        autocomplete="new-password"
                        value={current.form.password.clone()}
                        oninput={bind(&state, &redraw, |state: &mut RegisterFormState, value| state.form.password = value)}
                        disabled={current.busy}
                    />
                </label>
                <label>
                    {bundle.text("auth.confirm_password", "Confirm password")}
                    <input
                        type="password"
                        autocomplete="new-password"
                        value={current.form.confirm_password.clone()}
                        oninput={bind(&state, &redraw, |state: &mut RegisterFormState, value| state.form.confirm_password = value)}
                        disabled={current.busy}
                    />
                </label>
                <button class="primary" type="submit" disabled={current.busy}>
                    {if current.busy {
                        bundle.text("auth.registering", "Creating account...")
                    } else {
                        bundle.text("auth.register_submit", "Create account")
                    }}
                </button>
                <p class="muted">
                    {bundle.text("auth.have_account", "Already registered?")}{" "}
                    <Link<Route> to={Route::Login}>{bundle.text("auth.login_link", "Sign in")}</Link<Route>>
                </p>
            </form>
        </section>
    }
}
