//! App shell: contexts, session bootstrap, and routing.

use anyhow::Context as _;
use reelstyle_telemetry::{DEFAULT_LOG_LEVEL, LoggingConfig, init_logging};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::Dispatch;

use crate::components::shell::{DashboardShell, NavSection};
use crate::core::logic::parse_video_id;
use crate::core::store::AppStore;
use crate::features::analysis::view::AnalysisPage;
use crate::features::auth::view::{LoginPage, RegisterPage};
use crate::features::generator::view::GeneratorPage;
use crate::features::history::view::HistoryPage;
use crate::features::landing::view::LandingPage;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::services::console::ConsoleWriter;
use api::{ApiCtx, SessionCtx, build_contexts};
use guard::ProtectedRoute;
use preferences::{load_config, load_locale, persist_locale};
pub(crate) use routes::{LoginNotice, PendingAnalysis, Route};

pub(crate) mod api;
mod guard;
pub(crate) mod preferences;
mod routes;

#[function_component(ReelstyleApp)]
pub fn reelstyle_app() -> Html {
    let locale = use_state(load_locale);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let contexts = use_memo(|_| build_contexts(load_config()), ());

    {
        let session = contexts.1.clone();
        use_effect_with_deps(
            move |_| {
                let dispatch = Dispatch::<AppStore>::new();
                session.controller.observe(move |next| {
                    let next = next.clone();
                    dispatch.reduce_mut(move |store| store.session = next);
                });
                let controller = session.controller.clone();
                yew::platform::spawn_local(async move {
                    controller.restore().await;
                });
                || ()
            },
            (),
        );
    }
    use_effect_with_deps(
        move |locale: &LocaleCode| {
            persist_locale(*locale);
            || ()
        },
        *locale,
    );

    let set_locale = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| locale.set(next))
    };
    let current_locale = *locale;
    let (api_ctx, session_ctx) = (*contexts).clone();

    html! {
        <ContextProvider<ApiCtx> context={api_ctx}>
            <ContextProvider<SessionCtx> context={session_ctx}>
                <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                    <BrowserRouter>
                        <Switch<Route> render={move |route| switch(route, current_locale, &set_locale)} />
                    </BrowserRouter>
                </ContextProvider<TranslationBundle>>
            </ContextProvider<SessionCtx>>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route, locale: LocaleCode, on_locale_change: &Callback<LocaleCode>) -> Html {
    let dashboard = |active: NavSection, content: Html| {
        html! {
            <ProtectedRoute>
                <DashboardShell active={active} locale={locale} on_locale_change={on_locale_change.clone()}>
                    {content}
                </DashboardShell>
            </ProtectedRoute>
        }
    };
    match route {
        Route::Landing => html! { <LandingPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Dashboard => html! { <Redirect<Route> to={Route::Analysis} /> },
        Route::Analysis => dashboard(NavSection::Analysis, html! { <AnalysisPage /> }),
        Route::AnalysisVideo { video_id } => dashboard(
            NavSection::Analysis,
            html! { <AnalysisPage video_id={parse_video_id(&video_id)} /> },
        ),
        Route::Generator => dashboard(NavSection::Generator, html! { <GeneratorPage /> }),
        Route::GeneratorFor { username } => dashboard(
            NavSection::Generator,
            html! { <GeneratorPage username={Some(AttrValue::from(username))} /> },
        ),
        Route::History => dashboard(NavSection::History, html! { <HistoryPage /> }),
        Route::NotFound => html! { <Redirect<Route> to={Route::Landing} /> },
    }
}

fn install_logging() -> anyhow::Result<()> {
    let config = LoggingConfig {
        level: if cfg!(debug_assertions) {
            "debug"
        } else {
            DEFAULT_LOG_LEVEL
        },
        ..LoggingConfig::default()
    };
    init_logging(&config, ConsoleWriter).context("install browser console logging")
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Err(err) = install_logging() {
        web_sys::console::warn_1(&format!("{err:#}").into());
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ReelstyleApp>::with_root(root).render();
    } else {
        yew::Renderer::<ReelstyleApp>::new().render();
    }
}
