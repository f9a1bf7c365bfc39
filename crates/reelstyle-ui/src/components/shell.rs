//! Dashboard chrome: navigation, user badge, locale switch, logout.

use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

use crate::app::Route;
use crate::app::api::SessionCtx;
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};

/// Navigation section highlighted in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NavSection {
    Analysis,
    Generator,
    History,
}

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardShellProps {
    pub active: NavSection,
    pub locale: LocaleCode,
    pub on_locale_change: Callback<LocaleCode>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(DashboardShell)]
pub(crate) fn dashboard_shell(props: &DashboardShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let username = use_selector(|store: &AppStore| store.username().map(ToString::to_string));

    let on_logout = Callback::from(move |_| {
        if let Some(session) = &session {
            session.controller.logout();
        }
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Landing);
        }
    });

    let generator_route = (*username).clone().map_or(Route::Generator, |username| {
        Route::GeneratorFor { username }
    });
    let initial = (*username)
        .as_deref()
        .and_then(|name| name.chars().next())
        .map(|letter| letter.to_uppercase().to_string())
        .unwrap_or_default();

    html! {
        <div class="dashboard-shell">
            <aside class="sidebar">
                <Link<Route> to={Route::Landing} classes="brand">
                    <strong>{"Reelstyle"}</strong>
                </Link<Route>>
                <nav>
                    {nav_item(Route::Analysis, bundle.text("nav.analysis", "Analysis"), props.active == NavSection::Analysis)}
                    {nav_item(Route::History, bundle.text("nav.history", "History"), props.active == NavSection::History)}
                </nav>
                <Link<Route> to={generator_route} classes={classes!("cta", (props.active == NavSection::Generator).then_some("active"))}>
                    {bundle.text("nav.create_script", "Create script")}
                </Link<Route>>
                <div class="sidebar-footer">
                    <div class="locale-switch">
                        {for LocaleCode::all().into_iter().map(|locale| {
                            let on_locale_change = props.on_locale_change.clone();
                            html! {
                                <button
                                    class={classes!("ghost", (locale == props.locale).then_some("active"))}
                                    onclick={Callback::from(move |_| on_locale_change.emit(locale))}
                                >
                                    {locale.code().to_uppercase()}
                                </button>
                            }
                        })}
                    </div>
                    {(*username).clone().map(|name| html! {
                        <div class="user-badge">
                            <span class="avatar">{initial.clone()}</span>
                            <span>{name}</span>
                        </div>
                    }).unwrap_or_default()}
                    <button class="ghost logout" onclick={on_logout}>
                        {bundle.text("nav.logout", "Log out")}
                    </button>
                </div>
            </aside>
            <main class="dashboard-main">
                { for props.children.iter() }
            </main>
        </div>
    }
}

fn nav_item(route: Route, label: String, active: bool) -> Html {
    html! {
        <Link<Route> to={route} classes={classes!("nav-item", active.then_some("active"))}>
            {label}
        </Link<Route>>
    }
}
