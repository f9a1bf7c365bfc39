//! Protected route wrapper for dashboard pages.

use yew::prelude::*;
use yew_router::prelude::Redirect;
use yewdux::prelude::use_selector;

use crate::app::Route;
use crate::components::atoms::LoadingIndicator;
use crate::core::guard::{GuardDecision, guard_decision};
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct ProtectedRouteProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ProtectedRoute)]
pub(crate) fn protected_route(props: &ProtectedRouteProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let session = use_selector(|store: &AppStore| store.session.clone());
    match guard_decision(&session) {
        GuardDecision::Loading => html! {
            <div class="page-center">
                <LoadingIndicator label={bundle.text("common.loading", "Loading...")} />
            </div>
        },
        GuardDecision::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        GuardDecision::Render => html! { <>{ for props.children.iter() }</> },
    }
}
