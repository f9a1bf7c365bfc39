//! Loading spinner and inline error banner.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LoadingIndicatorProps {
    pub label: AttrValue,
}

#[function_component(LoadingIndicator)]
pub(crate) fn loading_indicator(props: &LoadingIndicatorProps) -> Html {
    html! {
        <div class="loading" role="status">
            <span class="spinner" aria-hidden="true"></span>
            <span class="muted">{props.label.clone()}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ErrorBannerProps {
    pub message: Option<AttrValue>,
}

#[function_component(ErrorBanner)]
pub(crate) fn error_banner(props: &ErrorBannerProps) -> Html {
    props
        .message
        .clone()
        .map(|message| {
            html! {
                <div class="error-banner" role="alert">
                    <span aria-hidden="true">{"⚠"}</span>
                    <p>{message}</p>
                </div>
            }
        })
        .unwrap_or_default()
}
