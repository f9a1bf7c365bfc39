//! History page view.

use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

use crate::app::Route;
use crate::app::api::{ApiCtx, PageServices, SessionCtx};
use crate::components::atoms::{EmptyState, ErrorBanner, LoadingIndicator};
use crate::core::logic::{format_count, format_date, last_analysis_date};
use crate::core::store::AppStore;
use crate::features::history::state::{HistoryState, HistoryView};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[function_component(HistoryPage)]
pub(crate) fn history_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let username = use_selector(|store: &AppStore| store.username().map(ToString::to_string));
    let state = use_mut_ref(HistoryState::default);
    let redraw = use_force_update();
    let services = PageServices::new(api, session, navigator);

    {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let fallback = bundle.text("history.failed", "Failed to load history");
        use_effect_with_deps(
            move |username: &Option<String>| {
                let begun = state.borrow_mut().begin(username.as_deref());
                if let (Some((ticket, username)), Some(services)) = (begun, services) {
                    redraw.force_update();
                    let state = state.clone();
                    yew::platform::spawn_local(async move {
                        let id = ticket.id();
                        let Some(outcome) =
                            ticket.run(services.api.client.get_profile(&username)).await
                        else {
                            return;
                        };
                        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
                        state.borrow_mut().complete(id, outcome);
                        redraw.force_update();
                    });
                }
                move || state.borrow_mut().cancel()
            },
            (*username).clone(),
        );
    }

    if services.is_none() {
        return html! { <ErrorBanner message={Some(AttrValue::from("Missing API context."))} /> };
    }

    let current = state.borrow();
    let body = match current.view() {
        HistoryView::Loading => html! {
            <LoadingIndicator label={bundle.text("history.loading", "Loading history...")} />
        },
        HistoryView::Failed(message) => html! {
            <ErrorBanner message={Some(AttrValue::from(message.to_owned()))} />
        },
        HistoryView::Empty => html! {
            <EmptyState
                icon={Some(AttrValue::from("🗂"))}
                title={bundle.text("history.empty_title", "No analyses yet")}
                description={Some(AttrValue::from(bundle.text("history.empty_body", "Analyse your first video to start building a history.")))}
            >
                <Link<Route> to={Route::Analysis} classes="primary">
                    {bundle.text("history.empty_cta", "Analyse a video")}
                </Link<Route>>
            </EmptyState>
        },
        HistoryView::Videos(profile) => html! {
            <>
                <div class="stats-grid summary">
                    <div class="stat">
                        <span class="muted">{bundle.text("history.total", "Videos analysed")}</span>
                        <strong>{profile.videos_count.max(u32::try_from(profile.videos.len()).unwrap_or(u32::MAX))}</strong>
                    </div>
                    <div class="stat">
                        <span class="muted">{bundle.text("history.last", "Last analysis")}</span>
                        <strong>{format_date(last_analysis_date(profile), bundle.locale)}</strong>
                    </div>
                </div>
                <div class="video-cards">
                    {for profile.videos.iter().map(|video| html! {
                        <Link<Route> to={Route::AnalysisVideo { video_id: video.id.to_string() }} classes="card video-card">
                            <h4>{video.title.clone().unwrap_or_else(|| format!("#{}", video.id))}</h4>
                            <p class="muted">
                                {format!(
                                    "{} {} · {}",
                                    format_count(video.views),
                                    bundle.text("stats.views", "Views").to_lowercase(),
                                    format_date(video.created_at.as_deref(), bundle.locale),
                                )}
                            </p>
                        </Link<Route>>
                    })}
                </div>
            </>
        },
    };
    let error = match current.view() {
        HistoryView::Videos(_) | HistoryView::Empty => current
            .profile()
            .error()
            .map(|message| AttrValue::from(message.to_owned())),
        _ => None,
    };

    html! {
        <section class="history-page">
            <header class="page-header">
                <h1>{bundle.text("history.title", "Analysis history")}</h1>
            </header>
            <ErrorBanner message={error} />
            {body}
        </section>
    }
}
