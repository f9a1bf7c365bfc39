//! Analysis page view.

use std::cell::RefCell;
use std::rc::Rc;

use reelstyle_api_models::{AnalysisResult, MetaStats, StylePassport};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::{Link, use_location, use_navigator};

use crate::app::api::{ApiCtx, PageServices, SessionCtx};
use crate::app::{PendingAnalysis, Route};
use crate::components::atoms::{EmptyState, ErrorBanner, LoadingIndicator};
use crate::components::status_console::StatusConsole;
use crate::core::logic::{
    analysis_title, format_count, format_duration, has_passport, pacing_percent, summary_key_elements,
};
use crate::core::storage::remember_analyzed_user;
use crate::features::analysis::state::AnalysisState;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct AnalysisPageProps {
    #[prop_or_default]
    pub video_id: Option<i64>,
}

#[function_component(AnalysisPage)]
pub(crate) fn analysis_page(props: &AnalysisPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let location = use_location();
    let state = use_mut_ref(AnalysisState::default);
    let redraw = use_force_update();
    let services = PageServices::new(api, session, navigator.clone());
    let handoff = location
        .and_then(|location| location.state::<PendingAnalysis>())
        .map(|pending| pending.url.clone());

    {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let fallback = bundle.text("analysis.load_failed", "Failed to load video analysis");
        use_effect_with_deps(
            move |video_id: &Option<i64>| {
                if let (Some(video_id), Some(services)) = (*video_id, services) {
                    start_load(&services, &state, &redraw, video_id, fallback);
                }
                move || state.borrow_mut().cancel()
            },
            props.video_id,
        );
    }
    {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let navigator = navigator.clone();
        let fallback = bundle.text("analysis.failed", "Analysis failed");
        use_effect_with_deps(
            move |handoff: &Option<String>| {
                if let (Some(url), Some(services)) = (handoff.clone(), services) {
                    state.borrow_mut().input_url = url;
                    if let Some(navigator) = &navigator {
                        navigator.replace(&Route::Analysis);
                    }
                    start_analyze(&services, &state, &redraw, fallback);
                }
                || ()
            },
            handoff,
        );
    }

    let Some(services) = services else {
        return html! { <ErrorBanner message={Some(AttrValue::from("Missing API context."))} /> };
    };

    let on_input = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            state.borrow_mut().input_url = input.value();
            redraw.force_update();
        })
    };
    let on_submit = {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let fallback = bundle.text("analysis.failed", "Analysis failed");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            start_analyze(&services, &state, &redraw, fallback.clone());
        })
    };

    let current = state.borrow();
    let busy = current.result().is_pending();
    let console_lines: Vec<AttrValue> = bundle
        .list("console.lines")
        .into_iter()
        .take(services.api.config.console_lines)
        .map(AttrValue::from)
        .collect();

    html! {
        <section class="analysis-page">
            <header class="page-header">
                <h1>{bundle.text("analysis.title", "Video analysis")}</h1>
                <p class="muted">{bundle.text("analysis.subtitle", "Paste a link to a short video to get its style passport.")}</p>
            </header>
            <form class="url-form" onsubmit={on_submit}>
                <input
                    type="url"
                    placeholder={bundle.text("analysis.placeholder", "https://youtube.com/shorts/...")}
                    value={current.input_url.clone()}
                    oninput={on_input}
                    disabled={busy}
                />
                <button class="primary" type="submit" disabled={busy || current.input_url.trim().is_empty()}>
                    {if current.is_analyzing() {
                        bundle.text("analysis.analyzing", "Analyzing...")
                    } else {
                        bundle.text("analysis.submit", "Analyze")
                    }}
                </button>
            </form>
            <ErrorBanner message={current.result().error().map(|message| AttrValue::from(message.to_owned()))} />
            {if current.is_analyzing() {
                html! { <StatusConsole lines={console_lines} interval_ms={services.api.config.console_interval_ms} /> }
            } else if current.is_loading_stored() {
                html! { <LoadingIndicator label={bundle.text("analysis.loading", "Loading analysis...")} /> }
            } else {
                html! {}
            }}
            {match current.result().last_success() {
                Some(result) => render_result(result, &bundle),
                None if !busy => html! {
                    <EmptyState
                        icon={Some(AttrValue::from("🎬"))}
                        title={bundle.text("analysis.empty_title", "Nothing analysed yet")}
                        description={Some(AttrValue::from(bundle.text("analysis.empty_body", "Results appear here after the first analysis.")))}
                    />
                },
                None => html! {},
            }}
        </section>
    }
}

fn start_analyze(
    services: &PageServices,
    state: &Rc<RefCell<AnalysisState>>,
    redraw: &UseForceUpdateHandle,
    fallback: String,
) {
    let Some((ticket, url)) = state.borrow_mut().begin_analyze() else {
        return;
    };
    redraw.force_update();
    let services = services.clone();
    let state = state.clone();
    let redraw = redraw.clone();
    yew::platform::spawn_local(async move {
        let id = ticket.id();
        let Some(outcome) = ticket.run(services.api.client.analyze_video(&url)).await else {
            return;
        };
        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
        let author = state.borrow_mut().complete(id, outcome);
        if let Some(author) = author {
            remember_analyzed_user(services.api.storage.as_ref(), &author);
        }
        redraw.force_update();
    });
}

fn start_load(
    services: &PageServices,
    state: &Rc<RefCell<AnalysisState>>,
    redraw: &UseForceUpdateHandle,
    video_id: i64,
    fallback: String,
) {
    let ticket = state.borrow_mut().begin_load();
    redraw.force_update();
    let services = services.clone();
    let state = state.clone();
    let redraw = redraw.clone();
    yew::platform::spawn_local(async move {
        let id = ticket.id();
        let Some(outcome) = ticket.run(services.api.client.get_video(video_id)).await else {
            return;
        };
        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
        state.borrow_mut().complete(id, outcome);
        redraw.force_update();
    });
}

fn render_result(result: &AnalysisResult, bundle: &TranslationBundle) -> Html {
    let title = analysis_title(result).unwrap_or_else(|| result.username.clone());
    let key_elements = result
        .style_passport
        .as_ref()
        .map_or(&[][..], |passport| passport.key_elements.as_slice());
    html! {
        <div class="analysis-result">
            <div class="result-header">
                <div>
                    <h2>{title}</h2>
                    <p class="muted">{format!("@{}", result.username)}</p>
                    <div class="tags">
                        {for summary_key_elements(key_elements).iter().map(|element| html! { <span class="tag">{element.clone()}</span> })}
                    </div>
                </div>
                <div class="result-actions">
                    <Link<Route> to={Route::GeneratorFor { username: result.username.clone() }} classes="primary">
                        {bundle.text("analysis.create_script", "Create a script in this style")}
                    </Link<Route>>
                    <Link<Route> to={Route::History} classes="ghost">
                        {bundle.text("nav.history", "History")}
                    </Link<Route>>
                </div>
            </div>
            {result.meta_stats.as_ref().map(|stats| render_stats(stats, bundle)).unwrap_or_default()}
            {if has_passport(result.style_passport.as_ref()) {
                result.style_passport.as_ref().map(|passport| render_passport(passport, bundle)).unwrap_or_default()
            } else {
                html! {}
            }}
            {if result.transcript_text.trim().is_empty() {
                html! {}
            } else {
                html! {
                    <details class="card transcript">
                        <summary>{bundle.text("analysis.transcript", "Transcript")}</summary>
                        <p>{result.transcript_text.clone()}</p>
                    </details>
                }
            }}
        </div>
    }
}

fn render_stats(stats: &MetaStats, bundle: &TranslationBundle) -> Html {
    let items = [
        (bundle.text("stats.views", "Views"), format_count(stats.view_count)),
        (bundle.text("stats.likes", "Likes"), format_count(stats.like_count)),
        (bundle.text("stats.comments", "Comments"), format_count(stats.comment_count)),
        (bundle.text("stats.duration", "Duration"), format_duration(stats.duration)),
    ];
    html! {
        <div class="stats-grid">
            {for items.into_iter().map(|(label, value)| html! {
                <div class="stat">
                    <span class="muted">{label}</span>
                    <strong>{value}</strong>
                </div>
            })}
        </div>
    }
}

fn render_passport(passport: &StylePassport, bundle: &TranslationBundle) -> Html {
    let pacing = pacing_percent(passport.pacing_wpm);
    let text_card = |key: &str, default: &str, value: &Option<String>| {
        value
            .as_ref()
            .map(|value| {
                html! {
                    <div class="card">
                        <h4>{bundle.text(key, default)}</h4>
                        <p>{value.clone()}</p>
                    </div>
                }
            })
            .unwrap_or_default()
    };
    html! {
        <div class="passport">
            <h3>{bundle.text("passport.title", "Style passport")}</h3>
            {passport.virality_score.as_ref().map(|score| html! {
                <div class="virality">
                    <span class="muted">{bundle.text("passport.virality", "Virality score")}</span>
                    <strong>{format!("{score:.1}/10")}</strong>
                </div>
            }).unwrap_or_default()}
            {text_card("passport.hook", "Hook", &passport.hook_analysis)}
            {passport.pacing_wpm.map(|wpm| html! {
                <div class="card">
                    <h4>{bundle.text("passport.pacing", "Pacing")}</h4>
                    <div class="pacing-bar"><div class="fill" style={format!("width: {pacing}%")}></div></div>
                    <p class="muted">{format!("{wpm:.1}/10")}</p>
                </div>
            }).unwrap_or_default()}
            {text_card("passport.visual", "Visual style", &passport.visual_style)}
            {text_card("passport.audio", "Audio tone", &passport.audio_tone)}
            {if passport.key_elements.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="card">
                        <h4>{bundle.text("passport.key_elements", "Key elements")}</h4>
                        <div class="tags">
                            {for passport.key_elements.iter().map(|element| html! { <span class="tag">{element.clone()}</span> })}
                        </div>
                    </div>
                }
            }}
            {if passport.structure.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="card">
                        <h4>{bundle.text("passport.structure", "Structure")}</h4>
                        <ol class="timeline">
                            {for passport.structure.iter().map(|block| html! {
                                <li>
                                    <span class="time">{block.time.clone().unwrap_or_default()}</span>
                                    <strong>{block.block.clone().unwrap_or_default()}</strong>
                                    <p>{block.description.clone().unwrap_or_default()}</p>
                                </li>
                            })}
                        </ol>
                    </div>
                }
            }}
            {text_card("passport.stats_analysis", "Why it works", &passport.stats_analysis)}
        </div>
    }
}
