//! Script generator page view.

use std::cell::RefCell;
use std::rc::Rc;

use reelstyle_api_models::{GeneratedScript, Profile, TextOrList};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

use crate::app::Route;
use crate::app::api::{ApiCtx, PageServices, SessionCtx};
use crate::components::atoms::{EmptyState, ErrorBanner, LoadingIndicator};
use crate::components::status_console::StatusConsole;
use crate::core::logic::{MAX_RECENT_VIDEOS, format_count, format_date};
use crate::core::storage::{load_last_analyzed_user, remember_analyzed_user};
use crate::core::store::AppStore;
use crate::features::generator::state::{GeneratorScenario, GeneratorState, resolve_target};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

#[derive(Properties, PartialEq)]
pub(crate) struct GeneratorPageProps {
    #[prop_or_default]
    pub username: Option<AttrValue>,
}

type Shared = Rc<RefCell<GeneratorState>>;

#[function_component(GeneratorPage)]
pub(crate) fn generator_page(props: &GeneratorPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api = use_context::<ApiCtx>();
    let session = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let session_user = use_selector(|store: &AppStore| store.username().map(ToString::to_string));
    let state = use_mut_ref(GeneratorState::default);
    let redraw = use_force_update();
    let services = PageServices::new(api, session, navigator);

    let last_analyzed = services
        .as_ref()
        .and_then(|services| load_last_analyzed_user(services.api.storage.as_ref()));
    let target = resolve_target(
        props.username.as_deref(),
        (*session_user).as_deref(),
        last_analyzed.as_deref(),
    );

    {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let fallback = bundle.text("generator.profile_failed", "Failed to load profile");
        use_effect_with_deps(
            move |target: &Option<String>| {
                if let (Some(target), Some(services)) = (target.as_deref(), services) {
                    start_profile(&services, &state, &redraw, target, fallback);
                }
                move || state.borrow_mut().cancel()
            },
            target,
        );
    }

    let Some(services) = services else {
        return html! { <ErrorBanner message={Some(AttrValue::from("Missing API context."))} /> };
    };

    let scenario = state.borrow().scenario();
    match scenario {
        GeneratorScenario::Loading => html! {
            <section class="generator-page">
                <LoadingIndicator label={bundle.text("generator.loading", "Loading style profile...")} />
            </section>
        },
        GeneratorScenario::Onboarding => render_onboarding(&services, &state, &redraw, &bundle),
        GeneratorScenario::Studio => render_studio(&services, &state, &redraw, &bundle),
    }
}

fn start_profile(
    services: &PageServices,
    state: &Shared,
    redraw: &UseForceUpdateHandle,
    username: &str,
    fallback: String,
) {
    let Some((ticket, username)) = state.borrow_mut().begin_profile(username) else {
        return;
    };
    redraw.force_update();
    let services = services.clone();
    let state = state.clone();
    let redraw = redraw.clone();
    yew::platform::spawn_local(async move {
        let id = ticket.id();
        let Some(outcome) = ticket.run(services.api.client.get_profile(&username)).await else {
            return;
        };
        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
        if let Err(message) = &outcome {
            tracing::debug!(username = %username, error = %message, "profile unavailable");
        }
        state.borrow_mut().complete_profile(id, outcome);
        redraw.force_update();
    });
}

fn start_refresh(
    services: &PageServices,
    state: &Shared,
    redraw: &UseForceUpdateHandle,
    fallback: String,
) {
    let Some((ticket, username)) = state.borrow_mut().begin_refresh() else {
        return;
    };
    redraw.force_update();
    let services = services.clone();
    let state = state.clone();
    let redraw = redraw.clone();
    yew::platform::spawn_local(async move {
        let id = ticket.id();
        let Some(outcome) = ticket.run(services.api.client.refresh_profile(&username)).await
        else {
            return;
        };
        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
        state.borrow_mut().complete_profile(id, outcome);
        redraw.force_update();
    });
}

fn start_reference(
    services: &PageServices,
    state: &Shared,
    redraw: &UseForceUpdateHandle,
    bundle: &TranslationBundle,
) {
    let Some((ticket, url)) = state.borrow_mut().begin_reference() else {
        return;
    };
    redraw.force_update();
    let fallback = bundle.text("analysis.failed", "Analysis failed");
    let profile_fallback = bundle.text("generator.profile_failed", "Failed to load profile");
    let services = services.clone();
    let state = state.clone();
    let redraw = redraw.clone();
    yew::platform::spawn_local(async move {
        let id = ticket.id();
        let Some(outcome) = ticket.run(services.api.client.analyze_video(&url)).await else {
            return;
        };
        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
        let author = state.borrow_mut().complete_reference(id, outcome);
        redraw.force_update();
        if let Some(author) = author {
            remember_analyzed_user(services.api.storage.as_ref(), &author);
            start_profile(&services, &state, &redraw, &author, profile_fallback);
        }
    });
}

fn start_generate(
    services: &PageServices,
    state: &Shared,
    redraw: &UseForceUpdateHandle,
    fallback: String,
) {
    let Some((ticket, request)) = state.borrow_mut().begin_generate() else {
        return;
    };
    redraw.force_update();
    let services = services.clone();
    let state = state.clone();
    let redraw = redraw.clone();
    yew::platform::spawn_local(async move {
        let id = ticket.id();
        let call = services
            .api
            .client
            .generate_script(&request.username, &request.topic);
        let Some(outcome) = ticket.run(call).await else {
            return;
        };
        let outcome = outcome.map_err(|err| services.message_for(&err, &fallback));
        state.borrow_mut().complete_generate(id, outcome);
        redraw.force_update();
    });
}

fn render_onboarding(
    services: &PageServices,
    state: &Shared,
    redraw: &UseForceUpdateHandle,
    bundle: &TranslationBundle,
) -> Html {
    let on_input = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            state.borrow_mut().reference_url = input.value();
            redraw.force_update();
        })
    };
    let on_submit = {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let bundle = bundle.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            start_reference(&services, &state, &redraw, &bundle);
        })
    };

    let current = state.borrow();
    let busy = current.reference().is_pending();
    let console_lines: Vec<AttrValue> = bundle
        .list("console.lines")
        .into_iter()
        .take(services.api.config.console_lines)
        .map(AttrValue::from)
        .collect();

    html! {
        <section class="generator-page onboarding">
            <EmptyState
                icon={Some(AttrValue::from("✨"))}
                title={bundle.text("generator.onboarding_title", "Teach us your style")}
                description={Some(AttrValue::from(bundle.text(
                    "generator.onboarding_body",
                    "Analyse one reference video and we will build a style profile to write scripts from.",
                )))}
            >
                <form class="url-form" onsubmit={on_submit}>
                    <input
                        type="url"
                        placeholder={bundle.text("analysis.placeholder", "https://youtube.com/shorts/...")}
                        value={current.reference_url.clone()}
                        oninput={on_input}
                        disabled={busy}
                    />
                    <button class="primary" type="submit" disabled={busy || current.reference_url.trim().is_empty()}>
                        {bundle.text("generator.onboarding_submit", "Analyse reference")}
                    </button>
                </form>
            </EmptyState>
            <ErrorBanner message={current.reference().error().map(|message| AttrValue::from(message.to_owned()))} />
            {if busy {
                html! { <StatusConsole lines={console_lines} interval_ms={services.api.config.console_interval_ms} /> }
            } else {
                html! {}
            }}
        </section>
    }
}

fn render_studio(
    services: &PageServices,
    state: &Shared,
    redraw: &UseForceUpdateHandle,
    bundle: &TranslationBundle,
) -> Html {
    let on_topic = {
        let state = state.clone();
        let redraw = redraw.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlTextAreaElement = event.target_unchecked_into();
            state.borrow_mut().topic = input.value();
            redraw.force_update();
        })
    };
    let on_generate = {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let fallback = bundle.text("generator.failed", "Script generation failed");
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            start_generate(&services, &state, &redraw, fallback.clone());
        })
    };
    let on_refresh = {
        let services = services.clone();
        let state = state.clone();
        let redraw = redraw.clone();
        let fallback = bundle.text("generator.refresh_failed", "Failed to refresh profile");
        Callback::from(move |_: MouseEvent| {
            start_refresh(&services, &state, &redraw, fallback.clone());
        })
    };

    let current = state.borrow();
    let Some(profile) = current.displayed_profile() else {
        return html! {};
    };
    let generating = current.script().is_pending();
    let refreshing = current.profile().is_pending();

    html! {
        <section class="generator-page studio">
            <header class="page-header">
                <div>
                    <h1>{bundle.text("generator.title", "Script studio")}</h1>
                    <p class="muted">{format!("@{}", profile.username)}</p>
                </div>
                <button class="ghost" onclick={on_refresh} disabled={refreshing}>
                    {if refreshing {
                        bundle.text("generator.refreshing", "Refreshing...")
                    } else {
                        bundle.text("generator.refresh", "Refresh profile")
                    }}
                </button>
            </header>
            <ErrorBanner message={current.profile().error().map(|message| AttrValue::from(message.to_owned()))} />
            <div class="studio-grid">
                <aside class="profile-column">
                    {render_highlights(profile, bundle)}
                    {render_recent(profile, bundle)}
                </aside>
                <div class="script-column">
                    <form class="topic-form" onsubmit={on_generate}>
                        <label>{bundle.text("generator.topic_label", "What is the next video about?")}</label>
                        <textarea
                            rows="3"
                            placeholder={bundle.text("generator.topic_placeholder", "e.g. three mistakes beginners make")}
                            value={current.topic.clone()}
                            oninput={on_topic}
                            disabled={generating}
                        />
                        <button class="primary" type="submit" disabled={generating || current.topic.trim().is_empty()}>
                            {if generating {
                                bundle.text("generator.generating", "Writing...")
                            } else {
                                bundle.text("generator.submit", "Generate script")
                            }}
                        </button>
                    </form>
                    <ErrorBanner message={current.script().error().map(|message| AttrValue::from(message.to_owned()))} />
                    {current.script().last_success().map(|script| render_script(script, bundle)).unwrap_or_default()}
                </div>
            </div>
        </section>
    }
}

fn render_lines(value: Option<&TextOrList>) -> Html {
    value
        .filter(|value| !value.is_blank())
        .map(|value| {
            html! {
                <ul>
                    {for value.lines().into_iter().map(|line| html! { <li>{line}</li> })}
                </ul>
            }
        })
        .unwrap_or_default()
}

fn render_highlights(profile: &Profile, bundle: &TranslationBundle) -> Html {
    let master = &profile.master_profile;
    let text_item = |key: &str, default: &str, value: &Option<String>| {
        value
            .as_ref()
            .map(|value| {
                html! {
                    <div class="highlight">
                        <span class="muted">{bundle.text(key, default)}</span>
                        <p>{value.clone()}</p>
                    </div>
                }
            })
            .unwrap_or_default()
    };
    html! {
        <div class="card highlights">
            <h3>{bundle.text("generator.highlights", "Style highlights")}</h3>
            <p class="muted">
                {format!("{} {}", profile.videos_count, bundle.text("generator.videos_analyzed", "videos analysed"))}
            </p>
            {text_item("generator.core_identity", "Core identity", &master.core_identity)}
            {master.winning_formula.as_ref().map(|formula| html! {
                <div class="highlight">
                    <span class="muted">{bundle.text("generator.winning_formula", "Winning formula")}</span>
                    {render_lines(Some(formula))}
                </div>
            }).unwrap_or_default()}
            {text_item("generator.tone", "Tone of voice", &master.tone_of_voice)}
            {text_item("generator.visual", "Visual signature", &master.visual_signature)}
            {if master.best_hooks.is_empty() {
                html! {}
            } else {
                html! {
                    <div class="highlight">
                        <span class="muted">{bundle.text("generator.best_hooks", "Hooks that work")}</span>
                        <ul>{for master.best_hooks.iter().map(|hook| html! { <li>{hook.clone()}</li> })}</ul>
                    </div>
                }
            }}
            {text_item("generator.weaknesses", "What to improve", &master.weaknesses)}
        </div>
    }
}

fn render_recent(profile: &Profile, bundle: &TranslationBundle) -> Html {
    if profile.videos.is_empty() {
        return html! {};
    }
    html! {
        <div class="card recent-videos">
            <h3>{bundle.text("generator.recent", "Recent videos")}</h3>
            <ul>
                {for profile.videos.iter().take(MAX_RECENT_VIDEOS).map(|video| html! {
                    <li>
                        <Link<Route> to={Route::AnalysisVideo { video_id: video.id.to_string() }}>
                            {video.title.clone().unwrap_or_else(|| format!("#{}", video.id))}
                        </Link<Route>>
                        <span class="muted">
                            {format!(
                                "{} · {}",
                                format_count(video.views),
                                format_date(video.created_at.as_deref(), bundle.locale),
                            )}
                        </span>
                    </li>
                })}
            </ul>
        </div>
    }
}

fn render_script(script: &GeneratedScript, bundle: &TranslationBundle) -> Html {
    html! {
        <div class="card script-output">
            <h3>{script.title.clone().unwrap_or_else(|| bundle.text("generator.untitled", "Untitled script"))}</h3>
            <table class="script-table">
                <thead>
                    <tr>
                        <th>{bundle.text("generator.time", "Time")}</th>
                        <th>{bundle.text("generator.visual_column", "Visual")}</th>
                        <th>{bundle.text("generator.audio_column", "Audio")}</th>
                    </tr>
                </thead>
                <tbody>
                    {for script.script.iter().map(|block| html! {
                        <tr>
                            <td>{block.time.clone().unwrap_or_default()}</td>
                            <td>{block.visual.clone().unwrap_or_default()}</td>
                            <td>{block.audio.clone().unwrap_or_default()}</td>
                        </tr>
                    })}
                </tbody>
            </table>
            {script.viral_tips.as_ref().filter(|tips| !tips.is_blank()).map(|tips| html! {
                <div class="viral-tips">
                    <h4>{bundle.text("generator.tips", "Viral tips")}</h4>
                    {render_lines(Some(tips))}
                </div>
            }).unwrap_or_default()}
        </div>
    }
}
