//! Terminal-style progress console shown while a video is analysed.

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::core::console::StatusConsoleState;

#[derive(Properties, PartialEq)]
pub(crate) struct StatusConsoleProps {
    pub lines: Vec<AttrValue>,
    pub interval_ms: u32,
}

#[function_component(StatusConsole)]
pub(crate) fn status_console(props: &StatusConsoleProps) -> Html {
    let state = use_mut_ref(|| StatusConsoleState::new(props.lines.len()));
    let redraw = use_force_update();
    {
        let state = state.clone();
        let interval_ms = props.interval_ms;
        use_effect_with_deps(
            move |len: &usize| {
                *state.borrow_mut() = StatusConsoleState::new(*len);
                redraw.force_update();
                let handle = Interval::new(interval_ms, move || {
                    let mut console = state.borrow_mut();
                    if !console.is_done() {
                        console.tick();
                        drop(console);
                        redraw.force_update();
                    }
                });
                move || drop(handle)
            },
            props.lines.len(),
        );
    }

    let console = *state.borrow();
    html! {
        <div class="status-console" role="log" aria-live="polite">
            <div class="status-console-bar">
                <span class="dot"></span><span class="dot"></span><span class="dot"></span>
            </div>
            <ul>
                {for props.lines.iter().take(console.visible()).enumerate().map(|(index, line)| {
                    let active = console.active_line() == Some(index) && !console.is_done();
                    html! {
                        <li class={classes!(active.then_some("active"))}>
                            <span class="prompt">{"> "}</span>
                            {line.clone()}
                            {if active { html! { <span class="cursor">{"▍"}</span> } } else { html! {} }}
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}
