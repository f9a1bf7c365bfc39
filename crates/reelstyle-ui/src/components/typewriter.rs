//! Animated headline that types and deletes phrases in turn.

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::core::typewriter::Typewriter;

#[derive(Properties, PartialEq)]
pub(crate) struct TypewriterTextProps {
    pub phrases: Vec<String>,
}

#[function_component(TypewriterText)]
pub(crate) fn typewriter_text(props: &TypewriterTextProps) -> Html {
    let machine = use_mut_ref(|| Typewriter::new(&props.phrases));
    let text = use_state(String::new);
    let step = use_state(|| 0_u64);
    {
        let machine = machine.clone();
        use_effect_with_deps(
            move |phrases: &Vec<String>| {
                *machine.borrow_mut() = Typewriter::new(phrases);
                || ()
            },
            props.phrases.clone(),
        );
    }
    {
        let machine = machine.clone();
        let text = text.clone();
        let step_handle = step.clone();
        use_effect_with_deps(
            move |current: &u64| {
                let current = *current;
                let delay = machine.borrow_mut().step();
                text.set(machine.borrow().text());
                let handle = Timeout::new(delay, move || step_handle.set(current + 1));
                move || drop(handle)
            },
            *step,
        );
    }

    html! {
        <span class="typewriter">
            {(*text).clone()}
            <span class="cursor" aria-hidden="true">{"|"}</span>
        </span>
    }
}
