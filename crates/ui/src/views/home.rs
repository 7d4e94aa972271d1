use dioxus::prelude::*;
use quiz_core::model::QuizLength;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HomeVm, StatsPanelVm};

#[component]
pub fn HomeView(on_start: EventHandler<QuizLength>) -> Element {
    let ctx = use_context::<AppContext>();
    let stats_service = ctx.stats();

    let resource = use_resource(move || {
        let stats_service = stats_service.clone();
        async move { Ok::<_, ViewError>(HomeVm::new(stats_service.load().await)) }
    });
    let state = view_state_from_resource(&resource);
    let vm = match &state {
        ViewState::Ready(vm) => vm.clone(),
        _ => HomeVm::new(None),
    };

    rsx! {
        div { class: "card home",
            h2 { "Welcome to the Quiz!" }
            p { class: "muted",
                "Pick a length and answer each question before the clock runs out."
            }
            if ctx.offline() {
                p { class: "offline-note", "Offline mode: playing the bundled sample questions." }
            }
            match state {
                ViewState::Loading => rsx! {
                    p { class: "muted", "Loading statistics..." }
                },
                _ => rsx! {
                    if let Some(stats) = vm.stats() {
                        StatsPanel { stats: stats.clone() }
                    }
                },
            }
            div { class: "length-choices",
                for choice in vm.choices().iter().cloned() {
                    button {
                        key: "{choice.label}",
                        class: "{choice.css_class}",
                        r#type: "button",
                        onclick: move |_| on_start.call(choice.length),
                        "{choice.label}"
                    }
                }
            }
        }
    }
}

#[component]
fn StatsPanel(stats: StatsPanelVm) -> Element {
    rsx! {
        div { class: "stats-panel",
            h3 { "Quiz Statistics" }
            p {
                "Total Questions Available: "
                span { class: "stats-total", "{stats.total_questions}" }
            }
            if !stats.kinds.is_empty() {
                div { class: "stats-kinds",
                    p { "Question Types:" }
                    ul {
                        for (kind, count) in stats.kinds.iter().cloned() {
                            li { key: "{kind}", class: "kind-label", "{kind}: {count}" }
                        }
                    }
                }
            }
        }
    }
}
