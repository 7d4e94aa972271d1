use dioxus::prelude::*;
use quiz_core::model::QuizLength;

use crate::views::{HomeView, QuizView, ResultsView, ViewError};
use crate::vm::{AppFlow, ResultsVm, Screen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Quiz" }
        QuizShell {}
    }
}

/// Home, quiz and results screens plus the error banner.
#[component]
pub fn QuizShell() -> Element {
    let mut flow = use_signal(AppFlow::default);

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<FlowTestHandles>() {
                handles.register(flow);
            }
        }
    }

    let on_start = move |length: QuizLength| {
        tracing::info!(length = length.label(), "starting quiz");
        flow.write().start(length);
    };
    let on_load_error = move |err: ViewError| flow.write().load_failed(err);
    let on_finish = move |results: ResultsVm| flow.write().finished(results);
    let on_reset = move |()| flow.write().reset();

    let current = flow.read().clone();

    rsx! {
        div { class: "app-root",
            header { class: "app-header",
                h1 { "🧠 Quiz Time 🧠" }
                p { "Test your knowledge against the clock!" }
            }
            if let Some(err) = current.banner() {
                div { class: "banner banner--error", role: "alert",
                    p { class: "banner__title", "Error: {err.message()}" }
                }
            }
            main { class: "content",
                ErrorBoundary {
                    handle_error: |errors: ErrorContext| rsx! {
                        div { class: "fatal",
                            h1 { "Something went wrong" }
                            pre { "{errors:?}" }
                        }
                    },
                    match current.screen().clone() {
                        Screen::Home => rsx! {
                            HomeView { on_start }
                        },
                        Screen::Quiz(length) => rsx! {
                            QuizView {
                                key: "{current.attempt()}",
                                length,
                                on_finish,
                                on_cancel: on_reset,
                                on_load_error,
                            }
                        },
                        Screen::Results(results) => rsx! {
                            ResultsView { results, on_restart: on_reset }
                        },
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct FlowTestHandles {
    flow: Rc<RefCell<Option<Signal<AppFlow>>>>,
}

#[cfg(test)]
impl FlowTestHandles {
    pub(crate) fn register(&self, flow: Signal<AppFlow>) {
        *self.flow.borrow_mut() = Some(flow);
    }

    pub(crate) fn flow(&self) -> Signal<AppFlow> {
        (*self.flow.borrow()).expect("app flow registered")
    }
}
