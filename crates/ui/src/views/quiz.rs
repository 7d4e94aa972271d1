use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use quiz_core::model::QuizLength;
use quiz_core::{SessionPhase, TickOutcome, TickerKey};

use crate::context::AppContext;
use crate::views::spinner::LoadingSpinner;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionVm, QuizIntent, QuizOutcome, QuizVm, ResultsVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK: Duration = Duration::from_secs(1);

#[component]
pub fn QuizView(
    length: QuizLength,
    on_finish: EventHandler<ResultsVm>,
    on_cancel: EventHandler<()>,
    on_load_error: EventHandler<ViewError>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let vm = use_signal(|| None::<QuizVm>);
    let error = use_signal(|| None::<ViewError>);
    let submitting = use_signal(|| false);
    let mut ticker = use_signal(|| None::<(TickerKey, Task)>);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut vm = vm;
        async move {
            match start_quiz(&quiz_loop, length).await {
                Ok(started) => {
                    vm.set(Some(started));
                    Ok(())
                }
                Err(err) => {
                    on_load_error.call(err);
                    Err(err)
                }
            }
        }
    });
    let state = view_state_from_resource(&resource);

    // One ticker per armed countdown. A new key (next question, restart) or no
    // key (confirmation, submission, cancel) cancels the running task.
    use_effect(move || {
        let key = vm.read().as_ref().and_then(QuizVm::ticker_key);
        let running = ticker.peek().as_ref().map(|(running, _)| *running);
        if running == key {
            return;
        }
        if let Some((_, task)) = ticker.write().take() {
            task.cancel();
        }
        if let Some(key) = key {
            let task = spawn(run_ticker(vm, key));
            ticker.set(Some((key, task)));
        }
    });
    use_drop(move || {
        if let Some((_, task)) = ticker.try_write().ok().and_then(|mut slot| slot.take()) {
            task.cancel();
        }
    });

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut error = error;
            let mut submitting = submitting;

            if intent != QuizIntent::Submit {
                let outcome = vm
                    .write()
                    .as_mut()
                    .map_or(Err(ViewError::Unknown), |vm| vm.apply(intent));
                match outcome {
                    Ok(QuizOutcome::Cancelled) => {
                        tracing::info!("quiz cancelled");
                        on_cancel.call(());
                    }
                    Ok(_) => error.set(None),
                    Err(err) => error.set(Some(err)),
                }
                return;
            }

            if submitting() {
                return;
            }
            submitting.set(true);
            let quiz_loop = quiz_loop.clone();
            spawn(async move {
                let local_vm = {
                    let mut guard = vm.write();
                    guard.take()
                };
                let Some(mut vm_value) = local_vm else {
                    submitting.set(false);
                    error.set(Some(ViewError::Unknown));
                    return;
                };

                let result = vm_value.submit(&quiz_loop).await;

                // Always put the session back so a failed submission can be retried.
                {
                    let mut guard = vm.write();
                    *guard = Some(vm_value);
                }
                submitting.set(false);

                match result {
                    Ok(QuizOutcome::Scored(results)) => {
                        error.set(None);
                        on_finish.call(results);
                    }
                    Ok(_) => {}
                    // The confirmation panel shows the session's own message.
                    Err(ViewError::SubmitQuiz) => {}
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let vm_guard = vm.read();
    let phase = vm_guard.as_ref().map(QuizVm::phase);

    rsx! {
        div { class: "quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    LoadingSpinner { message: "Preparing your quiz..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "card",
                        p { class: "error-text", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_cancel.call(()),
                            "Go Back"
                        }
                    }
                },
                ViewState::Ready(()) => match (vm_guard.as_ref(), phase) {
                    (Some(_), Some(SessionPhase::Empty)) => rsx! {
                        div { class: "card center",
                            p { class: "error-text", "No questions available!" }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| on_cancel.call(()),
                                "Go Back"
                            }
                        }
                    },
                    (Some(quiz), Some(SessionPhase::ConfirmSubmit | SessionPhase::Submitting)) => rsx! {
                        ConfirmPanel {
                            answered: quiz.answered_count(),
                            total: quiz.total(),
                            warning: quiz.unanswered_warning(),
                            error: quiz.last_error().map(str::to_string),
                            submitting: submitting(),
                            on_intent: dispatch_intent,
                        }
                    },
                    (Some(quiz), Some(SessionPhase::Active { .. })) => rsx! {
                        QuestionPanel {
                            prompt: quiz.prompt().unwrap_or_default().to_string(),
                            kind: quiz.kind_label(),
                            options: quiz.options(),
                            progress_label: quiz.progress_label(),
                            answered_label: quiz.answered_label(),
                            progress_percent: quiz.progress_percent(),
                            timer_label: quiz.timer_label(),
                            timer_class: quiz.timer_tone().css_class(),
                            can_go_previous: quiz.can_go_previous(),
                            next_label: quiz.next_label(),
                            on_intent: dispatch_intent,
                        }
                    },
                    // Submission in flight: the session is held by the submit task.
                    (None, _) => rsx! {
                        LoadingSpinner { message: "Scoring your answers..." }
                    },
                    _ => rsx! {},
                },
            }
            if let Some(err) = *error.read() {
                p { class: "error-text", "{err.message()}" }
            }
        }
    }
}

async fn run_ticker(mut vm: Signal<Option<QuizVm>>, key: TickerKey) {
    loop {
        tokio::time::sleep(TICK).await;
        let outcome = vm
            .write()
            .as_mut()
            .map_or(TickOutcome::Ignored, |vm| vm.tick(key));
        match outcome {
            TickOutcome::Counting { .. } => {}
            TickOutcome::Advanced { index } => {
                tracing::debug!(index, "time ran out, moved on");
                break;
            }
            TickOutcome::ConfirmPending => {
                tracing::debug!("time ran out on the last question");
                break;
            }
            TickOutcome::Ignored => break,
        }
    }
}

#[component]
fn QuestionPanel(
    prompt: String,
    kind: String,
    options: Vec<OptionVm>,
    progress_label: String,
    answered_label: String,
    progress_percent: f64,
    timer_label: Option<String>,
    timer_class: &'static str,
    can_go_previous: bool,
    next_label: &'static str,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "card quiz",
            div { class: "quiz-progress",
                div { class: "quiz-progress__labels",
                    span { "{progress_label}" }
                    span { "{answered_label}" }
                }
                div { class: "bar",
                    div { class: "bar__fill", style: "width: {progress_percent}%" }
                }
            }
            if let Some(label) = timer_label {
                div { class: "quiz-timer",
                    span { class: "{timer_class}", "{label}" }
                }
            }
            h2 { class: "quiz-prompt", "{prompt}" }
            span { class: "kind-badge kind-label", "{kind}" }
            div { class: "quiz-options",
                for option in options {
                    OptionButton { key: "{option.index}", option: option.clone(), on_intent }
                }
            }
            div { class: "quiz-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !can_go_previous,
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "← Previous"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Cancel),
                    "Cancel Quiz"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "{next_label}"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let class = if option.selected {
        "option option--selected"
    } else {
        "option"
    };
    let index = option.index;
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::Select(index)),
            span { class: "option__letter", "{option.letter}." }
            "{option.text}"
        }
    }
}

#[component]
fn ConfirmPanel(
    answered: usize,
    total: usize,
    warning: Option<&'static str>,
    error: Option<String>,
    submitting: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "card confirm",
            h2 { "Ready to Submit?" }
            p { class: "confirm-summary",
                "You've answered "
                strong { "{answered}" }
                " out of "
                strong { "{total}" }
                " questions."
            }
            if let Some(warning) = warning {
                p { class: "warning-text", "{warning}" }
            }
            if let Some(error) = error {
                p { class: "error-text", "{error}" }
            }
            div { class: "confirm-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_intent.call(QuizIntent::ReviewAnswers),
                    "Review Answers"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_intent.call(QuizIntent::Submit),
                    if submitting { "Submitting..." } else { "Submit Quiz" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
