use dioxus::prelude::*;

use crate::vm::{ResultRowVm, ResultsVm};

#[component]
pub fn ResultsView(results: ResultsVm, on_restart: EventHandler<()>) -> Element {
    let tone = results.tone().css_class();
    let percentage = results.percentage_label();
    let bar_width = results.bar_width();

    rsx! {
        div { class: "card results",
            div { class: "results-summary",
                h2 { "Quiz Results" }
                div { class: "score-box",
                    div { class: "score {tone}", "{percentage}" }
                    p { class: "score-count", "{results.summary_label()}" }
                    p { class: "score-message", "{results.message()}" }
                    if let Some(taken) = results.time_taken_label() {
                        p { class: "muted", "Time taken: {taken}" }
                    }
                }
                div { class: "bar bar--large",
                    div { class: "bar__fill {tone}", style: "width: {bar_width}%" }
                }
            }
            div { class: "results-review",
                h3 { "Question Review" }
                div { class: "results-rows",
                    for row in results.rows().iter().cloned() {
                        ResultRow { key: "{row.number}", row }
                    }
                }
            }
            div { class: "results-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "Take Another Quiz"
                }
            }
            div { class: "fun-stats",
                h4 { "Fun Stats" }
                div { class: "fun-stats__grid",
                    div {
                        div { class: "fun-stats__value", "{results.correct()}" }
                        div { class: "fun-stats__label", "Correct" }
                    }
                    div {
                        div { class: "fun-stats__value", "{results.incorrect()}" }
                        div { class: "fun-stats__label", "Incorrect" }
                    }
                    div {
                        div { class: "fun-stats__value", "{percentage}" }
                        div { class: "fun-stats__label", "Accuracy" }
                    }
                    div {
                        div { class: "fun-stats__value", "{results.badge()}" }
                        div { class: "fun-stats__label", "Achievement" }
                    }
                }
            }
        }
    }
}

#[component]
fn ResultRow(row: ResultRowVm) -> Element {
    let (class, mark) = if row.is_correct {
        ("result-row result-row--correct", "✅")
    } else {
        ("result-row result-row--wrong", "❌")
    };
    rsx! {
        div { class: "{class}",
            div { class: "result-row__head",
                h4 { "Q{row.number}: {row.prompt}" }
                span { class: "result-row__mark", "{mark}" }
            }
            p { class: "result-row__answer",
                strong { "Your answer: " }
                "{row.user_answer_label}"
            }
            p { class: "result-row__answer",
                strong { "Correct answer: " }
                "{row.correct_answer_label}"
            }
        }
    }
}
