use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(message: &'static str) -> Element {
    rsx! {
        div { class: "card spinner-card",
            div { class: "spinner" }
            h2 { "Loading..." }
            p { class: "muted", "{message}" }
        }
    }
}
