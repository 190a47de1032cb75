use dioxus::prelude::*;

/// A placeholder panel for when there is nothing to show yet.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] primary_action: Option<Element>,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                padding: 2rem;
                text-align: center;
                color: var(--pico-muted-color);
                border: 2px dashed var(--pico-card-border-color);
                border-radius: var(--pico-border-radius);
                margin: 1rem 0;
            ",
            h4 { style: "margin-bottom: 0.5rem;", "{title}" }
            if let Some(desc) = description {
                p { style: "max-width: 400px;", "{desc}" }
            }
            if let Some(action) = primary_action {
                div { {action} }
            }
        }
    }
}
