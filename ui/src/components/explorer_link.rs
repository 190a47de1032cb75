use dioxus::prelude::*;

/// Opens a block explorer page outside the app.
#[component]
pub fn ExplorerLink(href: String, children: Element) -> Element {
    rsx! {
        a {
            href: "{href}",
            target: "_blank",
            rel: "noopener noreferrer",
            {children}
        }
    }
}
