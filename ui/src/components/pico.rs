//! Small Dioxus wrappers around Pico.css markup.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;
use dioxus_clipboard::prelude::use_clipboard;

//=============================================================================
// Layout Components
//=============================================================================

/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// Pico's responsive grid; children become equal-width columns.
#[component]
pub fn Grid(children: Element) -> Element {
    rsx! { div { class: "grid", {children} } }
}

/// Groups related content in an `<article>`, with an optional heading.
#[component]
pub fn Card(#[props(optional)] title: Option<String>, children: Element) -> Element {
    rsx! {
        article {
            if let Some(title) = title {
                header { strong { "{title}" } }
            }
            {children}
        }
    }
}

//=============================================================================
// Interactive Components
//=============================================================================

#[derive(PartialEq, Clone, Copy, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

impl ButtonType {
    fn to_class(self, outline: bool) -> &'static str {
        match (self, outline) {
            (Self::Primary, false) => "",
            (Self::Primary, true) => "outline",
            (Self::Secondary, false) => "secondary",
            (Self::Secondary, true) => "secondary outline",
            (Self::Contrast, false) => "contrast",
            (Self::Contrast, true) => "contrast outline",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
    /// Shows Pico's spinner next to the caption.
    #[props(default = false)]
    busy: bool,
}

pub fn Button(props: ButtonProps) -> Element {
    rsx! {
        button {
            class: props.button_type.to_class(props.outline),
            disabled: props.disabled,
            "aria-busy": props.busy.then_some("true"),
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}

/// Copies `text_to_copy` to the system clipboard.
#[component]
pub fn CopyButton(text_to_copy: String) -> Element {
    let mut clipboard = use_clipboard();
    let mut copied = use_signal(|| false);

    rsx! {
        Button {
            button_type: ButtonType::Secondary,
            outline: true,
            on_click: move |_| {
                if clipboard.set(text_to_copy.clone()).is_ok() {
                    copied.set(true);
                } else {
                    dioxus_logger::tracing::warn!("clipboard write failed");
                }
            },
            if copied() { "Copied!" } else { "Copy" }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ModalProps {
    title: String,
    /// Called on the close link, the OK button and Escape.
    on_close: EventHandler<()>,
    children: Element,
}

/// An always-open dialog; the parent decides whether to render it.
pub fn Modal(props: ModalProps) -> Element {
    rsx! {
        dialog {
            open: true,
            autofocus: true,
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    props.on_close.call(());
                }
            },
            article {
                header {
                    a {
                        href: "#",
                        "aria-label": "Close",
                        rel: "prev",
                        onclick: move |evt| {
                            evt.prevent_default();
                            props.on_close.call(());
                        },
                    }
                    h3 { style: "margin-bottom: 0;", "{props.title}" }
                }
                {props.children}
                footer {
                    Button {
                        on_click: move |_| props.on_close.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}
