use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::CopyButton;
use api::Session;
use dioxus::prelude::*;

/// The connected account, abbreviated, with copy and disconnect controls.
#[component]
pub fn AccountBadge(
    session: Session,
    on_disconnect: EventHandler<()>,
    #[props(default)] disconnect_disabled: bool,
) -> Element {
    let full = session.account.to_string();

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; gap: 0.5rem; flex-wrap: wrap;",
            code {
                title: "{full}",
                "{session.abbreviated_account()}"
            }
            div {
                style: "display: flex; gap: 0.5rem;",
                CopyButton { text_to_copy: full.clone() }
                Button {
                    button_type: ButtonType::Contrast,
                    disabled: disconnect_disabled,
                    on_click: move |_| on_disconnect.call(()),
                    "Disconnect"
                }
            }
        }
    }
}
