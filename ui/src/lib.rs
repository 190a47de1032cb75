// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
mod components;
mod hooks;
mod screens;

use api::evm::evm_controller;
use api::prefs::theme::Theme;
use api::prefs::user_prefs::UserPrefs;
use api::Deployment;
use api::RefreshSchedule;
use api::StakingController;
use app_state::AppState;
use components::pico::Button;
use components::pico::ButtonType;
use components::pico::Container;
use hooks::use_staking_store::use_staking_store;
use screens::staking::StakingScreen;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

#[allow(non_snake_case)]
pub fn App() -> Element {
    let dashboard_css = r#"
    * { box-sizing: border-box; }

    .app-main-container {
        min-height: 100vh;
        display: flex;
        justify-content: center;
        padding: 1rem;
    }

    .app-main-container > main {
        width: 100%;
        max-width: 34rem;
    }

    .app-main-container header nav h1 {
        margin: 0;
        font-size: 1.6rem;
        color: var(--pico-primary);
    }

    .stat-value {
        font-size: 1.5rem;
        font-weight: bold;
        font-family: var(--pico-font-family-monospace);
        margin-bottom: 0;
    }

    .muted {
        color: var(--pico-muted-color);
        font-size: 0.875rem;
    }

    .action-grid {
        display: grid;
        grid-template-columns: 1fr 1fr;
        gap: 0.75rem;
    }

    .action-grid button { width: 100%; margin-bottom: 0; }

    .links { text-align: center; font-size: 0.875rem; }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: PICO_CSS,
        }
        style {
            "{dashboard_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // built once; a bad rpc url or wallet key is fatal for this run.
    let setup = use_hook(|| {
        let deployment = Deployment::from_env();
        dioxus_logger::tracing::info!(
            "deployment: chain {} via {}",
            deployment.chain_id,
            deployment.rpc_url
        );
        evm_controller(&deployment, RefreshSchedule::default())
            .map(|controller| (AppState::new(deployment), controller))
            .map_err(|e| format!("{e:#}"))
    });

    match setup {
        Ok((app_state, controller)) => rsx! {
            LoadedApp {
                app_state,
                controller,
                user_prefs: UserPrefs::from_env(),
            }
        },
        Err(e) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
    }
}

/// Holds the main app logic once the controller exists.
#[component]
fn LoadedApp(app_state: AppState, controller: StakingController, user_prefs: UserPrefs) -> Element {
    use_context_provider(|| app_state.clone());
    use_context_provider(|| controller.clone());

    let mut theme = use_signal(|| user_prefs.theme());
    let store = use_staking_store(controller);
    use_context_provider(|| store);

    rsx! {
        div {
            class: "app-main-container",
            "data-theme": theme().as_attr(),
            Container {
                header {
                    nav {
                        ul {
                            li {
                                h1 { "Yield Farm Pro" }
                            }
                        }
                        ul {
                            li {
                                Button {
                                    button_type: ButtonType::Contrast,
                                    outline: true,
                                    on_click: move |_| theme.set(theme().toggled()),
                                    if theme() == Theme::Dark { "Light" } else { "Dark" }
                                }
                            }
                        }
                    }
                }
                StakingScreen {}
            }
        }
    }
}
