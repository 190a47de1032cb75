//=============================================================================
// File: src/screens/staking.rs
//=============================================================================
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::address::AccountBadge;
use crate::components::amount::Amount;
use crate::components::empty_state::EmptyState;
use crate::components::explorer_link::ExplorerLink;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Modal;
use api::policy::ActionAvailability;
use api::ActionKind;
use api::Session;
use api::StakingController;
use dioxus::prelude::*;
use dioxus_logger::tracing::warn;

/// The whole dashboard: a connect prompt, or the pool for the connected account.
#[component]
pub fn StakingScreen() -> Element {
    let state = use_context::<AppStateMut>();

    rsx! {
        match (state.session)() {
            None => rsx! { ConnectPrompt {} },
            Some(session) => rsx! { Dashboard { session } },
        }
    }
}

#[component]
fn ConnectPrompt() -> Element {
    let controller = use_context::<StakingController>();
    let mut connecting = use_signal(|| false);
    let mut error = use_signal::<Option<String>>(|| None);

    rsx! {
        EmptyState {
            title: "No wallet connected".to_string(),
            description: Some("Connect to see your balances and stake LP tokens.".to_string()),
            primary_action: rsx! {
                Button {
                    disabled: connecting(),
                    busy: connecting(),
                    on_click: move |_| {
                        let controller = controller.clone();
                        spawn(async move {
                            connecting.set(true);
                            match controller.connect().await {
                                Ok(_) => error.set(None),
                                Err(e) => {
                                    warn!("connect failed: {:#}", e);
                                    error.set(Some(format!("{e:#}")));
                                }
                            }
                            connecting.set(false);
                        });
                    },
                    "Connect Wallet"
                }
            },
        }
        if let Some(e) = error() {
            p {
                style: "color: var(--pico-del-color);",
                "Could not connect: {e}"
            }
        }
    }
}

#[component]
fn Dashboard(session: Session) -> Element {
    let app_state = use_context::<AppState>();
    let state = use_context::<AppStateMut>();
    let controller = use_context::<StakingController>();

    let mut amount_input = use_signal(String::new);
    let mut notice = use_signal::<Option<String>>(|| None);
    let mut refreshing = use_signal(|| false);

    let snapshot = (state.snapshot)();
    let pending = (state.pending)();
    let busy = pending.is_submitting();
    let buttons = ActionAvailability::evaluate(&snapshot, &amount_input.read(), busy);

    let in_flight = |kind: ActionKind| busy && pending.kind() == Some(kind);
    let caption = |kind: ActionKind| {
        if in_flight(kind) {
            kind.progress_label()
        } else {
            kind.label()
        }
    };
    let approve_label = if in_flight(ActionKind::Approve) {
        ActionKind::Approve.progress_label()
    } else {
        buttons.approve_label
    };
    let stake_label = caption(ActionKind::Stake);
    let unstake_label = caption(ActionKind::Unstake);
    let claim_label = caption(ActionKind::Claim);

    let submit = use_callback({
        let controller = controller.clone();
        move |kind: ActionKind| {
            let controller = controller.clone();
            let input = amount_input.peek().clone();
            spawn(async move {
                if let Err(e) = controller.submit_action(kind, &input).await {
                    // remote failures are reported through the pending action.
                    if e.is_local() {
                        notice.set(Some(e.to_string()));
                    }
                }
            });
        }
    });

    let disconnect = {
        let controller = controller.clone();
        move |_: ()| {
            let controller = controller.clone();
            spawn(async move {
                if let Err(e) = controller.disconnect().await {
                    warn!("disconnect failed: {:#}", e);
                }
            });
        }
    };

    let refresh = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            spawn(async move {
                refreshing.set(true);
                controller.refresh_snapshot().await;
                refreshing.set(false);
            });
        }
    };

    let countdown = (state.countdown)();
    let countdown_text = countdown_caption(countdown, controller.store().countdown_start());
    let apr = snapshot.annual_yield_percent.to_fixed(2);
    let deployment = &app_state.deployment;
    let acknowledged = controller.clone();

    rsx! {
        if let Some(message) = pending.outcome_message() {
            Modal {
                title: "Transaction".to_string(),
                on_close: move |_| acknowledged.acknowledge(),
                p { "{message}" }
            }
        }
        if let Some(message) = notice() {
            Modal {
                title: "Check the amount".to_string(),
                on_close: move |_| notice.set(None),
                p { "{message}" }
            }
        }

        Card {
            AccountBadge { session, on_disconnect: disconnect, disconnect_disabled: busy }
        }

        Grid {
            Card {
                title: "TVL".to_string(),
                p { class: "stat-value", Amount { value: snapshot.total_pool_stake, places: 2, unit: "LP" } }
            }
            Card {
                title: "APR".to_string(),
                p { class: "stat-value", "{apr}%" }
            }
        }

        Card {
            title: rewards_title(countdown),
            p {
                class: "stat-value",
                Amount { value: snapshot.pending_reward, places: 6, unit: "REWARD" }
            }
            p { class: "muted", "{countdown_text}" }
            Button {
                disabled: !buttons.claim_enabled,
                busy: in_flight(ActionKind::Claim),
                on_click: move |_| submit.call(ActionKind::Claim),
                "{claim_label}"
            }
        }

        Grid {
            div {
                p { class: "muted", "LP Balance" }
                strong { Amount { value: snapshot.wallet_token_balance, places: 2 } }
            }
            div {
                p { class: "muted", "Staked" }
                strong { Amount { value: snapshot.staked_amount, places: 2 } }
            }
            div {
                p { class: "muted", "Wallet ETH" }
                strong { Amount { value: snapshot.wallet_native_balance, places: 4, unit: "ETH" } }
            }
        }

        input {
            r#type: "number",
            min: "0",
            step: "any",
            placeholder: "Amount (e.g. 100)",
            value: "{amount_input}",
            oninput: move |event| amount_input.set(event.value()),
        }

        div {
            class: "action-grid",
            Button {
                disabled: !buttons.approve_enabled,
                busy: in_flight(ActionKind::Approve),
                on_click: move |_| submit.call(ActionKind::Approve),
                "{approve_label}"
            }
            Button {
                disabled: !buttons.stake_enabled,
                busy: in_flight(ActionKind::Stake),
                on_click: move |_| submit.call(ActionKind::Stake),
                "{stake_label}"
            }
            Button {
                button_type: ButtonType::Secondary,
                disabled: !buttons.unstake_enabled,
                busy: in_flight(ActionKind::Unstake),
                on_click: move |_| submit.call(ActionKind::Unstake),
                "{unstake_label}"
            }
            Button {
                button_type: ButtonType::Contrast,
                outline: true,
                busy: refreshing(),
                on_click: refresh,
                "Refresh"
            }
        }

        p {
            class: "links",
            if let Some(tx) = (state.last_tx)() {
                ExplorerLink { href: deployment.tx_url(&tx), "View last transaction" }
                br {}
            }
            ExplorerLink { href: deployment.address_url(&deployment.token_contract), "LP token" }
            " · "
            ExplorerLink { href: deployment.address_url(&deployment.staking_contract), "Staking pool" }
        }
    }
}

/// Heading of the rewards card, with the live countdown.
fn rewards_title(remaining: u8) -> String {
    format!("Pending Rewards ({remaining}s)")
}

/// Text under the pending reward.
fn countdown_caption(remaining: u8, start: u8) -> String {
    if remaining >= start {
        "Calculating...".to_string()
    } else {
        format!("Next reward in {remaining}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_caption_at_start_and_below() {
        assert_eq!(countdown_caption(10, 10), "Calculating...");
        assert_eq!(countdown_caption(9, 10), "Next reward in 9s");
        assert_eq!(countdown_caption(1, 10), "Next reward in 1s");
    }

    #[test]
    fn rewards_title_shows_seconds_left() {
        assert_eq!(rewards_title(10), "Pending Rewards (10s)");
        assert_eq!(rewards_title(3), "Pending Rewards (3s)");
    }
}
