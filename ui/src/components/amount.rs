//! Fixed-point amounts rendered at a fixed number of places.

use api::FixedDecimal;
use dioxus::prelude::*;

/// `value` rounded to `places`, followed by `unit` when one is given.
#[component]
pub fn Amount(
    value: FixedDecimal,
    places: usize,
    #[props(optional)] unit: Option<&'static str>,
) -> Element {
    let shown = value.to_fixed(places);
    rsx! {
        match unit {
            Some(unit) => rsx! { "{shown} {unit}" },
            None => rsx! { "{shown}" },
        }
    }
}
