use leptos::*;

use crate::economy::EconomyStore;

/// Coin and XP readout fed by the shared economy store.
#[component]
pub fn EconomyBadge() -> impl IntoView {
    let economy = expect_context::<EconomyStore>();

    view! {
        <span class="economy-badge">
            <span class="economy-coins">{move || economy.coins.get()} " coins"</span>
            <span class="economy-xp">{move || economy.experience.get()} " xp"</span>
        </span>
    }
}
