use leptos::*;
use leptos_router::*;

use crate::api::{ApiClient, AuthState};
use crate::components::navbar::Navbar;
use crate::components::settings_modal::SettingsModal;
use crate::economy::EconomyStore;
use crate::pages::home::Home;

#[component]
pub fn App() -> impl IntoView {
    let auth_state = AuthState::new();
    provide_context(auth_state.clone());
    provide_context(EconomyStore::new());

    let settings_open = create_rw_signal(false);

    // Re-establish a stored session. The resulting player change is what
    // drives the navbar's economy load; nothing else reacts to the token.
    {
        let auth_state = auth_state.clone();
        create_effect(move |_| {
            if auth_state.has_stored_token() && !auth_state.is_signed_in() {
                let auth_state = auth_state.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match ApiClient::current_player().await {
                        Ok(player) => auth_state.player.set(Some(player)),
                        Err(e) => {
                            logging::warn!("stored session rejected: {}", e);
                            auth_state.clear_session();
                        }
                    }
                });
            }
        });
    }

    view! {
        <Router>
            <Navbar on_settings_click=move |_: ()| settings_open.set(true) />
            <main>
                <Routes>
                    <Route path="/" view=Home />
                </Routes>
            </main>
            <Show when=move || settings_open.get() fallback=|| ()>
                <SettingsModal on_close=move |_: ()| settings_open.set(false) />
            </Show>
        </Router>
    }
}
