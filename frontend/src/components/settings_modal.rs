use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use serde::{Deserialize, Serialize};

const PREFS_KEY: &str = "triplex_prefs";

/// Local, non-account preferences. These never touch the game service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePrefs {
    pub sound: bool,
    pub music: bool,
}

impl Default for GamePrefs {
    fn default() -> Self {
        Self {
            sound: true,
            music: true,
        }
    }
}

impl GamePrefs {
    pub fn load() -> Self {
        LocalStorage::get(PREFS_KEY).unwrap_or_default()
    }

    pub fn store(&self) {
        LocalStorage::set(PREFS_KEY, self).ok();
    }
}

#[component]
pub fn SettingsModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let prefs = create_rw_signal(GamePrefs::load());

    create_effect(move |_| {
        prefs.get().store();
    });

    let close = move |_| on_close.call(());

    view! {
        <div class="modal-backdrop" on:click=close>
            <div class="modal" on:click=|e| e.stop_propagation()>
                <div class="modal-header">
                    <h3 class="modal-title">"Settings"</h3>
                    <button class="modal-close" on:click=close>"×"</button>
                </div>
                <label class="form-group">
                    <input
                        type="checkbox"
                        prop:checked=move || prefs.get().sound
                        on:change=move |_| prefs.update(|p| p.sound = !p.sound)
                    />
                    "Sound effects"
                </label>
                <label class="form-group">
                    <input
                        type="checkbox"
                        prop:checked=move || prefs.get().music
                        on:change=move |_| prefs.update(|p| p.music = !p.music)
                    />
                    "Music"
                </label>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_prefs_default_on() {
        let prefs = GamePrefs::default();
        assert!(prefs.sound);
        assert!(prefs.music);
    }

    #[wasm_bindgen_test]
    fn test_prefs_round_trip_storage() {
        let prefs = GamePrefs {
            sound: false,
            music: true,
        };
        prefs.store();
        assert_eq!(GamePrefs::load(), prefs);
        LocalStorage::delete(PREFS_KEY);
        assert_eq!(GamePrefs::load(), GamePrefs::default());
    }
}
