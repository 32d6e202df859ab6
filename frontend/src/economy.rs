use leptos::*;
use shared::{EconomyError, EconomyRecord, EconomySnapshot};

/// Shared game-economy store, provided as context by the app shell. The
/// navbar is one of several observers/mutators; anything that awards or
/// spends coins goes through here.
#[derive(Clone, Copy)]
pub struct EconomyStore {
    pub coins: RwSignal<i64>,
    pub experience: RwSignal<i64>,
    /// True once the remote record has been adopted for the current session.
    /// Saves are gated on this so defaults never overwrite a record that has
    /// not loaded yet.
    pub loaded: RwSignal<bool>,
}

/// The save gate: a remote write may only be issued once the initial load
/// has completed for a signed-in session.
pub fn should_persist(session_present: bool, loaded: bool) -> bool {
    session_present && loaded
}

impl EconomyStore {
    pub fn new() -> Self {
        let defaults = EconomySnapshot::default();

        Self {
            coins: create_rw_signal(defaults.coins),
            experience: create_rw_signal(defaults.experience),
            loaded: create_rw_signal(false),
        }
    }

    pub fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot {
            coins: self.coins.get(),
            experience: self.experience.get(),
        }
    }

    fn snapshot_untracked(&self) -> EconomySnapshot {
        EconomySnapshot {
            coins: self.coins.get_untracked(),
            experience: self.experience.get_untracked(),
        }
    }

    /// Adopts the remote record (an absent record means defaults) and
    /// unlocks persistence. Batched so observers see one transition.
    pub fn hydrate(&self, record: Option<EconomyRecord>) {
        let snapshot = record
            .map(|record| EconomySnapshot::from_record(&record))
            .unwrap_or_default();
        let store = *self;

        batch(move || {
            store.coins.set(snapshot.coins);
            store.experience.set(snapshot.experience);
            store.loaded.set(true);
        });
    }

    /// Back to defaults with persistence locked again. Every sign-out path
    /// ends here.
    pub fn reset(&self) {
        let defaults = EconomySnapshot::default();
        let store = *self;

        batch(move || {
            store.coins.set(defaults.coins);
            store.experience.set(defaults.experience);
            store.loaded.set(false);
        });
    }

    pub fn credit(&self, amount: i64) {
        self.apply(self.snapshot_untracked().credit(amount));
    }

    pub fn try_debit(&self, amount: i64) -> Result<(), EconomyError> {
        let next = self.snapshot_untracked().debit(amount)?;
        self.apply(next);
        Ok(())
    }

    pub fn gain_experience(&self, amount: i64) {
        self.apply(self.snapshot_untracked().gain_experience(amount));
    }

    fn apply(&self, next: EconomySnapshot) {
        // No-op mutations must not wake observers, or a duplicate save
        // would go out for an unchanged value.
        if next == self.snapshot_untracked() {
            return;
        }
        let store = *self;

        batch(move || {
            store.coins.set(next.coins);
            store.experience.set(next.experience);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_gate() {
        assert!(should_persist(true, true));
        assert!(!should_persist(true, false));
        assert!(!should_persist(false, true));
        assert!(!should_persist(false, false));
    }

    #[wasm_bindgen_test]
    fn test_new_store_holds_defaults_and_is_locked() {
        let runtime = create_runtime();

        let store = EconomyStore::new();
        assert_eq!(store.coins.get_untracked(), 1000);
        assert_eq!(store.experience.get_untracked(), 0);
        assert!(!store.loaded.get_untracked());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_hydrate_adopts_record_and_unlocks() {
        let runtime = create_runtime();

        let store = EconomyStore::new();
        store.hydrate(Some(EconomyRecord {
            coins: Some(500),
            experience: Some(20),
            updated_at: None,
        }));
        assert_eq!(store.coins.get_untracked(), 500);
        assert_eq!(store.experience.get_untracked(), 20);
        assert!(store.loaded.get_untracked());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_hydrate_without_record_keeps_defaults_but_unlocks() {
        let runtime = create_runtime();

        let store = EconomyStore::new();
        store.hydrate(None);
        assert_eq!(store.coins.get_untracked(), 1000);
        assert_eq!(store.experience.get_untracked(), 0);
        assert!(store.loaded.get_untracked());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_reset_restores_defaults_and_locks() {
        let runtime = create_runtime();

        let store = EconomyStore::new();
        store.hydrate(Some(EconomyRecord {
            coins: Some(500),
            experience: Some(20),
            updated_at: None,
        }));
        store.reset();
        assert_eq!(store.coins.get_untracked(), 1000);
        assert_eq!(store.experience.get_untracked(), 0);
        assert!(!store.loaded.get_untracked());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_mutators_clamp_and_refuse_overdraft() {
        let runtime = create_runtime();

        let store = EconomyStore::new();
        store.credit(10);
        assert_eq!(store.coins.get_untracked(), 1010);

        assert!(store.try_debit(2000).is_err());
        assert_eq!(store.coins.get_untracked(), 1010);

        store.try_debit(1010).unwrap();
        assert_eq!(store.coins.get_untracked(), 0);

        store.gain_experience(5);
        assert_eq!(store.experience.get_untracked(), 5);

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_noop_mutation_does_not_wake_observers() {
        let runtime = create_runtime();

        let store = EconomyStore::new();
        let wakes = create_rw_signal(0);
        create_isomorphic_effect(move |_| {
            store.coins.track();
            store.experience.track();
            wakes.update(|n| *n += 1);
        });
        let before = wakes.get_untracked();

        store.credit(0);
        store.gain_experience(0);
        assert_eq!(wakes.get_untracked(), before);

        store.credit(1);
        assert!(wakes.get_untracked() > before);

        runtime.dispose();
    }
}
