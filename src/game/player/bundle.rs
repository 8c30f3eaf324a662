// Per-form state bundles
//
// A bundle owns one instance of every state a form supports. Ids map to
// slots; an alias is a second id pointing at an existing slot, so both ids
// resolve to the very same instance.

use std::collections::HashMap;

use super::form::FormKind;
use super::state::{PlayerState, StateId, StateRef, StateStore};

pub struct FormStateBundle {
    form: FormKind,
    slots: Vec<Box<dyn PlayerState>>,
    index: HashMap<StateId, usize>,
    default_id: StateId,
}

impl FormStateBundle {
    pub fn new(form: FormKind) -> Self {
        Self {
            form,
            slots: Vec::new(),
            index: HashMap::new(),
            default_id: StateId::Idle,
        }
    }

    /// Add a state under its own id. A later insert with the same id replaces
    /// the earlier mapping.
    pub fn insert(&mut self, state: Box<dyn PlayerState>) -> &mut Self {
        let id = state.id();
        self.slots.push(state);
        self.index.insert(id, self.slots.len() - 1);
        self
    }

    pub fn with(mut self, state: Box<dyn PlayerState>) -> Self {
        self.insert(state);
        self
    }

    /// Make `alias` resolve to the same instance as `target`. Ignored when
    /// `target` is not in the bundle.
    pub fn with_alias(mut self, alias: StateId, target: StateId) -> Self {
        if let Some(slot) = self.index.get(&target).copied() {
            self.index.insert(alias, slot);
        }
        self
    }

    pub fn with_default(mut self, default_id: StateId) -> Self {
        self.default_id = default_id;
        self
    }

    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn default_id(&self) -> StateId {
        self.default_id
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: StateId) -> Option<StateRef> {
        self.index
            .get(&id)
            .map(|slot| StateRef::new(self.form, *slot))
    }

    /// The state for `id`, or the bundle's default when `id` is missing
    pub fn get_or_default(&self, id: StateId) -> Option<StateRef> {
        self.get(id).or_else(|| self.get(self.default_id))
    }

    /// Every bound id, sorted
    pub fn ids(&self) -> Vec<StateId> {
        let mut ids: Vec<_> = self.index.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Number of distinct instances
    pub fn instance_count(&self) -> usize {
        self.slots.len()
    }

    /// Snapshot of the id bindings for the controller
    pub fn bindings(&self) -> StateBindings {
        StateBindings {
            refs: self
                .index
                .iter()
                .map(|(id, slot)| (*id, StateRef::new(self.form, *slot)))
                .collect(),
            default: self.get(self.default_id),
        }
    }

    fn state_mut(&mut self, slot: usize) -> Option<&mut dyn PlayerState> {
        let state: &mut dyn PlayerState = &mut **self.slots.get_mut(slot)?;
        Some(state)
    }
}

/// Typed references bound from the active bundle
#[derive(Debug, Clone, Default)]
pub struct StateBindings {
    refs: HashMap<StateId, StateRef>,
    default: Option<StateRef>,
}

impl StateBindings {
    pub fn get(&self, id: StateId) -> Option<StateRef> {
        self.refs.get(&id).copied()
    }

    pub fn get_or_default(&self, id: StateId) -> Option<StateRef> {
        self.get(id).or(self.default)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.refs.contains_key(&id)
    }
}

/// Every bundle built so far in this session, keyed by form
#[derive(Default)]
pub struct FormBundles {
    bundles: HashMap<FormKind, FormStateBundle>,
}

impl FormBundles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, form: FormKind) -> bool {
        self.bundles.contains_key(&form)
    }

    pub fn get(&self, form: FormKind) -> Option<&FormStateBundle> {
        self.bundles.get(&form)
    }

    /// Fetch the bundle for `form`, building it on first use
    pub fn get_or_build(
        &mut self,
        form: FormKind,
        build: impl FnOnce() -> FormStateBundle,
    ) -> &FormStateBundle {
        self.bundles.entry(form).or_insert_with(build)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl StateStore for FormBundles {
    fn state_mut(&mut self, state: StateRef) -> Option<&mut dyn PlayerState> {
        self.bundles.get_mut(&state.form)?.state_mut(state.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::states::{FlightState, IdleState, RunState};

    fn bundle() -> FormStateBundle {
        FormStateBundle::new(FormKind::Cry)
            .with(Box::new(IdleState))
            .with(Box::new(RunState))
            .with(Box::new(FlightState))
            .with_alias(StateId::Jump, StateId::Flight)
    }

    #[test]
    fn test_alias_shares_instance() {
        let bundle = bundle();
        assert_eq!(bundle.get(StateId::Jump), bundle.get(StateId::Flight));
        assert_eq!(bundle.instance_count(), 3);
    }

    #[test]
    fn test_missing_id_falls_back_to_default() {
        let bundle = bundle();
        assert_eq!(bundle.get(StateId::Swing), None);
        assert_eq!(bundle.get_or_default(StateId::Swing), bundle.get(StateId::Idle));
    }

    #[test]
    fn test_alias_to_missing_target_is_ignored() {
        let bundle = bundle().with_alias(StateId::Fall, StateId::SuperJump);
        assert!(!bundle.contains(StateId::Fall));
    }

    #[test]
    fn test_bindings_match_bundle() {
        let bundle = bundle();
        let bindings = bundle.bindings();
        for id in bundle.ids() {
            assert_eq!(bindings.get(id), bundle.get(id));
        }
        assert_eq!(bindings.get_or_default(StateId::Dead), bundle.get(StateId::Idle));
    }

    #[test]
    fn test_bundles_build_once() {
        let mut bundles = FormBundles::new();
        let mut builds = 0;
        for _ in 0..3 {
            bundles.get_or_build(FormKind::Cry, || {
                builds += 1;
                bundle()
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(bundles.len(), 1);
    }

    #[test]
    fn test_store_resolves_by_form_and_slot() {
        let mut bundles = FormBundles::new();
        let flight = bundles.get_or_build(FormKind::Cry, bundle).get(StateId::Jump);

        let state = flight.and_then(|r| bundles.state_mut(r)).map(|s| s.id());
        assert_eq!(state, Some(StateId::Flight));

        let elsewhere = StateRef::new(FormKind::Fish, 0);
        assert!(bundles.state_mut(elsewhere).is_none());
    }
}
