// Remappable input bindings

use std::collections::HashMap;

use super::action::{default_bindings, Action, InputSource};

/// Source → action table with a reverse index. One source maps to at most one
/// action; an action may have several sources.
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputSource, Action>,
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputBindings {
    /// No bindings at all
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
        }
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (InputSource, Action)>) -> Self {
        let mut config = Self::empty();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind `source` to `action`, replacing whatever the source did before
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.unbind_source(source);
        self.bindings.insert(source, action);
        self.action_to_sources
            .entry(action)
            .or_default()
            .push(source);
    }

    pub fn unbind_source(&mut self, source: InputSource) {
        let Some(action) = self.bindings.remove(&source) else {
            return;
        };
        if let Some(sources) = self.action_to_sources.get_mut(&action) {
            sources.retain(|s| *s != source);
            if sources.is_empty() {
                self.action_to_sources.remove(&action);
            }
        }
    }

    pub fn unbind_action(&mut self, action: Action) {
        for source in self.action_to_sources.remove(&action).unwrap_or_default() {
            self.bindings.remove(&source);
        }
    }

    pub fn action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    pub fn sources(&self, action: Action) -> &[InputSource] {
        self.action_to_sources
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
