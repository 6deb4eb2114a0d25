//! Key-addressed widget state for one page session.
//!
//! A host page re-runs top to bottom on every interaction and calls
//! [`Session::date_input`] once per control per run. State is created on
//! the first call for a key and read back on every later one.

use std::collections::BTreeMap;

use crate::render::{RenderContext, VisualTree, render};
use crate::widget::{Interaction, Outcome, WidgetState};
use crate::{ConfigError, DateValue, WidgetConfig, prelude::*};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    states: BTreeMap<String, WidgetState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_for(&mut self, config: &WidgetConfig) -> Result<WidgetState, ConfigError> {
        // Configs are re-issued every run, so they are re-validated every run.
        config.validate()?;
        if let Some(state) = self.states.get(config.identity()) {
            return Ok(*state);
        }

        let state = WidgetState::initialize(config)?;
        debug!(
            "{:?}: new state, value {:?}",
            config.identity(),
            state.current_value()
        );
        self.states.insert(config.identity().to_owned(), state);
        Ok(state)
    }

    /// Returns the control's current value, creating its state on first use.
    ///
    /// # Errors
    /// Returns `ConfigError` for an invalid configuration.
    pub fn date_input(&mut self, config: &WidgetConfig) -> Result<Option<DateValue>, ConfigError> {
        Ok(self.state_for(config)?.current_value())
    }

    /// # Errors
    /// Returns `ConfigError` for an invalid configuration.
    pub fn render(
        &mut self,
        config: &WidgetConfig,
        ctx: &RenderContext,
    ) -> Result<VisualTree, ConfigError> {
        let state = self.state_for(config)?;
        Ok(render(&state, config, ctx))
    }

    /// Runs one user interaction and stores the resulting state.
    ///
    /// # Errors
    /// Returns `ConfigError` for an invalid configuration.
    pub fn interact(
        &mut self,
        config: &WidgetConfig,
        ctx: &RenderContext,
        interaction: Interaction,
    ) -> Result<Outcome, ConfigError> {
        let state = self.state_for(config)?;
        let (next, outcome) = state.apply(config, ctx.fallback_view(config), interaction);
        self.states.insert(config.identity().to_owned(), next);
        Ok(outcome)
    }

    pub fn state(&self, key: &str) -> Option<&WidgetState> {
        self.states.get(key)
    }

    /// Stored value under `key`; `None` both for "no selection" and unknown keys.
    pub fn value(&self, key: &str) -> Option<DateValue> {
        self.states.get(key).and_then(WidgetState::current_value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.states.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<WidgetState> {
        self.states.remove(key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Every stored value as a JSON object of ISO strings (or null).
    pub fn values_json(&self) -> serde_json::Value {
        self.states
            .iter()
            .map(|(key, state)| (key.clone(), serde_json::json!(state.current_value())))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}
