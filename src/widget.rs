//! The date input's state and the operations that move it.
//!
//! Every operation takes the current [`WidgetState`] and the caller's
//! [`WidgetConfig`] and returns a new state; nothing is kept behind the
//! caller's back. A host re-issues the config on every render, so a
//! range derived from another widget's value is just a new config.

use serde::{Deserialize, Serialize};

use crate::calendar::ViewMonth;
use crate::{ConfigError, DateValue, ParseError, WidgetConfig, prelude::*};

/// Persisted per-instance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WidgetState {
    selection: Option<DateValue>,
    /// Month shown by the calendar; follows the selection until navigated
    #[serde(default)]
    view: Option<ViewMonth>,
    #[serde(default)]
    open: bool,
}

/// User action against a rendered control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// Focus the text field, showing the calendar
    Open,
    /// Click outside the control
    Close,
    PrevMonth,
    NextMonth,
    /// Month/year dropdowns
    ShowMonth(ViewMonth),
    ClickDay(DateValue),
    /// Typed text in the configured format
    EnterText(String),
    Clear,
}

/// What an operation did
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Outcome {
    #[display(fmt = "accepted")]
    Accepted,
    #[display(fmt = "outside the allowed range")]
    OutOfRange,
    #[display(fmt = "unreadable input: {}", _0)]
    Unparsable(ParseError),
    #[display(fmt = "cleared")]
    Cleared,
    #[display(fmt = "view changed")]
    ViewChanged,
    #[display(fmt = "ignored")]
    Ignored,
    #[display(fmt = "disabled")]
    Disabled,
}

impl Outcome {
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl WidgetState {
    /// State a control starts with on its first render.
    ///
    /// An initial value outside the configured range is clamped to the
    /// nearest bound and logged.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration itself is invalid.
    pub fn initialize(config: &WidgetConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let selection = config.initial.map(|initial| {
            let clamped = config.range.clamp(initial);
            if clamped != initial {
                warn!(
                    "{:?}: initial value {initial} is outside {}, using {clamped}",
                    config.identity(),
                    config.range
                );
            }
            clamped
        });

        Ok(Self {
            selection,
            view: selection.as_ref().map(ViewMonth::of),
            open: false,
        })
    }

    pub const fn current_value(&self) -> Option<DateValue> {
        self.selection
    }

    pub const fn view(&self) -> Option<ViewMonth> {
        self.view
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Selects `candidate` if the range allows it; otherwise leaves the
    /// state untouched.
    pub fn select_day(self, config: &WidgetConfig, candidate: DateValue) -> (Self, Outcome) {
        if config.disabled {
            return (self, Outcome::Disabled);
        }
        if !config.range.contains(&candidate) {
            debug!(
                "{:?}: rejected {candidate} outside {}",
                config.identity(),
                config.range
            );
            return (self, Outcome::OutOfRange);
        }

        debug!("{:?}: selected {candidate}", config.identity());
        let state = Self {
            selection: Some(candidate),
            view: Some(ViewMonth::of(&candidate)),
            open: false,
        };
        (state, Outcome::Accepted)
    }

    /// Drops the selection. Always allowed.
    #[must_use]
    pub const fn clear(self) -> Self {
        Self {
            selection: None,
            ..self
        }
    }

    /// Parses `text` in the configured format and selects it.
    pub fn enter_text(self, config: &WidgetConfig, text: &str) -> (Self, Outcome) {
        if config.disabled {
            return (self, Outcome::Disabled);
        }
        match config.format.parse(text) {
            Ok(candidate) => self.select_day(config, candidate),
            Err(err) => (self, Outcome::Unparsable(err)),
        }
    }

    /// Shows `target` unless that moves the calendar further away from
    /// the range.
    pub fn show_month(self, config: &WidgetConfig, target: ViewMonth) -> (Self, Outcome) {
        self.move_view(config, self.view, target)
    }

    fn move_view(
        self,
        config: &WidgetConfig,
        from: Option<ViewMonth>,
        target: ViewMonth,
    ) -> (Self, Outcome) {
        if config.disabled {
            return (self, Outcome::Disabled);
        }
        if !can_navigate(config, from, target) {
            return (self, Outcome::Ignored);
        }
        let state = Self {
            view: Some(target),
            ..self
        };
        (state, Outcome::ViewChanged)
    }

    /// Runs one user interaction. A disabled control rejects all of them.
    pub fn apply(
        self,
        config: &WidgetConfig,
        fallback_view: ViewMonth,
        interaction: Interaction,
    ) -> (Self, Outcome) {
        if config.disabled {
            warn!(
                "{:?}: ignoring {interaction:?} on a disabled control",
                config.identity()
            );
            return (self, Outcome::Disabled);
        }

        let view = self.view.unwrap_or(fallback_view);
        match interaction {
            Interaction::Open => (Self { open: true, ..self }, Outcome::ViewChanged),
            Interaction::Close => (Self { open: false, ..self }, Outcome::ViewChanged),
            Interaction::PrevMonth => match view.prev() {
                Some(target) => self.move_view(config, Some(view), target),
                None => (self, Outcome::Ignored),
            },
            Interaction::NextMonth => match view.next() {
                Some(target) => self.move_view(config, Some(view), target),
                None => (self, Outcome::Ignored),
            },
            Interaction::ShowMonth(target) => self.move_view(config, Some(view), target),
            Interaction::ClickDay(candidate) => self.select_day(config, candidate),
            Interaction::EnterText(text) => self.enter_text(config, &text),
            Interaction::Clear => (self.clear(), Outcome::Cleared),
        }
    }
}

/// Whether the calendar may move from `from` to `target`.
///
/// Moving forward is only blocked by the maximum and moving back only by
/// the minimum, so a view left outside a narrowed range can still walk
/// towards it. Without a known starting month both bounds apply.
pub fn can_navigate(config: &WidgetConfig, from: Option<ViewMonth>, target: ViewMonth) -> bool {
    let after_max = config.range.max().is_some_and(|max| target.first_day() > max);
    let before_min = config.range.min().is_some_and(|min| target.last_day() < min);
    match from {
        Some(from) if target > from => !after_max,
        Some(from) if target < from => !before_min,
        _ => !after_max && !before_min,
    }
}
