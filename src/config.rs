//! Widget configuration, built in code or decoded from the arguments a
//! host page passes to the component.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_LABEL, DEFAULT_MAIN_CONTAINER_WIDTH, DEFAULT_SIDEBAR_CONTAINER_WIDTH, WIDTH_STRETCH,
};
use crate::format::FormatError;
use crate::{DateRange, DateValue, FormatSpec, ParseError, RangeError, prelude::*};

/// Width of the rendered control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "WidthRepr", into = "WidthRepr")]
pub enum Width {
    /// Always the container width
    #[default]
    #[display(fmt = "stretch")]
    Fill,
    /// Fixed pixel width, clamped to the container
    #[display(fmt = "{}px", _0)]
    Fixed(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WidthRepr {
    Keyword(String),
    Pixels(u32),
}

impl Width {
    /// Width actually used inside a container `container` pixels wide
    pub fn resolve(self, container: u32) -> u32 {
        match self {
            Self::Fill => container,
            Self::Fixed(px) => px.min(container),
        }
    }
}

impl TryFrom<WidthRepr> for Width {
    type Error = ConfigError;

    fn try_from(repr: WidthRepr) -> Result<Self, Self::Error> {
        match repr {
            WidthRepr::Keyword(word) if word == WIDTH_STRETCH => Ok(Self::Fill),
            WidthRepr::Keyword(word) => Err(ConfigError::InvalidWidth(word)),
            WidthRepr::Pixels(0) => Err(ConfigError::InvalidWidth("0".to_owned())),
            WidthRepr::Pixels(px) => Ok(Self::Fixed(px)),
        }
    }
}

impl From<Width> for WidthRepr {
    fn from(width: Width) -> Self {
        match width {
            Width::Fill => Self::Keyword(WIDTH_STRETCH.to_owned()),
            Width::Fixed(px) => Self::Pixels(px),
        }
    }
}

/// Where the control is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    #[default]
    Inline,
    Sidebar,
}

impl Placement {
    pub const fn from_sidebar_mode(sidebar_mode: bool) -> Self {
        if sidebar_mode { Self::Sidebar } else { Self::Inline }
    }

    pub const fn is_sidebar(self) -> bool {
        matches!(self, Self::Sidebar)
    }

    /// Container width assumed when the host did not measure one
    pub const fn default_container_width(self) -> u32 {
        match self {
            Self::Inline => DEFAULT_MAIN_CONTAINER_WIDTH,
            Self::Sidebar => DEFAULT_SIDEBAR_CONTAINER_WIDTH,
        }
    }
}

/// Configuration errors, raised when a widget is constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Date(#[from] ParseError),

    #[error("Invalid width {0:?} (expected \"stretch\" or a positive pixel count)")]
    InvalidWidth(String),

    #[error("Invalid widget arguments: {0}")]
    InvalidArgs(String),
}

/// Everything a date input needs to know besides its persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub label: String,
    pub initial: Option<DateValue>,
    pub range: DateRange,
    pub format: FormatSpec,
    pub disabled: bool,
    pub placement: Placement,
    pub width: Width,
    /// Opaque identity the session uses to find persisted state
    pub key: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_owned(),
            initial: None,
            range: DateRange::UNBOUNDED,
            format: FormatSpec::default(),
            disabled: false,
            placement: Placement::Inline,
            width: Width::Fill,
            key: None,
        }
    }
}

impl WidgetConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: DateValue) -> Self {
        self.initial = Some(value);
        self
    }

    /// # Errors
    /// Returns `ConfigError::Range` if min > max.
    pub fn with_bounds(
        mut self,
        min: Option<DateValue>,
        max: Option<DateValue>,
    ) -> Result<Self, ConfigError> {
        self.range = DateRange::new(min, max)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatSpec) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn in_sidebar(mut self) -> Self {
        self.placement = Placement::Sidebar;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Identity under which a session stores this widget's state.
    /// Keyless widgets fall back to their label.
    pub fn identity(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.label)
    }

    /// Re-checks invariants a caller could have broken by assigning
    /// public fields directly.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidWidth` for a zero fixed width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == Width::Fixed(0) {
            return Err(ConfigError::InvalidWidth("0".to_owned()));
        }
        Ok(())
    }

    /// Decodes the JSON arguments object a host page sends.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidArgs` for malformed JSON and the specific
    /// error for a bad range, format, date or width.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let args: HostArgs =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidArgs(e.to_string()))?;
        Self::try_from(args)
    }
}

/// Arguments as the host page sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostArgs {
    pub label: Option<String>,
    pub value: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub format: Option<String>,
    pub disabled: bool,
    pub width: Option<serde_json::Value>,
    pub sidebar_mode: bool,
    pub key: Option<String>,
}

impl HostArgs {
    /// An empty string counts as no date, as it does for the host page.
    fn date(value: Option<&str>) -> Result<Option<DateValue>, ParseError> {
        value
            .filter(|text| !text.trim().is_empty())
            .map(str::parse)
            .transpose()
    }
}

impl TryFrom<HostArgs> for WidgetConfig {
    type Error = ConfigError;

    fn try_from(args: HostArgs) -> Result<Self, Self::Error> {
        let width = match args.width {
            None | Some(serde_json::Value::Null) => Width::Fill,
            Some(value) => {
                let shown = value.to_string();
                let repr: WidthRepr =
                    serde_json::from_value(value).map_err(|_| ConfigError::InvalidWidth(shown))?;
                Width::try_from(repr)?
            }
        };
        let format = match args.format.as_deref() {
            Some(spec) => spec.parse()?,
            None => FormatSpec::default(),
        };

        Ok(Self {
            label: args.label.unwrap_or_else(|| DEFAULT_LABEL.to_owned()),
            initial: HostArgs::date(args.value.as_deref())?,
            range: DateRange::new(
                HostArgs::date(args.min_value.as_deref())?,
                HostArgs::date(args.max_value.as_deref())?,
            )?,
            format,
            disabled: args.disabled,
            placement: Placement::from_sidebar_mode(args.sidebar_mode),
            width,
            key: args.key,
        })
    }
}
