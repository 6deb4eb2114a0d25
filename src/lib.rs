mod calendar;
mod config;
mod consts;
mod date;
mod format;
mod prelude;
mod range;
mod render;
mod session;
mod types;
mod widget;

pub use calendar::{ViewMonth, Week, month_weeks};
pub use config::{ConfigError, HostArgs, Placement, WidgetConfig, Width};
pub use consts::*;
pub use date::{DateValue, ParseError};
pub use format::{FieldOrder, FormatError, FormatSpec};
pub use range::{DateRange, RangeError};
pub use render::{
    CalendarGrid, DayCell, LayoutMetrics, PopupPlacement, RenderContext, SizeClass, TextField,
    VisualTree, calendar_scale, render,
};
pub use session::Session;
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};
pub use widget::{Interaction, Outcome, WidgetState, can_navigate};
