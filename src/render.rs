//! Turns a state and config into a framework-neutral description of the
//! control: text field, calendar grid and layout numbers.

use serde::Serialize;

use crate::calendar::{ViewMonth, month_weeks};
use crate::consts::{
    BASE_CALENDAR_HEIGHT, CALENDAR_BASE_WIDTH, CALENDAR_PADDING, DEFAULT_CALENDAR_SCALE,
    DEFAULT_FRAME_HEIGHT, FRAME_BUFFER, INPUT_HEIGHT, MIN_CALENDAR_SCALE_MAIN,
    MIN_CALENDAR_SCALE_SIDEBAR, PLACEHOLDER_TEXT, VERY_NARROW_SCALE, WEEKDAY_LABELS_JA,
};
use crate::types::Month;
use crate::widget::{WidgetState, can_navigate};
use crate::{DateValue, FormatSpec, Placement, WidgetConfig, prelude::*};

/// Facts about the surroundings a render needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Month shown when nothing is selected or navigated to
    pub today: DateValue,
    /// Measured container width; the placement default when unknown
    pub container_width: Option<u32>,
    /// Width of the frame the control lives in
    pub viewport_width: Option<u32>,
}

impl RenderContext {
    pub const fn new(today: DateValue) -> Self {
        Self {
            today,
            container_width: None,
            viewport_width: None,
        }
    }

    #[must_use]
    pub const fn with_container(mut self, width: u32) -> Self {
        self.container_width = Some(width);
        self
    }

    #[must_use]
    pub const fn with_viewport(mut self, width: u32) -> Self {
        self.viewport_width = Some(width);
        self
    }

    pub const fn container_for(&self, placement: Placement) -> u32 {
        match self.container_width {
            Some(width) => width,
            None => placement.default_container_width(),
        }
    }

    /// Month to show for a state that has not picked one yet: today,
    /// pulled into the allowed range.
    pub fn fallback_view(&self, config: &WidgetConfig) -> ViewMonth {
        ViewMonth::of(&config.range.clamp(self.today))
    }
}

/// Extra styling applied when the calendar had to shrink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum SizeClass {
    #[display(fmt = "")]
    Regular,
    #[display(fmt = "narrow-calendar")]
    Narrow,
    #[display(fmt = "very-narrow-calendar")]
    VeryNarrow,
}

/// Where the popup opens relative to the text field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum PopupPlacement {
    #[display(fmt = "bottom-start")]
    BottomStart,
    #[display(fmt = "top-start")]
    TopStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutMetrics {
    /// Rendered control width in pixels
    pub width: u32,
    pub calendar_scale: f64,
    pub size_class: SizeClass,
    pub popup: PopupPlacement,
    /// Height the host frame must reserve
    pub frame_height: u32,
}

impl LayoutMetrics {
    pub fn compute(config: &WidgetConfig, ctx: &RenderContext, open: bool) -> Self {
        let width = config.width.resolve(ctx.container_for(config.placement));
        let effective = ctx.viewport_width.map_or(width, |viewport| width.min(viewport));
        let calendar_scale = calendar_scale(effective, config.placement);

        let size_class = if calendar_scale < VERY_NARROW_SCALE {
            SizeClass::VeryNarrow
        } else if calendar_scale < DEFAULT_CALENDAR_SCALE {
            SizeClass::Narrow
        } else {
            SizeClass::Regular
        };
        let popup = match size_class {
            SizeClass::Regular => PopupPlacement::BottomStart,
            SizeClass::Narrow | SizeClass::VeryNarrow => PopupPlacement::TopStart,
        };
        let frame_height = if open {
            ceil_px(f64::from(BASE_CALENDAR_HEIGHT) * calendar_scale) + INPUT_HEIGHT + FRAME_BUFFER
        } else {
            DEFAULT_FRAME_HEIGHT
        };

        Self {
            width,
            calendar_scale,
            size_class,
            popup,
            frame_height,
        }
    }
}

/// Shrinks the calendar to fit `width`, but no further than the placement allows.
pub fn calendar_scale(width: u32, placement: Placement) -> f64 {
    if width == 0 {
        return DEFAULT_CALENDAR_SCALE;
    }
    let available = width.saturating_sub(CALENDAR_PADDING);
    if available >= CALENDAR_BASE_WIDTH {
        return DEFAULT_CALENDAR_SCALE;
    }
    let floor = if placement.is_sidebar() {
        MIN_CALENDAR_SCALE_SIDEBAR
    } else {
        MIN_CALENDAR_SCALE_MAIN
    };
    (f64::from(available) / f64::from(CALENDAR_BASE_WIDTH)).max(floor)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn ceil_px(value: f64) -> u32 {
    // Round away float noise first so 330 * 0.9 stays 297.
    ((value * 1e6).round() / 1e6).ceil() as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    /// Formatted selection, or the placeholder
    pub text: String,
    pub is_placeholder: bool,
    pub format: FormatSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: DateValue,
    pub day: u8,
    /// Belongs to the month being shown
    pub in_month: bool,
    pub selected: bool,
    pub selectable: bool,
    pub weekend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub view: ViewMonth,
    /// e.g. `2024年`
    pub year_label: String,
    /// e.g. `1月`
    pub month_label: &'static str,
    pub weekday_header: [&'static str; 7],
    /// Month dropdown entries, `1月`..`12月`
    pub month_options: Vec<&'static str>,
    pub weeks: Vec<Vec<DayCell>>,
    pub can_prev: bool,
    pub can_next: bool,
}

/// Everything a front end needs to draw the control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub label: String,
    pub field: TextField,
    pub calendar: CalendarGrid,
    pub open: bool,
    pub disabled: bool,
    pub sidebar: bool,
    pub layout: LayoutMetrics,
}

impl VisualTree {
    /// Cell for `date`, if it is on the grid
    pub fn cell(&self, date: &DateValue) -> Option<&DayCell> {
        self.calendar
            .weeks
            .iter()
            .flatten()
            .find(|cell| cell.date == *date)
    }
}

/// Describes the control for `state` under `config`.
pub fn render(state: &WidgetState, config: &WidgetConfig, ctx: &RenderContext) -> VisualTree {
    let selection = state.current_value();
    let view = state.view().unwrap_or_else(|| ctx.fallback_view(config));
    let interactive = !config.disabled;

    let field = match selection {
        Some(date) => TextField {
            text: config.format.format(&date),
            is_placeholder: false,
            format: config.format,
        },
        None => TextField {
            text: PLACEHOLDER_TEXT.to_owned(),
            is_placeholder: true,
            format: config.format,
        },
    };

    let weeks = month_weeks(view)
        .into_iter()
        .map(|week| {
            week.days
                .into_iter()
                .map(|date| DayCell {
                    date,
                    day: date.day(),
                    in_month: view.contains(&date),
                    selected: selection == Some(date),
                    selectable: interactive && config.range.contains(&date),
                    weekend: date.weekday().is_weekend(),
                })
                .collect()
        })
        .collect();

    let calendar = CalendarGrid {
        view,
        year_label: view.year().label_ja(),
        month_label: view.month().label_ja(),
        weekday_header: WEEKDAY_LABELS_JA,
        month_options: Month::all().map(Month::label_ja).collect(),
        weeks,
        can_prev: interactive
            && view
                .prev()
                .is_some_and(|m| can_navigate(config, Some(view), m)),
        can_next: interactive
            && view
                .next()
                .is_some_and(|m| can_navigate(config, Some(view), m)),
    };

    let open = interactive && state.is_open();
    VisualTree {
        label: config.label.clone(),
        field,
        calendar,
        open,
        disabled: config.disabled,
        sidebar: config.placement.is_sidebar(),
        layout: LayoutMetrics::compute(config, ctx, open),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Interaction;
    use crate::{DateRange, Width};

    fn date(y: u16, m: u8, d: u8) -> DateValue {
        DateValue::from_ymd(y, m, d).unwrap()
    }

    fn ctx() -> RenderContext {
        RenderContext::new(date(2024, 1, 15))
    }

    #[test]
    fn test_width_clamped_to_container() {
        let config = WidgetConfig::new("500px").with_width(Width::Fixed(500));
        let layout = LayoutMetrics::compute(&config, &ctx().with_container(250), false);
        assert_eq!(layout.width, 250);

        let config = WidgetConfig::new("200px").with_width(Width::Fixed(200));
        let layout = LayoutMetrics::compute(&config, &ctx().with_container(700), false);
        assert_eq!(layout.width, 200);
    }

    #[test]
    fn test_fill_width_follows_container() {
        let config = WidgetConfig::new("stretch");
        for container in [120, 250, 700, 1920] {
            let layout = LayoutMetrics::compute(&config, &ctx().with_container(container), false);
            assert_eq!(layout.width, container);
        }
    }

    #[test]
    fn test_sidebar_default_container_is_narrower() {
        let main = LayoutMetrics::compute(&WidgetConfig::new("x"), &ctx(), false);
        let side = LayoutMetrics::compute(&WidgetConfig::new("x").in_sidebar(), &ctx(), false);
        assert_eq!(main.width, 700);
        assert_eq!(side.width, 300);
    }

    #[test]
    fn test_calendar_scale_cases() {
        struct TestCase {
            width: u32,
            placement: Placement,
            scale: f64,
            class: SizeClass,
        }

        let cases = [
            TestCase {
                width: 700,
                placement: Placement::Inline,
                scale: 0.9,
                class: SizeClass::Regular,
            },
            TestCase {
                width: 290,
                placement: Placement::Inline,
                scale: 0.9,
                class: SizeClass::Regular,
            },
            TestCase {
                width: 250,
                placement: Placement::Inline,
                scale: 240.0 / 280.0,
                class: SizeClass::Narrow,
            },
            TestCase {
                width: 200,
                placement: Placement::Inline,
                scale: 0.75,
                class: SizeClass::VeryNarrow,
            },
            TestCase {
                width: 200,
                placement: Placement::Sidebar,
                scale: 0.95,
                class: SizeClass::Regular,
            },
        ];

        for case in &cases {
            let mut config = WidgetConfig::new("x");
            config.placement = case.placement;
            let layout =
                LayoutMetrics::compute(&config, &ctx().with_container(case.width), false);
            assert!(
                (layout.calendar_scale - case.scale).abs() < 1e-9,
                "width {}: scale {}",
                case.width,
                layout.calendar_scale
            );
            assert_eq!(layout.size_class, case.class, "width {}", case.width);
        }
    }

    #[test]
    fn test_viewport_limits_effective_width() {
        let config = WidgetConfig::new("x");
        let layout =
            LayoutMetrics::compute(&config, &ctx().with_container(700).with_viewport(200), false);
        assert_eq!(layout.width, 700);
        assert_eq!(layout.size_class, SizeClass::VeryNarrow);
        assert_eq!(layout.popup, PopupPlacement::TopStart);
    }

    #[test]
    fn test_frame_height() {
        let config = WidgetConfig::new("x");
        let closed = LayoutMetrics::compute(&config, &ctx().with_container(700), false);
        assert_eq!(closed.frame_height, 80);
        let open = LayoutMetrics::compute(&config, &ctx().with_container(700), true);
        assert_eq!(open.frame_height, 297 + 80 + 30);
        let narrow = LayoutMetrics::compute(&config, &ctx().with_container(200), true);
        assert_eq!(narrow.frame_height, 248 + 80 + 30);
    }

    #[test]
    fn test_render_labels() {
        let tree = render(&WidgetState::default(), &WidgetConfig::default(), &ctx());
        assert_eq!(tree.label, "日付を選択");
        assert_eq!(
            tree.calendar.weekday_header,
            ["月", "火", "水", "木", "金", "土", "日"]
        );
        assert_eq!(tree.calendar.year_label, "2024年");
        assert_eq!(tree.calendar.month_label, "1月");
        assert_eq!(tree.calendar.month_options.first(), Some(&"1月"));
        assert_eq!(tree.calendar.month_options.last(), Some(&"12月"));
        assert!(tree.field.is_placeholder);
        assert_eq!(tree.field.text, "日付を選択");
    }

    #[test]
    fn test_render_selection_in_format() {
        let config = WidgetConfig::new("x")
            .with_value(date(2024, 3, 9))
            .with_format(FormatSpec::YmdDot);
        let state = WidgetState::initialize(&config).unwrap();
        let tree = render(&state, &config, &ctx());
        assert_eq!(tree.field.text, "2024.03.09");
        assert_eq!(tree.calendar.month_label, "3月");

        let cell = tree.cell(&date(2024, 3, 9)).unwrap();
        assert!(cell.selected);
        assert!(cell.in_month);
        assert!(cell.weekend);
        // March 2024 starts on a Friday; the grid opens with Feb 26.
        let leading = tree.cell(&date(2024, 2, 26)).unwrap();
        assert!(!leading.in_month);
        assert!(!leading.selected);
    }

    #[test]
    fn test_render_marks_range() {
        let config = WidgetConfig::new("x").with_range(
            DateRange::new(Some(date(2024, 1, 10)), Some(date(2024, 1, 20))).unwrap(),
        );
        let tree = render(&WidgetState::default(), &config, &ctx());
        assert!(!tree.cell(&date(2024, 1, 9)).unwrap().selectable);
        assert!(tree.cell(&date(2024, 1, 10)).unwrap().selectable);
        assert!(tree.cell(&date(2024, 1, 20)).unwrap().selectable);
        assert!(!tree.cell(&date(2024, 1, 21)).unwrap().selectable);
        assert!(!tree.calendar.can_prev);
        assert!(!tree.calendar.can_next);
    }

    #[test]
    fn test_render_fallback_view_is_clamped_today() {
        let config = WidgetConfig::new("x")
            .with_bounds(Some(date(2024, 6, 1)), None)
            .unwrap();
        let tree = render(&WidgetState::default(), &config, &ctx());
        assert_eq!(tree.calendar.view.to_string(), "2024年6月");
        assert!(!tree.calendar.can_prev);
        assert!(tree.calendar.can_next);
    }

    #[test]
    fn test_render_view_outside_range_can_step_towards_it() {
        let config = WidgetConfig::new("終了日").with_value(date(2024, 1, 8));
        let state = WidgetState::initialize(&config).unwrap();
        let narrowed = config.with_bounds(Some(date(2024, 3, 10)), None).unwrap();

        let tree = render(&state, &narrowed, &ctx());
        assert_eq!(tree.calendar.view.to_string(), "2024年1月");
        assert!(tree.calendar.weeks.iter().flatten().all(|c| !c.selectable));
        assert!(!tree.calendar.can_prev);
        assert!(tree.calendar.can_next);
    }

    #[test]
    fn test_render_disabled() {
        let config = WidgetConfig::new("x")
            .with_value(date(2024, 1, 5))
            .with_disabled(true);
        let state = WidgetState::initialize(&config).unwrap();
        let tree = render(&state, &config, &ctx());
        assert!(tree.disabled);
        assert!(!tree.open);
        assert_eq!(tree.field.text, "2024/01/05");
        assert!(tree.calendar.weeks.iter().flatten().all(|c| !c.selectable));
        assert!(!tree.calendar.can_prev && !tree.calendar.can_next);
    }

    #[test]
    fn test_render_open_popup() {
        let config = WidgetConfig::new("x");
        let (state, _) = WidgetState::default().apply(
            &config,
            ctx().fallback_view(&config),
            Interaction::Open,
        );
        let tree = render(&state, &config, &ctx().with_container(700));
        assert!(tree.open);
        assert_eq!(tree.layout.frame_height, 407);
    }

    #[test]
    fn test_size_class_names() {
        assert_eq!(SizeClass::Narrow.to_string(), "narrow-calendar");
        assert_eq!(SizeClass::VeryNarrow.to_string(), "very-narrow-calendar");
        assert_eq!(PopupPlacement::TopStart.to_string(), "top-start");
    }

    #[test]
    fn test_tree_serializes() {
        let tree = render(&WidgetState::default(), &WidgetConfig::default(), &ctx());
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["label"], "日付を選択");
        assert_eq!(json["calendar"]["weekday_header"][6], "日");
        assert_eq!(json["layout"]["width"], 700);
    }
}
