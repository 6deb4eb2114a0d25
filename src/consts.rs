/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator of the ISO 8601 form used to exchange values with the host
pub const ISO_SEPARATOR: char = '-';

/// Weekday names, Monday first
pub const WEEKDAY_LABELS_JA: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Month names, January first
pub const MONTH_LABELS_JA: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];

/// Suffix used in the calendar header, e.g. `2024年`
pub const YEAR_SUFFIX_JA: &str = "年";

/// Label shown when the caller gives none
pub const DEFAULT_LABEL: &str = "日付を選択";
/// Placeholder shown in the text field while nothing is selected
pub const PLACEHOLDER_TEXT: &str = "日付を選択";

/// Host argument keyword for the fill width mode
pub const WIDTH_STRETCH: &str = "stretch";

// Layout

/// Frame height while the calendar popup is closed
pub const DEFAULT_FRAME_HEIGHT: u32 = 80;
/// Unscaled calendar popup height
pub const BASE_CALENDAR_HEIGHT: u32 = 330;
/// Height reserved for the text field when the popup is open
pub const INPUT_HEIGHT: u32 = 80;
/// Extra space below an open popup so it is not clipped
pub const FRAME_BUFFER: u32 = 30;

/// Scale applied when the container is wide enough
pub const DEFAULT_CALENDAR_SCALE: f64 = 0.9;
/// Lower scale limit inside the sidebar
pub const MIN_CALENDAR_SCALE_SIDEBAR: f64 = 0.95;
/// Lower scale limit in the main area
pub const MIN_CALENDAR_SCALE_MAIN: f64 = 0.75;
/// Scale below which the container is "very narrow"
pub const VERY_NARROW_SCALE: f64 = 0.8;

/// Width the unscaled calendar grid needs (7 cells)
pub const CALENDAR_BASE_WIDTH: u32 = 280;
/// Horizontal padding around the calendar (5px each side)
pub const CALENDAR_PADDING: u32 = 10;

/// Assumed container width in the main area when none was measured
pub const DEFAULT_MAIN_CONTAINER_WIDTH: u32 = 700;
/// Assumed container width in the sidebar when none was measured
pub const DEFAULT_SIDEBAR_CONTAINER_WIDTH: u32 = 300;
