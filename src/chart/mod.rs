//! Chart rendering for the per-customer timing log.

pub mod canvas;
pub mod customers;
pub mod timeline;

pub use customers::plot_per_customer;
pub use timeline::{TIMELINE_FILE, plot_timeline};

use plotters::style::RGBColor;

/// Shared layout and palette constants for all charts.
pub(crate) struct ChartStyle;

impl ChartStyle {
    pub const WIDTH_PX: u32 = 1000;
    pub const HEIGHT_PX: u32 = 600;
    pub const MARGIN: i32 = 16;
    pub const CAPTION_FONT_FAMILY: &'static str = "sans-serif";
    pub const CAPTION_FONT_SIZE: i32 = 28;
    pub const X_LABEL_AREA_SIZE: u32 = 48;
    pub const Y_LABEL_AREA_SIZE: u32 = 56;
    pub const Y_LABEL_COUNT: usize = 8;
    pub const MARKER_SIZE: i32 = 3;

    pub const LINE: RGBColor = RGBColor(31, 119, 180);
    pub const WAIT_FILL: RGBColor = RGBColor(135, 206, 235);
    pub const RETRY_FILL: RGBColor = RGBColor(255, 165, 0);
    pub const TURNAROUND_FILL: RGBColor = RGBColor(46, 139, 87);
}
