use crate::observer::{WatchMode, WatchSpec};

pub const SECTION_ID: &str = "life-road-map";
pub const PROGRESS_SELECTOR: &str = ".timeline-progress";
pub const ITEM_SELECTOR: &str = ".timeline-item";

/// Items count as active until they reach the bottom 40% of the viewport.
pub const ACTIVE_ITEMS: WatchSpec = WatchSpec {
    mode: WatchMode::Toggle,
    marker_class: "active",
    root_margin: "0px 0px -40% 0px",
};

/// Share of the section that has scrolled past the viewport top, in `[0, 1]`.
///
/// `section_top` is the section's top edge relative to the viewport. A
/// section no taller than the viewport reads as complete once its top has
/// reached the viewport top.
pub fn progress_fraction(section_top: f64, section_height: f64, viewport_height: f64) -> f64 {
    let total_scrollable = (section_height - viewport_height).max(0.0);

    if total_scrollable == 0.0 {
        return if section_top <= 0.0 { 1.0 } else { 0.0 };
    }

    let scrolled = if section_top < 0.0 {
        (-section_top).min(total_scrollable)
    } else {
        0.0
    };

    (scrolled / total_scrollable).clamp(0.0, 1.0)
}

pub fn progress_height(fraction: f64) -> String {
    format!("{}%", fraction * 100.0)
}
