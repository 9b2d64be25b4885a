use crate::observer::{WatchMode, WatchSpec};

pub const REVEAL_SELECTOR: &str = ".fade-in-on-scroll";

pub const FADE_IN: WatchSpec = WatchSpec {
    mode: WatchMode::Once,
    marker_class: "is-visible",
    root_margin: "0px 0px -100px 0px",
};
