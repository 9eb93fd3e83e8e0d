//! Scroll-driven page effects: hero parallax and reveal-on-scroll settings.

pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_SELECTOR: &str = ".scroll-reveal";
pub const REVEAL_CLASS: &str = "visible";

/// Background offset of the hero image for a given scroll position.
pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    -(scroll_y * factor)
}

pub fn parallax_css(scroll_y: f64, factor: f64) -> String {
    // + 0.0 folds -0.0 into 0.0
    format!("{:.1}px", parallax_offset(scroll_y, factor) + 0.0)
}
