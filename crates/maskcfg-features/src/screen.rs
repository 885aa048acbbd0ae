//! Available screen area (`screen.avail*`).

use maskcfg_config::MaskConfig;
use serde::Serialize;

pub const AVAIL_LEFT_KEY: &str = "screen.availLeft";
pub const AVAIL_TOP_KEY: &str = "screen.availTop";
pub const AVAIL_WIDTH_KEY: &str = "screen.availWidth";
pub const AVAIL_HEIGHT_KEY: &str = "screen.availHeight";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenArea {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// The available area, only when all four keys are configured.
pub fn available_area(config: &MaskConfig) -> Option<ScreenArea> {
    let (left, top, width, height) = config.get_rect(
        AVAIL_LEFT_KEY,
        AVAIL_TOP_KEY,
        AVAIL_WIDTH_KEY,
        AVAIL_HEIGHT_KEY,
    )?;
    Some(ScreenArea {
        left,
        top,
        width,
        height,
    })
}
