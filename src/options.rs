// Pure helpers behind the JS-facing option structs.

use crate::constants::{HIDDEN_CLASS, VISIBLE_CLASS};
use folio_core::constants::{DEFAULT_HIDE_DELAY_MS, DEFAULT_SCROLL_THRESHOLD_PX};
use folio_core::ColorScheme;
use std::time::Duration;

/// `"light"` or `"dark"` (any case); anything else means "follow the system".
pub fn parse_color_scheme(value: &str) -> Option<ColorScheme> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(ColorScheme::Light),
        "dark" => Some(ColorScheme::Dark),
        _ => None,
    }
}

/// Class to add and class to remove for a visibility state.
#[inline]
pub fn visibility_classes(visible: bool) -> (&'static str, &'static str) {
    if visible {
        (VISIBLE_CLASS, HIDDEN_CLASS)
    } else {
        (HIDDEN_CLASS, VISIBLE_CLASS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChromeSettings {
    pub hide_delay: Duration,
    pub scroll_threshold: f64,
}

impl Default for ChromeSettings {
    fn default() -> Self {
        Self {
            hide_delay: Duration::from_millis(DEFAULT_HIDE_DELAY_MS),
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }
}

impl ChromeSettings {
    pub fn set_hide_delay_ms(&mut self, ms: u32) {
        self.hide_delay = Duration::from_millis(u64::from(ms));
    }

    /// Non-finite or negative thresholds fall back to the default.
    pub fn set_scroll_threshold(&mut self, px: f64) {
        self.scroll_threshold = if px.is_finite() && px >= 0.0 {
            px
        } else {
            DEFAULT_SCROLL_THRESHOLD_PX
        };
    }

    pub fn hide_delay_ms(&self) -> u32 {
        timeout_ms(self.hide_delay)
    }
}

/// Whole milliseconds, saturated to what `setTimeout` accepts.
#[inline]
pub fn timeout_ms(delay: Duration) -> u32 {
    delay.as_millis().min(i32::MAX as u128) as u32
}

/// Last visibility announced to the page.
///
/// `update` reports a state only the first time and whenever it flips, so
/// classes and the change callback are touched once per transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityMirror {
    published: Option<bool>,
}

impl VisibilityMirror {
    pub fn update(&mut self, visible: bool) -> Option<bool> {
        if self.published == Some(visible) {
            return None;
        }
        self.published = Some(visible);
        Some(visible)
    }

    /// Visibility as last announced; `false` before the first update.
    #[inline]
    pub fn current(&self) -> bool {
        self.published.unwrap_or(false)
    }
}
