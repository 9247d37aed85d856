//! Show/hide state machine for the fixed header and footer.
//!
//! Both controllers share one shape: `Visible`/`Hidden`, guarded by whether
//! the pointer is over the element and by a single pending hide timer. The
//! header shows on scroll up and is pinned near the top of the page; the
//! footer shows on scroll down and is pinned at the bottom.
//!
//! The controller never touches a clock. Transitions return a
//! [`TimerEffect`] telling the host to arm or cancel its one timer; expiry
//! comes back through [`VisibilityController::on_hide_timer`] with the token
//! the timer was armed with, so a late callback from a replaced timer is
//! ignored.

use crate::constants::{DEFAULT_HIDE_DELAY_MS, FOOTER_BOTTOM_ZONE_PX, HEADER_TOP_ZONE_PX};
use crate::scroll::ScrollDirection;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chrome {
    Header,
    Footer,
}

impl Chrome {
    /// State on mount: the header starts shown, the footer has to be earned.
    #[inline]
    pub fn initial(self) -> Visibility {
        match self {
            Chrome::Header => Visibility::Visible,
            Chrome::Footer => Visibility::Hidden,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Chrome::Header => "header",
            Chrome::Footer => "footer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Scroll position of the document at the time of an event.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            offset,
            viewport_height,
            document_height,
        }
    }

    #[inline]
    pub fn near_top(&self) -> bool {
        self.offset < HEADER_TOP_ZONE_PX
    }

    #[inline]
    pub fn at_bottom(&self) -> bool {
        self.offset + self.viewport_height >= self.document_height - FOOTER_BOTTOM_ZONE_PX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideTimer {
    pub token: u64,
    pub delay: Duration,
}

/// What the host must do with its timer after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEffect {
    Unchanged,
    /// Replace any running timer with this one.
    Arm(HideTimer),
    Cancel,
}

#[derive(Clone, Debug)]
pub struct VisibilityController {
    chrome: Chrome,
    visibility: Visibility,
    pointer_inside: bool,
    at_bottom: bool,
    pending: Option<HideTimer>,
    next_token: u64,
    hide_delay: Duration,
}

impl VisibilityController {
    pub fn new(chrome: Chrome, hide_delay: Duration) -> Self {
        Self {
            chrome,
            visibility: chrome.initial(),
            pointer_inside: false,
            at_bottom: false,
            pending: None,
            next_token: 0,
            hide_delay,
        }
    }

    pub fn header() -> Self {
        Self::new(Chrome::Header, Duration::from_millis(DEFAULT_HIDE_DELAY_MS))
    }

    pub fn footer() -> Self {
        Self::new(Chrome::Footer, Duration::from_millis(DEFAULT_HIDE_DELAY_MS))
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn is_at_bottom(&self) -> bool {
        self.at_bottom
    }

    pub fn pending_timer(&self) -> Option<HideTimer> {
        self.pending
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    /// Scroll notification with the current direction signal.
    pub fn on_scroll(
        &mut self,
        direction: Option<ScrollDirection>,
        metrics: ScrollMetrics,
    ) -> TimerEffect {
        match self.chrome {
            Chrome::Header => {
                if metrics.near_top() {
                    self.set(Visibility::Visible);
                    return self.cancel();
                }
                match direction {
                    Some(ScrollDirection::Up) => self.show_then_hide(),
                    Some(ScrollDirection::Down) => self.hide_now(),
                    None => TimerEffect::Unchanged,
                }
            }
            Chrome::Footer => {
                self.at_bottom = metrics.at_bottom();
                if self.at_bottom {
                    self.set(Visibility::Visible);
                    return self.cancel();
                }
                match direction {
                    Some(ScrollDirection::Down) => self.show_then_hide(),
                    Some(ScrollDirection::Up) => self.hide_now(),
                    None => TimerEffect::Unchanged,
                }
            }
        }
    }

    pub fn on_pointer_enter(&mut self) -> TimerEffect {
        self.pointer_inside = true;
        self.set(Visibility::Visible);
        self.cancel()
    }

    /// Pointer left the element; `offset` is the current scroll offset.
    pub fn on_pointer_leave(&mut self, offset: f64) -> TimerEffect {
        self.pointer_inside = false;
        let pinned = match self.chrome {
            Chrome::Header => offset < HEADER_TOP_ZONE_PX,
            Chrome::Footer => self.at_bottom,
        };
        if pinned {
            TimerEffect::Unchanged
        } else {
            self.arm()
        }
    }

    /// The timer armed with `token` fired. Returns whether visibility changed.
    pub fn on_hide_timer(&mut self, token: u64) -> bool {
        match self.pending {
            Some(t) if t.token == token => self.pending = None,
            _ => return false,
        }
        if self.pointer_inside || (self.chrome == Chrome::Footer && self.at_bottom) {
            return false;
        }
        self.set(Visibility::Hidden)
    }

    /// Unmount: drop the pending timer, if any.
    pub fn shutdown(&mut self) -> TimerEffect {
        self.cancel()
    }

    fn show_then_hide(&mut self) -> TimerEffect {
        self.set(Visibility::Visible);
        if self.pointer_inside {
            TimerEffect::Unchanged
        } else {
            self.arm()
        }
    }

    fn hide_now(&mut self) -> TimerEffect {
        self.set(Visibility::Hidden);
        self.cancel()
    }

    fn arm(&mut self) -> TimerEffect {
        let timer = HideTimer {
            token: self.next_token,
            delay: self.hide_delay,
        };
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(timer);
        TimerEffect::Arm(timer)
    }

    fn cancel(&mut self) -> TimerEffect {
        match self.pending.take() {
            Some(_) => TimerEffect::Cancel,
            None => TimerEffect::Unchanged,
        }
    }

    fn set(&mut self, v: Visibility) -> bool {
        if self.visibility == v {
            return false;
        }
        log::debug!("[{}] {:?} -> {:?}", self.chrome.name(), self.visibility, v);
        self.visibility = v;
        true
    }
}
