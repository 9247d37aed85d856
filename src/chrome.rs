//! Scroll-aware header and footer.
//!
//! Each mounted element gets its own [`VisibilityController`] and
//! [`ScrollDirectionDetector`]. The controller decides; this module owns the
//! one `setTimeout` slot, the scroll and pointer listeners, and mirrors the
//! state onto the element's classes.

use crate::dom;
use crate::options::{timeout_ms, visibility_classes, ChromeSettings, VisibilityMirror};
use folio_core::{
    Chrome, FrameThrottle, ScrollDirectionDetector, TimerEffect, VisibilityController,
};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct ChromeOptions {
    settings: ChromeSettings,
    on_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl ChromeOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = setHideDelayMs)]
    pub fn set_hide_delay_ms(&mut self, ms: u32) {
        self.settings.set_hide_delay_ms(ms);
    }

    #[wasm_bindgen(js_name = setScrollThreshold)]
    pub fn set_scroll_threshold(&mut self, px: f64) {
        self.settings.set_scroll_threshold(px);
    }

    /// Called with the new `visible` flag whenever it changes.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&mut self, callback: js_sys::Function) {
        self.on_change = Some(callback);
    }
}

struct ChromeState {
    me: Weak<RefCell<ChromeState>>,
    window: web::Window,
    element: web::HtmlElement,
    controller: VisibilityController,
    detector: ScrollDirectionDetector,
    throttle: FrameThrottle,
    timer: Option<Timeout>,
    direction_frame: Option<i32>,
    mirror: VisibilityMirror,
    // read by the handle without borrowing the state
    shown: Rc<Cell<bool>>,
    notice: Option<bool>,
    on_change: Option<js_sys::Function>,
}

/// Run `f` against the state, then announce any visibility change once the
/// borrow is released. The change callback may call back into the handle.
fn drive(state: &RefCell<ChromeState>, f: impl FnOnce(&mut ChromeState)) {
    let notice = {
        let mut s = state.borrow_mut();
        f(&mut *s);
        s.take_notice()
    };
    if let Some((callback, visible)) = notice {
        _ = callback.call1(&JsValue::NULL, &JsValue::from_bool(visible));
    }
}

impl ChromeState {
    /// Re-evaluate against the current scroll position and direction.
    fn check_scroll(&mut self) {
        let metrics = dom::scroll_metrics(&self.window);
        let effect = self.controller.on_scroll(self.detector.direction(), metrics);
        self.apply(effect);
    }

    fn pointer_enter(&mut self) {
        let effect = self.controller.on_pointer_enter();
        self.apply(effect);
    }

    fn pointer_leave(&mut self) {
        let offset = self.window.scroll_y().unwrap_or(0.0);
        let effect = self.controller.on_pointer_leave(offset);
        self.apply(effect);
    }

    fn hide_timer_fired(&mut self, token: u64) {
        if self.controller.on_hide_timer(token) {
            self.publish();
        }
    }

    fn request_direction_frame(&mut self, tick: &Closure<dyn FnMut()>) {
        let window = &self.window;
        if let Some(id) = self
            .throttle
            .schedule(|| window.request_animation_frame(tick.as_ref().unchecked_ref()))
        {
            self.direction_frame = Some(id);
        }
    }

    /// Frame callback for the throttled direction update.
    fn update_direction(&mut self) {
        self.direction_frame = None;
        self.throttle.complete();
        let before = self.detector.direction();
        let offset = self.window.scroll_y().unwrap_or(0.0);
        if self.detector.observe(offset) != before {
            self.check_scroll();
        }
    }

    fn apply(&mut self, effect: TimerEffect) {
        match effect {
            TimerEffect::Unchanged => {}
            TimerEffect::Cancel => self.timer = None,
            TimerEffect::Arm(t) => {
                let me = self.me.clone();
                // replacing the slot drops (and clears) the previous timeout
                self.timer = Some(Timeout::new(timeout_ms(t.delay), move || {
                    if let Some(state) = me.upgrade() {
                        drive(&state, |s| s.hide_timer_fired(t.token));
                    }
                }));
            }
        }
        self.publish();
    }

    fn publish(&mut self) {
        let Some(visible) = self.mirror.update(self.controller.is_visible()) else {
            return;
        };
        let (add, remove) = visibility_classes(visible);
        let classes = self.element.class_list();
        _ = classes.remove_1(remove);
        _ = classes.add_1(add);
        self.shown.set(visible);
        self.notice = Some(visible);
    }

    fn take_notice(&mut self) -> Option<(js_sys::Function, bool)> {
        let visible = self.notice.take()?;
        Some((self.on_change.clone()?, visible))
    }

    fn shutdown(&mut self) {
        self.controller.shutdown();
        self.timer = None;
        if let Some(id) = self.direction_frame.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        self.throttle.complete();
        self.notice = None;
    }
}

struct LiveChrome {
    state: Rc<RefCell<ChromeState>>,
    shown: Rc<Cell<bool>>,
    // detached on drop
    _listeners: Vec<EventListener>,
    _direction_tick: Rc<Closure<dyn FnMut()>>,
}

/// Handle returned by `mountHeader` / `mountFooter`.
#[wasm_bindgen]
pub struct ChromeHandle {
    chrome: Chrome,
    live: Option<LiveChrome>,
}

#[wasm_bindgen]
impl ChromeHandle {
    /// Current visibility; `false` once disposed.
    pub fn visible(&self) -> bool {
        self.live.as_ref().is_some_and(|l| l.shown.get())
    }

    #[wasm_bindgen(js_name = onPointerEnter)]
    pub fn on_pointer_enter(&self) {
        if let Some(live) = &self.live {
            drive(&live.state, ChromeState::pointer_enter);
        }
    }

    #[wasm_bindgen(js_name = onPointerLeave)]
    pub fn on_pointer_leave(&self) {
        if let Some(live) = &self.live {
            drive(&live.state, ChromeState::pointer_leave);
        }
    }

    /// Clear the hide timer and detach every listener. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(live) = self.live.take() {
            live.state.borrow_mut().shutdown();
            log::info!("[{}] disposed", self.chrome.name());
        }
    }
}

impl Drop for ChromeHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[wasm_bindgen(js_name = mountHeader)]
pub fn mount_header(
    element: web::HtmlElement,
    options: Option<ChromeOptions>,
) -> Result<ChromeHandle, JsValue> {
    mount(Chrome::Header, element, options.unwrap_or_default())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

#[wasm_bindgen(js_name = mountFooter)]
pub fn mount_footer(
    element: web::HtmlElement,
    options: Option<ChromeOptions>,
) -> Result<ChromeHandle, JsValue> {
    mount(Chrome::Footer, element, options.unwrap_or_default())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

pub(crate) fn mount(
    chrome: Chrome,
    element: web::HtmlElement,
    options: ChromeOptions,
) -> anyhow::Result<ChromeHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let settings = options.settings;
    let initial_offset = window.scroll_y().unwrap_or(0.0);

    let shown = Rc::new(Cell::new(false));
    let state = Rc::new_cyclic(|me| {
        RefCell::new(ChromeState {
            me: me.clone(),
            window: window.clone(),
            element: element.clone(),
            controller: VisibilityController::new(chrome, settings.hide_delay),
            detector: ScrollDirectionDetector::new(settings.scroll_threshold, initial_offset),
            throttle: FrameThrottle::default(),
            timer: None,
            direction_frame: None,
            mirror: VisibilityMirror::default(),
            shown: shown.clone(),
            notice: None,
            on_change: options.on_change,
        })
    });

    let direction_tick = {
        let state = state.clone();
        Rc::new(Closure::wrap(Box::new(move || {
            drive(&state, ChromeState::update_direction);
        }) as Box<dyn FnMut()>))
    };

    let mut listeners = Vec::new();
    {
        let state = state.clone();
        let tick = direction_tick.clone();
        listeners.push(EventListener::new(&window, "scroll", move |_| {
            drive(&state, |s| {
                s.check_scroll();
                s.request_direction_frame(&tick);
            });
        }));
    }
    {
        let state = state.clone();
        listeners.push(EventListener::new(&element, "pointerenter", move |_| {
            drive(&state, ChromeState::pointer_enter);
        }));
    }
    {
        let state = state.clone();
        listeners.push(EventListener::new(&element, "pointerleave", move |_| {
            drive(&state, ChromeState::pointer_leave);
        }));
    }

    drive(&state, |s| {
        s.publish();
        s.check_scroll();
    });
    log::info!(
        "[{}] mounted visible={} hide_delay={}ms",
        chrome.name(),
        shown.get(),
        settings.hide_delay_ms()
    );

    Ok(ChromeHandle {
        chrome,
        live: Some(LiveChrome {
            state,
            shown,
            _listeners: listeners,
            _direction_tick: direction_tick,
        }),
    })
}
