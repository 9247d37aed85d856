//! Mounts the dot-grid backdrop on a canvas and keeps it animating.

use crate::canvas::{self, CanvasSurface};
use crate::constants::{DARK_SCHEME_QUERY, REDUCED_MOTION_QUERY};
use crate::dom;
use crate::frame::{FrameLoop, FrameStats};
use crate::options::parse_color_scheme;
use folio_core::{Backdrop, BackdropConfig, ColorScheme, Viewport};
use gloo_events::EventListener;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Options accepted by `mountBackdrop`; unset fields keep their defaults.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct BackdropOptions {
    config: BackdropConfig,
    scheme: Option<ColorScheme>,
}

#[wasm_bindgen]
impl BackdropOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = setDotSpacing)]
    pub fn set_dot_spacing(&mut self, px: f32) {
        self.config.dot_spacing = px;
    }

    #[wasm_bindgen(js_name = setDotRadius)]
    pub fn set_dot_radius(&mut self, px: f32) {
        self.config.dot_radius = px;
    }

    #[wasm_bindgen(js_name = setCloudSpeed)]
    pub fn set_cloud_speed(&mut self, speed: f32) {
        self.config.cloud_speed = speed;
    }

    #[wasm_bindgen(js_name = setCloudCount)]
    pub fn set_cloud_count(&mut self, count: u32) {
        self.config.cloud_count = count as usize;
    }

    #[wasm_bindgen(js_name = setMouseAttraction)]
    pub fn set_mouse_attraction(&mut self, enabled: bool) {
        self.config.mouse_attraction = enabled;
    }

    #[wasm_bindgen(js_name = setMouseAttractionStrength)]
    pub fn set_mouse_attraction_strength(&mut self, strength: f32) {
        self.config.mouse_attraction_strength = strength;
    }

    /// `"light"`, `"dark"`, or anything else to follow `prefers-color-scheme`.
    #[wasm_bindgen(js_name = setColorScheme)]
    pub fn set_color_scheme(&mut self, scheme: &str) {
        self.scheme = parse_color_scheme(scheme);
    }
}

struct BackdropState {
    engine: Backdrop,
    surface: CanvasSurface,
    canvas: web::HtmlCanvasElement,
    pointer: Option<Vec2>,
    stats: FrameStats,
}

impl BackdropState {
    fn frame(&mut self) {
        let started = Instant::now();
        let pointer = self.pointer;
        self.engine.render(pointer, &mut self.surface);
        self.stats.record(started.elapsed());
    }

    fn resize(&mut self, viewport: Viewport) {
        canvas::fit_to_viewport(&self.canvas, viewport);
        self.engine.resize(viewport);
    }
}

struct LiveBackdrop {
    state: Rc<RefCell<BackdropState>>,
    follow_system: Rc<Cell<bool>>,
    frame: FrameLoop,
    // detached on drop
    _listeners: Vec<EventListener>,
}

/// Handle returned by `mountBackdrop`. An inert handle (no 2D context) has
/// no live state and ignores every call.
#[wasm_bindgen]
pub struct BackdropHandle {
    live: Option<LiveBackdrop>,
}

#[wasm_bindgen]
impl BackdropHandle {
    /// Resume the frame loop after `stop`.
    pub fn start(&self) {
        if let Some(live) = &self.live {
            live.frame.start();
        }
    }

    /// Pause the frame loop, keeping listeners attached.
    pub fn stop(&self) {
        if let Some(live) = &self.live {
            live.frame.stop();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.live.as_ref().is_some_and(|l| l.frame.is_running())
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    #[wasm_bindgen(js_name = dotCount)]
    pub fn dot_count(&self) -> u32 {
        self.live
            .as_ref()
            .map_or(0, |l| l.state.borrow().engine.grid().len() as u32)
    }

    /// Force a palette; system colour scheme changes are ignored afterwards.
    #[wasm_bindgen(js_name = setColorScheme)]
    pub fn set_color_scheme(&self, dark: bool) {
        if let Some(live) = &self.live {
            live.follow_system.set(false);
            live.state
                .borrow_mut()
                .engine
                .set_color_scheme(ColorScheme::from_dark(dark));
        }
    }

    /// Cancel the frame loop and detach every listener. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(live) = self.live.take() {
            live.frame.stop();
            log::info!("[backdrop] disposed");
        }
    }
}

impl BackdropHandle {
    fn inert() -> Self {
        Self { live: None }
    }
}

impl Drop for BackdropHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Mount the animated backdrop on `canvas`.
#[wasm_bindgen(js_name = mountBackdrop)]
pub fn mount_backdrop(
    canvas: web::HtmlCanvasElement,
    options: Option<BackdropOptions>,
) -> Result<BackdropHandle, JsValue> {
    mount(canvas, options.unwrap_or_default()).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

pub(crate) fn mount(
    canvas: web::HtmlCanvasElement,
    options: BackdropOptions,
) -> anyhow::Result<BackdropHandle> {
    let config = options.config.validated()?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    _ = canvas.set_attribute("aria-hidden", "true");

    let Some(surface) = CanvasSurface::acquire(&canvas) else {
        log::warn!("[backdrop] 2d context unavailable; rendering disabled");
        return Ok(BackdropHandle::inert());
    };

    let reduced_motion = dom::media_matches(&window, REDUCED_MOTION_QUERY);
    let follow_system = Rc::new(Cell::new(options.scheme.is_none()));
    let scheme = options.scheme.unwrap_or_else(|| {
        ColorScheme::from_dark(dom::media_matches(&window, DARK_SCHEME_QUERY))
    });
    let viewport = dom::viewport(&window);
    canvas::fit_to_viewport(&canvas, viewport);

    let attraction = config.mouse_attraction;
    let engine = Backdrop::new(config, viewport, scheme, reduced_motion, rand::random());
    log::info!(
        "[backdrop] mounted {}x{} dots={} clouds={} scheme={:?} reduced_motion={}",
        viewport.width,
        viewport.height,
        engine.grid().len(),
        engine.clouds().len(),
        scheme,
        reduced_motion
    );

    let state = Rc::new(RefCell::new(BackdropState {
        engine,
        surface,
        canvas,
        pointer: None,
        stats: FrameStats::new(),
    }));

    let mut listeners = Vec::new();
    {
        let state = state.clone();
        let win = window.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            state.borrow_mut().resize(dom::viewport(&win));
        }));
    }
    if attraction {
        let state = state.clone();
        listeners.push(EventListener::new(&window, "pointermove", move |ev| {
            if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                state.borrow_mut().pointer =
                    Some(Vec2::new(ev.client_x() as f32, ev.client_y() as f32));
            }
        }));
    }
    if let Some(mql) = window.match_media(DARK_SCHEME_QUERY).ok().flatten() {
        let state = state.clone();
        let follow = follow_system.clone();
        listeners.push(EventListener::new(&mql, "change", move |ev| {
            if !follow.get() {
                return;
            }
            let dark = ev
                .dyn_ref::<web::MediaQueryListEvent>()
                .is_some_and(|e| e.matches());
            state
                .borrow_mut()
                .engine
                .set_color_scheme(ColorScheme::from_dark(dark));
        }));
    }

    let frame = {
        let state = state.clone();
        FrameLoop::new(move || state.borrow_mut().frame())
    };
    // paint immediately, then hand over to requestAnimationFrame
    state.borrow_mut().frame();
    frame.start();

    Ok(BackdropHandle {
        live: Some(LiveBackdrop {
            state,
            follow_system,
            frame,
            _listeners: listeners,
        }),
    })
}
