use crate::constants::FRAME_STATS_INTERVAL;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that can be paused, resumed and torn down.
///
/// At most one frame request is outstanding; `stop` cancels it. Dropping
/// the loop stops it and releases the callback.
pub struct FrameLoop {
    tick: Tick,
    raf_id: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut() + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(false));

        let tick_weak = Rc::downgrade(&tick);
        let raf_tick = raf_id.clone();
        let running_tick = running.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_tick.set(None);
            if !running_tick.get() {
                return;
            }
            on_frame();
            // the callback may have stopped or dropped the loop
            if let Some(tick) = tick_weak.upgrade() {
                if running_tick.get() {
                    raf_tick.set(request_frame(&tick));
                }
            }
        }) as Box<dyn FnMut()>));

        Self {
            tick,
            raf_id,
            running,
        }
    }

    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        self.raf_id.set(request_frame(&self.tick));
    }

    /// Cancel the pending frame. Safe to call repeatedly.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &RefCell<Option<Closure<dyn FnMut()>>>) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}

/// Rolling frame cost, logged every `FRAME_STATS_INTERVAL` frames.
pub struct FrameStats {
    frames: u32,
    busy: Duration,
    window_start: Instant,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            busy: Duration::ZERO,
            window_start: Instant::now(),
        }
    }

    pub fn record(&mut self, cost: Duration) {
        self.frames += 1;
        self.busy += cost;
        if self.frames < FRAME_STATS_INTERVAL {
            return;
        }
        let wall = self.window_start.elapsed().as_secs_f32();
        log::debug!(
            "[frame] {} frames in {:.1}s avg cost {:.2}ms ({:.0} fps)",
            self.frames,
            wall,
            self.busy.as_secs_f32() * 1000.0 / self.frames as f32,
            self.frames as f32 / wall.max(1e-3)
        );
        *self = Self::new();
    }
}
