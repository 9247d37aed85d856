#![cfg(target_arch = "wasm32")]
use crate::backdrop::{BackdropHandle, BackdropOptions};
use crate::chrome::{ChromeHandle, ChromeOptions};
use crate::constants::{BACKDROP_CANVAS_ID, FOOTER_ID, HEADER_ID};
use folio_core::Chrome;
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod backdrop;
mod canvas;
mod chrome;
mod constants;
mod dom;
mod frame;
mod options;

// Handles created by the auto-mount; released by `unmountAll`.
enum Mounted {
    Backdrop(BackdropHandle),
    Chrome(ChromeHandle),
}

impl Mounted {
    fn dispose(&mut self) {
        match self {
            Mounted::Backdrop(h) => h.dispose(),
            Mounted::Chrome(h) => h.dispose(),
        }
    }
}

thread_local! {
    static MOUNTED: RefCell<Vec<Mounted>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(run_auto_mount);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        run_auto_mount();
    }
    Ok(())
}

/// Dispose everything the auto-mount created. Handles obtained from the
/// explicit `mount*` exports are unaffected.
#[wasm_bindgen(js_name = unmountAll)]
pub fn unmount_all() {
    let mut mounted = MOUNTED.with(|m| m.take());
    let count = mounted.len();
    mounted.iter_mut().for_each(Mounted::dispose);
    log::info!("[mount] released {} component(s)", count);
}

fn run_auto_mount() {
    if let Err(e) = auto_mount() {
        log::error!("auto-mount error: {:?}", e);
    }
}

fn auto_mount() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let mut mounted = Vec::new();

    match find::<web::HtmlCanvasElement>(&document, BACKDROP_CANVAS_ID) {
        Some(canvas) => {
            let handle = backdrop::mount(canvas, BackdropOptions::default())?;
            mounted.push(Mounted::Backdrop(handle));
        }
        None => log::debug!("[mount] no #{} canvas", BACKDROP_CANVAS_ID),
    }

    for (chrome, id) in [(Chrome::Header, HEADER_ID), (Chrome::Footer, FOOTER_ID)] {
        match find::<web::HtmlElement>(&document, id) {
            Some(el) => {
                let handle = chrome::mount(chrome, el, ChromeOptions::default())?;
                mounted.push(Mounted::Chrome(handle));
            }
            None => log::debug!("[mount] no #{} element", id),
        }
    }

    MOUNTED.with(|m| m.borrow_mut().extend(mounted));
    Ok(())
}

fn find<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}
