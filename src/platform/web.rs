//! Browser frame scheduling via `requestAnimationFrame`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameCallback, FrameHandle, FrameScheduler};

/// Schedules frames on the display refresh signal
#[derive(Debug, Default, Clone, Copy)]
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let Some(window) = web_sys::window() else {
            log::error!("No window; cannot schedule frame");
            return FrameHandle(0);
        };
        // Released by wasm-bindgen after its single call
        let js = Closure::once_into_js(move |time: f64| callback(time));
        match window.request_animation_frame(js.unchecked_ref()) {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if handle.0 == 0 {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
    }
}

/// Current high-resolution timestamp in ms (same clock as frame callbacks)
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
