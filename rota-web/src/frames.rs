//! Browser time sources
//!
//! `performance.now()` as the clock and `requestAnimationFrame` as the
//! frame source. Both share the same time base, so frame timestamps can be
//! compared directly with the spin start time.

use js_sys::{Date, Promise};
use rota_core::traits::{Clock, FrameSource};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Performance, Window};

/// High resolution page clock
#[derive(Clone)]
pub struct PageClock {
    performance: Option<Performance>,
}

impl PageClock {
    pub fn new(window: &Window) -> Self {
        Self {
            performance: window.performance(),
        }
    }
}

impl Clock for PageClock {
    fn now_ms(&self) -> f64 {
        match &self.performance {
            Some(performance) => performance.now(),
            None => Date::now(),
        }
    }
}

/// `requestAnimationFrame` frame source
pub struct AnimationFrames {
    window: Window,
    clock: PageClock,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        let clock = PageClock::new(&window);
        Self { window, clock }
    }
}

impl Clock for AnimationFrames {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl FrameSource for AnimationFrames {
    async fn next_frame(&mut self) -> f64 {
        let window = self.window.clone();
        let promise = Promise::new(&mut |resolve, _reject| {
            let resolve_now = resolve.clone();
            // Freed by wasm-bindgen once the frame callback has run
            let callback = Closure::once_into_js(move |timestamp: f64| {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::from_f64(timestamp));
            });
            if window
                .request_animation_frame(callback.unchecked_ref())
                .is_err()
            {
                // No frame coming, resolve right away and use the clock
                let _ = resolve_now.call1(&JsValue::NULL, &JsValue::NULL);
            }
        });

        match JsFuture::from(promise).await {
            Ok(value) => value.as_f64().unwrap_or_else(|| self.now_ms()),
            Err(_) => self.now_ms(),
        }
    }
}
