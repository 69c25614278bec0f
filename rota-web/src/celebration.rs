//! Bridge to the page's `confetti` function
//!
//! The effect itself lives in JavaScript. If the page did not load it, the
//! celebration is skipped.

use js_sys::{Array, Function, Object, Reflect};
use rota_core::traits::{Celebration, Origin};
use wasm_bindgen::{JsCast, JsValue};

/// Particles in the burst
const PARTICLE_COUNT: f64 = 200.0;

/// Burst spread in degrees
const SPREAD_DEG: f64 = 90.0;

/// Calls `window.confetti(options)` once per completed spin
#[derive(Default)]
pub struct ConfettiBridge {
    warned: bool,
}

impl ConfettiBridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn options(origin: Origin, palette: &[&str]) -> Result<Object, JsValue> {
        let options = Object::new();

        let at = Object::new();
        Reflect::set(&at, &"x".into(), &origin.x.into())?;
        Reflect::set(&at, &"y".into(), &origin.y.into())?;

        let colors: Array = palette.iter().map(|c| JsValue::from_str(c)).collect();

        Reflect::set(&options, &"particleCount".into(), &PARTICLE_COUNT.into())?;
        Reflect::set(&options, &"spread".into(), &SPREAD_DEG.into())?;
        Reflect::set(&options, &"origin".into(), &at)?;
        Reflect::set(&options, &"colors".into(), &colors)?;

        Ok(options)
    }
}

impl Celebration for ConfettiBridge {
    fn celebrate(&mut self, origin: Origin, palette: &[&str]) {
        let confetti = Reflect::get(&js_sys::global(), &"confetti".into())
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok());

        let Some(confetti) = confetti else {
            if !self.warned {
                gloo::console::log!("celebration: confetti not loaded, skipping");
                self.warned = true;
            }
            return;
        };

        let result = Self::options(origin, palette)
            .and_then(|options| confetti.call1(&JsValue::NULL, &options));
        if result.is_err() {
            gloo::console::warn!("celebration: confetti call failed");
        }
    }
}
