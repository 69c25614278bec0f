//! Browser front end for the Rota wheel of fortune
//!
//! Exposes [`WheelApp`] to JavaScript. The app owns the wheel, the choice
//! list and the browser collaborators (DOM renderer, animation frames,
//! session storage, confetti bridge). `spin()` returns a `Promise` that
//! resolves with the winner once the animation has finished.

mod celebration;
mod dom;
mod frames;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Promise, Reflect};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rota_core::choices::ChoiceList;
use rota_core::config::{
    load_choices_or_examples, load_settings, save_choices, save_settings, WheelSettings,
};
use rota_core::spin::{drive, marker_angle, normalize_deg, SpinResult, Ticker};
use rota_core::traits::Clock;
use rota_core::wheel::{TickOutcome, Wheel};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub use celebration::ConfettiBridge;
pub use dom::DomRenderer;
pub use frames::{AnimationFrames, PageClock};
pub use storage::BrowserSessionStore;

/// Everything one wheel on the page needs
struct AppState {
    wheel: Wheel,
    renderer: DomRenderer,
    celebration: ConfettiBridge,
    choices: ChoiceList,
    store: BrowserSessionStore,
    rng: SmallRng,
}

impl AppState {
    /// Push the active choices to the wheel
    fn relayout(&mut self) {
        self.wheel
            .set_labels(self.choices.active_labels(), &mut self.renderer);
        gloo::console::log!("choices: wheel updated", self.wheel.segments().len());
    }

    fn save_choices(&mut self) {
        if let Err(e) = save_choices(&mut self.store, &self.choices) {
            gloo::console::warn!("storage: saving choices failed", format!("{:?}", e));
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = save_settings(&mut self.store, self.wheel.settings()) {
            gloo::console::warn!("storage: saving settings failed", format!("{:?}", e));
        }
    }
}

/// Ticks one spin on the shared state, borrowing it only for the duration
/// of a tick
struct SharedTicker {
    state: Rc<RefCell<AppState>>,
    spin: u32,
}

impl Ticker for SharedTicker {
    fn tick(&mut self, now_ms: f64) -> TickOutcome {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        state.wheel.tick_spin(
            self.spin,
            now_ms,
            &mut state.renderer,
            &mut state.celebration,
        )
    }
}

/// Wheel of fortune bound to a page element
#[wasm_bindgen]
pub struct WheelApp {
    state: Rc<RefCell<AppState>>,
    window: web_sys::Window,
}

#[wasm_bindgen]
impl WheelApp {
    /// Attach to the element with id `root_id`
    ///
    /// Restores settings and choices from session storage, falling back to
    /// defaults and the example choices.
    #[wasm_bindgen(constructor)]
    pub fn new(root_id: &str) -> Result<WheelApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let mut store = BrowserSessionStore::new(&window);
        if !store.is_available() {
            gloo::console::warn!("storage: sessionStorage unavailable, nothing will be saved");
        }
        let settings = load_settings(&mut store);
        let choices = load_choices_or_examples(&mut store);

        let renderer = DomRenderer::new(window.clone(), root_id)?;
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;

        let mut state = AppState {
            wheel: Wheel::new(settings),
            renderer,
            celebration: ConfettiBridge::new(),
            choices,
            store,
            rng: SmallRng::seed_from_u64(seed),
        };
        state.relayout();

        Ok(WheelApp {
            state: Rc::new(RefCell::new(state)),
            window,
        })
    }

    /// Spin the wheel
    ///
    /// Resolves with `{ index, label, position }` when the spin ends, or
    /// with `null` if the wheel is empty, already spinning, or was reset
    /// before the spin finished. `position` is the winner's place in the
    /// full choice list.
    pub fn spin(&self) -> Promise {
        let state = self.state.clone();
        let mut frames = AnimationFrames::new(self.window.clone());

        future_to_promise(async move {
            let plan = {
                let mut guard = state.borrow_mut();
                let app = &mut *guard;
                app.wheel
                    .spin(frames.now_ms(), &mut app.rng, &mut app.renderer)
            };

            let Some(plan) = plan else {
                gloo::console::log!("spin: refused");
                return Ok(JsValue::NULL);
            };
            gloo::console::log!(
                "spin: start",
                plan.id,
                plan.rotations,
                plan.offset_deg,
                plan.target_rotation
            );

            let mut ticker = SharedTicker {
                state: state.clone(),
                spin: plan.id,
            };
            let Some(result) = drive(&mut frames, &mut ticker).await else {
                gloo::console::log!("spin: cancelled");
                return Ok(JsValue::NULL);
            };

            let final_rotation = state.borrow().wheel.current_rotation();
            gloo::console::log!(
                "spin: finished",
                final_rotation,
                normalize_deg(final_rotation),
                marker_angle(final_rotation),
                result.index
            );

            let position = state
                .borrow()
                .choices
                .position_of_winner(result.label.as_str());
            result_to_js(&result, position)
        })
    }

    /// Replace the choices from newline separated text
    pub fn set_choices_text(&self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.choices = ChoiceList::parse(text);
        state.relayout();
        state.save_choices();
    }

    /// Choices as newline separated text
    pub fn choices_text(&self) -> String {
        let state = self.state.borrow();
        let values: Vec<&str> = state.choices.iter().map(|c| c.value.as_str()).collect();
        values.join("\n")
    }

    /// Choices as `[{ value, active }]`
    pub fn choices(&self) -> Result<Array, JsValue> {
        let state = self.state.borrow();
        let list = Array::new();
        for choice in state.choices.iter() {
            let item = Object::new();
            Reflect::set(&item, &"value".into(), &choice.value.as_str().into())?;
            Reflect::set(&item, &"active".into(), &choice.active.into())?;
            list.push(&item);
        }
        Ok(list)
    }

    /// Switch a choice on or off
    ///
    /// Returns `false` for an unknown index.
    pub fn toggle_choice(&self, index: usize) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.choices.toggle(index) {
            return false;
        }
        state.relayout();
        state.save_choices();
        true
    }

    /// Remove every choice
    pub fn clear_choices(&self) {
        let mut state = self.state.borrow_mut();
        state.choices.clear();
        state.relayout();
        state.save_choices();
    }

    /// Replace the wheel settings
    ///
    /// An empty `colors` list keeps the default palette.
    pub fn set_settings(
        &self,
        spin_duration_s: f64,
        initial_speed: f64,
        text_size_px: f64,
        text_color: &str,
        colors: Vec<String>,
    ) {
        let mut state = self.state.borrow_mut();
        let mut settings = WheelSettings {
            spin_duration_s,
            initial_speed,
            text_size_px,
            text_color: rota_core::config::color(text_color),
            frame_skip: state.wheel.settings().frame_skip,
            ..WheelSettings::default()
        };
        if !colors.is_empty() {
            settings.set_colors(colors.iter().map(String::as_str));
        }

        let app = &mut *state;
        app.wheel.update_settings(settings, &mut app.renderer);
        app.save_settings();
    }

    /// Render only every `(frame_skip + 1)`-th animation frame
    pub fn set_frame_skip(&self, frame_skip: u8) {
        let mut state = self.state.borrow_mut();
        let settings = WheelSettings {
            frame_skip,
            ..state.wheel.settings().clone()
        };

        let app = &mut *state;
        app.wheel.update_settings(settings, &mut app.renderer);
        app.save_settings();
    }

    /// Return the wheel to its starting position
    pub fn reset(&self) {
        let mut guard = self.state.borrow_mut();
        let app = &mut *guard;
        app.wheel.reset(&mut app.renderer);
    }

    pub fn is_spinning(&self) -> bool {
        self.state.borrow().wheel.is_spinning()
    }

    /// Most recent winner as `{ index, label, position }`, or `null`
    pub fn last_winner(&self) -> Result<JsValue, JsValue> {
        let state = self.state.borrow();
        match state.wheel.last_result() {
            Some(result) => {
                let position = state.choices.position_of_winner(result.label.as_str());
                result_to_js(result, position)
            }
            None => Ok(JsValue::NULL),
        }
    }
}

fn result_to_js(result: &SpinResult, position: Option<usize>) -> Result<JsValue, JsValue> {
    let object = Object::new();
    Reflect::set(&object, &"index".into(), &(result.index as u32).into())?;
    Reflect::set(&object, &"label".into(), &result.label.as_str().into())?;
    let position = match position {
        Some(p) => JsValue::from(p as u32),
        None => JsValue::NULL,
    };
    Reflect::set(&object, &"position".into(), &position)?;
    Ok(object.into())
}
