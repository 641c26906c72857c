// `setInterval` wrapper for the round countdown.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::{GameError, Result};

pub const COUNTDOWN_PERIOD_MS: i32 = 1_000;

/// Owns the interval callback for as long as the browser may call it.
///
/// `stop` only clears the interval handle. The closure is kept until the next
/// `start` replaces it, since `stop` usually runs from inside that very callback
/// and dropping a closure mid-call is an error in wasm-bindgen.
#[derive(Default)]
pub struct Ticker {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, period_ms: i32, on_tick: impl FnMut() + 'static) -> Result<()> {
        self.stop();
        let win = window().ok_or_else(|| GameError::Dom("no window".into()))?;
        let cb = Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>);
        let id = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| GameError::dom("setInterval", e))?;
        self.handle = Some(id);
        self.callback = Some(cb);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = window() {
                w.clear_interval_with_handle(id);
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
