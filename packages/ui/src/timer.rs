use dropnav_core::{Error, Result};
use wasm_bindgen::{closure::Closure, JsCast};

use crate::js_error;

/// A pending `setTimeout`, cleared when dropped.
pub struct Timeout {
    handle: i32,
}

impl Timeout {
    pub fn new(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Dom("no window".to_owned()))?;
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                Closure::once_into_js(callback).unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )
            .map_err(js_error)?;

        Ok(Self { handle })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}
