//! `requestAnimationFrame` loop with a stop handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Re-arms itself every display refresh until stopped.
pub struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

fn request(
    window: &web_sys::Window,
    callback: &FrameCallback,
) -> Result<Option<i32>, JsValue> {
    callback
        .borrow()
        .as_ref()
        .map(|f| window.request_animation_frame(f.as_ref().unchecked_ref()))
        .transpose()
}

impl FrameLoop {
    /// Start calling `on_frame` with the rAF timestamp (milliseconds).
    ///
    /// # Errors
    ///
    /// Fails if there is no window or the first frame cannot be requested.
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        // The closure re-requests itself through `callback`.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let inner = Rc::clone(&callback);
        let inner_handle = Rc::clone(&handle);
        let inner_window = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if inner_handle.get().is_none() {
                return;
            }
            on_frame(timestamp);
            match request(&inner_window, &inner) {
                Ok(id) => inner_handle.set(id),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {e:?}");
                    inner_handle.set(None);
                }
            }
        }));

        handle.set(request(&window, &callback)?);
        Ok(Self { callback, handle })
    }

    /// Whether frames are still being requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }

    /// Cancel the pending frame and drop the callback.
    pub fn stop(&self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference cycle through `callback`.
        let _ = self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
