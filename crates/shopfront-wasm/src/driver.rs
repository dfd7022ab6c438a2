//! requestAnimationFrame driver for the scroll animation
//!
//! One self-rescheduling callback runs for the lifetime of the app and is
//! cancelled exactly once at teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::Inner;

pub(crate) struct FrameDriver {
    raf_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            raf_id: Rc::new(Cell::new(None)),
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.raf_id.get().is_some()
    }

    /// Schedule the per-frame callback. No-op if already running.
    pub fn start(&self, inner: Rc<RefCell<Inner>>) {
        if self.is_running() {
            return;
        }

        let raf_id = Rc::clone(&self.raf_id);
        let callback = Rc::clone(&self.callback);
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            inner.borrow_mut().frame(now_ms);
            // reschedule unless stop() cleared the handle mid-frame
            if raf_id.get().is_some() {
                if let Some(cb) = callback.borrow().as_ref() {
                    raf_id.set(request_frame(cb));
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(cb) = self.callback.borrow().as_ref() {
            self.raf_id.set(request_frame(cb));
        }
    }

    /// Cancel the pending frame and drop the callback. Idempotent.
    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    let window = web_sys::window()?;
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("requestAnimationFrame failed: {e:?}");
            None
        }
    }
}
