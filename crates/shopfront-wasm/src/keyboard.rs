//! Global keyboard handling
//!
//! A single document-level keydown listener closes the cart drawer on
//! Escape. Attached while the app is started, removed on teardown.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::Inner;

pub(crate) struct EscapeListener {
    callback: Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>,
}

impl EscapeListener {
    pub fn attach(inner: Rc<RefCell<Inner>>) -> Self {
        let callback = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            if event.key() == "Escape" {
                let changed = inner.borrow_mut().app.handle_escape();
                if changed {
                    inner.borrow().notify();
                }
            }
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Err(e) =
                document.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
            {
                tracing::warn!("failed to attach keydown listener: {e:?}");
            }
        }

        Self {
            callback: Some(callback),
        }
    }

    /// Remove the listener. Idempotent.
    pub fn detach(&mut self) {
        if let Some(callback) = self.callback.take() {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document
                    .remove_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref());
            }
        }
    }
}

impl Drop for EscapeListener {
    fn drop(&mut self) {
        self.detach();
    }
}
