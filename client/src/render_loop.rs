use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Coalesces repaint requests into one `requestAnimationFrame` callback.
/// Any number of `mark_dirty()` calls between frames cost a single render.
pub struct RenderScheduler {
    inner: Rc<Inner>,
}

struct Inner {
    window: Option<web_sys::Window>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl RenderScheduler {
    pub fn new(render_fn: impl Fn() + 'static) -> Self {
        let inner = Rc::new(Inner {
            window: web_sys::window(),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let inner_cb = Rc::downgrade(&inner);
        let cb = Closure::<dyn FnMut()>::new(move || {
            if let Some(inner) = inner_cb.upgrade() {
                inner.raf_id.set(None);
            }
            render_fn();
        });
        *inner.callback.borrow_mut() = Some(cb);

        Self { inner }
    }

    /// Request a repaint on the next frame. No-op while one is pending.
    pub fn mark_dirty(&self) {
        if self.inner.raf_id.get().is_some() {
            return;
        }
        let Some(window) = self.inner.window.as_ref() else {
            return;
        };
        let cb_ref = self.inner.callback.borrow();
        let Some(cb) = cb_ref.as_ref() else {
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.inner.raf_id.set(Some(id)),
            Err(_) => tracing::warn!("requestAnimationFrame rejected"),
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        if let Some(raf_id) = self.inner.raf_id.replace(None)
            && let Some(window) = self.inner.window.as_ref()
        {
            let _ = window.cancel_animation_frame(raf_id);
        }
        self.inner.callback.borrow_mut().take();
    }
}
