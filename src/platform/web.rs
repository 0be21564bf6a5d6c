//! Browser plumbing: canvas lookup, animation-frame loop, event listeners
//!
//! Both the loop and the listeners are guards: dropping them cancels the
//! pending frame / removes the listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement};

use super::PlatformError;

fn js_error(err: JsValue) -> PlatformError {
    PlatformError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub fn window() -> Result<web_sys::Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

/// Viewport size in CSS pixels
pub fn viewport_size() -> Result<(f64, f64), PlatformError> {
    let window = window()?;
    let w = window.inner_width().map_err(js_error)?.as_f64().unwrap_or(0.0);
    let h = window.inner_height().map_err(js_error)?.as_f64().unwrap_or(0.0);
    Ok((w, h))
}

/// A canvas sized to the viewport with its 2D context
pub struct Surface {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
}

impl Surface {
    /// Find `#id`, grab its 2D context and size it to the viewport
    pub fn acquire(id: &str) -> Result<Self, PlatformError> {
        let document = window()?.document().ok_or(PlatformError::NoWindow)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| PlatformError::MissingElement(id.to_string()))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(js_error)?
            .and_then(|obj| obj.dyn_into().ok())
            .ok_or_else(|| PlatformError::NoContext(id.to_string()))?;

        let surface = Self { canvas, ctx };
        surface.fit_viewport()?;
        Ok(surface)
    }

    /// Match the canvas pixel size to the viewport; returns the new size
    pub fn fit_viewport(&self) -> Result<(f32, f32), PlatformError> {
        let (w, h) = viewport_size()?;
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        Ok((w as f32, h as f32))
    }

    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

/// `requestAnimationFrame` loop. Dropping it cancels the pending frame.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl AnimationLoop {
    /// Start calling `frame(timestamp_ms)` once per display refresh
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Result<Self, PlatformError> {
        let window = window()?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let next_handle = handle.clone();
        let next_callback = callback.clone();
        let loop_window = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            // Cancelled between scheduling and firing
            if next_handle.get().is_none() {
                return;
            }
            frame(time);

            let next = next_callback
                .borrow()
                .as_ref()
                .map(|cb| loop_window.request_animation_frame(cb.as_ref().unchecked_ref()));
            match next {
                Some(Ok(id)) => next_handle.set(Some(id)),
                Some(Err(e)) => {
                    log::warn!("requestAnimationFrame failed: {}", js_error(e));
                    next_handle.set(None);
                }
                None => next_handle.set(None),
            }
        }));

        let first = callback
            .borrow()
            .as_ref()
            .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()))
            .transpose()
            .map_err(js_error)?;
        handle.set(first);

        Ok(Self { handle, callback })
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        // Breaks the closure <-> cell cycle
        self.callback.borrow_mut().take();
    }
}

/// An event listener removed on drop
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, PlatformError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}
