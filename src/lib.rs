//! Ambient particle-field backdrop for a portfolio page, compiled to wasm.
//!
//! The host page mounts [`ParticleField`] over a full-viewport canvas; the
//! crate owns the simulation, the `resize`/`mousemove` listeners and the
//! animation-frame loop, and tears all of it down on unmount.

mod utils;

pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod pointer;
pub mod render;
pub mod theme;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::field::FieldSim;
use crate::render::CanvasSurface;
use crate::theme::Theme;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

/// RAII span over `console.time`/`console.timeEnd`, for frame profiling.
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

// Everything that has to be unhooked on unmount: the two window listeners,
// the pending animation frame, and the frame closure chain itself.
struct Runtime {
    cancelled: Rc<Cell<bool>>,
    frame_handle: Rc<Cell<i32>>,
    frame_closure: FrameClosure,
    resize_cb: Closure<dyn FnMut()>,
    pointer_cb: Closure<dyn FnMut(MouseEvent)>,
}

/// Exported handle for the backdrop.
///
/// The canvas is made non-interactive at mount (`pointer-events: none`), so
/// it never steals clicks from the content layered above it.
#[wasm_bindgen]
pub struct ParticleField {
    sim: Option<Rc<RefCell<FieldSim>>>,
    runtime: Option<Runtime>,
}

#[wasm_bindgen]
impl ParticleField {
    /// Attaches the simulation to the canvas with the given id, seeds the
    /// population and starts the frame loop.
    ///
    /// `theme` is `"dark"`, `"light"` or `"system"`; `config` may be
    /// `undefined` or a plain object with overrides (see `FieldConfig`).
    /// A host whose canvas has no 2d context gets an inert handle back:
    /// nothing is drawn and nothing is scheduled.
    pub fn mount(canvas_id: &str, theme: &str, config: JsValue) -> Result<ParticleField, JsValue> {
        let config = FieldConfig::from_js(config);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into()?;

        let context = match canvas.get_context("2d")? {
            Some(context) => context.dyn_into::<CanvasRenderingContext2d>()?,
            None => {
                console::log_1(&"[particle-field] no 2d context, backdrop disabled".into());
                return Ok(ParticleField {
                    sim: None,
                    runtime: None,
                });
            }
        };

        let (width, height) = viewport_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        canvas.style().set_property("pointer-events", "none")?;

        let theme = Theme::resolve(theme, prefers_dark(&window));
        let sim = Rc::new(RefCell::new(FieldSim::new(width, height, theme, config)));
        console::log_1(
            &format!(
                "[particle-field] mounted with {} particles",
                sim.borrow().population()
            )
            .into(),
        );

        let cancelled = Rc::new(Cell::new(false));
        let frame_handle = Rc::new(Cell::new(0));

        // Resize: size the canvas to the new viewport and re-seed from
        // scratch; survivors are not repositioned.
        let resize_cb = {
            let sim = Rc::clone(&sim);
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move || {
                if let Some(window) = web_sys::window() {
                    let (width, height) = viewport_size(&window);
                    canvas.set_width(width as u32);
                    canvas.set_height(height as u32);
                    sim.borrow_mut().resize(width, height);
                }
            }) as Box<dyn FnMut()>)
        };

        let pointer_cb = {
            let sim = Rc::clone(&sim);
            Closure::wrap(Box::new(move |event: MouseEvent| {
                sim.borrow_mut()
                    .pointer_moved(event.client_x() as f64, event.client_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;
        window
            .add_event_listener_with_callback("mousemove", pointer_cb.as_ref().unchecked_ref())?;

        let frame_closure = start_frame_loop(
            context,
            Rc::clone(&sim),
            Rc::clone(&cancelled),
            Rc::clone(&frame_handle),
            config.debug,
        )?;

        Ok(ParticleField {
            sim: Some(sim),
            runtime: Some(Runtime {
                cancelled,
                frame_handle,
                frame_closure,
                resize_cb,
                pointer_cb,
            }),
        })
    }

    /// Stops the frame loop and removes both window listeners. No frame
    /// runs after this returns; calling it again is a no-op.
    pub fn unmount(&mut self) {
        let runtime = match self.runtime.take() {
            Some(runtime) => runtime,
            None => return,
        };
        runtime.cancelled.set(true);
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(runtime.frame_handle.get());
            let _ = window.remove_event_listener_with_callback(
                "resize",
                runtime.resize_cb.as_ref().unchecked_ref(),
            );
            let _ = window.remove_event_listener_with_callback(
                "mousemove",
                runtime.pointer_cb.as_ref().unchecked_ref(),
            );
        }
        // Break the closure's self-reference so it is actually freed.
        runtime.frame_closure.borrow_mut().take();
    }

    /// Re-resolves the theme name and re-seeds the population with the new
    /// palette. Colors are baked in at seed time, so this is a full swap.
    pub fn set_theme(&mut self, theme: &str) {
        if let Some(sim) = &self.sim {
            let prefers_dark = web_sys::window()
                .map(|window| prefers_dark(&window))
                .unwrap_or(false);
            sim.borrow_mut().set_theme(Theme::resolve(theme, prefers_dark));
        }
    }

    pub fn particle_count(&self) -> usize {
        self.sim
            .as_ref()
            .map(|sim| sim.borrow().population())
            .unwrap_or(0)
    }

    /// Frames simulated so far. Stops advancing once unmounted.
    pub fn frame_count(&self) -> u32 {
        self.sim
            .as_ref()
            .map(|sim| sim.borrow().ticks() as u32)
            .unwrap_or(0)
    }

    pub fn is_running(&self) -> bool {
        self.runtime.is_some()
    }
}

/// Schedules the tick/render closure through `requestAnimationFrame`,
/// re-arming itself each frame until the cancellation flag flips.
fn start_frame_loop(
    context: CanvasRenderingContext2d,
    sim: Rc<RefCell<FieldSim>>,
    cancelled: Rc<Cell<bool>>,
    frame_handle: Rc<Cell<i32>>,
    debug: bool,
) -> Result<FrameClosure, JsValue> {
    let closure: FrameClosure = Rc::new(RefCell::new(None));
    let mut surface = CanvasSurface::new(context);

    let chain = Rc::clone(&closure);
    let frame_handle_in_loop = Rc::clone(&frame_handle);
    *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if cancelled.get() {
            chain.borrow_mut().take();
            return;
        }
        let _frame_span = if debug {
            Some(Timer::new("particle-field frame"))
        } else {
            None
        };
        {
            let mut sim = sim.borrow_mut();
            sim.tick();
            sim.render(&mut surface);
        }
        if let Some(window) = web_sys::window() {
            if let Some(cb) = chain.borrow().as_ref() {
                if let Ok(handle) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    frame_handle_in_loop.set(handle);
                }
            }
        }
    }) as Box<dyn FnMut()>));

    let window = web_sys::window().ok_or("no window")?;
    let first = {
        let cb = closure.borrow();
        let cb = cb.as_ref().ok_or("frame closure missing")?;
        window.request_animation_frame(cb.as_ref().unchecked_ref())?
    };
    frame_handle.set(first);
    Ok(closure)
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn prefers_dark(window: &Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}
