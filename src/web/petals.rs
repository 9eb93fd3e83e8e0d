//! Canvas side of the falling petals: finds `#falling-effect`, keeps it sized
//! to the viewport and drives [`PetalField::frame`] from `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window, window};

use crate::error::{GreetingError, Result};
use crate::petals::{PetalField, PetalSurface};
use crate::random::page_rng;

pub const PETAL_CANVAS_ID: &str = "falling-effect";
/// Set on the canvas once a petal loop drives it.
pub const RUNNING_ATTR: &str = "data-petals-running";

impl PetalSurface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_petal(&mut self, x: f64, y: f64, angle_rad: f64, rx: f64, ry: f64, color: &str) {
        self.save();
        let _ = self.translate(x, y);
        let _ = self.rotate(angle_rad);
        self.set_fill_style_str(color);
        self.begin_path();
        let _ = self.ellipse(0.0, 0.0, rx, ry, 0.0, 0.0, std::f64::consts::TAU);
        self.fill();
        self.restore();
    }
}

struct PetalCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: PetalField,
}

impl PetalCanvas {
    fn fit(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field.resize(width, height);
    }
}

fn viewport(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// Start the petal animation. `Ok(false)` when the page has no petal canvas,
/// no 2D context, or the canvas already has a loop; nothing new is drawn then.
pub fn start_petals(win: &Window, doc: &Document, count: usize) -> Result<bool> {
    let Some(el) = doc.get_element_by_id(PETAL_CANVAS_ID) else {
        return Ok(false);
    };
    let canvas: HtmlCanvasElement = el
        .dyn_into()
        .map_err(|_| GreetingError::WrongElementType("#falling-effect"))?;
    if canvas.has_attribute(RUNNING_ATTR) {
        debug!("petals already running on #{PETAL_CANVAS_ID}");
        return Ok(false);
    }
    let Some(ctx) = canvas
        .get_context("2d")?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return Ok(false);
    };

    let (w, h) = viewport(win);
    let mut petals = PetalCanvas {
        canvas,
        ctx,
        field: PetalField::new(count, w, h, page_rng()),
    };
    petals.fit(w, h);
    petals.canvas.set_attribute(RUNNING_ATTR, "")?;
    debug!("petals: {} on {}x{}", count, w, h);
    let state = Rc::new(RefCell::new(petals));

    // Resize keeps petals where they are; they reset once they fall out.
    {
        let state = state.clone();
        let win_resize = win.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let (w, h) = viewport(&win_resize);
            state.borrow_mut().fit(w, h);
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_petal_loop(state);
    Ok(true)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_petal_loop(state: Rc<RefCell<PetalCanvas>>) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        {
            let mut st = state.borrow_mut();
            let PetalCanvas { ctx, field, .. } = &mut *st;
            field.frame(ctx);
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(cb)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
