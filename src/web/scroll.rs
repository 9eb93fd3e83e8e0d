//! Hero parallax and reveal-on-scroll.

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::error::Result;
use crate::scroll::{
    REVEAL_CLASS, REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD, parallax_css,
};

const HERO_SELECTOR: &str = ".hero-section";

pub fn start_parallax(win: &Window, factor: f64) -> Result<()> {
    let win_scroll = win.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let Some(doc) = win_scroll.document() else { return };
        let Some(hero) = doc
            .query_selector(HERO_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let scrolled = win_scroll.scroll_y().unwrap_or(0.0);
        let _ = hero
            .style()
            .set_property("background-position-y", &parallax_css(scrolled, factor));
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn reveal_targets(doc: &Document) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(REVEAL_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Add the reveal class to each target the first time it scrolls into view.
/// Without `IntersectionObserver` everything is revealed up front.
pub fn start_reveal(doc: &Document) {
    let targets = reveal_targets(doc);
    if targets.is_empty() {
        return;
    }
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1(REVEAL_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    opts.set_root_margin(REVEAL_ROOT_MARGIN);
    match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &opts) {
        Ok(observer) => {
            for el in &targets {
                observer.observe(el);
            }
            closure.forget();
            debug!("observing {} reveal targets", targets.len());
        }
        Err(_) => {
            warn!("IntersectionObserver unavailable, revealing everything");
            for el in &targets {
                let _ = el.class_list().add_1(REVEAL_CLASS);
            }
        }
    }
}
