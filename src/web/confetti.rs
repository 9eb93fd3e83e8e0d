use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window, window};

use super::{as_html, set_timeout, with_page};
use crate::confetti::{CONFETTI_SIZE_PX, ConfettiPiece, plan_burst};
use crate::error::Result;

const ANCHOR_SELECTOR: &str = ".lucky-money";

/// Fire-and-forget burst from the centre of the envelope. Never fails the caller.
pub fn burst() {
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };
    let Some(anchor) = doc.query_selector(ANCHOR_SELECTOR).ok().flatten() else {
        debug!("confetti skipped: {ANCHOR_SELECTOR} missing");
        return;
    };
    let (pieces, duration_ms) = with_page(|p| {
        let pieces = plan_burst(&mut p.rng, p.config.confetti_count, p.config.confetti_spread_px);
        (pieces, p.config.confetti_duration_ms)
    });
    for piece in &pieces {
        if let Err(e) = spawn_piece(&win, &doc, &anchor, piece, duration_ms) {
            debug!("confetti piece dropped: {e}");
        }
    }
}

fn spawn_piece(
    win: &Window,
    doc: &Document,
    anchor: &Element,
    piece: &ConfettiPiece,
    duration_ms: i32,
) -> Result<()> {
    let el = as_html(doc.create_element("div")?, "confetti")?;
    let style = el.style();
    let size = format!("{CONFETTI_SIZE_PX}px");
    style.set_property("position", "absolute")?;
    style.set_property("width", &size)?;
    style.set_property("height", &size)?;
    style.set_property("background-color", piece.color)?;
    style.set_property("left", "50%")?;
    style.set_property("top", "50%")?;
    style.set_property("transition", &format!("all {duration_ms}ms ease-out"))?;
    anchor.append_child(&el)?;

    // Set the end state on the next frame so the transition runs.
    let transform = piece.transform();
    let fly = Closure::once_into_js(move || {
        let _ = style.set_property("transform", &transform);
        let _ = style.set_property("opacity", "0");
    });
    win.request_animation_frame(fly.unchecked_ref())?;

    set_timeout(win, duration_ms, move || el.remove());
    Ok(())
}
