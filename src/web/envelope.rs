//! DOM side of the lucky envelope.

use log::{debug, info};
use web_sys::{Document, Element, window};

use super::{Buzz, confetti, query, set_timeout, vibrate, with_page};
use crate::envelope::{ENVELOPE_TITLE, wish_to_html};
use crate::error::{GreetingError, Result};

const ENVELOPE_SELECTOR: &str = ".red-envelope";
const PANEL_SELECTOR: &str = ".lucky-message";
const MESSAGE_SELECTOR: &str = ".lucky-message p";
const TITLE_SELECTOR: &str = ".lucky-message h3";

const OPEN_BUZZ: Buzz = Buzz::Pattern(&[100, 50, 100]);
const REROLL_BUZZ: Buzz = Buzz::Single(200);

struct EnvelopeDom {
    envelope: Element,
    panel: Element,
    message: Element,
    title: Element,
}

impl EnvelopeDom {
    fn find(doc: &Document) -> Result<Self> {
        Ok(Self {
            envelope: query(doc, ENVELOPE_SELECTOR)?,
            panel: query(doc, PANEL_SELECTOR)?,
            message: query(doc, MESSAGE_SELECTOR)?,
            title: query(doc, TITLE_SELECTOR)?,
        })
    }
}

/// Confetti plus vibration, played whenever a wish is revealed.
fn celebrate(buzz: Buzz) {
    let Some(win) = window() else { return };
    confetti::burst();
    vibrate(&win, buzz);
}

pub fn open() -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    let doc = win.document().ok_or(GreetingError::NoDocument)?;
    let dom = EnvelopeDom::find(&doc)?;

    let Some((wish, delay)) =
        with_page(|p| p.envelope.open(&mut p.rng).map(|w| (w, p.config.reveal_delay_ms)))
    else {
        debug!("envelope already open");
        return Ok(());
    };
    info!("envelope opened");

    dom.envelope.class_list().add_1("open")?;
    dom.message.set_inner_html(&wish_to_html(wish));
    dom.title.set_text_content(Some(ENVELOPE_TITLE));
    dom.panel.class_list().remove_1("hidden")?;

    let panel = dom.panel;
    set_timeout(&win, delay, move || {
        let _ = panel.class_list().add_1("show");
        celebrate(OPEN_BUZZ);
    });
    Ok(())
}

pub fn reset() -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    let doc = win.document().ok_or(GreetingError::NoDocument)?;
    let dom = EnvelopeDom::find(&doc)?;

    let Some(delay) = with_page(|p| p.envelope.reset().then_some(p.config.reveal_delay_ms)) else {
        return Ok(());
    };

    dom.panel.class_list().remove_1("show")?;
    let EnvelopeDom {
        envelope, panel, ..
    } = dom;
    set_timeout(&win, delay, move || {
        let _ = panel.class_list().add_1("hidden");
        let _ = envelope.class_list().remove_1("open");
        with_page(|p| p.envelope.finish_reset());
        debug!("envelope closed");
    });
    Ok(())
}

/// Shake while open: fade the message out and back in with a new wish.
pub fn reroll() -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    let doc = win.document().ok_or(GreetingError::NoDocument)?;
    let dom = EnvelopeDom::find(&doc)?;
    let delay = with_page(|p| p.config.reveal_delay_ms);

    dom.panel.class_list().remove_1("show")?;
    let EnvelopeDom { panel, message, .. } = dom;
    set_timeout(&win, delay, move || {
        let Some(wish) = with_page(|p| p.envelope.reroll(&mut p.rng)) else {
            return;
        };
        message.set_inner_html(&wish_to_html(wish));
        let _ = panel.class_list().add_1("show");
        celebrate(REROLL_BUZZ);
    });
    Ok(())
}
