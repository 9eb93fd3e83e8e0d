//! Device motion: permission handling, attaching the `devicemotion` stream and
//! reacting to detected shakes.

use js_sys::{Function, Promise, Reflect};
use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DeviceMotionEvent, ScrollBehavior, ScrollIntoViewOptions, Window, window};

use super::{alert, as_html, envelope, set_timeout, with_page};
use crate::error::{GreetingError, Result};
use crate::shake::AccelSample;

const ENABLE_BUTTON_ID: &str = "btn-enable-shake";
const LUCKY_SECTION_ID: &str = "lucky";
const SHAKING_CLASS: &str = "shaking";

const MSG_ENABLED: &str = "Đã bật tính năng Lắc điện thoại! 📳";
const MSG_DENIED: &str = "Bạn đã từ chối quyền cảm biến. Hãy bật lại trong cài đặt Safari.";
const MSG_NOT_NEEDED: &str = "Thiết bị của bạn không cần cấp quyền hoặc không hỗ trợ.";

/// `DeviceMotionEvent` constructor and its `requestPermission` function, on
/// platforms that gate sensor access behind an explicit grant.
fn permission_api(win: &Window) -> Option<(JsValue, Function)> {
    let ctor = Reflect::get(win, &JsValue::from_str("DeviceMotionEvent")).ok()?;
    if ctor.is_undefined() {
        return None;
    }
    let request = Reflect::get(&ctor, &JsValue::from_str("requestPermission")).ok()?;
    request.dyn_into::<Function>().ok().map(|f| (ctor, f))
}

/// Attach the sensor stream right away unless the platform wants a grant first.
pub fn init() -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    if permission_api(&win).is_some() {
        debug!("motion sensor waits for an explicit permission request");
        return Ok(());
    }
    if Reflect::has(&win, &JsValue::from_str("ondevicemotion")).unwrap_or(false) {
        attach(&win)?;
    } else {
        debug!("no devicemotion support");
    }
    Ok(())
}

pub fn request_permission() -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    let Some((ctor, request)) = permission_api(&win) else {
        alert(&win, MSG_NOT_NEEDED);
        return Ok(());
    };
    let promise: Promise = request.call0(&ctor)?.dyn_into()?;

    let on_answer = Closure::once(move |answer: JsValue| {
        let Some(win) = window() else { return };
        if answer.as_string().as_deref() == Some("granted") {
            if let Err(e) = attach(&win) {
                warn!("could not attach motion listener: {e}");
                return;
            }
            alert(&win, MSG_ENABLED);
            hide_enable_button(&win);
        } else {
            info!("motion permission: {:?}", answer.as_string());
            alert(&win, MSG_DENIED);
        }
    });
    let on_error = Closure::once(move |err: JsValue| {
        error!("motion permission request failed: {}", GreetingError::from(err));
    });
    let _ = promise.then2(&on_answer, &on_error);
    on_answer.forget();
    on_error.forget();
    Ok(())
}

fn hide_enable_button(win: &Window) {
    let Some(doc) = win.document() else { return };
    if let Some(btn) = doc.get_element_by_id(ENABLE_BUTTON_ID) {
        if let Ok(btn) = as_html(btn, "#btn-enable-shake") {
            let _ = btn.style().set_property("display", "none");
        }
    }
}

fn attach(win: &Window) -> Result<()> {
    if with_page(|p| std::mem::replace(&mut p.motion_attached, true)) {
        return Ok(());
    }
    let closure = Closure::wrap(Box::new(move |evt: DeviceMotionEvent| {
        let Some(acc) = evt.acceleration_including_gravity() else {
            return;
        };
        let sample = AccelSample::from_axes(acc.x(), acc.y(), acc.z());
        let now = js_sys::Date::now();
        if with_page(|p| p.shake.sample(sample, now)) {
            on_shake();
        }
    }) as Box<dyn FnMut(_)>);
    if let Err(e) =
        win.add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref())
    {
        with_page(|p| p.motion_attached = false);
        return Err(e.into());
    }
    closure.forget();
    info!(
        "devicemotion listener attached (threshold {})",
        with_page(|p| p.shake.threshold())
    );
    Ok(())
}

fn on_shake() {
    info!("shake detected");
    let Some(win) = window() else { return };
    let Some(doc) = win.document() else { return };

    let (class_ms, open_delay, open) = with_page(|p| {
        (
            p.config.shake_class_ms,
            p.config.shake_open_delay_ms,
            p.envelope.is_open(),
        )
    });

    if let Some(body) = doc.body() {
        let _ = body.class_list().add_1(SHAKING_CLASS);
        set_timeout(&win, class_ms, move || {
            let _ = body.class_list().remove_1(SHAKING_CLASS);
        });
    }

    if open {
        if let Err(e) = envelope::reroll() {
            warn!("shake reroll failed: {e}");
        }
        return;
    }
    if let Some(section) = doc.get_element_by_id(LUCKY_SECTION_ID) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        section.scroll_into_view_with_scroll_into_view_options(&opts);
    }
    set_timeout(&win, open_delay, || {
        if let Err(e) = envelope::open() {
            warn!("shake open failed: {e}");
        }
    });
}
