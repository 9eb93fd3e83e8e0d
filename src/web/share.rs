use js_sys::{Function, Object, Promise, Reflect};
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Navigator, window};

use super::{alert, with_page};
use crate::error::{GreetingError, Result};
use crate::share::{SharePlatform, ShareAction, plan_share};

const MSG_COPIED_OPEN_APP: &str = "Đã sao chép! Mở Zalo để gửi ngay.";
const MSG_COPIED: &str = "Đã sao chép liên kết!";

fn has(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

pub fn share_to(platform: &str) -> Result<()> {
    let platform: SharePlatform = match platform.parse() {
        Ok(p) => p,
        Err(e) => {
            warn!("{e}");
            return Ok(());
        }
    };
    let win = window().ok_or(GreetingError::NoWindow)?;
    let nav = win.navigator();
    let page_url = win.location().href()?;
    let user_agent = nav.user_agent()?;
    let (title, text) = with_page(|p| (p.config.share_title.clone(), p.config.share_text.clone()));

    match plan_share(platform, &page_url, &text, &user_agent, has(&nav, "share")) {
        ShareAction::Native => native_share(&nav, &title, &text, &page_url)?,
        ShareAction::OpenTab(url) => open_tab(&url)?,
        ShareAction::CopyThenLaunchApp { text, app_url } => {
            copy_text(&nav, &text);
            alert(&win, MSG_COPIED_OPEN_APP);
            win.location().set_href(app_url)?;
        }
        ShareAction::CopyThenOpenTab { text, url } => {
            copy_text(&nav, &text);
            alert(&win, MSG_COPIED);
            open_tab(url)?;
        }
    }
    Ok(())
}

fn open_tab(url: &str) -> Result<()> {
    let win = window().ok_or(GreetingError::NoWindow)?;
    debug!("share: opening {url}");
    win.open_with_url_and_target(url, "_blank")?;
    Ok(())
}

fn native_share(nav: &Navigator, title: &str, text: &str, url: &str) -> Result<()> {
    let data = Object::new();
    Reflect::set(&data, &"title".into(), &title.into())?;
    Reflect::set(&data, &"text".into(), &text.into())?;
    Reflect::set(&data, &"url".into(), &url.into())?;
    let share: Function = Reflect::get(nav, &"share".into())?.dyn_into()?;
    let promise: Promise = share.call1(nav, &data)?.dyn_into()?;
    // Cancelling the share sheet rejects the promise; that is not an error for us.
    let on_reject = Closure::once(move |err: JsValue| {
        info!("share failed: {}", GreetingError::from(err));
    });
    let _ = promise.catch(&on_reject);
    on_reject.forget();
    Ok(())
}

fn copy_text(nav: &Navigator, text: &str) {
    let clipboard = match Reflect::get(nav, &"clipboard".into()) {
        Ok(c) if !c.is_undefined() => c,
        _ => {
            warn!("clipboard unavailable");
            return;
        }
    };
    let write = Reflect::get(&clipboard, &"writeText".into())
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok());
    match write {
        Some(write) => {
            if let Err(e) = write.call1(&clipboard, &JsValue::from_str(text)) {
                warn!("clipboard write failed: {}", GreetingError::from(e));
            }
        }
        None => warn!("clipboard.writeText unavailable"),
    }
}
