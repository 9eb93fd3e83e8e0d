//! Social sharing shortcuts: which URL to open (or which native path to take)
//! for a given platform and user agent.

use std::str::FromStr;

pub const ZALO_WEB_URL: &str = "https://chat.zalo.me/";
pub const ZALO_APP_URL: &str = "zalo://";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    WhatsApp,
    Zalo,
}

impl FromStr for SharePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facebook" => Ok(SharePlatform::Facebook),
            "whatsapp" => Ok(SharePlatform::WhatsApp),
            "zalo" => Ok(SharePlatform::Zalo),
            other => Err(format!("unknown share platform '{other}'")),
        }
    }
}

/// What the browser glue should do for a share request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareAction {
    /// Hand off to `navigator.share`.
    Native,
    /// Open the URL in a new tab.
    OpenTab(String),
    /// Copy `text` to the clipboard, tell the user, then open the Zalo app.
    CopyThenLaunchApp { text: String, app_url: &'static str },
    /// Copy `text` to the clipboard, tell the user, then open the web client.
    CopyThenOpenTab { text: String, url: &'static str },
}

fn ua_matches(user_agent: &str, needles: &[&str]) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    needles.iter().any(|n| ua.contains(n))
}

/// Phones and tablets that get the native share sheet.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    ua_matches(user_agent, &["android", "iphone", "ipad", "ipod"])
}

fn is_zalo_app_user_agent(user_agent: &str) -> bool {
    ua_matches(user_agent, &["android", "iphone"])
}

pub fn share_url(platform: SharePlatform, page_url: &str, text: &str) -> Option<String> {
    match platform {
        SharePlatform::Facebook => Some(format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            urlencoding::encode(page_url)
        )),
        SharePlatform::WhatsApp => Some(format!(
            "https://api.whatsapp.com/send?text={}",
            urlencoding::encode(&format!("{text}{page_url}"))
        )),
        SharePlatform::Zalo => None,
    }
}

pub fn plan_share(
    platform: SharePlatform,
    page_url: &str,
    text: &str,
    user_agent: &str,
    native_share_available: bool,
) -> ShareAction {
    if native_share_available && is_mobile_user_agent(user_agent) {
        return ShareAction::Native;
    }
    match platform {
        SharePlatform::Zalo if is_zalo_app_user_agent(user_agent) => ShareAction::CopyThenLaunchApp {
            text: format!("{text}{page_url}"),
            app_url: ZALO_APP_URL,
        },
        SharePlatform::Zalo => ShareAction::CopyThenOpenTab {
            text: format!("{text}{page_url}"),
            url: ZALO_WEB_URL,
        },
        other => ShareAction::OpenTab(share_url(other, page_url, text).unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/130.0";
    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";

    #[test]
    fn parse_platforms() {
        assert_eq!("facebook".parse::<SharePlatform>(), Ok(SharePlatform::Facebook));
        assert_eq!(" WhatsApp ".parse::<SharePlatform>(), Ok(SharePlatform::WhatsApp));
        assert_eq!("zalo".parse::<SharePlatform>(), Ok(SharePlatform::Zalo));
        assert!("myspace".parse::<SharePlatform>().is_err());
    }

    #[test]
    fn facebook_on_desktop() {
        let url = "https://tet.example.com/?from=a b";
        let action = plan_share(SharePlatform::Facebook, url, "hi", DESKTOP, true);
        assert_eq!(
            action,
            ShareAction::OpenTab(
                "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Ftet.example.com%2F%3Ffrom%3Da%20b"
                    .to_string()
            )
        );
    }

    #[test]
    fn whatsapp_encodes_text_and_url() {
        let url = share_url(SharePlatform::WhatsApp, "https://x.y/", "Chúc! ").unwrap();
        assert_eq!(
            url,
            "https://api.whatsapp.com/send?text=Ch%C3%BAc%21%20https%3A%2F%2Fx.y%2F"
        );
    }

    #[test]
    fn mobile_with_native_share_uses_it() {
        let action = plan_share(SharePlatform::Facebook, "https://x.y/", "t", IPHONE, true);
        assert_eq!(action, ShareAction::Native);
    }

    #[test]
    fn zalo_paths() {
        assert_eq!(
            plan_share(SharePlatform::Zalo, "u", "t ", IPHONE, false),
            ShareAction::CopyThenLaunchApp {
                text: "t u".into(),
                app_url: ZALO_APP_URL
            }
        );
        assert_eq!(
            plan_share(SharePlatform::Zalo, "u", "t ", DESKTOP, false),
            ShareAction::CopyThenOpenTab {
                text: "t u".into(),
                url: ZALO_WEB_URL
            }
        );
    }

    #[test]
    fn ipad_is_mobile_but_not_zalo_app() {
        let ipad = "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)";
        assert!(is_mobile_user_agent(ipad));
        assert!(matches!(
            plan_share(SharePlatform::Zalo, "u", "t", ipad, false),
            ShareAction::CopyThenOpenTab { .. }
        ));
    }
}
