//! Lucky envelope ("lì xì") state machine and the wish catalog.
//!
//! The controller only tracks state; the browser glue applies the visual
//! effects (classes, timers, confetti, vibration) based on what each
//! transition returns.

use fastrand::Rng;

use crate::random::pick;

pub const ENVELOPE_TITLE: &str = "Chúc Mừng Năm Mới!";

pub const WISHES: &[&str] = &[
    "Tiền vào như nước sông Đà\nTiền ra nhỏ giọt như cà phê phin",
    "Sống khỏe như trâu\nSống dai như đỉa\nSống lâu như rùa",
    "Chúc bạn 12 tháng phú quý\n365 ngày phát tài\n8760 giờ sung túc",
    "Hay ăn chóng béo\nTiền nhiều như kẹo\nTình chặt như keo",
    "Vạn sự như ý\nTỷ sự như mơ\nTriệu triệu bất ngờ",
    "Năm mới năm me\nGia đình mạnh khỏe\nMọi người tươi trẻ",
    "Tân niên tân phúc tân phú quý\nTấn tài tấn lộc tấn bình an",
    "Cầu được ước thấy\nXuân mới vui vầy\nCái gì cũng hay!",
    "Lộc biếc, mai vàng, xuân hạnh phúc\nĐời vui, sức khỏe, tết an khang",
    "Tiền đầy túi\nTim đầy tình\nXăng đầy bình\nGạo đầy lu",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeState {
    Closed,
    Open,
}

pub struct EnvelopeController {
    catalog: &'static [&'static str],
    state: EnvelopeState,
    wish: Option<&'static str>,
    closing: bool,
}

impl Default for EnvelopeController {
    fn default() -> Self {
        Self::new(WISHES)
    }
}

impl EnvelopeController {
    pub fn new(catalog: &'static [&'static str]) -> Self {
        Self {
            catalog,
            state: EnvelopeState::Closed,
            wish: None,
            closing: false,
        }
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == EnvelopeState::Open
    }

    /// Wish currently on display, if any.
    pub fn wish(&self) -> Option<&'static str> {
        self.wish
    }

    /// Closed -> Open with a freshly drawn wish. `None` when already open.
    pub fn open(&mut self, rng: &mut Rng) -> Option<&'static str> {
        if self.is_open() {
            return None;
        }
        let wish = self.draw(rng)?;
        self.state = EnvelopeState::Open;
        Some(wish)
    }

    /// Start closing. Returns false when there is nothing to close or a close
    /// is already pending; the state flips in [`finish_reset`](Self::finish_reset).
    pub fn reset(&mut self) -> bool {
        if !self.is_open() || self.closing {
            return false;
        }
        self.closing = true;
        true
    }

    pub fn finish_reset(&mut self) {
        if self.closing {
            self.closing = false;
            self.state = EnvelopeState::Closed;
        }
    }

    /// New wish without leaving the open state (shake while open).
    pub fn reroll(&mut self, rng: &mut Rng) -> Option<&'static str> {
        if !self.is_open() {
            return None;
        }
        self.draw(rng)
    }

    fn draw(&mut self, rng: &mut Rng) -> Option<&'static str> {
        let wish = pick(rng, self.catalog).copied()?;
        self.wish = Some(wish);
        Some(wish)
    }
}

/// Escape a wish for `innerHTML` and turn line breaks into `<br>`.
pub fn wish_to_html(wish: &str) -> String {
    let mut out = String::with_capacity(wish.len() + 16);
    for c in wish.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let env = EnvelopeController::default();
        assert_eq!(env.state(), EnvelopeState::Closed);
        assert!(env.wish().is_none());
    }

    #[test]
    fn open_twice_transitions_once() {
        let mut rng = Rng::with_seed(1);
        let mut env = EnvelopeController::default();
        let first = env.open(&mut rng);
        assert!(first.is_some());
        assert!(env.open(&mut rng).is_none());
        assert!(env.is_open());
        assert_eq!(env.wish(), first);
    }

    #[test]
    fn reset_when_closed_is_noop() {
        let mut env = EnvelopeController::default();
        assert!(!env.reset());
        env.finish_reset();
        assert_eq!(env.state(), EnvelopeState::Closed);
    }

    #[test]
    fn reset_completes_after_finish() {
        let mut rng = Rng::with_seed(2);
        let mut env = EnvelopeController::default();
        env.open(&mut rng);
        assert!(env.reset());
        // still open until the delayed close lands
        assert!(env.is_open());
        assert!(!env.reset());
        env.finish_reset();
        assert_eq!(env.state(), EnvelopeState::Closed);
        assert!(env.open(&mut rng).is_some());
    }

    #[test]
    fn reroll_only_while_open() {
        let mut rng = Rng::with_seed(3);
        let mut env = EnvelopeController::default();
        assert!(env.reroll(&mut rng).is_none());
        env.open(&mut rng);
        let w = env.reroll(&mut rng).unwrap();
        assert!(WISHES.contains(&w));
        assert_eq!(env.wish(), Some(w));
        assert!(env.is_open());
    }

    #[test]
    fn wishes_come_from_catalog() {
        let mut rng = Rng::with_seed(4);
        let mut env = EnvelopeController::default();
        env.open(&mut rng);
        for _ in 0..200 {
            assert!(WISHES.contains(&env.reroll(&mut rng).unwrap()));
        }
    }

    #[test]
    fn selection_is_uniform_over_catalog() {
        const DRAWS: usize = 20_000;
        let mut rng = Rng::with_seed(2026);
        let mut env = EnvelopeController::default();
        env.open(&mut rng);
        let mut counts = vec![0usize; WISHES.len()];
        for _ in 0..DRAWS {
            let w = env.reroll(&mut rng).unwrap();
            let idx = WISHES.iter().position(|c| *c == w).unwrap();
            counts[idx] += 1;
        }
        let expected = DRAWS / WISHES.len();
        let tolerance = expected / 10;
        for (idx, n) in counts.iter().enumerate() {
            assert!(
                n.abs_diff(expected) <= tolerance,
                "wish {} drawn {} times, expected {} +/- {}",
                idx,
                n,
                expected,
                tolerance
            );
        }
    }

    #[test]
    fn single_wish_catalog() {
        static ONE: &[&str] = &["Happy New Year"];
        let mut rng = Rng::with_seed(5);
        let mut env = EnvelopeController::new(ONE);
        let w = env.open(&mut rng).unwrap();
        assert_eq!(wish_to_html(w), "Happy New Year");
    }

    #[test]
    fn empty_catalog_never_opens() {
        static NONE: &[&str] = &[];
        let mut env = EnvelopeController::new(NONE);
        assert!(env.open(&mut Rng::with_seed(6)).is_none());
        assert_eq!(env.state(), EnvelopeState::Closed);
    }

    #[test]
    fn html_conversion() {
        assert_eq!(wish_to_html("a\nb\nc"), "a<br>b<br>c");
        assert_eq!(wish_to_html("<b>&"), "&lt;b&gt;&amp;");
    }
}
