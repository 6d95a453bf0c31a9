//! Root page state: the "ask" / "celebrate" state machine, the evasive No
//! button and the delayed surprise reveal.

use std::convert::Infallible;

use crate::config::CardConfig;
use crate::hearts::{CelebrationParticle, generate_celebration};
use crate::rng::RandomSource;

pub const QUESTION: &str = "Will You Be My Valentine? 💖";
pub const ASK_MESSAGE: &str = "Every moment with you feels like a beautiful dream I never want to wake up from. \
                               You make my world brighter just by being in it. 🌸";
pub const YES_LABEL: &str = "Yes 😍";
pub const CELEBRATION_TITLE: &str = "Yay! You made my day 💕";
pub const CELEBRATION_MESSAGE: &str = "I love you more than words could ever say. You are my everything. 🥰";

pub const NO_MESSAGES: [&str; 8] = [
    "No 🙈",
    "Are you sure? 🥺",
    "Think again! 💕",
    "Pretty please? 🌹",
    "Don't break my heart 💔",
    "One more chance? 🥹",
    "Really?! 😢",
    "Just say yes! 😍",
];

/// Full width / height of the box the No button jumps around in (px).
pub const EVADE_RANGE_X: f64 = 300.0;
pub const EVADE_RANGE_Y: f64 = 200.0;

pub const PREVIEW_CACHE_BUST: &str = "?v=2";
/// 160x200 dark card with a "?" for a preview that fails to load.
pub const PREVIEW_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='160' height='200'%3E%3Crect width='160' height='200' fill='%23111'/%3E%3Ctext x='50%25' y='50%25' fill='%23666' text-anchor='middle' dy='.3em' font-size='14'%3E?%3C/text%3E%3C/svg%3E";

#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub src: String,
    pub rotation_deg: f64,
    pub caption: &'static str,
}

/// Polaroids shown under the question.
pub fn previews() -> Vec<Preview> {
    [(1, -6.0, "Our first spark ✨"), (3, 3.0, "Sunshine days 🌅"), (5, -2.0, "Coffee & us ☕")]
        .into_iter()
        .map(|(n, rotation_deg, caption)| Preview {
            src: format!("/memories/memory-{n}.jpg{PREVIEW_CACHE_BUST}"),
            rotation_deg,
            caption,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Asking,
    /// Terminal for the session.
    Celebrating,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Returned by the first (and only effective) acceptance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub reveal_after_ms: u32,
}

#[derive(Clone, Debug)]
pub struct PageController {
    phase: Phase,
    no_offset: Offset,
    no_message: usize,
    celebration: Vec<CelebrationParticle>,
    surprise_open: bool,
    // ms left until the surprise opens; None once revealed or before accept
    reveal_in: Option<u64>,
    reveal_delay_ms: u32,
    idle_hearts: usize,
    celebration_hearts: usize,
}

impl PageController {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            phase: Phase::Asking,
            no_offset: Offset::default(),
            no_message: 0,
            celebration: Vec::new(),
            surprise_open: false,
            reveal_in: None,
            reveal_delay_ms: config.surprise_delay_ms,
            idle_hearts: config.idle_hearts,
            celebration_hearts: config.celebration_hearts,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_accepted(&self) -> bool {
        self.phase == Phase::Celebrating
    }

    /// The carousel only exists once the answer is yes.
    pub fn carousel_mounted(&self) -> bool {
        self.is_accepted()
    }

    pub fn heart_count(&self) -> usize {
        if self.is_accepted() { self.celebration_hearts } else { self.idle_hearts }
    }

    pub fn no_offset(&self) -> Offset {
        self.no_offset
    }

    pub fn no_message_index(&self) -> usize {
        self.no_message
    }

    pub fn no_message(&self) -> &'static str {
        NO_MESSAGES[self.no_message]
    }

    pub fn celebration(&self) -> &[CelebrationParticle] {
        &self.celebration
    }

    pub fn surprise_open(&self) -> bool {
        self.surprise_open
    }

    pub fn reveal_pending(&self) -> bool {
        self.reveal_in.is_some()
    }

    /// Asking -> Celebrating. Any later call is a no-op and returns `None`.
    pub fn accept(&mut self, rng: &mut dyn RandomSource) -> Option<Accepted> {
        match self.accept_with(rng, |_| Ok::<_, Infallible>(())) {
            Ok(accepted) => accepted.map(|(a, ())| a),
            Err(never) => match never {},
        }
    }

    /// Like [`accept`](Self::accept), but `render` gets the burst particles
    /// first and the transition only happens if it succeeds. On error the page
    /// stays in `Asking` and a later accept can try again.
    pub fn accept_with<T, E>(
        &mut self,
        rng: &mut dyn RandomSource,
        render: impl FnOnce(&[CelebrationParticle]) -> Result<T, E>,
    ) -> Result<Option<(Accepted, T)>, E> {
        if self.phase == Phase::Celebrating {
            return Ok(None);
        }
        let particles = generate_celebration(rng);
        let rendered = render(&particles)?;
        self.phase = Phase::Celebrating;
        self.celebration = particles;
        self.reveal_in = Some(u64::from(self.reveal_delay_ms));
        Ok(Some((Accepted { reveal_after_ms: self.reveal_delay_ms }, rendered)))
    }

    /// Pointer or touch reached the No button: jump somewhere else and plead.
    pub fn no_hover(&mut self, rng: &mut dyn RandomSource) {
        self.no_offset = Offset {
            x: (rng.next_f64() - 0.5) * EVADE_RANGE_X,
            y: (rng.next_f64() - 0.5) * EVADE_RANGE_Y,
        };
        self.no_message = (self.no_message + 1) % NO_MESSAGES.len();
    }

    /// Let `ms` pass for the pending reveal. Returns true if the panel opened.
    pub fn elapse(&mut self, ms: u64) -> bool {
        match self.reveal_in {
            Some(left) if left > ms => {
                self.reveal_in = Some(left - ms);
                false
            }
            Some(_) => self.reveal_surprise(),
            None => false,
        }
    }

    /// The reveal timer fired. Opens the panel once; returns true if it did.
    pub fn reveal_surprise(&mut self) -> bool {
        if self.reveal_in.take().is_some() {
            self.surprise_open = true;
            true
        } else {
            false
        }
    }

    pub fn close_surprise(&mut self) {
        self.surprise_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{SequenceRandom, SplitMix64};

    fn page() -> PageController {
        PageController::new(&CardConfig::default())
    }

    #[test]
    fn fresh_page_is_asking() {
        let p = page();
        assert_eq!(p.phase(), Phase::Asking);
        assert!(!p.is_accepted());
        assert!(!p.carousel_mounted());
        assert!(!p.surprise_open());
        assert!(p.celebration().is_empty());
        assert_eq!(p.heart_count(), 12);
        assert_eq!(p.no_message(), "No 🙈");
    }

    #[test]
    fn accept_then_reveal_then_close() {
        let mut p = page();
        let mut rng = SplitMix64::seeded(5);
        assert_eq!(p.accept(&mut rng), Some(Accepted { reveal_after_ms: 1_200 }));
        assert!(p.is_accepted());
        assert!(p.carousel_mounted());
        assert_eq!(p.heart_count(), 30);
        assert!(!p.surprise_open());
        assert!(!p.elapse(1_199));
        assert!(p.elapse(1));
        assert!(p.surprise_open());
        p.close_surprise();
        assert!(!p.surprise_open());
        assert!(p.is_accepted());
        assert_eq!(p.phase(), Phase::Celebrating);
        // does not come back on its own
        assert!(!p.elapse(60_000));
        assert!(!p.reveal_surprise());
        assert!(!p.surprise_open());
    }

    #[test]
    fn second_accept_is_a_no_op() {
        let mut p = page();
        let mut rng = SplitMix64::seeded(11);
        assert!(p.accept(&mut rng).is_some());
        let first = p.celebration().to_vec();
        assert_eq!(first.len(), 30);
        assert_eq!(p.accept(&mut rng), None);
        assert_eq!(p.celebration(), first.as_slice());
        p.elapse(1_200);
        p.close_surprise();
        assert_eq!(p.accept(&mut rng), None);
        assert!(!p.reveal_pending());
    }

    #[test]
    fn failed_render_keeps_asking_and_allows_retry() {
        let mut p = page();
        let mut rng = SplitMix64::seeded(8);
        let seen = std::cell::Cell::new(0);
        let failed = p.accept_with(&mut rng, |particles| {
            seen.set(particles.len());
            Err::<(), _>("no dom")
        });
        assert_eq!(failed, Err("no dom"));
        assert_eq!(seen.get(), 30);
        assert_eq!(p.phase(), Phase::Asking);
        assert!(p.celebration().is_empty());
        assert!(!p.reveal_pending());
        assert!(!p.elapse(5_000));

        let ok = p.accept_with(&mut rng, |particles| Ok::<_, ()>(particles.len()));
        assert_eq!(ok, Ok(Some((Accepted { reveal_after_ms: 1_200 }, 30))));
        assert!(p.is_accepted());
        assert!(p.reveal_pending());
        assert_eq!(p.accept_with(&mut rng, |_| Ok::<_, ()>(())), Ok(None));
    }

    #[test]
    fn no_hover_never_accepts_and_cycles_messages() {
        let mut p = page();
        let mut rng = SplitMix64::seeded(2);
        for n in 1..=50usize {
            p.no_hover(&mut rng);
            assert!(!p.is_accepted());
            assert_eq!(p.no_message_index(), n % 8);
            let o = p.no_offset();
            assert!((-150.0..=150.0).contains(&o.x));
            assert!((-100.0..=100.0).contains(&o.y));
        }
    }

    #[test]
    fn no_offset_follows_random_draws() {
        let mut p = page();
        let mut rng = SequenceRandom::new(vec![0.0, 0.75]);
        p.no_hover(&mut rng);
        assert_eq!(p.no_offset(), Offset { x: -150.0, y: 50.0 });
        assert_eq!(p.no_message(), "Are you sure? 🥺");
    }

    #[test]
    fn previews_use_their_own_cache_suffix() {
        let p = previews();
        assert_eq!(p.len(), 3);
        assert_eq!(p[0].src, "/memories/memory-1.jpg?v=2");
        assert_eq!(p[1].src, "/memories/memory-3.jpg?v=2");
        assert_eq!(p[2].src, "/memories/memory-5.jpg?v=2");
    }
}
