//! "Our Moments Together" photo carousel.
//!
//! The model is a plain struct driven by navigation calls and timer ticks; the
//! view owns the DOM nodes and the auto-advance `Interval`, which it drops
//! (cancelling it) whenever the model says the timer must not run.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::config::DEFAULT_CAROUSEL_INTERVAL_MS;
use crate::dom;
use crate::error::CardResult;

pub const MEMORIES_BASE: &str = "/memories";
/// Appended to every gallery path so browsers drop 404s cached before the
/// assets were renamed.
pub const CACHE_BUST: &str = "?v=8";

pub const CAPTIONS: [&str; 9] = [
    "Us 💖",
    "Together 🥰",
    "Forever 🌅",
    "My love 🌹",
    "Always ☕",
    "More memories coming… 🖤",
    "To be continued… 📸",
    "Our next adventure 🗺️",
    "One more moment 💕",
];

/// Solid dark 800x600 rectangle shown when a gallery photo fails to load.
pub const GALLERY_PLACEHOLDER: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='800' height='600'%3E%3Crect width='800' height='600' fill='%23111'/%3E%3C/svg%3E";

/// Path for a 1-based gallery slot. Slot 7 is the only PNG, and the files
/// from slot 7 on are numbered one ahead of their slot.
pub fn photo_src(slot: usize) -> String {
    let file = match slot {
        1..=6 => format!("memory-{slot}.jpg"),
        7 => "memory-8.png".to_string(),
        8 => "memory-9.jpg".to_string(),
        _ => "memory-10.jpg".to_string(),
    };
    format!("{MEMORIES_BASE}/{file}{CACHE_BUST}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub src: String,
    pub caption: &'static str,
}

pub fn photos() -> Vec<Photo> {
    CAPTIONS
        .iter()
        .copied()
        .enumerate()
        .map(|(i, caption)| Photo { src: photo_src(i + 1), caption })
        .collect()
}

/// Each slot is rendered twice (main slide and thumbnail); failures are tracked
/// per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRole {
    Main,
    Thumbnail,
}

#[derive(Clone, Debug)]
pub struct Carousel {
    photos: Vec<Photo>,
    current: usize,
    paused: bool,
    visible: bool,
    interval_ms: u32,
    elapsed_ms: u64,
    failed_main: Vec<bool>,
    failed_thumb: Vec<bool>,
}

impl Carousel {
    pub fn new(interval_ms: u32) -> Self {
        Self::with_photos(photos(), interval_ms)
    }

    pub fn with_photos(photos: Vec<Photo>, interval_ms: u32) -> Self {
        let n = photos.len();
        Self {
            photos,
            current: 0,
            paused: false,
            visible: false,
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
            failed_main: vec![false; n],
            failed_thumb: vec![false; n],
        }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn caption(&self) -> Option<&'static str> {
        self.photos.get(self.current).map(|p| p.caption)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// The auto-advance timer runs only while shown, unpaused and non-empty.
    pub fn timer_armed(&self) -> bool {
        self.visible && !self.paused && !self.photos.is_empty()
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.elapsed_ms = 0;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.elapsed_ms = 0;
        }
    }

    /// Jump to any integer position, wrapping in both directions.
    pub fn go_to(&mut self, i: i64) {
        let n = self.photos.len() as i64;
        if n == 0 {
            return;
        }
        self.current = i.rem_euclid(n) as usize;
        self.elapsed_ms = 0;
    }

    pub fn next(&mut self) {
        self.go_to(self.current as i64 + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.current as i64 - 1);
    }

    /// Dot / thumbnail selection.
    pub fn select(&mut self, i: usize) {
        self.go_to(i as i64);
    }

    /// Let `ms` of wall time pass. Returns how many auto-advances happened.
    pub fn elapse(&mut self, ms: u64) -> usize {
        if !self.timer_armed() {
            return 0;
        }
        self.elapsed_ms += ms;
        let mut steps = 0;
        while self.elapsed_ms >= u64::from(self.interval_ms) {
            self.elapsed_ms -= u64::from(self.interval_ms);
            self.current = (self.current + 1) % self.photos.len();
            steps += 1;
        }
        steps
    }

    /// One firing of the interval timer.
    pub fn tick(&mut self) -> bool {
        self.elapse(u64::from(self.interval_ms)) > 0
    }

    /// Record a load failure. Returns true the first time for that element.
    pub fn image_failed(&mut self, slot: usize, role: ImageRole) -> bool {
        let flags = match role {
            ImageRole::Main => &mut self.failed_main,
            ImageRole::Thumbnail => &mut self.failed_thumb,
        };
        match flags.get_mut(slot) {
            Some(f) if !*f => {
                *f = true;
                true
            }
            _ => false,
        }
    }

    pub fn displayed_src(&self, slot: usize, role: ImageRole) -> Option<&str> {
        let failed = match role {
            ImageRole::Main => self.failed_main.get(slot)?,
            ImageRole::Thumbnail => self.failed_thumb.get(slot)?,
        };
        if *failed {
            Some(GALLERY_PLACEHOLDER)
        } else {
            self.photos.get(slot).map(|p| p.src.as_str())
        }
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(DEFAULT_CAROUSEL_INTERVAL_MS)
    }
}

// --- View -------------------------------------------------------------------

/// Input forwarded from the carousel DOM to whoever owns the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    Prev,
    Next,
    Select(usize),
    Hover(bool),
    ImageFailed(usize, ImageRole),
    Tick,
}

type EventSink = Rc<dyn Fn(CarouselEvent)>;

pub(crate) struct CarouselView {
    root: HtmlElement,
    slides: Vec<HtmlImageElement>,
    thumbs: Vec<(HtmlElement, HtmlImageElement)>,
    dots: Vec<HtmlElement>,
    caption: HtmlElement,
    sink: EventSink,
    timer: Option<Interval>,
    _listeners: Vec<EventListener>,
}

const ARROW_STYLE: &str = "position:absolute; top:50%; transform:translateY(-50%); z-index:10; min-width:44px; \
     min-height:44px; border-radius:9999px; border:1px solid rgba(0,0,0,0.1); background:rgba(255,255,255,0.8); \
     font-size:22px; cursor:pointer;";

impl CarouselView {
    pub(crate) fn mount(
        doc: &Document,
        parent: &HtmlElement,
        model: &Carousel,
        on_event: impl Fn(CarouselEvent) + 'static,
    ) -> CardResult<Self> {
        let sink: EventSink = Rc::new(on_event);
        let mut listeners = Vec::new();

        let root = dom::create(
            doc,
            "section",
            "width:100%; max-width:42rem; margin:0 auto; padding:0 12px; animation:vc-slide-up 0.8s ease-out both;",
        )?;
        dom::append_text(
            doc,
            &root,
            "h2",
            "font-family:cursive; font-size:2rem; text-align:center; margin:0 0 1rem;",
            "Our Moments Together 💫",
        )?;

        let stage = dom::create(
            doc,
            "div",
            "position:relative; overflow:hidden; border-radius:12px; box-shadow:0 10px 24px rgba(0,0,0,0.2); background:#fff;",
        )?;
        root.append_child(&stage)?;
        for (ty, hovering) in [("mouseenter", true), ("mouseleave", false)] {
            let sink = sink.clone();
            listeners.push(EventListener::new(&stage, ty, move |_| sink(CarouselEvent::Hover(hovering))));
        }

        let frame = dom::create(doc, "div", "position:relative; width:100%; padding-bottom:75%;")?;
        stage.append_child(&frame)?;
        let mut slides = Vec::with_capacity(model.len());
        for (i, photo) in model.photos().iter().enumerate() {
            let img = dom::create_image(
                doc,
                "position:absolute; inset:0; width:100%; height:100%; object-fit:cover; transition:opacity 0.7s;",
                &photo.src,
                photo.caption,
            )?;
            frame.append_child(&img)?;
            listeners.push(on_error(&img, &sink, i, ImageRole::Main));
            slides.push(img);
        }

        let overlay = dom::create(
            doc,
            "div",
            "position:absolute; left:0; right:0; bottom:0; padding:12px; background:linear-gradient(to top, rgba(0,0,0,0.5), transparent);",
        )?;
        let caption = dom::create(
            doc,
            "p",
            "margin:0; color:#fff; font-family:cursive; font-size:1.2rem; text-align:center; text-shadow:0 1px 3px rgba(0,0,0,0.6);",
        )?;
        overlay.append_child(&caption)?;
        stage.append_child(&overlay)?;

        for (label, glyph, side, ev) in [
            ("Previous slide", "‹", "left:8px;", CarouselEvent::Prev),
            ("Next slide", "›", "right:8px;", CarouselEvent::Next),
        ] {
            let btn = dom::create_text(doc, "button", &format!("{ARROW_STYLE} {side}"), glyph)?;
            btn.set_attribute("type", "button")?;
            btn.set_attribute("aria-label", label)?;
            stage.append_child(&btn)?;
            let sink = sink.clone();
            listeners.push(EventListener::new(&btn, "click", move |_| sink(ev)));
        }

        let dot_row = dom::create(
            doc,
            "div",
            "position:absolute; left:0; right:0; bottom:52px; display:flex; justify-content:center; gap:6px; z-index:10;",
        )?;
        stage.append_child(&dot_row)?;
        let mut dots = Vec::with_capacity(model.len());
        for i in 0..model.len() {
            let dot = dom::create(doc, "button", "height:10px; border:none; border-radius:9999px; cursor:pointer; transition:all 0.3s;")?;
            dot.set_attribute("type", "button")?;
            dot.set_attribute("aria-label", &format!("Go to slide {}", i + 1))?;
            dot_row.append_child(&dot)?;
            let sink = sink.clone();
            listeners.push(EventListener::new(&dot, "click", move |_| sink(CarouselEvent::Select(i))));
            dots.push(dot);
        }

        let strip = dom::create(
            doc,
            "div",
            "display:flex; flex-wrap:wrap; justify-content:center; gap:8px; margin-top:12px;",
        )?;
        root.append_child(&strip)?;
        let mut thumbs = Vec::with_capacity(model.len());
        for (i, photo) in model.photos().iter().enumerate() {
            let btn = dom::create(
                doc,
                "button",
                "padding:0; border-radius:8px; overflow:hidden; border:2px solid transparent; cursor:pointer; \
                 min-width:44px; min-height:44px; transition:all 0.3s; background:none;",
            )?;
            btn.set_attribute("type", "button")?;
            let img = dom::create_image(doc, "display:block; width:52px; height:52px; object-fit:cover;", &photo.src, photo.caption)?;
            btn.append_child(&img)?;
            strip.append_child(&btn)?;
            let click_sink = sink.clone();
            listeners.push(EventListener::new(&btn, "click", move |_| click_sink(CarouselEvent::Select(i))));
            listeners.push(on_error(&img, &sink, i, ImageRole::Thumbnail));
            thumbs.push((btn, img));
        }

        parent.append_child(&root)?;
        let mut view = Self {
            root,
            slides,
            thumbs,
            dots,
            caption,
            sink,
            timer: None,
            _listeners: listeners,
        };
        view.render(model);
        view.rearm(model);
        Ok(view)
    }

    pub(crate) fn render(&self, model: &Carousel) {
        dom::set_shown(&self.root, model.is_visible(), "block");
        let cur = model.current();
        for (i, slide) in self.slides.iter().enumerate() {
            dom::set_css(slide, "opacity", if i == cur { "1" } else { "0" });
        }
        self.caption.set_text_content(model.caption());
        for (i, dot) in self.dots.iter().enumerate() {
            let (width, bg) = if i == cur { ("24px", "#fff") } else { ("10px", "rgba(255,255,255,0.5)") };
            dom::set_css(dot, "width", width);
            dom::set_css(dot, "background", bg);
        }
        for (i, (btn, _)) in self.thumbs.iter().enumerate() {
            let active = i == cur;
            dom::set_css(btn, "border-color", if active { "#e91e63" } else { "transparent" });
            dom::set_css(btn, "opacity", if active { "1" } else { "0.6" });
            dom::set_css(btn, "transform", if active { "scale(1.1)" } else { "scale(1)" });
            let _ = btn.set_attribute("aria-current", if active { "true" } else { "false" });
        }
    }

    /// Drop any running timer and start a fresh one if the model allows it, so
    /// the next advance is a full interval after the latest change.
    pub(crate) fn rearm(&mut self, model: &Carousel) {
        self.timer = None;
        if model.timer_armed() {
            let sink = self.sink.clone();
            self.timer = Some(Interval::new(model.interval_ms(), move || sink(CarouselEvent::Tick)));
        }
    }

    pub(crate) fn show_fallback(&self, slot: usize, role: ImageRole, src: &str) {
        let img = match role {
            ImageRole::Main => self.slides.get(slot),
            ImageRole::Thumbnail => self.thumbs.get(slot).map(|(_, img)| img),
        };
        if let Some(img) = img {
            img.set_src(src);
        }
    }
}

impl Drop for CarouselView {
    fn drop(&mut self) {
        self.timer = None;
        self.root.remove();
    }
}

fn on_error(img: &HtmlImageElement, sink: &EventSink, slot: usize, role: ImageRole) -> EventListener {
    let sink = sink.clone();
    EventListener::new(img, "error", move |_| sink(CarouselEvent::ImageFailed(slot, role)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(interval: u32) -> Carousel {
        let mut c = Carousel::new(interval);
        c.set_visible(true);
        c
    }

    #[test]
    fn manifest_paths_are_exact() {
        assert_eq!(photo_src(1), "/memories/memory-1.jpg?v=8");
        assert_eq!(photo_src(6), "/memories/memory-6.jpg?v=8");
        assert_eq!(photo_src(7), "/memories/memory-8.png?v=8");
        assert_eq!(photo_src(8), "/memories/memory-9.jpg?v=8");
        assert_eq!(photo_src(9), "/memories/memory-10.jpg?v=8");
        let all = photos();
        assert_eq!(all.len(), 9);
        assert_eq!(all[6].caption, "To be continued… 📸");
    }

    #[test]
    fn go_to_wraps_any_integer() {
        let mut c = shown(3_500);
        for i in -50i64..50 {
            c.go_to(i);
            assert!(c.current() < c.len());
            assert_eq!(c.current() as i64, i.rem_euclid(9));
        }
        c.go_to(i64::MIN);
        assert!(c.current() < c.len());
        c.go_to(i64::MAX);
        assert!(c.current() < c.len());
    }

    #[test]
    fn next_then_prev_round_trips() {
        let mut c = shown(3_500);
        for k in 0..c.len() {
            c.select(k);
            c.next();
            c.prev();
            assert_eq!(c.current(), k);
        }
        c.select(0);
        c.prev();
        assert_eq!(c.current(), 8);
    }

    #[test]
    fn timer_advances_every_interval() {
        let mut c = shown(3_500);
        assert_eq!(c.elapse(3_499), 0);
        assert_eq!(c.elapse(1), 1);
        assert_eq!(c.current(), 1);
        assert_eq!(c.elapse(3_500 * 9), 9);
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn paused_carousel_never_auto_advances() {
        let mut c = shown(3_500);
        c.select(4);
        c.set_paused(true);
        assert!(!c.timer_armed());
        for _ in 0..12 {
            assert!(!c.tick());
        }
        assert_eq!(c.elapse(3_500 * 20), 0);
        assert_eq!(c.current(), 4);
    }

    #[test]
    fn hidden_carousel_has_no_timer() {
        let mut c = Carousel::new(3_500);
        assert!(!c.timer_armed());
        assert_eq!(c.elapse(100_000), 0);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn manual_navigation_works_while_paused_and_rearms() {
        let mut c = shown(3_500);
        c.elapse(3_000);
        c.next();
        // the interval restarts from the jump
        assert_eq!(c.elapse(3_000), 0);
        assert_eq!(c.current(), 1);
        c.set_paused(true);
        c.select(5);
        assert_eq!(c.current(), 5);
        c.set_paused(false);
        assert_eq!(c.elapse(3_499), 0);
        assert_eq!(c.elapse(1), 1);
        assert_eq!(c.current(), 6);
    }

    #[test]
    fn slot_seven_failure_uses_placeholder_only_for_that_element() {
        let mut c = shown(3_500);
        assert!(c.image_failed(6, ImageRole::Main));
        assert!(!c.image_failed(6, ImageRole::Main));
        assert_eq!(c.displayed_src(6, ImageRole::Main), Some(GALLERY_PLACEHOLDER));
        assert_eq!(c.displayed_src(6, ImageRole::Thumbnail), Some("/memories/memory-8.png?v=8"));
        assert_eq!(c.displayed_src(5, ImageRole::Main), Some("/memories/memory-6.jpg?v=8"));
        c.select(6);
        assert_eq!(c.caption(), Some("To be continued… 📸"));
        assert_eq!(c.current(), 6);
        assert!(!c.image_failed(42, ImageRole::Main));
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = Carousel::with_photos(Vec::new(), 3_500);
        c.set_visible(true);
        c.next();
        c.go_to(-3);
        assert_eq!(c.current(), 0);
        assert_eq!(c.caption(), None);
        assert!(!c.timer_armed());
    }
}
