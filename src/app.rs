//! Mounts the card into the page and routes DOM events into the models.
//!
//! The mounted card lives in a thread-local slot. Every listener and timer
//! callback goes through [`with_card`], so a callback that fires after
//! [`stop`] finds the slot empty and does nothing.

use std::cell::RefCell;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::audio::{AudioCommand, AudioToggle, MusicToggleView};
use crate::carousel::{Carousel, CarouselEvent, CarouselView};
use crate::config::CardConfig;
use crate::dom;
use crate::error::{CardError, CardResult};
use crate::hearts::{self, HeartField, HeartFieldView};
use crate::page::{self, PageController};
use crate::rng::{RandomSource, SplitMix64};
use crate::surprise::SurprisePanelView;

thread_local! {
    static CARD: RefCell<Option<Card>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted card. `None` if nothing is mounted or the card
/// is already borrowed further up the stack.
pub(crate) fn with_card<R>(f: impl FnOnce(&mut Card) -> R) -> Option<R> {
    CARD.with(|cell| {
        let mut slot = cell.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

pub(crate) fn start(config: CardConfig) -> CardResult<()> {
    let running = CARD.with(|cell| cell.try_borrow().map(|c| c.is_some()).unwrap_or(true));
    if running {
        return Err(CardError::AlreadyRunning);
    }
    let card = Card::mount(config.sanitized())?;
    CARD.with(|cell| cell.replace(Some(card)));
    console::log!("valentine card mounted");
    Ok(())
}

pub(crate) fn stop() -> bool {
    let card = CARD.with(|cell| cell.try_borrow_mut().ok().and_then(|mut c| c.take()));
    match card {
        Some(card) => {
            drop(card);
            console::log!("valentine card unmounted");
            true
        }
        None => false,
    }
}

pub(crate) fn is_celebrating() -> bool {
    with_card(|c| c.page.is_accepted()).unwrap_or(false)
}

const ROOT_ID: &str = "vc-card";

const BUTTON_STYLE: &str = "min-height:48px; min-width:120px; padding:14px 28px; border:none; border-radius:9999px; \
     font-weight:700; font-size:1.1rem; touch-action:manipulation; cursor:pointer;";

pub(crate) struct Card {
    doc: Document,
    root: HtmlElement,
    rng: Box<dyn RandomSource>,
    page: PageController,
    hearts: HeartField,
    hearts_view: HeartFieldView,
    music: AudioToggle,
    music_view: MusicToggleView,
    surprise_view: SurprisePanelView,
    ask: HtmlElement,
    no_button: HtmlElement,
    previews: Vec<HtmlImageElement>,
    celebrate: HtmlElement,
    gallery_slot: HtmlElement,
    carousel: Carousel,
    carousel_view: Option<CarouselView>,
    burst: Option<HtmlElement>,
    reveal: Option<Timeout>,
    _listeners: Vec<EventListener>,
}

impl Card {
    fn mount(config: CardConfig) -> CardResult<Self> {
        let doc = dom::document()?;
        let body = doc.body().ok_or(CardError::NoBody)?;
        dom::install_stylesheet(&doc)?;

        let rng: Box<dyn RandomSource> = Box::new(SplitMix64::from_entropy());
        let page = PageController::new(&config);

        let root = dom::create(
            &doc,
            "div",
            "position:relative; min-height:100vh; min-height:100dvh; overflow-x:hidden; \
             background:linear-gradient(180deg,#fff0f5 0%,#ffe4ec 100%); color:#3b2a32; font-family:system-ui, sans-serif;",
        )?;
        root.set_id(ROOT_ID);
        body.append_child(&root)?;
        Self::assemble(doc, root.clone(), config, rng, page).inspect_err(|_| root.remove())
    }

    /// Everything below the root. On error the caller takes the root back out.
    fn assemble(
        doc: Document,
        root: HtmlElement,
        config: CardConfig,
        mut rng: Box<dyn RandomSource>,
        page: PageController,
    ) -> CardResult<Self> {
        let hearts = HeartField::new(page.heart_count(), rng.as_mut());
        let hearts_view = HeartFieldView::mount(&doc, &root)?;
        hearts_view.render(&doc, &hearts)?;

        let music_view = MusicToggleView::mount(&doc, &root, &config.audio_url, config.audio_volume, || {
            with_card(Card::toggle_music);
        })?;
        let surprise_view = SurprisePanelView::mount(&doc, &root, || {
            with_card(Card::close_surprise);
        })?;

        let main = dom::create(
            &doc,
            "main",
            "position:relative; z-index:10; display:flex; flex-direction:column; align-items:center; \
             justify-content:center; min-height:100vh; padding:32px 12px; gap:24px;",
        )?;
        root.append_child(&main)?;

        let mut listeners = Vec::new();
        let ask = dom::create(&doc, "section", "display:flex; flex-direction:column; align-items:center; gap:24px;")?;
        main.append_child(&ask)?;
        let (no_button, previews) = build_ask(&doc, &ask, &config, &mut listeners)?;

        let celebrate = dom::create(&doc, "section", "display:none; flex-direction:column; align-items:center; gap:24px; width:100%;")?;
        main.append_child(&celebrate)?;
        let gallery_slot = build_celebrate(&doc, &celebrate)?;

        let footer = dom::create(&doc, "footer", "position:relative; z-index:10; padding:8px 16px 24px; text-align:center;")?;
        dom::append_text(&doc, &footer, "p", "font-family:cursive; color:#9e7b87; margin:0;", &config.footer())?;
        root.append_child(&footer)?;

        let card = Self {
            doc,
            root,
            rng,
            page,
            hearts,
            hearts_view,
            music: AudioToggle::new(),
            music_view,
            surprise_view,
            ask,
            no_button,
            previews,
            celebrate,
            gallery_slot,
            carousel: Carousel::new(config.carousel_interval_ms),
            carousel_view: None,
            burst: None,
            reveal: None,
            _listeners: listeners,
        };
        card.render_no_button();
        card.music_view.render(&card.music)?;
        card.surprise_view.render(card.page.surprise_open());
        Ok(card)
    }

    fn accept(&mut self) {
        if let Err(err) = self.try_accept() {
            console::warn!("celebration failed to render", err.to_string());
        }
    }

    fn try_accept(&mut self) -> CardResult<()> {
        // Build the burst and the gallery first; the page only turns to
        // Celebrating once both are in the document.
        let accepted = self.page.accept_with(self.rng.as_mut(), |particles| {
            let burst = hearts::mount_celebration(&self.doc, &self.root, particles)?;
            self.carousel.set_visible(true);
            let view = CarouselView::mount(&self.doc, &self.gallery_slot, &self.carousel, |ev| {
                with_card(|card| card.carousel_event(ev));
            });
            match view {
                Ok(view) => Ok((burst, view)),
                Err(err) => {
                    self.carousel.set_visible(false);
                    burst.remove();
                    Err(err)
                }
            }
        })?;
        let Some((accepted, (burst, view))) = accepted else {
            return Ok(());
        };
        console::log!("valentine accepted");
        self.burst = Some(burst);
        self.carousel_view = Some(view);
        self.reveal = Some(Timeout::new(accepted.reveal_after_ms, || {
            with_card(Card::reveal_surprise);
        }));

        dom::set_shown(&self.ask, false, "flex");
        dom::set_shown(&self.celebrate, true, "flex");

        if self.hearts.set_count(self.page.heart_count(), self.rng.as_mut()) {
            self.hearts_view.render(&self.doc, &self.hearts)?;
        }
        Ok(())
    }

    fn dodge(&mut self) {
        self.page.no_hover(self.rng.as_mut());
        self.render_no_button();
    }

    fn render_no_button(&self) {
        let o = self.page.no_offset();
        dom::set_css(&self.no_button, "transform", &format!("translate({:.1}px, {:.1}px)", o.x, o.y));
        self.no_button.set_text_content(Some(self.page.no_message()));
    }

    fn reveal_surprise(&mut self) {
        if self.page.reveal_surprise() {
            console::log!("surprise revealed");
            self.surprise_view.render(true);
        }
    }

    fn close_surprise(&mut self) {
        self.page.close_surprise();
        self.surprise_view.render(self.page.surprise_open());
    }

    fn toggle_music(&mut self) {
        let cmd = self.music.toggle();
        self.run_audio(cmd);
    }

    fn music_settled(&mut self, attempt: u64, started: bool) {
        let cmd = self.music.start_settled(attempt, started);
        self.run_audio(cmd);
    }

    fn run_audio(&mut self, cmd: AudioCommand) {
        if let (Some(promise), AudioCommand::Play { attempt }) = (self.music_view.apply(cmd), cmd) {
            spawn_local(async move {
                let started = JsFuture::from(promise).await.is_ok();
                if !started {
                    console::warn!("background music could not start");
                }
                with_card(|card| card.music_settled(attempt, started));
            });
        }
        let _ = self.music_view.render(&self.music);
    }

    fn carousel_event(&mut self, ev: CarouselEvent) {
        let Some(view) = self.carousel_view.as_mut() else { return };
        let model = &mut self.carousel;
        match ev {
            CarouselEvent::Tick => {
                // the interval keeps running; no rearm from inside its own callback
                if model.tick() {
                    view.render(model);
                }
            }
            CarouselEvent::Hover(hovering) => {
                model.set_paused(hovering);
                view.rearm(model);
            }
            CarouselEvent::Prev | CarouselEvent::Next | CarouselEvent::Select(_) => {
                match ev {
                    CarouselEvent::Prev => model.prev(),
                    CarouselEvent::Next => model.next(),
                    CarouselEvent::Select(i) => model.select(i),
                    _ => {}
                }
                view.render(model);
                view.rearm(model);
            }
            CarouselEvent::ImageFailed(slot, role) => {
                if model.image_failed(slot, role) {
                    console::warn!("photo failed to load, showing placeholder", slot + 1);
                    if let Some(src) = model.displayed_src(slot, role) {
                        view.show_fallback(slot, role, src);
                    }
                }
            }
        }
    }

    fn preview_failed(&mut self, i: usize) {
        if let Some(img) = self.previews.get(i) {
            if img.get_attribute("src").as_deref() != Some(page::PREVIEW_PLACEHOLDER) {
                console::warn!("preview failed to load, showing placeholder", i + 1);
                img.set_src(page::PREVIEW_PLACEHOLDER);
            }
        }
    }
}

impl Drop for Card {
    fn drop(&mut self) {
        self.reveal = None;
        self.carousel_view = None;
        if let Some(burst) = self.burst.take() {
            burst.remove();
        }
        self.root.remove();
    }
}

fn build_ask(
    doc: &Document,
    ask: &HtmlElement,
    config: &CardConfig,
    listeners: &mut Vec<EventListener>,
) -> CardResult<(HtmlElement, Vec<HtmlImageElement>)> {
    let intro = dom::create(doc, "div", "text-align:center; max-width:36rem; animation:vc-slide-up 0.8s ease-out both;")?;
    dom::append_text(
        doc,
        &intro,
        "h1",
        "font-family:cursive; font-size:clamp(2rem, 7vw, 5.5rem); color:#e91e63; margin:0; line-height:1.15; \
         animation:vc-pulse-glow 2.4s ease-in-out infinite;",
        page::QUESTION,
    )?;
    dom::append_text(doc, &intro, "p", "font-family:cursive; font-size:1.6rem; color:#c2185b; margin:12px 0;", &config.dedication())?;
    dom::append_text(doc, &intro, "p", "font-size:1.1rem; color:#7a5b66; line-height:1.6; margin:0;", page::ASK_MESSAGE)?;
    ask.append_child(&intro)?;

    let gallery = dom::create(
        doc,
        "div",
        "display:flex; flex-wrap:wrap; justify-content:center; gap:16px; margin:16px 0; animation:vc-slide-up 0.8s ease-out 0.3s both;",
    )?;
    let mut previews = Vec::new();
    for (i, p) in page::previews().into_iter().enumerate() {
        let polaroid = dom::create(
            doc,
            "div",
            &format!(
                "background:#fff; padding:8px 8px 12px; box-shadow:0 6px 16px rgba(0,0,0,0.15); transform:rotate({}deg);",
                p.rotation_deg
            ),
        )?;
        let img = dom::create_image(doc, "display:block; width:144px; height:176px; object-fit:cover;", &p.src, p.caption)?;
        listeners.push(EventListener::new(&img, "error", move |_| {
            with_card(|card| card.preview_failed(i));
        }));
        polaroid.append_child(&img)?;
        dom::append_text(doc, &polaroid, "p", "font-family:cursive; text-align:center; margin:8px 0 0;", p.caption)?;
        gallery.append_child(&polaroid)?;
        previews.push(img);
    }
    ask.append_child(&gallery)?;

    let buttons = dom::create(
        doc,
        "div",
        "display:flex; flex-wrap:wrap; align-items:center; justify-content:center; gap:24px; margin-top:16px; \
         animation:vc-slide-up 0.8s ease-out 0.6s both;",
    )?;
    let yes = dom::create_text(
        doc,
        "button",
        &format!("{BUTTON_STYLE} background:#e91e63; color:#fff; box-shadow:0 8px 20px rgba(233,30,99,0.35);"),
        page::YES_LABEL,
    )?;
    yes.set_attribute("type", "button")?;
    listeners.push(EventListener::new(&yes, "click", |_| {
        with_card(Card::accept);
    }));
    buttons.append_child(&yes)?;

    let no = dom::create(
        doc,
        "button",
        &format!(
            "{BUTTON_STYLE} background:#f3e5ea; color:#8d6e78; user-select:none; \
             transition:transform 0.3s cubic-bezier(0.34, 1.56, 0.64, 1);"
        ),
    )?;
    no.set_attribute("type", "button")?;
    for ty in ["mouseenter", "touchstart"] {
        listeners.push(EventListener::new(&no, ty, |_| {
            with_card(Card::dodge);
        }));
    }
    // a click that still lands on No does nothing
    listeners.push(EventListener::new_with_options(
        &no,
        "click",
        EventListenerOptions::enable_prevent_default(),
        |e| e.prevent_default(),
    ));
    buttons.append_child(&no)?;
    ask.append_child(&buttons)?;
    Ok((no, previews))
}

fn build_celebrate(doc: &Document, celebrate: &HtmlElement) -> CardResult<HtmlElement> {
    let intro = dom::create(doc, "div", "text-align:center; padding:0 8px; animation:vc-celebration-pop 0.7s ease-out both;")?;
    dom::append_text(
        doc,
        &intro,
        "h1",
        "font-family:cursive; font-size:clamp(2rem, 7vw, 5.5rem); color:#e91e63; margin:0; line-height:1.15;",
        page::CELEBRATION_TITLE,
    )?;
    dom::append_text(doc, &intro, "p", "font-size:1.3rem; max-width:32rem; margin:16px auto;", page::CELEBRATION_MESSAGE)?;
    dom::append_text(
        doc,
        &intro,
        "p",
        "font-size:3.5rem; margin:0; animation:vc-pulse-glow 2.4s ease-in-out infinite;",
        "❤️",
    )?;
    celebrate.append_child(&intro)?;
    let slot = dom::create(doc, "div", "width:100%;")?;
    celebrate.append_child(&slot)?;
    Ok(slot)
}
