//! Surprise modal. Stateless: the page owns the open flag and the close action.

use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::CardResult;

pub const TITLE: &str = "A Little Surprise...";
pub const MESSAGE: &str = "You are the reason I smile every single day. Thank you for being mine. \
                           Here's my perfect date idea for us:";
pub const DATE_IDEA: &str = "Pani-Puri + Ice cream + Café ☕️  🍦🚶‍♀️";
pub const FOOTNOTE: &str = "...because every moment with you is an adventure 💫";
pub const DISMISS_LABEL: &str = "I love it! 💖";

pub(crate) struct SurprisePanelView {
    root: HtmlElement,
    _listeners: [EventListener; 2],
}

impl SurprisePanelView {
    pub(crate) fn mount(doc: &Document, parent: &HtmlElement, on_close: impl Fn() + 'static) -> CardResult<Self> {
        let on_close: Rc<dyn Fn()> = Rc::new(on_close);
        let root = dom::create(
            doc,
            "div",
            "position:fixed; inset:0; z-index:60; display:none; align-items:center; justify-content:center; \
             padding:16px; overflow-y:auto;",
        )?;
        root.set_attribute("role", "dialog")?;
        root.set_attribute("aria-modal", "true")?;
        root.set_attribute("aria-label", TITLE)?;

        let backdrop = dom::create(doc, "div", "position:absolute; inset:0; background:rgba(0,0,0,0.4); backdrop-filter:blur(4px);")?;
        root.append_child(&backdrop)?;

        let card = dom::create(
            doc,
            "div",
            "position:relative; background:#fff; border-radius:16px; box-shadow:0 24px 48px rgba(0,0,0,0.3); \
             padding:32px; max-width:28rem; width:100%; max-height:90vh; overflow-y:auto; text-align:center; \
             animation:vc-celebration-pop 0.6s ease-out both;",
        )?;
        root.append_child(&card)?;
        dom::append_text(doc, &card, "p", "font-size:3rem; margin:0;", "💌")?;
        dom::append_text(
            doc,
            &card,
            "h3",
            "font-family:cursive; font-size:2rem; color:#e91e63; margin:12px 0;",
            TITLE,
        )?;
        dom::append_text(doc, &card, "p", "line-height:1.6; margin:12px 0;", MESSAGE)?;
        let idea = dom::create(doc, "div", "background:rgba(252,228,236,0.6); border-radius:12px; padding:12px; border:1px solid #f8bbd0;")?;
        dom::append_text(
            doc,
            &idea,
            "p",
            "font-family:cursive; font-size:1.4rem; margin:0; overflow-wrap:anywhere;",
            DATE_IDEA,
        )?;
        card.append_child(&idea)?;
        dom::append_text(doc, &card, "p", "color:#888; font-size:0.85rem; margin:12px 0;", FOOTNOTE)?;
        let dismiss = dom::create_text(
            doc,
            "button",
            "margin-top:8px; min-height:48px; padding:12px 24px; border:none; border-radius:9999px; \
             background:#e91e63; color:#fff; font-weight:700; cursor:pointer;",
            DISMISS_LABEL,
        )?;
        dismiss.set_attribute("type", "button")?;
        card.append_child(&dismiss)?;

        let close_backdrop = on_close.clone();
        let listeners = [
            EventListener::new(&backdrop, "click", move |_| close_backdrop()),
            EventListener::new(&dismiss, "click", move |_| on_close()),
        ];
        parent.append_child(&root)?;
        Ok(Self { root, _listeners: listeners })
    }

    /// Nothing is shown while closed.
    pub(crate) fn render(&self, open: bool) {
        dom::set_shown(&self.root, open, "flex");
    }
}

impl Drop for SurprisePanelView {
    fn drop(&mut self) {
        self.root.remove();
    }
}
