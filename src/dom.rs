//! Small DOM helpers shared by the component views.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement, window};

use crate::error::{CardError, CardResult};

pub(crate) fn document() -> CardResult<Document> {
    let win = window().ok_or(CardError::NoWindow)?;
    win.document().ok_or(CardError::NoDocument)
}

/// Create an element with an inline style (the card ships no external CSS
/// besides the keyframes in [`STYLESHEET`]).
pub(crate) fn create(doc: &Document, tag: &str, style: &str) -> CardResult<HtmlElement> {
    let el: HtmlElement = doc
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| CardError::Dom(format!("<{tag}> is not an HtmlElement")))?;
    if !style.is_empty() {
        el.set_attribute("style", style)?;
    }
    Ok(el)
}

pub(crate) fn create_text(doc: &Document, tag: &str, style: &str, text: &str) -> CardResult<HtmlElement> {
    let el = create(doc, tag, style)?;
    el.set_text_content(Some(text));
    Ok(el)
}

/// Create a text element and append it to `parent`.
pub(crate) fn append_text(
    doc: &Document,
    parent: &HtmlElement,
    tag: &str,
    style: &str,
    text: &str,
) -> CardResult<HtmlElement> {
    let el = create_text(doc, tag, style, text)?;
    parent.append_child(&el)?;
    Ok(el)
}

pub(crate) fn create_image(doc: &Document, style: &str, src: &str, alt: &str) -> CardResult<HtmlImageElement> {
    let img: HtmlImageElement = create(doc, "img", style)?
        .dyn_into()
        .map_err(|_| CardError::Dom("<img> is not an HtmlImageElement".into()))?;
    img.set_alt(alt);
    img.set_src(src);
    Ok(img)
}

pub(crate) fn set_shown(el: &HtmlElement, shown: bool, display: &str) {
    let _ = el
        .style()
        .set_property("display", if shown { display } else { "none" });
}

pub(crate) fn set_css(el: &HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

pub(crate) fn clear(el: &HtmlElement) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}

pub(crate) fn install_stylesheet(doc: &Document) -> CardResult<()> {
    if doc.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }
    let head = doc.head().ok_or(CardError::NoBody)?;
    let style = create(doc, "style", "")?;
    style.set_id(STYLESHEET_ID);
    style.set_text_content(Some(STYLESHEET));
    head.append_child(&style)?;
    Ok(())
}

const STYLESHEET_ID: &str = "vc-keyframes";

// Animations referenced by the inline styles of the views.
const STYLESHEET: &str = "
@keyframes vc-float-heart {
  0% { transform: translateY(0) rotate(0deg); opacity: 0; }
  10% { opacity: 0.8; }
  90% { opacity: 0.6; }
  100% { transform: translateY(-110vh) rotate(25deg); opacity: 0; }
}
@keyframes vc-float-heart-reverse {
  0% { transform: translateY(0) rotate(0deg); opacity: 0; }
  10% { opacity: 0.8; }
  90% { opacity: 0.6; }
  100% { transform: translateY(-110vh) rotate(-25deg); opacity: 0; }
}
@keyframes vc-pulse-glow {
  0%, 100% { transform: scale(1); filter: drop-shadow(0 0 6px rgba(255,64,129,0.4)); }
  50% { transform: scale(1.05); filter: drop-shadow(0 0 16px rgba(255,64,129,0.8)); }
}
@keyframes vc-slide-up {
  from { transform: translateY(24px); opacity: 0; }
  to { transform: translateY(0); opacity: 1; }
}
@keyframes vc-celebration-pop {
  0% { transform: scale(0.6); opacity: 0; }
  70% { transform: scale(1.06); opacity: 1; }
  100% { transform: scale(1); }
}
";
