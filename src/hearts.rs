//! Floating heart background and the one-shot celebration burst.

use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::CardResult;
use crate::rng::RandomSource;

pub const HEART_GLYPH: &str = "💕";

/// Glyphs of the celebration burst, picked by `index % 8`.
pub const CELEBRATION_GLYPHS: [&str; 8] = ["❤️", "💕", "💖", "💗", "🥰", "✨", "🎉", "🎊"];
pub const CELEBRATION_COUNT: usize = 30;

/// One background heart. Immutable once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct HeartParticle {
    pub id: usize,
    pub left_pct: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub reverse: bool,
}

pub fn generate_hearts(count: usize, rng: &mut dyn RandomSource) -> Vec<HeartParticle> {
    (0..count)
        .map(|id| HeartParticle {
            id,
            left_pct: rng.range(0.0, 100.0),
            size_px: rng.range(12.0, 32.0),
            duration_s: rng.range(6.0, 14.0),
            delay_s: rng.range(0.0, 10.0),
            reverse: rng.coin(),
        })
        .collect()
}

/// Background heart set; regenerated only when the requested count changes.
#[derive(Clone, Debug)]
pub struct HeartField {
    count: usize,
    particles: Vec<HeartParticle>,
}

impl HeartField {
    pub fn new(count: usize, rng: &mut dyn RandomSource) -> Self {
        Self { count, particles: generate_hearts(count, rng) }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn particles(&self) -> &[HeartParticle] {
        &self.particles
    }

    /// Returns true if the field was regenerated.
    pub fn set_count(&mut self, count: usize, rng: &mut dyn RandomSource) -> bool {
        if count == self.count {
            return false;
        }
        self.count = count;
        self.particles = generate_hearts(count, rng);
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationParticle {
    pub id: usize,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub glyph: &'static str,
}

pub fn generate_celebration(rng: &mut dyn RandomSource) -> Vec<CelebrationParticle> {
    (0..CELEBRATION_COUNT)
        .map(|id| CelebrationParticle {
            id,
            left_pct: rng.range(0.0, 100.0),
            top_pct: rng.range(0.0, 40.0),
            duration_s: rng.range(2.0, 5.0),
            delay_s: rng.range(0.0, 0.5),
            glyph: CELEBRATION_GLYPHS[id % CELEBRATION_GLYPHS.len()],
        })
        .collect()
}

// --- Views ------------------------------------------------------------------

/// Fixed, pointer-transparent layer behind the card content.
pub(crate) struct HeartFieldView {
    layer: HtmlElement,
}

impl HeartFieldView {
    pub(crate) fn mount(doc: &Document, parent: &HtmlElement) -> CardResult<Self> {
        let layer = dom::create(
            doc,
            "div",
            "position:fixed; inset:0; pointer-events:none; overflow:hidden; z-index:0;",
        )?;
        layer.set_attribute("aria-hidden", "true")?;
        parent.append_child(&layer)?;
        Ok(Self { layer })
    }

    pub(crate) fn render(&self, doc: &Document, field: &HeartField) -> CardResult<()> {
        dom::clear(&self.layer);
        for h in field.particles() {
            let anim = if h.reverse { "vc-float-heart-reverse" } else { "vc-float-heart" };
            let span = dom::create_text(
                doc,
                "span",
                &format!(
                    "position:absolute; bottom:-40px; left:{:.2}%; font-size:{:.1}px; opacity:0; \
                     animation:{} {:.2}s linear {:.2}s infinite;",
                    h.left_pct, h.size_px, anim, h.duration_s, h.delay_s
                ),
                HEART_GLYPH,
            )?;
            self.layer.append_child(&span)?;
        }
        Ok(())
    }
}

/// Renders the burst once into a fixed overlay above everything but the modal.
pub(crate) fn mount_celebration(
    doc: &Document,
    parent: &HtmlElement,
    particles: &[CelebrationParticle],
) -> CardResult<HtmlElement> {
    let layer = dom::create(doc, "div", "position:fixed; inset:0; pointer-events:none; z-index:50;")?;
    layer.set_attribute("aria-hidden", "true")?;
    for p in particles {
        let span = dom::create_text(
            doc,
            "span",
            &format!(
                "position:absolute; left:{:.2}%; top:{:.2}%; font-size:24px; \
                 animation:vc-float-heart {:.2}s ease-out {:.2}s infinite;",
                p.left_pct, p.top_pct, p.duration_s, p.delay_s
            ),
            p.glyph,
        )?;
        layer.append_child(&span)?;
    }
    parent.append_child(&layer)?;
    Ok(layer)
}
