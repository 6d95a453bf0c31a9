//! Background music toggle.
//!
//! The control only reports "playing" once the browser has confirmed that
//! playback started; a rejected `play()` (autoplay policy, network) puts it
//! back to paused.

use gloo::events::EventListener;
use js_sys::Promise;
use web_sys::{Document, HtmlAudioElement, HtmlElement};

use crate::dom;
use crate::error::CardResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Paused,
    /// `play()` issued, promise not settled yet.
    Starting,
    Playing,
}

/// What the view must do to the audio element after a state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCommand {
    /// Start playback; the settled result must be reported back with this attempt id.
    Play { attempt: u64 },
    Pause,
    Nothing,
}

#[derive(Clone, Debug)]
pub struct AudioToggle {
    state: Playback,
    attempt: u64,
}

impl Default for AudioToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioToggle {
    pub fn new() -> Self {
        Self { state: Playback::Paused, attempt: 0 }
    }

    pub fn state(&self) -> Playback {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == Playback::Playing
    }

    pub fn aria_label(&self) -> &'static str {
        if self.is_playing() { "Mute music" } else { "Play music" }
    }

    pub fn toggle(&mut self) -> AudioCommand {
        match self.state {
            // a click while starting cancels the attempt
            Playback::Playing | Playback::Starting => {
                self.state = Playback::Paused;
                AudioCommand::Pause
            }
            Playback::Paused => {
                self.attempt += 1;
                self.state = Playback::Starting;
                AudioCommand::Play { attempt: self.attempt }
            }
        }
    }

    /// Report the outcome of the `play()` promise for `attempt`.
    pub fn start_settled(&mut self, attempt: u64, started: bool) -> AudioCommand {
        let current = attempt == self.attempt;
        match (self.state, current, started) {
            (Playback::Starting, true, true) => {
                self.state = Playback::Playing;
                AudioCommand::Nothing
            }
            (Playback::Starting, true, false) => {
                self.state = Playback::Paused;
                AudioCommand::Nothing
            }
            // cancelled while pending but the browser started anyway
            (Playback::Paused, _, true) => AudioCommand::Pause,
            _ => AudioCommand::Nothing,
        }
    }
}

// --- View -------------------------------------------------------------------

pub(crate) struct MusicToggleView {
    audio: HtmlAudioElement,
    button: HtmlElement,
    _click: EventListener,
}

impl MusicToggleView {
    pub(crate) fn mount(
        doc: &Document,
        parent: &HtmlElement,
        url: &str,
        volume: f64,
        on_toggle: impl Fn() + 'static,
    ) -> CardResult<Self> {
        let audio = HtmlAudioElement::new_with_src(url)?;
        audio.set_loop(true);
        audio.set_volume(volume);
        audio.set_preload("none");

        let button = dom::create(
            doc,
            "button",
            "position:fixed; top:16px; right:16px; z-index:55; padding:10px 12px; border-radius:9999px; \
             border:1px solid rgba(255,255,255,0.4); background:rgba(255,255,255,0.8); cursor:pointer; \
             font-size:20px; line-height:1; box-shadow:0 2px 8px rgba(0,0,0,0.15);",
        )?;
        button.set_attribute("type", "button")?;
        parent.append_child(&button)?;
        let click = EventListener::new(&button, "click", move |_| on_toggle());
        let view = Self { audio, button, _click: click };
        view.render(&AudioToggle::new())?;
        Ok(view)
    }

    pub(crate) fn render(&self, model: &AudioToggle) -> CardResult<()> {
        self.button.set_attribute("aria-label", model.aria_label())?;
        self.button.set_attribute("aria-pressed", if model.is_playing() { "true" } else { "false" })?;
        self.button.set_text_content(Some(if model.is_playing() { "🔊" } else { "🔇" }));
        Ok(())
    }

    /// Apply a command to the audio element. A `Play` returns the browser's
    /// promise; its settlement must be fed back to [`AudioToggle::start_settled`].
    pub(crate) fn apply(&self, cmd: AudioCommand) -> Option<Promise> {
        match cmd {
            AudioCommand::Play { .. } => match self.audio.play() {
                Ok(p) => Some(p),
                Err(_) => Some(Promise::reject(&"play() threw".into())),
            },
            AudioCommand::Pause => {
                let _ = self.audio.pause();
                None
            }
            AudioCommand::Nothing => None,
        }
    }
}

impl Drop for MusicToggleView {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        self.audio.set_src("");
        self.button.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_with_play_label() {
        let t = AudioToggle::new();
        assert_eq!(t.state(), Playback::Paused);
        assert_eq!(t.aria_label(), "Play music");
    }

    #[test]
    fn playing_only_after_confirmed_start() {
        let mut t = AudioToggle::new();
        let AudioCommand::Play { attempt } = t.toggle() else { panic!("expected play") };
        assert!(!t.is_playing());
        assert_eq!(t.start_settled(attempt, true), AudioCommand::Nothing);
        assert!(t.is_playing());
        assert_eq!(t.aria_label(), "Mute music");
        assert_eq!(t.toggle(), AudioCommand::Pause);
        assert_eq!(t.state(), Playback::Paused);
    }

    #[test]
    fn rejected_start_reverts_to_paused() {
        let mut t = AudioToggle::new();
        let AudioCommand::Play { attempt } = t.toggle() else { panic!("expected play") };
        t.start_settled(attempt, false);
        assert_eq!(t.state(), Playback::Paused);
        // the next click tries again
        assert!(matches!(t.toggle(), AudioCommand::Play { attempt: 2 }));
    }

    #[test]
    fn start_after_cancel_is_paused_again() {
        let mut t = AudioToggle::new();
        let AudioCommand::Play { attempt } = t.toggle() else { panic!("expected play") };
        assert_eq!(t.toggle(), AudioCommand::Pause);
        assert_eq!(t.start_settled(attempt, true), AudioCommand::Pause);
        assert_eq!(t.state(), Playback::Paused);
    }

    #[test]
    fn stale_attempt_does_not_override_newer_one() {
        let mut t = AudioToggle::new();
        let AudioCommand::Play { attempt: first } = t.toggle() else { panic!() };
        t.toggle();
        let AudioCommand::Play { attempt: second } = t.toggle() else { panic!() };
        assert_eq!(t.start_settled(first, false), AudioCommand::Nothing);
        assert_eq!(t.state(), Playback::Starting);
        t.start_settled(second, true);
        assert!(t.is_playing());
    }
}
