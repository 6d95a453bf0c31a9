//! Card configuration. Defaults keep the card's soundtrack, timings and heart
//! counts but leave both names unset, so the dedication and the footer credit
//! read anonymously until a host page supplies `recipient` / `sender`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUDIO_URL: &str = "https://cdn.pixabay.com/audio/2024/11/29/audio_d26e3e440a.mp3";
pub const DEFAULT_AUDIO_VOLUME: f64 = 0.3;
pub const DEFAULT_CAROUSEL_INTERVAL_MS: u32 = 3_500;
pub const DEFAULT_SURPRISE_DELAY_MS: u32 = 1_200;
pub const DEFAULT_IDLE_HEARTS: usize = 12;
pub const DEFAULT_CELEBRATION_HEARTS: usize = 30;

const MIN_CAROUSEL_INTERVAL_MS: u32 = 500;
const MAX_HEARTS: usize = 200;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CardConfig {
    /// Shown in the dedication line under the question.
    pub recipient: Option<String>,
    /// Shown in the footer credit.
    pub sender: Option<String>,
    pub audio_url: String,
    pub audio_volume: f64,
    pub carousel_interval_ms: u32,
    pub surprise_delay_ms: u32,
    pub idle_hearts: usize,
    pub celebration_hearts: usize,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            sender: None,
            audio_url: DEFAULT_AUDIO_URL.to_string(),
            audio_volume: DEFAULT_AUDIO_VOLUME,
            carousel_interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
            surprise_delay_ms: DEFAULT_SURPRISE_DELAY_MS,
            idle_hearts: DEFAULT_IDLE_HEARTS,
            celebration_hearts: DEFAULT_CELEBRATION_HEARTS,
        }
    }
}

impl CardConfig {
    /// Clamp values into ranges the browser and the layout can handle.
    pub fn sanitized(mut self) -> Self {
        self.audio_volume = if self.audio_volume.is_finite() {
            self.audio_volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_AUDIO_VOLUME
        };
        self.carousel_interval_ms = self.carousel_interval_ms.max(MIN_CAROUSEL_INTERVAL_MS);
        self.idle_hearts = self.idle_hearts.min(MAX_HEARTS);
        self.celebration_hearts = self.celebration_hearts.min(MAX_HEARTS);
        self.recipient = self.recipient.filter(|s| !s.trim().is_empty());
        self.sender = self.sender.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn dedication(&self) -> String {
        match &self.recipient {
            Some(name) => format!("For my favorite person, {name} 💗"),
            None => "For my favorite person 💗".to_string(),
        }
    }

    pub fn footer(&self) -> String {
        match &self.sender {
            Some(name) => format!("Made with love by yours {name} 💌"),
            None => "Made with love 💌".to_string(),
        }
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> crate::error::CardResult<Self> {
        serde_json::from_str::<CardConfig>(json)
            .map(CardConfig::sanitized)
            .map_err(|e| crate::error::CardError::Config(e.to_string()))
    }
}
