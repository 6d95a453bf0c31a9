// Integration tests (native) for the `valentine-card` crate.
// These drive the plain state models the DOM views mirror, so they run under
// `cargo test` on the host without a browser.

use valentine_card::carousel::GALLERY_PLACEHOLDER;
use valentine_card::{
    AudioCommand, AudioToggle, CardConfig, Carousel, ImageRole, PageController, Phase, SplitMix64,
};

// Walk the whole visit: ask, dodge a few times, accept, browse, close the surprise.
#[test]
fn full_visit_scenario() {
    let config = CardConfig::default();
    let mut rng = SplitMix64::seeded(2024);
    let mut page = PageController::new(&config);
    let mut carousel = Carousel::new(config.carousel_interval_ms);

    assert_eq!(page.phase(), Phase::Asking);
    assert!(!page.carousel_mounted());

    for _ in 0..5 {
        page.no_hover(&mut rng);
    }
    assert!(!page.is_accepted());
    assert_eq!(page.no_message_index(), 5);

    let accepted = page.accept(&mut rng).expect("first yes is accepted");
    assert!(page.is_accepted());
    carousel.set_visible(page.carousel_mounted());

    // the carousel keeps ticking while the reveal delay runs down
    assert!(!page.elapse(u64::from(accepted.reveal_after_ms) - 1));
    assert!(page.elapse(1));
    assert!(page.surprise_open());
    assert_eq!(carousel.elapse(3_500 * 3), 3);
    assert_eq!(carousel.current(), 3);

    page.close_surprise();
    assert!(!page.surprise_open());
    assert_eq!(page.phase(), Phase::Celebrating);
    assert!(page.accept(&mut rng).is_none());
}

#[test]
fn hovering_the_photo_freezes_it_for_ten_intervals() {
    let mut carousel = Carousel::new(3_500);
    carousel.set_visible(true);
    carousel.select(2);
    carousel.set_paused(true);
    for _ in 0..10 {
        assert!(!carousel.tick());
    }
    assert_eq!(carousel.current(), 2);
    carousel.set_paused(false);
    assert!(carousel.tick());
    assert_eq!(carousel.current(), 3);
}

#[test]
fn broken_slot_seven_keeps_its_caption() {
    let mut carousel = Carousel::new(3_500);
    carousel.set_visible(true);
    carousel.image_failed(6, ImageRole::Main);
    carousel.select(6);
    assert_eq!(carousel.displayed_src(6, ImageRole::Main), Some(GALLERY_PLACEHOLDER));
    assert_eq!(carousel.caption(), Some("To be continued… 📸"));
}

#[test]
fn music_toggle_reverts_when_autoplay_is_blocked() {
    let mut music = AudioToggle::new();
    let AudioCommand::Play { attempt } = music.toggle() else {
        panic!("first click should try to play");
    };
    assert_eq!(music.aria_label(), "Play music");
    music.start_settled(attempt, false);
    assert!(!music.is_playing());
    assert_eq!(music.aria_label(), "Play music");
}

#[cfg(feature = "serde_json")]
#[test]
fn json_config_drives_the_controller() {
    let config = CardConfig::from_json(r#"{"surprise_delay_ms": 500, "idle_hearts": 4}"#).unwrap();
    let mut page = PageController::new(&config);
    assert_eq!(page.heart_count(), 4);
    let mut rng = SplitMix64::seeded(1);
    assert_eq!(page.accept(&mut rng).unwrap().reveal_after_ms, 500);
    assert_eq!(page.heart_count(), 30);
}
