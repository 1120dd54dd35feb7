//! End-to-end walkthroughs of the card through the public App API.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use billet_core::{App, Classification, PageKind, TurnDirection};

fn app() -> App {
    App::with_rng(None, StdRng::seed_from_u64(99))
}

fn classifications(app: &App) -> Vec<Classification> {
    app.deck().slots().iter().map(|s| s.classification).collect()
}

#[test]
fn five_pages_turn_forward_and_clamp_at_the_end() {
    let mut app = app();
    assert_eq!(app.deck().len(), 5);

    for _ in 0..4 {
        app.turn_page(TurnDirection::Next);
    }
    assert_eq!(app.deck().current_index(), 4);
    assert_eq!(
        classifications(&app),
        vec![
            Classification::Flipped,
            Classification::Flipped,
            Classification::Flipped,
            Classification::Flipped,
            Classification::Active,
        ]
    );

    // Turning past the last page changes nothing.
    app.turn_page(TurnDirection::Next);
    assert_eq!(app.deck().current_index(), 4);
    assert_eq!(classifications(&app)[4], Classification::Active);
}

#[test]
fn arrow_keys_walk_the_whole_card() {
    let mut app = app();

    // Cover -> Letter -> Reasons.
    app.route_arrow(TurnDirection::Next);
    app.route_arrow(TurnDirection::Next);
    assert_eq!(app.deck().active_page(), PageKind::Reasons);

    // Three more arrows consume the carousel, the third falls through.
    app.route_arrow(TurnDirection::Next);
    app.route_arrow(TurnDirection::Next);
    app.route_arrow(TurnDirection::Next);
    assert_eq!(app.deck().active_page(), PageKind::Question);

    // Backing up re-enters the carousel page; from its first slide the
    // next back-arrow leaves it again.
    app.route_arrow(TurnDirection::Prev);
    assert_eq!(app.deck().active_page(), PageKind::Reasons);
    assert_eq!(app.carousel().current_slide(), 2);
    app.route_arrow(TurnDirection::Prev);
    app.route_arrow(TurnDirection::Prev);
    assert_eq!(app.carousel().current_slide(), 0);
    app.route_arrow(TurnDirection::Prev);
    assert_eq!(app.deck().active_page(), PageKind::Letter);
}

#[test]
fn saying_yes_celebrates_and_advances_immediately() {
    let mut app = app();
    for _ in 0..3 {
        app.turn_page(TurnDirection::Next);
    }
    assert_eq!(app.deck().active_page(), PageKind::Question);

    app.press_yes();
    // The page turn is not gated on the animation.
    assert_eq!(app.deck().active_page(), PageKind::Finale);

    // The particle loop runs on its own clock and drains itself.
    let mut peak = 0;
    for _ in 0..50 {
        app.tick(Duration::from_millis(100));
        peak = peak.max(app.particles().len());
    }
    assert!(peak > 0);
    assert!(app.particles().is_empty());
}

#[test]
fn quit_request_is_sticky() {
    let mut app = app();
    assert!(!app.should_quit());
    app.request_quit();
    assert!(app.should_quit());
}
