//! Evasion placement properties, including the pixel-unit scenario.
//!
//! The bounds math is unit-agnostic: the same function places the button
//! in terminal cells at runtime and in pixels here.

use rand::SeedableRng;
use rand::rngs::StdRng;

use billet_core::{
    App, EVASION_PADDING, Extent, TurnDirection, placement_axis, sample_position,
};
use billet_types::{EVADER_LABEL, EVADER_TAUNTS};

#[test]
fn pixel_scenario_bounds() {
    // 1000x800 viewport, 100x40 element, padding 20.
    let viewport = Extent {
        width: 1000,
        height: 800,
    };
    let element = Extent {
        width: 100,
        height: 40,
    };
    assert_eq!(placement_axis(viewport.width, element.width, 20), 20..=880);
    assert_eq!(placement_axis(viewport.height, element.height, 20), 20..=740);

    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..1000 {
        let p = sample_position(viewport, element, 20, &mut rng);
        assert!((20..=880).contains(&p.x), "x out of bounds: {}", p.x);
        assert!((20..=740).contains(&p.y), "y out of bounds: {}", p.y);
    }
}

#[test]
fn tiny_viewport_pins_to_padding() {
    let viewport = Extent {
        width: 30,
        height: 10,
    };
    let element = Extent {
        width: 100,
        height: 40,
    };
    let mut rng = StdRng::seed_from_u64(5);
    let p = sample_position(viewport, element, 20, &mut rng);
    assert_eq!((p.x, p.y), (20, 20));
}

#[test]
fn reset_restores_pre_evasion_defaults_exactly() {
    let mut app = App::with_rng(None, StdRng::seed_from_u64(31));
    for _ in 0..3 {
        app.turn_page(TurnDirection::Next);
    }

    let default_label = app.evader().label();
    let default_position = app.evader().float_position();
    assert_eq!(default_label, EVADER_LABEL);
    assert_eq!(default_position, None);

    let viewport = Extent {
        width: 120,
        height: 36,
    };
    let element = Extent {
        width: 12,
        height: 3,
    };
    app.press_no(viewport, Some(element));
    assert!(app.evader().is_floating());
    assert!(EVADER_TAUNTS.contains(&app.evader().label()));
    let floated = app.evader().float_position().unwrap();
    let horizontal = placement_axis(viewport.width, element.width, EVASION_PADDING);
    let vertical = placement_axis(viewport.height, element.height, EVASION_PADDING);
    assert!(horizontal.contains(&floated.x));
    assert!(vertical.contains(&floated.y));

    // A page turn clears the override completely.
    app.turn_page(TurnDirection::Prev);
    assert_eq!(app.evader().label(), default_label);
    assert_eq!(app.evader().float_position(), default_position);
}

#[test]
fn repeated_dodges_keep_honoring_bounds() {
    let mut app = App::with_rng(None, StdRng::seed_from_u64(8));
    for _ in 0..3 {
        app.turn_page(TurnDirection::Next);
    }

    let viewport = Extent {
        width: 90,
        height: 28,
    };
    let element = Extent {
        width: 20,
        height: 3,
    };
    for _ in 0..50 {
        app.press_no(viewport, Some(element));
        let p = app.evader().float_position().unwrap();
        assert!(placement_axis(viewport.width, element.width, EVASION_PADDING).contains(&p.x));
        assert!(placement_axis(viewport.height, element.height, EVASION_PADDING).contains(&p.y));
    }
}
