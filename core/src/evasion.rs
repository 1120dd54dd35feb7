//! Evasion controller for the "No" button.
//!
//! On pointer activation the button detaches from its home slot into a
//! floating overlay at a random on-screen position with a taunting label.
//! Every page turn resets it: position, label, and stacking all return to
//! their defaults, so no evasion state survives a transition.

use std::ops::RangeInclusive;

use rand::{Rng, RngExt};

use billet_types::{EVADER_LABEL, EVADER_TAUNTS};

/// Width/height pair in placement units (terminal cells here; the math is
/// unit-agnostic and holds for pixels too).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub width: u16,
    pub height: u16,
}

/// Top-left placement position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// Margin kept between the floating button and the viewport edge.
pub const EVASION_PADDING: u16 = 2;

/// Paint order for the floating button: above everything else on screen.
pub const EVADER_STACKING: usize = 9999;

/// Safe placement range along one axis.
///
/// `[padding, viewport - element - padding]`, collapsed to `padding` when
/// the viewport is too small to honor the margin on both sides.
#[must_use]
pub fn placement_axis(viewport: u16, element: u16, padding: u16) -> RangeInclusive<u16> {
    let upper = viewport
        .saturating_sub(element)
        .saturating_sub(padding)
        .max(padding);
    padding..=upper
}

/// Uniformly random position within the safe bounds, independent per axis.
#[must_use]
pub fn sample_position(
    viewport: Extent,
    element: Extent,
    padding: u16,
    rng: &mut impl Rng,
) -> Position {
    Position {
        x: rng.random_range(placement_axis(viewport.width, element.width, padding)),
        y: rng.random_range(placement_axis(viewport.height, element.height, padding)),
    }
}

/// Uniformly random taunt for the evading button.
#[must_use]
pub fn sample_taunt(rng: &mut impl Rng) -> &'static str {
    EVADER_TAUNTS[rng.random_range(0..EVADER_TAUNTS.len())]
}

/// Where the evasive button currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvaderState {
    /// In its home slot in the question page's button row, default label.
    Home,
    /// Detached into a floating overlay with a taunt label.
    Floating {
        position: Position,
        taunt: &'static str,
    },
}

#[derive(Debug)]
pub struct Evader {
    state: EvaderState,
}

impl Evader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: EvaderState::Home,
        }
    }

    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.state, EvaderState::Floating { .. })
    }

    /// Current label: the default at home, the picked taunt while floating.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.state {
            EvaderState::Home => EVADER_LABEL,
            EvaderState::Floating { taunt, .. } => taunt,
        }
    }

    /// Floating override position, if any.
    #[must_use]
    pub fn float_position(&self) -> Option<Position> {
        match self.state {
            EvaderState::Home => None,
            EvaderState::Floating { position, .. } => Some(position),
        }
    }

    /// Relocate away from the pointer.
    ///
    /// Detaching is idempotent: a button that is already floating simply
    /// moves again. `element` is the button's current rendered size, as
    /// measured by the renderer on the frame the click landed.
    pub fn dodge(&mut self, viewport: Extent, element: Extent, rng: &mut impl Rng) {
        let position = sample_position(viewport, element, EVASION_PADDING, rng);
        let taunt = sample_taunt(rng);
        self.state = EvaderState::Floating { position, taunt };
    }

    /// Restore the home slot, default label, and normal stacking.
    ///
    /// Idempotent: resetting a button that never evaded is a no-op.
    pub fn reset(&mut self) {
        self.state = EvaderState::Home;
    }
}

impl Default for Evader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{EVASION_PADDING, Evader, Extent, placement_axis, sample_position};
    use billet_types::{EVADER_LABEL, EVADER_TAUNTS};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bounds_match_the_pixel_scenario() {
        // 1000x800 viewport, 100x40 element, padding 20
        assert_eq!(placement_axis(1000, 100, 20), 20..=880);
        assert_eq!(placement_axis(800, 40, 20), 20..=740);
    }

    #[test]
    fn bounds_collapse_to_padding_on_tiny_viewports() {
        // Viewport smaller than element + 2x padding pins to the padding.
        assert_eq!(placement_axis(30, 100, 20), 20..=20);
        assert_eq!(placement_axis(0, 0, 20), 20..=20);
    }

    #[test]
    fn sampled_positions_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Extent {
            width: 1000,
            height: 800,
        };
        let element = Extent {
            width: 100,
            height: 40,
        };
        for _ in 0..500 {
            let p = sample_position(viewport, element, 20, &mut rng);
            assert!((20..=880).contains(&p.x));
            assert!((20..=740).contains(&p.y));
        }
    }

    #[test]
    fn dodge_floats_with_a_taunt_and_reset_restores_defaults() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut evader = Evader::new();
        assert!(!evader.is_floating());
        assert_eq!(evader.label(), EVADER_LABEL);

        let viewport = Extent {
            width: 120,
            height: 40,
        };
        let element = Extent {
            width: 16,
            height: 3,
        };
        evader.dodge(viewport, element, &mut rng);
        assert!(evader.is_floating());
        assert!(EVADER_TAUNTS.contains(&evader.label()));
        let p = evader.float_position().unwrap();
        assert!((EVASION_PADDING..=120 - 16 - EVASION_PADDING).contains(&p.x));
        assert!((EVASION_PADDING..=40 - 3 - EVASION_PADDING).contains(&p.y));

        evader.reset();
        assert!(!evader.is_floating());
        assert_eq!(evader.label(), EVADER_LABEL);
        assert_eq!(evader.float_position(), None);
    }

    #[test]
    fn reset_without_evasion_is_a_no_op() {
        let mut evader = Evader::new();
        evader.reset();
        evader.reset();
        assert!(!evader.is_floating());
        assert_eq!(evader.label(), EVADER_LABEL);
    }

    #[test]
    fn dodging_twice_stays_floating() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut evader = Evader::new();
        let viewport = Extent {
            width: 200,
            height: 60,
        };
        let element = Extent {
            width: 12,
            height: 3,
        };
        evader.dodge(viewport, element, &mut rng);
        evader.dodge(viewport, element, &mut rng);
        assert!(evader.is_floating());
    }
}
