//! Confetti celebration: a fixed-budget particle loop.
//!
//! Emission is sampled on a periodic tick; each tick fires two mirrored
//! bursts from opposite horizontal origins with a particle count that decays
//! linearly with the time remaining in the budget. The loop self-cancels
//! once the budget elapses; already-emitted particles fall out on their own.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::{Rng, RngExt};

/// Total animation time budget.
pub const CELEBRATION_BUDGET: Duration = Duration::from_millis(3000);

/// Interval between emission ticks.
pub const EMISSION_PERIOD: Duration = Duration::from_millis(250);

/// Particle count per burst at full remaining budget.
const PARTICLES_PER_BURST: f32 = 50.0;

/// How long one particle stays alive.
const PARTICLE_TTL: Duration = Duration::from_millis(1500);

/// Downward pull, in viewport heights per second squared.
const GRAVITY: f32 = 0.6;

/// Launch speed ceiling, in viewport fractions per second.
const START_SPEED: f32 = 0.35;

/// Particle count for one burst given the remaining budget.
///
/// Linear decay: full budget yields the full count, an exhausted budget
/// yields zero.
#[must_use]
pub fn burst_count(remaining: Duration) -> usize {
    let fraction = remaining.as_secs_f32() / CELEBRATION_BUDGET.as_secs_f32();
    (PARTICLES_PER_BURST * fraction).round() as usize
}

/// One confetti particle in viewport-fraction coordinates.
///
/// `x`/`y` live in `[0, 1]` across the viewport; the renderer projects them
/// onto cells each frame.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Tint index into the renderer's confetti palette.
    pub tint: u8,
    vx: f32,
    vy: f32,
    ttl: Duration,
}

#[derive(Debug)]
pub struct Celebration {
    elapsed: Duration,
    /// Last emission tick boundary already processed.
    emitted_through: Duration,
    particles: Vec<Particle>,
}

impl Celebration {
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            emitted_through: Duration::ZERO,
            particles: Vec::new(),
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Emission has stopped and every particle has fallen out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= CELEBRATION_BUDGET && self.particles.is_empty()
    }

    /// Advance the animation by `delta` frame time.
    ///
    /// Crossing an emission boundary fires that tick's bursts; a tick
    /// landing on or past the budget emits nothing and ends the loop.
    pub fn advance(&mut self, delta: Duration, rng: &mut impl Rng) {
        self.elapsed = self.elapsed.saturating_add(delta);

        while self.emitted_through < CELEBRATION_BUDGET
            && self.emitted_through + EMISSION_PERIOD <= self.elapsed
        {
            self.emitted_through += EMISSION_PERIOD;
            let remaining = CELEBRATION_BUDGET.saturating_sub(self.emitted_through);
            if remaining.is_zero() {
                break;
            }
            self.emit_tick(remaining, rng);
        }

        let dt = delta.as_secs_f32();
        for particle in &mut self.particles {
            particle.vy += GRAVITY * dt;
            particle.x += particle.vx * dt;
            particle.y += particle.vy * dt;
            particle.ttl = particle.ttl.saturating_sub(delta);
        }
        self.particles.retain(|p| {
            !p.ttl.is_zero() && p.y <= 1.2 && (-0.2..=1.2).contains(&p.x)
        });
    }

    /// Two mirrored bursts: one from the left flank, one from the right.
    fn emit_tick(&mut self, remaining: Duration, rng: &mut impl Rng) {
        let count = burst_count(remaining);
        self.emit_burst(count, 0.1..=0.3, rng);
        self.emit_burst(count, 0.7..=0.9, rng);
    }

    fn emit_burst(
        &mut self,
        count: usize,
        origin_x: RangeInclusive<f32>,
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            // Full-circle spread with a random launch speed.
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(0.0..START_SPEED);
            self.particles.push(Particle {
                x: rng.random_range(origin_x.clone()),
                y: rng.random_range(0.0..1.0) - 0.2,
                tint: rng.random_range(0..u8::MAX),
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                ttl: PARTICLE_TTL,
            });
        }
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CELEBRATION_BUDGET, Celebration, EMISSION_PERIOD, burst_count,
    };
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn burst_count_decays_linearly() {
        assert_eq!(burst_count(CELEBRATION_BUDGET), 50);
        assert_eq!(burst_count(Duration::from_millis(1500)), 25);
        assert_eq!(burst_count(Duration::ZERO), 0);
    }

    #[test]
    fn first_tick_fires_two_mirrored_bursts() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut celebration = Celebration::new();
        celebration.advance(EMISSION_PERIOD, &mut rng);
        let expected = 2 * burst_count(CELEBRATION_BUDGET - EMISSION_PERIOD);
        assert_eq!(celebration.particles().len(), expected);

        let left = celebration
            .particles()
            .iter()
            .filter(|p| p.x <= 0.5)
            .count();
        // Mirrored origins: half the particles start on each flank.
        assert_eq!(left * 2, celebration.particles().len());
    }

    #[test]
    fn nothing_emits_before_the_first_boundary() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut celebration = Celebration::new();
        celebration.advance(EMISSION_PERIOD - Duration::from_millis(1), &mut rng);
        assert!(celebration.particles().is_empty());
    }

    #[test]
    fn emission_stops_once_the_budget_elapses() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut celebration = Celebration::new();
        let steps = (CELEBRATION_BUDGET.as_millis() / EMISSION_PERIOD.as_millis()) as u32;
        for _ in 0..steps {
            celebration.advance(EMISSION_PERIOD, &mut rng);
        }
        let at_budget = celebration.particles().len();
        assert!(at_budget > 0);

        // Past the budget: no new particles, only decay.
        celebration.advance(EMISSION_PERIOD, &mut rng);
        assert!(celebration.particles().len() <= at_budget);

        celebration.advance(Duration::from_secs(10), &mut rng);
        assert!(celebration.is_finished());
    }

    #[test]
    fn later_ticks_emit_fewer_particles_than_earlier_ones() {
        let first = burst_count(CELEBRATION_BUDGET - EMISSION_PERIOD);
        let last = burst_count(EMISSION_PERIOD);
        assert!(first > last);
        assert!(last > 0);
    }
}
