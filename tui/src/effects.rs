//! Overlay effect math: confetti projection and the ambient drift layer.

use ratatui::layout::Rect;
use ratatui::style::Style;

use billet_core::Particle;
use billet_types::UiOptions;

use crate::theme::{Glyphs, Palette};

/// Nominal seconds per frame, used to phase the drift layer.
const FRAME_SECONDS: f32 = 0.016;

/// Project a particle's viewport-fraction coordinates onto a cell.
///
/// Particles outside the unit square are off screen and not drawn (they may
/// still be alive and fall back in).
#[must_use]
pub fn particle_cell(particle: &Particle, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if !(0.0..1.0).contains(&particle.x) || !(0.0..1.0).contains(&particle.y) {
        return None;
    }
    let x = area.x + (particle.x * f32::from(area.width)) as u16;
    let y = area.y + (particle.y * f32::from(area.height)) as u16;
    (x < area.right() && y < area.bottom()).then_some((x, y))
}

#[must_use]
pub fn confetti_glyph(tint: u8, glyphs: &Glyphs) -> &'static str {
    glyphs.confetti_frames[usize::from(tint) % glyphs.confetti_frames.len()]
}

#[must_use]
pub fn confetti_style(tint: u8, palette: &Palette) -> Style {
    Style::default().fg(palette.confetti[usize::from(tint) % palette.confetti.len()])
}

/// One decorative glyph of the drift layer.
#[derive(Debug, Clone, Copy)]
pub struct DriftGlyph {
    pub x: u16,
    pub y: u16,
    pub symbol: &'static str,
    pub style: Style,
}

// splitmix64: cheap, stable scatter for decorative placement.
fn scatter(mut seed: u64) -> u64 {
    seed = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = seed;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Slow-drifting accent glyphs scattered behind a page's text.
///
/// Placement is a pure function of the page index and glyph slot, so the
/// field is stable across frames; only the drift phase moves. Disabled by
/// `reduced_motion`.
#[must_use]
pub fn drift_layer(
    area: Rect,
    page: usize,
    frame: u64,
    options: UiOptions,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<DriftGlyph> {
    if options.reduced_motion || area.width < 8 || area.height < 4 {
        return Vec::new();
    }

    let cells = u32::from(area.width) * u32::from(area.height);
    let count = (cells / 48).clamp(8, 50) as usize;
    let t = frame as f32 * FRAME_SECONDS;

    let mut field = Vec::with_capacity(count);
    for slot in 0..count {
        let h = scatter(((page as u64) << 32) | slot as u64);
        let base_x = (h % u64::from(area.width)) as u16;
        let base_y = ((h >> 16) % u64::from(area.height)) as u16;

        // Per-glyph drift period and phase, 15-35s like a slow float.
        let period = 15.0 + ((h >> 32) & 0xff) as f32 / 255.0 * 20.0;
        let phase = ((h >> 40) & 0xff) as f32 / 255.0 * std::f32::consts::TAU;
        let angle = t / period * std::f32::consts::TAU + phase;
        let dx = (angle.sin() * 3.0).round() as i32;
        let dy = (angle.cos() * 1.5).round() as i32;

        let x = i32::from(base_x) + dx;
        let y = i32::from(base_y) + dy;
        if x < 0 || y < 0 || x >= i32::from(area.width) || y >= i32::from(area.height) {
            continue;
        }

        let symbol = glyphs.drift_frames[(h >> 48) as usize % glyphs.drift_frames.len()];
        let tint = match (h >> 56) & 0x3 {
            0 => palette.rose_dim,
            1 => palette.blush,
            2 => palette.bg_border,
            _ => palette.text_muted,
        };
        field.push(DriftGlyph {
            x: area.x + x as u16,
            y: area.y + y as u16,
            symbol,
            style: Style::default().fg(tint),
        });
    }
    field
}

#[cfg(test)]
mod tests {
    use super::{drift_layer, particle_cell};
    use crate::theme::{Palette, glyphs};
    use billet_types::UiOptions;
    use ratatui::layout::Rect;

    #[test]
    fn drift_layer_is_stable_per_frame() {
        let area = Rect::new(0, 0, 60, 20);
        let palette = Palette::standard();
        let g = glyphs(UiOptions::default());
        let a = drift_layer(area, 1, 42, UiOptions::default(), &palette, &g);
        let b = drift_layer(area, 1, 42, UiOptions::default(), &palette, &g);
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(&b).all(|(l, r)| (l.x, l.y) == (r.x, r.y)));
    }

    #[test]
    fn drift_layer_stays_inside_the_area() {
        let area = Rect::new(5, 3, 40, 12);
        let palette = Palette::standard();
        let g = glyphs(UiOptions::default());
        for frame in [0, 100, 10_000] {
            for glyph in drift_layer(area, 2, frame, UiOptions::default(), &palette, &g) {
                assert!(glyph.x >= area.x && glyph.x < area.right());
                assert!(glyph.y >= area.y && glyph.y < area.bottom());
            }
        }
    }

    #[test]
    fn reduced_motion_disables_the_drift_layer() {
        let area = Rect::new(0, 0, 60, 20);
        let palette = Palette::standard();
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        let g = glyphs(options);
        assert!(drift_layer(area, 0, 5, options, &palette, &g).is_empty());
    }

    #[test]
    fn particles_project_into_the_area() {
        let area = Rect::new(2, 1, 50, 20);
        let mut particle = sample_particle();
        particle.x = 0.5;
        particle.y = 0.5;
        let (x, y) = particle_cell(&particle, area).unwrap();
        assert!(x >= area.x && x < area.right());
        assert!(y >= area.y && y < area.bottom());

        particle.y = -0.1;
        assert!(particle_cell(&particle, area).is_none());
    }

    fn sample_particle() -> billet_core::Particle {
        let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
        let mut celebration = billet_core::Celebration::new();
        celebration.advance(billet_core::EMISSION_PERIOD, &mut rng);
        celebration.particles()[0]
    }
}
