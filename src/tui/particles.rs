//! Drifting background particles.
//!
//! Each particle rises from the bottom of its area to the top over its own
//! duration, starting after a random delay, and loops forever. Positions are
//! a pure function of elapsed time, so the field never needs ticking.

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

#[derive(Debug, Clone, PartialEq)]
struct Particle {
    /// Horizontal position, 0.0..100.0 percent of the area width.
    left: f32,
    /// Seconds before the first rise.
    delay: f32,
    /// Seconds for one rise.
    duration: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Scatter `count` particles using the thread RNG.
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                left: rng.gen_range(0.0..100.0),
                delay: rng.gen_range(0.0..5.0),
                duration: rng.gen_range(10.0..15.0),
            })
            .collect();
        ParticleField { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Cell positions of the visible particles inside `area` after `elapsed`
    /// seconds.
    pub fn positions(&self, area: Rect, elapsed: f32) -> Vec<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return Vec::new();
        }
        self.particles
            .iter()
            .filter(|p| elapsed >= p.delay)
            .map(|p| {
                let progress = ((elapsed - p.delay) % p.duration) / p.duration;
                let max_x = f32::from(area.width - 1);
                let max_y = f32::from(area.height - 1);
                let x = (p.left / 100.0 * max_x).round() as u16;
                let y = ((1.0 - progress) * max_y).round() as u16;
                (area.x + x.min(area.width - 1), area.y + y.min(area.height - 1))
            })
            .collect()
    }

    /// Draw the particles into empty cells of `buf`, leaving text untouched.
    pub fn render(&self, area: Rect, elapsed: f32, color: Color, buf: &mut Buffer) {
        for (x, y) in self.positions(area, elapsed) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                if cell.symbol() == " " {
                    cell.set_symbol("·").set_fg(color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn field(count: usize) -> ParticleField {
        ParticleField::with_rng(count, &mut StdRng::seed_from_u64(86))
    }

    #[test]
    fn particles_stay_inside_area() {
        let area = Rect::new(2, 3, 40, 10);
        let field = field(30);
        for step in 0..100 {
            for (x, y) in field.positions(area, step as f32 * 0.37) {
                assert!(x >= area.x && x < area.x + area.width);
                assert!(y >= area.y && y < area.y + area.height);
            }
        }
    }

    #[test]
    fn nothing_shows_before_any_delay_elapses() {
        let area = Rect::new(0, 0, 20, 20);
        assert!(field(30).positions(area, -1.0).is_empty());
        assert_eq!(field(30).positions(area, 5.0).len(), 30);
    }

    #[test]
    fn zero_sized_area_draws_nothing() {
        assert!(field(5).positions(Rect::new(0, 0, 0, 4), 6.0).is_empty());
    }

    #[test]
    fn render_skips_occupied_cells() {
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "X", ratatui::style::Style::default());
        field(3).render(area, 6.0, Color::Magenta, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "X");
    }
}
