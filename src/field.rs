//! The particle field proper: population lifecycle, per-tick physics and
//! the link render pass.
//!
//! The update loop each frame is:
//! 1. [`FieldSim::tick`] — integrate, bounce off the edges, pull toward
//!    the pointer, clamp speed.
//! 2. [`FieldSim::render`] — wipe the surface, draw every particle, then
//!    stroke a fading line between every pair closer than the link
//!    distance.
//!
//! Everything here is pure simulation state; the DOM side (canvas sizing,
//! listeners, the frame loop) lives in `lib.rs`.

use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::Pointer;
use crate::render::Surface;
use crate::theme::Theme;

pub struct FieldSim {
    width: f64,
    height: f64,
    theme: Theme,
    config: FieldConfig,
    particles: Vec<Particle>,
    pointer: Pointer,
    ticks: u64,
}

impl FieldSim {
    pub fn new(width: f64, height: f64, theme: Theme, config: FieldConfig) -> FieldSim {
        let mut sim = FieldSim {
            width,
            height,
            theme,
            config,
            particles: Vec::new(),
            pointer: Pointer::new(),
            ticks: 0,
        };
        sim.reseed();
        sim
    }

    /// Population for a given viewport width: one particle per
    /// `population_divisor` pixels, capped at `population_cap`.
    pub fn population_for(width: f64, config: &FieldConfig) -> usize {
        let n = (width / config.population_divisor).floor().max(0.0) as usize;
        n.min(config.population_cap)
    }

    /// Discards and regenerates the whole population for the current
    /// viewport and theme. Colors are baked in here, so theme changes have
    /// to come back through a re-seed. Resizes re-seed too rather than
    /// repositioning survivors; the abrupt swap is the intended look.
    pub fn reseed(&mut self) {
        let count = Self::population_for(self.width, &self.config);
        let palette = self.theme.palette();
        let mut rng = rand::thread_rng();
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let pos = [
                rng.gen::<f64>() * self.width,
                rng.gen::<f64>() * self.height,
            ];
            let vel = [
                (rng.gen::<f64>() - 0.5) * 0.5,
                (rng.gen::<f64>() - 0.5) * 0.5,
            ];
            let size = rng.gen::<f64>() * 2.0 + 1.0;
            self.particles
                .push(Particle::new(pos, vel, size, palette.sample(&mut rng)));
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.reseed();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            self.theme = theme;
            self.reseed();
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.moved_to(x, y);
    }

    /// One simulation tick over the whole population.
    pub fn tick(&mut self) {
        let radius = self.config.attraction_radius;
        let strength = self.config.attraction_strength;
        for p in &mut self.particles {
            p.integrate(self.width, self.height);
            if let Some(impulse) = self.pointer.attraction(p.pos, radius, strength) {
                p.vel = vecmath::vec2_add(p.vel, impulse);
            }
            p.clamp_speed(self.config.max_speed);
        }
        self.ticks += 1;
    }

    /// Draw pass for the current state.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);
        for p in &self.particles {
            surface.fill_circle(p.pos[0], p.pos[1], p.size, p.color);
        }
        self.connect_particles(surface);
    }

    // O(n²) over the pair set; bounded by the population cap (~4950 pairs
    // at 100), so no spatial bucketing. A grid would be the escape hatch
    // if the cap ever grows.
    fn connect_particles<S: Surface>(&self, surface: &mut S) {
        let palette = self.theme.palette();
        let max = self.config.link_distance;
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = &self.particles[i];
                let b = &self.particles[j];
                let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
                if distance < max {
                    let style = palette.link_style(1.0 - distance / max);
                    surface.stroke_line(a.pos, b.pos, style, 0.5);
                }
            }
        }
    }

    pub fn population(&self) -> usize {
        self.particles.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    /// Surface that records draw calls instead of touching a canvas.
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(f64, f64, f64, Color)>,
        lines: Vec<([f64; 2], [f64; 2], Color)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
            self.circles.push((x, y, radius, color));
        }

        fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, _width: f64) {
            self.lines.push((from, to, color));
        }
    }

    fn sim(width: f64, height: f64, theme: Theme) -> FieldSim {
        FieldSim::new(width, height, theme, FieldConfig::default())
    }

    /// Sim with no seeded particles, for tests that place their own.
    fn empty_sim() -> FieldSim {
        let s = sim(0.0, 0.0, Theme::Dark);
        assert_eq!(s.population(), 0);
        s
    }

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 2.0, Color::new(128, 128, 128, 0.3))
    }

    #[test]
    fn population_follows_viewport_width() {
        let config = FieldConfig::default();
        assert_eq!(FieldSim::population_for(1000.0, &config), 100);
        assert_eq!(FieldSim::population_for(350.0, &config), 35);
        assert_eq!(FieldSim::population_for(359.9, &config), 35);
        assert_eq!(FieldSim::population_for(9.0, &config), 0);
        assert_eq!(FieldSim::population_for(0.0, &config), 0);
        assert_eq!(FieldSim::population_for(25_000.0, &config), 100);
    }

    #[test]
    fn resize_reseeds_to_the_new_population() {
        let mut s = sim(1000.0, 800.0, Theme::Dark);
        assert_eq!(s.population(), 100);
        s.resize(350.0, 800.0);
        assert_eq!(s.population(), 35);
        s.resize(5.0, 800.0);
        assert_eq!(s.population(), 0);
    }

    #[test]
    fn seeded_particles_start_inside_the_viewport() {
        let s = sim(640.0, 480.0, Theme::Light);
        for p in s.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 480.0);
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
        }
    }

    #[test]
    fn dark_viewport_scenario_seeds_the_capped_population() {
        // 1000×800 dark: min(floor(1000/10), 100) = 100, all dark-palette.
        let s = sim(1000.0, 800.0, Theme::Dark);
        assert_eq!(s.population(), 100);
        for p in s.particles() {
            assert!(p.color.r >= 100);
            assert!(p.color.g >= 100);
            assert!(p.color.b >= 200);
            assert!(p.color.a >= 0.2 && p.color.a < 0.5);
        }
    }

    #[test]
    fn particles_stay_bounded_and_below_max_speed() {
        let mut s = sim(400.0, 300.0, Theme::Dark);
        s.pointer_moved(200.0, 150.0);
        for _ in 0..500 {
            s.tick();
            for p in s.particles() {
                assert!(
                    p.pos[0] >= 0.0 && p.pos[0] <= 400.0,
                    "x {} escaped the field",
                    p.pos[0]
                );
                assert!(
                    p.pos[1] >= 0.0 && p.pos[1] <= 300.0,
                    "y {} escaped the field",
                    p.pos[1]
                );
                assert!(
                    p.speed() <= 1.5 + 1e-9,
                    "speed {} above the clamp",
                    p.speed()
                );
            }
        }
        assert_eq!(s.ticks(), 500);
    }

    #[test]
    fn pointer_on_top_of_a_particle_is_harmless() {
        let mut s = empty_sim();
        s.width = 200.0;
        s.height = 200.0;
        s.particles.push(particle_at(50.0, 50.0));
        s.pointer_moved(50.0, 50.0);
        s.tick();
        let p = &s.particles()[0];
        assert!(p.pos[0].is_finite() && p.pos[1].is_finite());
        assert!(p.vel[0].is_finite() && p.vel[1].is_finite());
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn pairs_just_inside_the_link_distance_get_a_line() {
        let mut s = empty_sim();
        s.particles.push(particle_at(0.0, 0.0));
        s.particles.push(particle_at(119.9, 0.0));
        let mut surface = RecordingSurface::default();
        s.render(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.circles.len(), 2);
        assert_eq!(surface.lines.len(), 1);
        let (_, _, style) = surface.lines[0];
        assert_eq!((style.r, style.g, style.b), (150, 150, 255));
        assert!(style.a > 0.0 && style.a < 0.001);
    }

    #[test]
    fn pairs_just_outside_the_link_distance_get_none() {
        let mut s = empty_sim();
        s.particles.push(particle_at(0.0, 0.0));
        s.particles.push(particle_at(120.1, 0.0));
        let mut surface = RecordingSurface::default();
        s.render(&mut surface);
        assert_eq!(surface.circles.len(), 2);
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn link_count_covers_every_close_pair_once() {
        let mut s = empty_sim();
        // Three mutually close particles: 3 unordered pairs.
        s.particles.push(particle_at(0.0, 0.0));
        s.particles.push(particle_at(10.0, 0.0));
        s.particles.push(particle_at(0.0, 10.0));
        let mut surface = RecordingSurface::default();
        s.render(&mut surface);
        assert_eq!(surface.lines.len(), 3);
    }

    #[test]
    fn theme_change_reseeds_with_the_new_palette() {
        let mut s = sim(1000.0, 800.0, Theme::Dark);
        s.set_theme(Theme::Light);
        assert_eq!(s.theme(), Theme::Light);
        assert_eq!(s.population(), 100);
        for p in s.particles() {
            assert!(p.color.r >= 50 && p.color.r < 150);
            assert!(p.color.a >= 0.1 && p.color.a < 0.3);
        }
    }

    #[test]
    fn setting_the_same_theme_keeps_the_population() {
        let mut s = sim(1000.0, 800.0, Theme::Dark);
        let before: Vec<[f64; 2]> = s.particles().iter().map(|p| p.pos).collect();
        s.set_theme(Theme::Dark);
        let after: Vec<[f64; 2]> = s.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn attraction_pulls_particles_toward_the_pointer() {
        let mut s = empty_sim();
        s.width = 400.0;
        s.height = 400.0;
        s.particles.push(particle_at(100.0, 200.0));
        s.pointer_moved(150.0, 200.0);
        s.tick();
        let p = &s.particles()[0];
        assert!(p.vel[0] > 0.0, "should accelerate toward the pointer");
        assert!(p.vel[1].abs() < 1e-12);
    }
}
