// Point-mass particle: position, velocity, radius, and a color baked in at
// seed time. Particles carry no identity across a re-seed.

use crate::color::Color;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            size,
            color,
        }
    }

    /// Advances one tick and reflects off the field edges. A particle that
    /// steps past an edge has that velocity component negated and its
    /// position pulled back into `[0, width] × [0, height]`.
    pub fn integrate(&mut self, width: f64, height: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] = -self.vel[0];
            self.pos[0] = self.pos[0].max(0.0).min(width);
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] = -self.vel[1];
            self.pos[1] = self.pos[1].max(0.0).min(height);
        }
    }

    /// Rescales the velocity to `max_speed` when it exceeds it, preserving
    /// direction.
    pub fn clamp_speed(&mut self, max_speed: f64) {
        if self.speed() > max_speed {
            self.vel = vecmath::vec2_scale(vecmath::vec2_normalized(self.vel), max_speed);
        }
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }
}
