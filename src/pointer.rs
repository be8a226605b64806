// Last known cursor position and the attraction it exerts on nearby
// particles. Owned by the simulation instance; `None` until the first
// pointer-move arrives, and an unknown pointer exerts no force.

use nalgebra_glm as glm;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, Default)]
pub struct Pointer {
    pos: Option<(f64, f64)>,
}

impl Pointer {
    pub fn new() -> Pointer {
        Pointer { pos: None }
    }

    pub fn moved_to(&mut self, x: f64, y: f64) {
        self.pos = Some((x, y));
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.pos
    }

    /// Velocity impulse pulling a particle at `at` toward the pointer, or
    /// `None` when the pointer is unknown, out of range, or exactly on top
    /// of the particle (no defined direction there).
    ///
    /// The impulse scales linearly from `strength` at zero separation down
    /// to nothing at `radius`.
    pub fn attraction(
        &self,
        at: Vector2<f64>,
        radius: f64,
        strength: f64,
    ) -> Option<Vector2<f64>> {
        let (x, y) = self.pos?;
        let to_pointer = vecmath::vec2_sub([x, y], at);
        let distance = glm::length(&glm::vec2(to_pointer[0], to_pointer[1]));
        if distance <= 0.0 || distance >= radius {
            return None;
        }
        let force = (radius - distance) / radius;
        Some(vecmath::vec2_scale(
            vecmath::vec2_normalized(to_pointer),
            force * strength,
        ))
    }
}
