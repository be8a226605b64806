// Drawing seam between the simulation and the canvas. The sim renders
// through this trait, which keeps the link/boundary behavior testable
// away from the DOM.

use crate::color::Color;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64);
}

/// [`Surface`] backed by a canvas 2d rendering context.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> CanvasSurface {
        CanvasSurface { context }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.context.begin_path();
        // arc only errors on a negative radius, which seeding never produces
        if self
            .context
            .arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0)
            .is_err()
        {
            return;
        }
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, width: f64) {
        self.context.begin_path();
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}
