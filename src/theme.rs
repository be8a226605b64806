//! Theme handling for the backdrop.
//!
//! The host shell hands us a theme name (`"dark"`, `"light"` or
//! `"system"`); `"system"` is resolved against the `prefers-color-scheme`
//! media query before it reaches the simulation. Each concrete theme maps
//! to a [`Palette`] that is looked up once per re-seed — particle colors
//! are baked in at creation, nothing branches on the theme per draw.

use crate::color::Color;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Maps a host-supplied theme name to a concrete theme. Unrecognized
    /// names fall back to dark, the site default.
    pub fn resolve(name: &str, prefers_dark: bool) -> Theme {
        match name {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            "system" => {
                if prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            _ => Theme::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}

/// Per-theme color table: sampling ranges for particle colors plus the
/// fixed hue and base opacity of the connecting lines.
pub struct Palette {
    /// Sampling range shared by the red and green channels, `[lo, hi)`.
    pub red_green: (f64, f64),
    /// Sampling range for the blue channel, `[lo, hi)`.
    pub blue: (f64, f64),
    /// Particle alpha range, `[lo, hi)`.
    pub alpha: (f64, f64),
    /// Link hue; the `a` field is the base opacity before distance fade.
    pub link: Color,
}

// Dark pages get cool blue-violet dots; light pages darker blue-grey ones
// at lower opacity so they stay subtle against a white background.
static DARK: Palette = Palette {
    red_green: (100.0, 255.0),
    blue: (200.0, 255.0),
    alpha: (0.2, 0.5),
    link: Color { r: 150, g: 150, b: 255, a: 0.2 },
};

static LIGHT: Palette = Palette {
    red_green: (50.0, 150.0),
    blue: (100.0, 255.0),
    alpha: (0.1, 0.3),
    link: Color { r: 100, g: 100, b: 200, a: 0.1 },
};

impl Palette {
    /// Draws one translucent particle color from the theme's channel ranges.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Color {
        let (rg_lo, rg_hi) = self.red_green;
        let (b_lo, b_hi) = self.blue;
        let (a_lo, a_hi) = self.alpha;
        Color {
            r: (rg_lo + rng.gen::<f64>() * (rg_hi - rg_lo)) as u8,
            g: (rg_lo + rng.gen::<f64>() * (rg_hi - rg_lo)) as u8,
            b: (b_lo + rng.gen::<f64>() * (b_hi - b_lo)) as u8,
            a: a_lo + rng.gen::<f64>() * (a_hi - a_lo),
        }
    }

    /// Stroke style for a link between two particles. `proximity` is
    /// `1 - distance / link_distance`, so touching particles get the full
    /// base opacity and pairs at the cutoff fade to nothing.
    pub fn link_style(&self, proximity: f64) -> Color {
        self.link.with_alpha(self.link.a * proximity)
    }
}
