//! Runtime tunables for the particle field.
//!
//! Defaults reproduce the shipped behavior; a host can override any subset
//! by passing a plain JS object to `ParticleField::mount`.

use wasm_bindgen::prelude::*;

pub const DEFAULT_POPULATION_DIVISOR: f64 = 10.0;
pub const DEFAULT_POPULATION_CAP: usize = 100;
pub const DEFAULT_LINK_DISTANCE: f64 = 120.0;
pub const DEFAULT_ATTRACTION_RADIUS: f64 = 100.0;
pub const DEFAULT_ATTRACTION_STRENGTH: f64 = 0.2;
pub const DEFAULT_MAX_SPEED: f64 = 1.5;

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct FieldConfig {
    /// One particle per this many viewport pixels of width.
    pub population_divisor: f64,
    /// Hard ceiling on the population; keeps the O(n²) link pass bounded.
    pub population_cap: usize,
    /// Pairs closer than this get a connecting line.
    pub link_distance: f64,
    /// Pointer attraction falls off to zero at this distance.
    pub attraction_radius: f64,
    /// Scale applied to the pointer attraction impulse.
    pub attraction_strength: f64,
    /// Velocities are rescaled to this magnitude when they exceed it.
    pub max_speed: f64,
    /// Wraps each frame in a console.time span when set.
    pub debug: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            population_divisor: DEFAULT_POPULATION_DIVISOR,
            population_cap: DEFAULT_POPULATION_CAP,
            link_distance: DEFAULT_LINK_DISTANCE,
            attraction_radius: DEFAULT_ATTRACTION_RADIUS,
            attraction_strength: DEFAULT_ATTRACTION_STRENGTH,
            max_speed: DEFAULT_MAX_SPEED,
            debug: false,
        }
    }
}

#[wasm_bindgen]
impl FieldConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FieldConfig {
    /// Reads overrides out of an arbitrary JS value. Anything that is not
    /// an object (undefined, null, a number...) yields the defaults.
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            return config;
        }

        macro_rules! extract {
            ($field:ident, $key:expr) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num;
                    }
                }
            };
        }

        extract!(population_divisor, "populationDivisor");
        extract!(link_distance, "linkDistance");
        extract!(attraction_radius, "attractionRadius");
        extract!(attraction_strength, "attractionStrength");
        extract!(max_speed, "maxSpeed");

        if let Ok(v) = js_sys::Reflect::get(&value, &"populationCap".into()) {
            if let Some(num) = v.as_f64() {
                config.population_cap = num.max(0.0) as usize;
            }
        }

        if let Ok(v) = js_sys::Reflect::get(&value, &"debug".into()) {
            if let Some(flag) = v.as_bool() {
                config.debug = flag;
            }
        }

        config
    }
}
