use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Colour maps for scalar fields
// ---------------------------------------------------------------------------

/// Sequential / diverging maps used for the field heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Black → red → yellow → white, for temperature.
    Hot,
    /// Blue → light grey → red, for liquid fraction.
    CoolWarm,
    /// Dark purple → teal → yellow, for enthalpy.
    Viridis,
}

const HOT: &[(u8, u8, u8)] = &[(10, 0, 0), (230, 0, 0), (255, 210, 0), (255, 255, 255)];
const COOL_WARM: &[(u8, u8, u8)] = &[(59, 76, 192), (221, 221, 221), (180, 4, 38)];
const VIRIDIS: &[(u8, u8, u8)] = &[
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

impl Colormap {
    pub const ALL: [Colormap; 3] = [Colormap::Hot, Colormap::CoolWarm, Colormap::Viridis];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Hot => "hot",
            Colormap::CoolWarm => "coolwarm",
            Colormap::Viridis => "viridis",
        }
    }

    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            Colormap::Hot => HOT,
            Colormap::CoolWarm => COOL_WARM,
            Colormap::Viridis => VIRIDIS,
        }
    }

    /// Colour at `t` in `[0, 1]` (clamped), interpolated in linear RGB.
    pub fn sample(self, t: f32) -> [u8; 3] {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f32;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        let frac = pos - i as f32;

        let a = to_linear(stops[i]);
        let b = to_linear(stops[i + 1]);
        let srgb: Srgb<f32> = Srgb::from_linear(a.mix(b, frac));
        let rgb: Srgb<u8> = srgb.into_format();
        [rgb.red, rgb.green, rgb.blue]
    }

    pub fn color32(self, t: f32) -> Color32 {
        let [r, g, b] = self.sample(t);
        Color32::from_rgb(r, g, b)
    }
}

fn to_linear((r, g, b): (u8, u8, u8)) -> LinSrgb<f32> {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Value → colour scale
// ---------------------------------------------------------------------------

/// Maps values in `[min, max]` onto a colour map, optionally quantised into
/// `levels` flat bands (the filled-contour look).
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub min: f64,
    pub max: f64,
    pub levels: Option<usize>,
}

impl ColorScale {
    pub fn new(colormap: Colormap, min: f64, max: f64) -> Self {
        ColorScale {
            colormap,
            min,
            max,
            levels: None,
        }
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = Some(levels.max(1));
        self
    }

    /// Position of `value` in `[0, 1]` after banding.
    pub fn normalize(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        let t = if range.abs() < f64::EPSILON {
            0.0
        } else {
            ((value - self.min) / range).clamp(0.0, 1.0)
        };
        let t = match self.levels {
            Some(1) => 0.0,
            Some(n) => {
                let band = ((t * n as f64).floor() as usize).min(n - 1);
                band as f64 / (n - 1) as f64
            }
            None => t,
        };
        t as f32
    }

    pub fn rgb(&self, value: f64) -> [u8; 3] {
        self.colormap.sample(self.normalize(value))
    }

    pub fn color32(&self, value: f64) -> Color32 {
        self.colormap.color32(self.normalize(value))
    }
}
