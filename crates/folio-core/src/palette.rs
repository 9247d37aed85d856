//! Colours for the backdrop.
//!
//! Cloud hues and the neutral base tone differ between light and dark mode;
//! the opacity ramp applied to cloud influence differs as well.

use crate::constants::{DARK_OPACITY_BASE, DARK_OPACITY_SPAN, LIGHT_OPACITY_BASE, LIGHT_OPACITY_SPAN};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    #[inline]
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[inline]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Hsla {
        Hsla { hsl: self, a }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hsl: Hsl,
    pub a: f32,
}

/// CSS colour syntax, e.g. `hsla(280, 70%, 60%, 0.45)`.
impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {:.3})",
            self.hsl.h, self.hsl.s, self.hsl.l, self.a
        )
    }
}

const DARK_CLOUDS: [Hsl; 3] = [
    Hsl::new(280.0, 70.0, 60.0), // purple
    Hsl::new(200.0, 70.0, 55.0), // cyan
    Hsl::new(320.0, 65.0, 60.0), // magenta
];

const LIGHT_CLOUDS: [Hsl; 3] = [
    Hsl::new(280.0, 75.0, 65.0), // purple
    Hsl::new(200.0, 70.0, 60.0), // cyan
    Hsl::new(160.0, 84.0, 39.0), // emerald
];

pub fn cloud_palette(scheme: ColorScheme) -> &'static [Hsl] {
    match scheme {
        ColorScheme::Dark => &DARK_CLOUDS,
        ColorScheme::Light => &LIGHT_CLOUDS,
    }
}

/// Colour for palette slot `slot`, wrapping around the palette.
#[inline]
pub fn cloud_color(scheme: ColorScheme, slot: usize) -> Hsl {
    let palette = cloud_palette(scheme);
    palette[slot % palette.len()]
}

/// Tone of dots that no cloud covers.
pub fn base_tone(scheme: ColorScheme) -> Hsla {
    match scheme {
        ColorScheme::Dark => Hsl::new(240.0, 15.0, 45.0).with_alpha(0.15),
        ColorScheme::Light => Hsl::new(240.0, 20.0, 65.0).with_alpha(0.18),
    }
}

/// Map an influence factor in `[0, 1]` onto the dot opacity ramp.
#[inline]
pub fn influence_opacity(scheme: ColorScheme, influence: f32) -> f32 {
    let f = influence.clamp(0.0, 1.0);
    match scheme {
        ColorScheme::Dark => DARK_OPACITY_BASE + f * DARK_OPACITY_SPAN,
        ColorScheme::Light => LIGHT_OPACITY_BASE + f * LIGHT_OPACITY_SPAN,
    }
}
