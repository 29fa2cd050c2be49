use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RocError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const REFERENCE_GREY: Color = Color::rgb(0x80, 0x80, 0x80);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// HLS with all components in [0, 1].
    pub fn from_hls(h: f64, l: f64, s: f64) -> Self {
        let (r, g, b) = hls_to_rgb(h, l, s);
        Self::rgb(to_byte(r), to_byte(g), to_byte(b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = RocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let expanded: String = match hex.len() {
            3 if hex.is_ascii() => hex.chars().flat_map(|c| [c, c]).collect(),
            6 if hex.is_ascii() => hex.to_string(),
            _ => {
                return Err(RocError::Configuration(format!(
                    "color `{s}` is not #RGB or #RRGGBB"
                )));
            }
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| RocError::Configuration(format!("color `{s}` is not valid hex")))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `n` colors with evenly spaced hues (HLS, l = 0.6, s = 0.65).
pub fn evenly_spaced_palette(n: usize) -> Vec<Color> {
    // Start slightly off red, as in the seaborn "hls" palette.
    let offset = 0.01;
    (0..n)
        .map(|i| {
            let h = (offset + i as f64 / n as f64).fract();
            Color::from_hls(h, 0.6, 0.65)
        })
        .collect()
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f64,
    pub alpha: f64,
    pub dashed: bool,
}

impl LineStyle {
    pub fn solid(width: f64, alpha: f64) -> Self {
        Self {
            width,
            alpha,
            dashed: false,
        }
    }
}

/// Where a legend or annotation block sits inside its axes.
/// `Anchor` is a centre point in axes fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationPosition {
    LowerRight,
    LowerLeft,
    UpperRight,
    UpperLeft,
    Anchor { x: f64, y: f64 },
}

impl AnnotationPosition {
    /// Centre of the block in axes fractions.
    pub fn fraction(&self) -> (f64, f64) {
        match *self {
            AnnotationPosition::LowerRight => (0.75, 0.2),
            AnnotationPosition::LowerLeft => (0.25, 0.2),
            AnnotationPosition::UpperRight => (0.75, 0.8),
            AnnotationPosition::UpperLeft => (0.25, 0.8),
            AnnotationPosition::Anchor { x, y } => (x, y),
        }
    }
}

pub(crate) fn validate_line(width: f64, alpha: f64) -> Result<(), RocError> {
    if width.is_nan() || width <= 0.0 {
        return Err(RocError::Configuration(format!(
            "line width {width} must be positive"
        )));
    }
    if !(0.0..=1.0).contains(&alpha) {
        return Err(RocError::Configuration(format!(
            "line alpha {alpha} is outside [0, 1]"
        )));
    }
    Ok(())
}

pub(crate) fn validate_font(base_font: f64) -> Result<(), RocError> {
    if base_font.is_nan() || base_font <= 0.0 {
        return Err(RocError::Configuration(format!(
            "base font size {base_font} must be positive"
        )));
    }
    Ok(())
}

pub(crate) fn validate_title_font(title_font: Option<f64>) -> Result<(), RocError> {
    match title_font {
        Some(size) if size.is_nan() || size <= 0.0 => Err(RocError::Configuration(format!(
            "title font size {size} must be positive"
        ))),
        _ => Ok(()),
    }
}

/// Figure or panel size in inches; both sides must be positive and finite.
pub(crate) fn validate_size(what: &str, (width, height): (f64, f64)) -> Result<(), RocError> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if !ok(width) || !ok(height) {
        return Err(RocError::Configuration(format!(
            "{what} {width}x{height} must be positive"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/panels/style.rs"]
mod tests;
