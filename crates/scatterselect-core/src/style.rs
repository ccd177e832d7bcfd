//! Visual style of the selection indicator.

use kurbo::Stroke;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
///
/// Deserializes from either an `{"r", "g", "b", "a"}` object or a
/// `"#rrggbb"` / `"#rrggbbaa"` string. Always serializes as the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn blue() -> Self {
        Self::new(59, 130, 246, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

/// Accepted input forms for [`SerializableColor`].
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl TryFrom<ColorRepr> for SerializableColor {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Self::from_hex(&s).ok_or_else(|| format!("invalid hex color {s:?}")),
            ColorRepr::Rgba { r, g, b, a } => Ok(Self::new(r, g, b, a)),
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style options for the selection indicator.
///
/// Applied to the indicator once when the selector is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionStyle {
    /// Outline color.
    pub stroke: SerializableColor,
    /// Dash pattern as alternating on/off lengths. Empty means solid.
    pub stroke_dash_array: Vec<f64>,
    /// Outline width.
    pub stroke_width: f64,
    /// Fill color.
    pub fill: SerializableColor,
    /// Fill opacity in `[0, 1]`, multiplied into the fill alpha.
    pub fill_opacity: f64,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            stroke: SerializableColor::blue(),
            stroke_dash_array: vec![4.0, 4.0],
            stroke_width: 1.0,
            fill: SerializableColor::blue(),
            fill_opacity: 0.1,
        }
    }
}

impl SelectionStyle {
    /// Get the outline color as a peniko Color.
    pub fn stroke_color(&self) -> Color {
        self.stroke.into()
    }

    /// Get the fill color with `fill_opacity` applied.
    pub fn fill_color(&self) -> Color {
        let color: Color = self.fill.into();
        let rgba = color.to_rgba8();
        let alpha = (rgba.a as f64 * self.fill_opacity.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
    }

    /// Build the kurbo stroke for the outline.
    pub fn stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.stroke_width);
        if self.stroke_dash_array.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.stroke_dash_array.iter().copied())
        }
    }

    /// Check the numeric options, returning a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(format!("stroke_width must be >= 0, got {}", self.stroke_width));
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(format!(
                "fill_opacity must be within [0, 1], got {}",
                self.fill_opacity
            ));
        }
        if let Some(bad) = self
            .stroke_dash_array
            .iter()
            .find(|len| !len.is_finite() || **len < 0.0)
        {
            return Err(format!("stroke_dash_array entries must be >= 0, got {}", bad));
        }
        Ok(())
    }
}
