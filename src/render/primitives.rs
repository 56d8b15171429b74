use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializes as a CSS-like `rgba(r, g, b, a)` string when every channel is
/// an exact 8-bit value, and as `color(srgb r g b / a)` otherwise so the
/// string reads back to the same channels. Input also accepts `#rgb`,
/// `#rgba`, `#rrggbb`, `#rrggbbaa` and `rgb(..)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a 0..=1 alpha.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    pub fn parse(input: &str) -> ChartResult<Self> {
        let trimmed = input.trim();
        let color = if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = trimmed.strip_prefix("color(srgb ") {
            args.strip_suffix(')').and_then(parse_srgb)
        } else if let Some(args) = trimmed
            .strip_prefix("rgba(")
            .or_else(|| trimmed.strip_prefix("rgb("))
        {
            args.strip_suffix(')').and_then(parse_channels)
        } else {
            None
        };

        let color = color.ok_or_else(|| {
            ChartError::InvalidData(format!("unsupported color literal `{trimmed}`"))
        })?;
        color.validate()?;
        Ok(color)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (exact_byte(self.red), exact_byte(self.green), exact_byte(self.blue)) {
            (Some(red), Some(green), Some(blue)) => {
                write!(f, "rgba({red}, {green}, {blue}, {})", self.alpha)
            }
            _ => write!(
                f,
                "color(srgb {} {} {} / {})",
                self.red, self.green, self.blue, self.alpha
            ),
        }
    }
}

/// The 8-bit value that `from_rgba8` maps back onto exactly `channel`.
fn exact_byte(channel: f64) -> Option<u8> {
    if !(0.0..=1.0).contains(&channel) {
        return None;
    }
    let byte = (channel * 255.0).round() as u8;
    (f64::from(byte) / 255.0 == channel).then_some(byte)
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> ChartResult<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 1.0)),
        4 => Some(Color::from_rgba8(
            nibble(0)?,
            nibble(1)?,
            nibble(2)?,
            f64::from(nibble(3)?) / 255.0,
        )),
        6 => Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 1.0)),
        8 => Some(Color::from_rgba8(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            f64::from(byte(6)?) / 255.0,
        )),
        _ => None,
    }
}

fn parse_channels(args: &str) -> Option<Color> {
    let values: Vec<f64> = args
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    let (rgb, alpha) = match values.as_slice() {
        [r, g, b] => ([*r, *g, *b], 1.0),
        [r, g, b, a] => ([*r, *g, *b], *a),
        _ => return None,
    };
    if rgb.iter().any(|channel| !(0.0..=255.0).contains(channel)) {
        return None;
    }
    Some(Color::rgba(
        rgb[0] / 255.0,
        rgb[1] / 255.0,
        rgb[2] / 255.0,
        alpha,
    ))
}

/// `r g b / a` with unit channels; the alpha part is optional.
fn parse_srgb(args: &str) -> Option<Color> {
    let (rgb, alpha) = match args.split_once('/') {
        Some((rgb, alpha)) => (rgb, alpha.trim().parse::<f64>().ok()?),
        None => (args, 1.0),
    };
    let channels: Vec<f64> = rgb
        .split_whitespace()
        .map(|part| part.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match channels.as_slice() {
        [red, green, blue] => Some(Color::rgba(*red, *green, *blue, alpha)),
        _ => None,
    }
}

/// Stroke end-cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[cfg(test)]
mod tests {
    use super::Color;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#000").expect("short hex"), Color::BLACK);
        assert_eq!(Color::parse("#ffffff").expect("long hex"), Color::WHITE);

        let navy = Color::parse("#004080").expect("hex");
        assert_abs_diff_eq!(navy.green, 64.0 / 255.0);
        assert_abs_diff_eq!(navy.blue, 128.0 / 255.0);

        let translucent = Color::parse("#ff000080").expect("hex with alpha");
        assert_abs_diff_eq!(translucent.alpha, 128.0 / 255.0);
    }

    #[test]
    fn parses_functional_forms() {
        let color = Color::parse("rgba(0, 128, 255, 0.4)").expect("rgba");
        assert_abs_diff_eq!(color.red, 0.0);
        assert_abs_diff_eq!(color.green, 128.0 / 255.0);
        assert_abs_diff_eq!(color.blue, 1.0);
        assert_abs_diff_eq!(color.alpha, 0.4);

        let opaque = Color::parse("rgb(255,255,255)").expect("rgb");
        assert_eq!(opaque, Color::WHITE);
    }

    #[test]
    fn rejects_malformed_literals() {
        for literal in ["", "#12", "#ggg", "rgba(1,2)", "rgb(300,0,0)", "rgba(0,0,0,2)", "red"] {
            assert!(Color::parse(literal).is_err(), "{literal} should fail");
        }
    }

    #[test]
    fn serde_round_trips_through_css_string() {
        let json = serde_json::to_string(&Color::from_rgba8(0, 64, 128, 1.0)).expect("serialize");
        assert_eq!(json, "\"rgba(0, 64, 128, 1)\"");
        let back: Color = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Color::from_rgba8(0, 64, 128, 1.0));
    }

    #[test]
    fn fractional_channels_keep_full_precision() {
        let gray = Color::rgb(0.3, 0.3, 0.3);
        assert_eq!(gray.to_string(), "color(srgb 0.3 0.3 0.3 / 1)");
        assert_eq!(Color::parse(&gray.to_string()).expect("srgb"), gray);

        let json = serde_json::to_string(&gray).expect("serialize");
        let back: Color = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, gray);
    }

    #[test]
    fn parses_srgb_form() {
        let color = Color::parse("color(srgb 1 0.5 0)").expect("srgb without alpha");
        assert_eq!(color, Color::rgb(1.0, 0.5, 0.0));
        assert!(Color::parse("color(srgb 1 0.5)").is_err());
        assert!(Color::parse("color(srgb 2 0 0 / 1)").is_err());
    }
}
