use serde::Serialize;

use crate::error::ColorError;

/// Normalized color, every channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.red, self.green, self.blue, self.alpha)
    }
}

pub const OPAQUE: f64 = 255.0;

/// Convert 0-255 RGB channels and a 0-255 alpha to a normalized RGBA color.
pub fn convert_color(rgb: [u8; 3], alpha: f64) -> Result<Rgba, ColorError> {
    if !(0.0..=OPAQUE).contains(&alpha) {
        return Err(ColorError::AlphaOutOfRange(alpha));
    }

    let [red, green, blue] = rgb.map(|c| f64::from(c) / 255.0);

    Ok(Rgba {
        red,
        green,
        blue,
        alpha: alpha / OPAQUE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_red() {
        let color = convert_color([255, 0, 0], OPAQUE).unwrap();
        assert_eq!(color.as_tuple(), (1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_partial_channels() {
        let color = convert_color([51, 102, 204], 127.5).unwrap();
        assert!((color.red - 0.2).abs() < 1e-12);
        assert!((color.green - 0.4).abs() < 1e-12);
        assert!((color.blue - 0.8).abs() < 1e-12);
        assert!((color.alpha - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_out_of_range() {
        assert_eq!(
            convert_color([0, 0, 0], 300.0),
            Err(ColorError::AlphaOutOfRange(300.0))
        );
        assert!(convert_color([0, 0, 0], -1.0).is_err());
        assert!(convert_color([0, 0, 0], f64::NAN).is_err());
    }

    #[test]
    fn test_serializes_named_channels() {
        let color = convert_color([0, 0, 255], 0.0).unwrap();
        let json = serde_json::to_value(color).unwrap();
        assert_eq!(json["blue"], 1.0);
        assert_eq!(json["alpha"], 0.0);
    }
}
