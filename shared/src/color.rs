//! Colour selection and 8-bit quantisation

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex colour: {0}")]
    InvalidHex(String),

    #[error("Colour channel out of range: {0} (expected 0.0 to 1.0)")]
    InvalidChannel(String),

    #[error("Expected 3 or 4 colour channels, got {0}")]
    ChannelCount(usize),
}

/// Colour as a picker reports it: floating channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Drop alpha and quantise each channel to 8 bits
    pub fn to_rgb(self) -> Rgb {
        Rgb::new(
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
        )
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::new(
            f64::from(rgb.red) / 255.0,
            f64::from(rgb.green) / 255.0,
            f64::from(rgb.blue) / 255.0,
            1.0,
        )
    }
}

/// Accepts `#rrggbb`, `rrggbb`, or `r,g,b[,a]` with floating channels
impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.contains(',') {
            return s.parse::<Rgb>().map(Rgba::from);
        }

        let channels = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .ok()
                    .filter(|v| (0.0..=1.0).contains(v))
                    .ok_or_else(|| ColorError::InvalidChannel(part.into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match channels[..] {
            [r, g, b] => Ok(Self::new(r, g, b, 1.0)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(ColorError::ChannelCount(channels.len())),
        }
    }
}

/// Scale a `[0, 1]` channel to `0..=255`, truncating
pub fn quantize(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0) as u8
}

/// 8-bit colour as sent to the lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Six lowercase hex digits, `rrggbb`
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.into()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(hex.into()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_truncates() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 127);
        assert_eq!(quantize(0.999), 254);
    }

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize(-0.2), 0);
        assert_eq!(quantize(3.0), 255);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgb::new(255, 0, 128).to_hex(), "ff0080");
        assert_eq!(Rgb::new(0x1a, 0x2b, 0x3c).to_hex(), "1a2b3c");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_rgba_quantization() {
        let rgba = Rgba::new(1.0, 0.0, 128.0 / 255.0, 1.0);
        assert_eq!(rgba.to_rgb(), Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#FF0080".parse::<Rgb>(), Ok(Rgb::new(255, 0, 128)));
        assert_eq!("1a2b3c".parse::<Rgb>(), Ok(Rgb::new(0x1a, 0x2b, 0x3c)));
        assert!(matches!("#ff00".parse::<Rgb>(), Err(ColorError::InvalidHex(_))));
        assert!(matches!("zz0080".parse::<Rgb>(), Err(ColorError::InvalidHex(_))));
    }

    #[test]
    fn test_parse_rgba_channels() {
        let rgba: Rgba = "1.0, 0, 0.5".parse().unwrap();
        assert_eq!(rgba, Rgba::new(1.0, 0.0, 0.5, 1.0));

        let rgba: Rgba = "0,0,0,0.25".parse().unwrap();
        assert_eq!(rgba.alpha, 0.25);

        let rgba: Rgba = "#ff0080".parse().unwrap();
        assert_eq!(rgba.to_rgb(), Rgb::new(255, 0, 128));
    }

    #[test]
    fn test_parse_rgba_errors() {
        assert_eq!(
            "1.5,0,0".parse::<Rgba>(),
            Err(ColorError::InvalidChannel("1.5".into()))
        );
        assert_eq!("0,0".parse::<Rgba>(), Err(ColorError::ChannelCount(2)));
        assert!(matches!(
            "red,0,0".parse::<Rgba>(),
            Err(ColorError::InvalidChannel(_))
        ));
    }
}
