//! Color encoding for normalized RGBA variable values
//!
//! Color variables carry four float channels in the `0.0..=1.0` range. They are
//! emitted as 8-digit lowercase hex strings (`#rrggbbaa`). The hex parser
//! accepts `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA` and maps them back to
//! normalized channels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// A color with normalized float channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha channel; absent in the source means fully opaque
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    /// Create an opaque color.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with explicit alpha.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Encode a color as `#rrggbbaa`.
///
/// Each channel is scaled to `0..=255` and rounded half-up. Channels outside
/// `0.0..=1.0` are clamped so the result always has 8 hex digits.
///
/// # Examples
///
/// ```
/// use tokensrc::color::{rgba_to_hex, Rgba};
///
/// assert_eq!(rgba_to_hex(&Rgba::new(1.0, 0.0, 0.0, 1.0)), "#ff0000ff");
/// assert_eq!(rgba_to_hex(&Rgba::new(0.0, 0.0, 0.0, 0.5)), "#00000080");
/// ```
pub fn rgba_to_hex(color: &Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        channel_to_u8(color.r),
        channel_to_u8(color.g),
        channel_to_u8(color.b),
        channel_to_u8(color.a)
    )
}

/// Scale a normalized channel to a byte. NaN maps to 0.
fn channel_to_u8(c: f64) -> u8 {
    // floor(x + 0.5) matches the host's half-up rounding, `round()` does not for negatives
    let scaled = (c * 255.0 + 0.5).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Parse a hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA) into normalized channels.
///
/// ```
/// use tokensrc::color::{parse_hex, Rgba};
///
/// assert_eq!(parse_hex("#F00").unwrap(), Rgba::rgb(1.0, 0.0, 0.0));
/// assert_eq!(parse_hex("#ff000000").unwrap().a, 0.0);
/// ```
pub fn parse_hex(s: &str) -> Result<Rgba, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    // Validate all characters are hex
    for c in hex.chars() {
        if !c.is_ascii_hexdigit() {
            return Err(ColorError::InvalidHex(c));
        }
    }

    let bytes: Vec<u8> = match hex.len() {
        // Short forms double each digit
        3 | 4 => hex
            .chars()
            .map(|c| parse_hex_digit(c).map(|d| d * 17))
            .collect::<Result<Vec<u8>, ColorError>>()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| parse_hex_pair(&hex[i..i + 2]))
            .collect::<Result<Vec<u8>, ColorError>>()?,
        len => return Err(ColorError::InvalidLength(len)),
    };

    let channel = |i: usize| bytes.get(i).map_or(1.0, |&b| f64::from(b) / 255.0);
    Ok(Rgba::new(channel(0), channel(1), channel(2), channel(3)))
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut chars = s.chars();
    let high = chars.next().ok_or(ColorError::InvalidLength(s.len()))?;
    let low = chars.next().ok_or(ColorError::InvalidLength(s.len()))?;
    Ok(parse_hex_digit(high)? * 16 + parse_hex_digit(low)?)
}
