//! Color types and color token parsing.
//!
//! Provides the RGBA color representation used throughout the crate plus
//! parsing of the compact single-letter color codes that appear in line
//! style strings ("k-", "b--", "g:").

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 128, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque cyan.
    pub const CYAN: Self = Self::new(0, 191, 191, 255);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::new(191, 0, 191, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(191, 191, 0, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Create a color with alpha given as a fraction in `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, alpha: f32) -> Self {
        self.with_alpha((alpha.clamp(0.0, 1.0) * 255.0) as u8)
    }

    /// Resolve a single-letter color code.
    ///
    /// The eight codes are `b` (blue), `g` (green), `r` (red), `c` (cyan),
    /// `m` (magenta), `y` (yellow), `k` (black) and `w` (white).
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown code.
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'b' => Ok(Self::BLUE),
            'g' => Ok(Self::GREEN),
            'r' => Ok(Self::RED),
            'c' => Ok(Self::CYAN),
            'm' => Ok(Self::MAGENTA),
            'y' => Ok(Self::YELLOW),
            'k' => Ok(Self::BLACK),
            'w' => Ok(Self::WHITE),
            other => Err(Error::InvalidColor(format!("unknown color code '{other}'"))),
        }
    }

    /// Resolve a color token: a single-letter code or a common color name.
    ///
    /// # Errors
    ///
    /// Returns an error for an unrecognized token.
    pub fn from_token(token: &str) -> Result<Self> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_code(c);
        }
        match token {
            "blue" => Ok(Self::BLUE),
            "green" => Ok(Self::GREEN),
            "red" => Ok(Self::RED),
            "cyan" => Ok(Self::CYAN),
            "magenta" => Ok(Self::MAGENTA),
            "yellow" => Ok(Self::YELLOW),
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            other => Err(Error::InvalidColor(format!("unknown color token '{other}'"))),
        }
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }
}

impl std::str::FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::BLUE.b, 255);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Rgba::from_code('k').unwrap(), Rgba::BLACK);
        assert_eq!(Rgba::from_code('b').unwrap(), Rgba::BLUE);
        assert_eq!(Rgba::from_code('g').unwrap(), Rgba::GREEN);
        assert_eq!(Rgba::from_code('m').unwrap(), Rgba::MAGENTA);
        assert!(Rgba::from_code('z').is_err());
    }

    #[test]
    fn test_from_token_names() {
        assert_eq!(Rgba::from_token("red").unwrap(), Rgba::RED);
        assert_eq!(Rgba::from_token("r").unwrap(), Rgba::RED);
        assert!(Rgba::from_token("chartreuse").is_err());
        assert!(Rgba::from_token("").is_err());
    }

    #[test]
    fn test_from_str_trait() {
        let color: Rgba = "blue".parse().unwrap();
        assert_eq!(color, Rgba::BLUE);
    }

    #[test]
    fn test_rgba_lerp() {
        let black = Rgba::BLACK;
        let white = Rgba::WHITE;

        let mid = black.lerp(white, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_lerp_boundaries() {
        let black = Rgba::BLACK;
        let white = Rgba::WHITE;

        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        // t clamped to [0, 1]
        assert_eq!(black.lerp(white, -0.5), black);
        assert_eq!(black.lerp(white, 1.5), white);
    }

    #[test]
    fn test_with_opacity() {
        let c = Rgba::RED.with_opacity(0.3);
        assert_eq!(c.r, 255);
        assert_eq!(c.a, 76);

        // Clamped
        assert_eq!(Rgba::RED.with_opacity(2.0).a, 255);
        assert_eq!(Rgba::RED.with_opacity(-1.0).a, 0);
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        let arr = color.to_array();
        assert_eq!(arr, [10, 20, 30, 40]);
        assert_eq!(Rgba::from_array(arr), color);
    }
}
