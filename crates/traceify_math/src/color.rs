//! Linear RGB colour and its packed 24-bit output form.
//!
//! `Color` is the working representation used during shading. Every value is
//! clamped to `[0, 1]` per channel when it is constructed, so sums and products
//! can never leave the displayable range. `Rgb8` is only produced at the image
//! boundary.

use std::ops::{Add, AddAssign, Mul};

use crate::Vec3;

/// Clamp one channel into `[0, 1]`; NaN maps to 0.
#[inline]
fn clamp_channel(x: f64) -> f64 {
    if x > 1.0 {
        1.0
    } else if x > 0.0 {
        x
    } else {
        0.0
    }
}

/// A linear RGB colour with channels clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a colour, clamping each channel.
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Create a colour from a vector of channels (x=r, y=g, z=b).
    pub fn from_vec(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Channels as a vector, for statistics over samples.
    pub fn to_vec(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Scale every channel by `factor`; negative factors scale by zero.
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.max(0.0);
        Self::new(self.r * f, self.g * f, self.b * f)
    }

    /// Per-channel product (filtering one colour through another).
    pub fn multiply(self, other: Color) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }
}

impl From<[f64; 3]> for Color {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        self.multiply(rhs)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.scaled(rhs)
    }
}

/// A 24-bit colour used by the image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for Rgb8 {
    fn from(c: Color) -> Self {
        // Channels are already in [0, 1], so the rounded value always fits in a u8
        let quantize = |x: f64| (x * 255.0).round() as u8;
        Self {
            r: quantize(c.r),
            g: quantize(c.g),
            b: quantize(c.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_clamps_on_construction() {
        let c = Color::new(1.5, -0.25, 0.5);
        assert_eq!(c.r(), 1.0);
        assert_eq!(c.g(), 0.0);
        assert_eq!(c.b(), 0.5);
    }

    #[test]
    fn test_color_nan_clamps_to_zero() {
        let c = Color::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!(c, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_color_add_saturates() {
        let mut acc = Color::new(0.75, 0.5, 0.0);
        acc += Color::new(0.5, 0.25, 0.125);
        assert_eq!(acc, Color::new(1.0, 0.75, 0.125));
    }

    #[test]
    fn test_color_scaled_negative_is_black() {
        let c = Color::new(0.2, 0.4, 0.6).scaled(-3.0);
        assert!(c.is_black());
    }

    #[test]
    fn test_color_multiply() {
        let c = Color::new(0.5, 1.0, 0.25) * Color::new(0.5, 0.5, 1.0);
        assert_eq!(c, Color::new(0.25, 0.5, 0.25));
    }

    #[test]
    fn test_rgb8_rounding() {
        assert_eq!(Rgb8::from(Color::WHITE), Rgb8::new(255, 255, 255));
        assert_eq!(Rgb8::from(Color::BLACK), Rgb8::new(0, 0, 0));
        // 0.5 * 255 = 127.5 rounds away from zero
        assert_eq!(Rgb8::from(Color::new(0.5, 0.2, 0.999)), Rgb8::new(128, 51, 255));
    }
}
