//! Color types for CSS values.
//!
//! The pipeline normalizes every parsed color into [`Rgba`]; the HSL form
//! is only used where the scrollbar/selection generators derive shades by
//! lightness offsets.
//!
//! Parsing delegates to the `csscolorparser` crate, which covers hex,
//! `rgb()`/`rgba()`, `hsl()`/`hsla()` and named colors.
//!
//! # Examples
//!
//! ```
//! use recolor::color::{parse_color, Rgba};
//!
//! let red = parse_color("#ff0000").unwrap();
//! assert_eq!(red, Rgba::rgb(255, 0, 0));
//! ```

use crate::error::ParseError;
use std::fmt;

/// RGBA color representation
///
/// - R, G, B: 0-255 (stored as u8)
/// - A: 0.0-1.0 (stored as f32)
///
/// # Examples
///
/// ```
/// use recolor::Rgba;
///
/// let red = Rgba::new(255, 0, 0, 1.0);
/// let semi_transparent_blue = Rgba::new(0, 0, 255, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0.0-1.0)
  pub a: f32,
}

impl Rgba {
  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 1.0,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 1.0,
  };

  /// Creates a new RGBA color
  pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque RGB color (alpha = 1.0)
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 1.0 }
  }

  /// Converts RGB to HSL
  ///
  /// Uses the algorithm from CSS Color Module Level 3.
  ///
  /// # Examples
  ///
  /// ```
  /// use recolor::Rgba;
  ///
  /// let hsl = Rgba::rgb(255, 0, 0).to_hsla();
  /// assert_eq!(hsl.h, 0.0);
  /// assert_eq!(hsl.s, 100.0);
  /// assert_eq!(hsl.l, 50.0);
  /// ```
  pub fn to_hsla(self) -> Hsla {
    let r = self.r as f32 / 255.0;
    let g = self.g as f32 / 255.0;
    let b = self.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let l = (max + min) / 2.0;

    let (h, s) = if delta == 0.0 {
      // Achromatic
      (0.0, 0.0)
    } else {
      let s = if l < 0.5 {
        delta / (max + min)
      } else {
        delta / (2.0 - max - min)
      };

      let h = if max == r {
        ((g - b) / delta + if g < b { 6.0 } else { 0.0 }) / 6.0
      } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
      } else {
        ((r - g) / delta + 4.0) / 6.0
      };

      (h * 360.0, s * 100.0)
    };

    Hsla::new(h, s, l * 100.0, self.a)
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.a == 1.0 {
      write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    } else {
      write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
  }
}

/// HSLA color representation
///
/// - H: Hue (0-360 degrees)
/// - S: Saturation (0-100%)
/// - L: Lightness (0-100%)
/// - A: Alpha (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
  /// Hue in degrees (0-360)
  pub h: f32,
  /// Saturation percentage (0-100)
  pub s: f32,
  /// Lightness percentage (0-100)
  pub l: f32,
  /// Alpha (0.0-1.0)
  pub a: f32,
}

impl Hsla {
  /// Creates a new HSLA color, wrapping hue and clamping the rest
  pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
    Self {
      h: h % 360.0,
      s: s.clamp(0.0, 100.0),
      l: l.clamp(0.0, 100.0),
      a: a.clamp(0.0, 1.0),
    }
  }

  /// Creates an opaque HSL color (alpha = 1.0)
  pub fn hsl(h: f32, s: f32, l: f32) -> Self {
    Self::new(h, s, l, 1.0)
  }

  /// Returns a copy with lightness shifted by `delta` percentage points,
  /// clamped to 0-100.
  pub fn shift_lightness(self, delta: f32) -> Self {
    Self {
      l: (self.l + delta).clamp(0.0, 100.0),
      ..self
    }
  }

  /// Converts HSL to RGB
  ///
  /// Uses the algorithm from CSS Color Module Level 3.
  pub fn to_rgba(self) -> Rgba {
    let h = self.h / 360.0;
    let s = self.s / 100.0;
    let l = self.l / 100.0;

    let (r, g, b) = if s == 0.0 {
      // Achromatic (gray)
      (l, l, l)
    } else {
      let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
      let p = 2.0 * l - q;

      (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
      )
    };

    Rgba::new(
      (r * 255.0).round() as u8,
      (g * 255.0).round() as u8,
      (b * 255.0).round() as u8,
      self.a,
    )
  }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
  if t < 0.0 {
    t += 1.0;
  }
  if t > 1.0 {
    t -= 1.0;
  }
  if t < 1.0 / 6.0 {
    return p + (q - p) * 6.0 * t;
  }
  if t < 1.0 / 2.0 {
    return q;
  }
  if t < 2.0 / 3.0 {
    return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
  }
  p
}

impl fmt::Display for Hsla {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.a == 1.0 {
      write!(f, "hsl({:.1}, {:.1}%, {:.1}%)", self.h, self.s, self.l)
    } else {
      write!(
        f,
        "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
        self.h, self.s, self.l, self.a
      )
    }
  }
}

/// Parse a CSS color string into [`Rgba`].
///
/// Accepts anything `csscolorparser` understands: hex, `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, and named colors. Callers that need memoization go
/// through [`PipelineContext::parse_color_cached`](crate::PipelineContext::parse_color_cached)
/// instead of calling this directly.
pub fn parse_color(value: &str) -> Result<Rgba, ParseError> {
  let color = value
    .parse::<csscolorparser::Color>()
    .map_err(|_| ParseError::InvalidColor {
      value: value.to_string(),
    })?;
  Ok(Rgba::new(
    (color.r * 255.0).round() as u8,
    (color.g * 255.0).round() as u8,
    (color.b * 255.0).round() as u8,
    color.a as f32,
  ))
}
