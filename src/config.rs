//! Theme configuration knobs.
//!
//! A [`ThemeConfig`] is the set of transform parameters applied uniformly
//! across one rewrite pass. It is passed by reference into every modifier
//! evaluation and never mutated by the pipeline; policy adjustments (e.g.
//! the sepia boost for inverted transparent images) clone the config with
//! the adjusted knob.

use serde::{Deserialize, Serialize};

/// Which direction the theme transform runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
  /// Invert the page into a dark rendition.
  Dark,
  /// Keep the page light but adjust brightness/contrast/sepia.
  LightAdjust,
}

/// Runtime theme configuration.
///
/// Brightness and contrast are percentages in `0..=200` (100 = neutral),
/// sepia and grayscale percentages in `0..=100` (0 = neutral).
/// `scrollbar_color` and `selection_color` accept the `"auto"` sentinel or
/// an explicit CSS color; `None` disables the respective generated block.
///
/// # Examples
///
/// ```
/// use recolor::{Mode, ThemeConfig};
///
/// let config = ThemeConfig {
///     mode: Mode::Dark,
///     brightness: 110,
///     ..ThemeConfig::default()
/// };
/// assert_eq!(config.contrast, 100);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
  pub mode: Mode,
  pub brightness: i32,
  pub contrast: i32,
  pub sepia: i32,
  pub grayscale: i32,
  pub scrollbar_color: Option<String>,
  pub selection_color: Option<String>,
}

impl Default for ThemeConfig {
  fn default() -> Self {
    Self {
      mode: Mode::Dark,
      brightness: 100,
      contrast: 100,
      sepia: 0,
      grayscale: 0,
      scrollbar_color: None,
      selection_color: None,
    }
  }
}

impl ThemeConfig {
  /// Returns a copy with `sepia` replaced, clamped to `0..=100`.
  pub fn with_sepia(&self, sepia: i32) -> Self {
    Self {
      sepia: sepia.clamp(0, 100),
      ..self.clone()
    }
  }

  /// Returns a copy with `brightness` replaced, clamped to `5..=200`.
  pub fn with_brightness(&self, brightness: i32) -> Self {
    Self {
      brightness: brightness.clamp(5, 200),
      ..self.clone()
    }
  }

  /// Returns a copy with `grayscale` replaced, clamped to `0..=100`.
  pub fn with_grayscale(&self, grayscale: i32) -> Self {
    Self {
      grayscale: grayscale.clamp(0, 100),
      ..self.clone()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = ThemeConfig::default();
    assert_eq!(config.mode, Mode::Dark);
    assert_eq!(config.brightness, 100);
    assert_eq!(config.sepia, 0);
    assert!(config.scrollbar_color.is_none());
  }

  #[test]
  fn test_knob_clamping() {
    let config = ThemeConfig::default();
    assert_eq!(config.with_sepia(150).sepia, 100);
    assert_eq!(config.with_sepia(-5).sepia, 0);
    assert_eq!(config.with_brightness(1).brightness, 5);
    assert_eq!(config.with_brightness(500).brightness, 200);
  }

  #[test]
  fn test_serde_round_trip() {
    let config = ThemeConfig {
      mode: Mode::LightAdjust,
      scrollbar_color: Some("auto".to_string()),
      ..ThemeConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("light-adjust"));
    let back: ThemeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
  }

  #[test]
  fn test_partial_deserialization_uses_defaults() {
    let config: ThemeConfig = serde_json::from_str(r#"{"mode":"dark","sepia":20}"#).unwrap();
    assert_eq!(config.sepia, 20);
    assert_eq!(config.brightness, 100);
  }
}
