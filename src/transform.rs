//! Trait seam for the external color-modification service.
//!
//! The transform math itself (brightness/contrast/sepia/hue formulas) is a
//! collaborator, consumed as a black box: one pure function per color axis,
//! each mapping a parsed color and a configuration to a CSS color string.
//! [`IdentityTransform`] is the wired-in stand-in that serializes the
//! source color unchanged.

use crate::color::Rgba;
use crate::config::ThemeConfig;
use crate::modifier::ColorAxis;
use std::sync::Arc;

/// Per-axis color transform functions.
///
/// Implementations must be pure: equal inputs yield equal output strings.
/// `reset` is forwarded from [`PipelineContext::reset`](crate::PipelineContext::reset)
/// for implementations that keep their own memoization.
pub trait ColorTransform: Send + Sync {
  fn modify_background(&self, color: Rgba, config: &ThemeConfig) -> String;
  fn modify_border(&self, color: Rgba, config: &ThemeConfig) -> String;
  fn modify_foreground(&self, color: Rgba, config: &ThemeConfig) -> String;
  fn modify_gradient(&self, color: Rgba, config: &ThemeConfig) -> String;
  fn modify_shadow(&self, color: Rgba, config: &ThemeConfig) -> String;

  /// Drop any internal caches.
  fn reset(&self) {}

  /// Dispatches on the axis a modifier was built with.
  fn modify(&self, axis: ColorAxis, color: Rgba, config: &ThemeConfig) -> String {
    match axis {
      ColorAxis::Background => self.modify_background(color, config),
      ColorAxis::Border => self.modify_border(color, config),
      ColorAxis::Foreground => self.modify_foreground(color, config),
      ColorAxis::GradientStop => self.modify_gradient(color, config),
      ColorAxis::Shadow => self.modify_shadow(color, config),
    }
  }
}

impl<T: ColorTransform + ?Sized> ColorTransform for Arc<T> {
  fn modify_background(&self, color: Rgba, config: &ThemeConfig) -> String {
    (**self).modify_background(color, config)
  }

  fn modify_border(&self, color: Rgba, config: &ThemeConfig) -> String {
    (**self).modify_border(color, config)
  }

  fn modify_foreground(&self, color: Rgba, config: &ThemeConfig) -> String {
    (**self).modify_foreground(color, config)
  }

  fn modify_gradient(&self, color: Rgba, config: &ThemeConfig) -> String {
    (**self).modify_gradient(color, config)
  }

  fn modify_shadow(&self, color: Rgba, config: &ThemeConfig) -> String {
    (**self).modify_shadow(color, config)
  }

  fn reset(&self) {
    (**self).reset()
  }
}

/// Serializes every color unchanged, ignoring the configuration.
///
/// Useful as a placeholder while wiring the pipeline and as a baseline in
/// tests; a real deployment injects the actual transform service here.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityTransform;

impl ColorTransform for IdentityTransform {
  fn modify_background(&self, color: Rgba, _config: &ThemeConfig) -> String {
    color.to_string()
  }

  fn modify_border(&self, color: Rgba, _config: &ThemeConfig) -> String {
    color.to_string()
  }

  fn modify_foreground(&self, color: Rgba, _config: &ThemeConfig) -> String {
    color.to_string()
  }

  fn modify_gradient(&self, color: Rgba, _config: &ThemeConfig) -> String {
    color.to_string()
  }

  fn modify_shadow(&self, color: Rgba, _config: &ThemeConfig) -> String {
    color.to_string()
  }
}
