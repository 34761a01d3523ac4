//! Color value modifier builder.

use crate::context::PipelineContext;
use crate::modifier::{ColorAxis, Modifier};

/// Keywords that are never sent to the color parser; they pass through as
/// literal modifiers returning the original string for any configuration.
pub(crate) fn is_passthrough_keyword(value: &str) -> bool {
  value.eq_ignore_ascii_case("inherit")
    || value.eq_ignore_ascii_case("transparent")
    || value.eq_ignore_ascii_case("initial")
    || value.eq_ignore_ascii_case("currentcolor")
    || value.eq_ignore_ascii_case("none")
    || value.eq_ignore_ascii_case("unset")
}

/// Builds a modifier for a plain color declaration.
///
/// The axis is selected by substring match on the property name:
/// `background` routes to the background transform, `border`/`outline` to
/// the border transform, anything else to the foreground transform. A
/// value the parser does not recognize records a warning and yields `None`
/// so the declaration stays unmodified.
pub fn color_modifier(property: &str, value: &str, ctx: &PipelineContext) -> Option<Modifier> {
  let trimmed = value.trim();
  if is_passthrough_keyword(trimmed) {
    return Some(Modifier::Literal(value.to_string()));
  }

  let Some(color) = ctx.parse_color_cached(trimmed) else {
    ctx.warn(format!(
      "unrecognized color value '{value}' for property '{property}'"
    ));
    return None;
  };

  let axis = if property.contains("background") {
    ColorAxis::Background
  } else if property.contains("border") || property.contains("outline") {
    ColorAxis::Border
  } else {
    ColorAxis::Foreground
  };

  Some(Modifier::ColorAxis { axis, color })
}
