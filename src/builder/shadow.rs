//! Shadow value modifier builder.
//!
//! A shadow list is comma-separated segments of lengths, an optional
//! `inset`/`outset` keyword and one color token. Only the color token is
//! substituted; every other byte of the value, separators included, is
//! reproduced verbatim.

use crate::context::PipelineContext;
use crate::modifier::{ColorAxis, Modifier};
use crate::scan;

fn is_color_candidate(token: &str) -> bool {
  if token.eq_ignore_ascii_case("inset") || token.eq_ignore_ascii_case("outset") {
    return false;
  }
  // Lengths and bare numbers can never be colors; calc() expressions are
  // left alone even though they start like a function.
  if token.starts_with(|ch: char| ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.') {
    return false;
  }
  let lower = token.to_ascii_lowercase();
  !lower.starts_with("calc(")
}

/// Builds a modifier for a `*shadow` declaration value.
///
/// Returns `None` (declaration left unmodified) when no segment contains a
/// parsable color; a segment without one simply stays literal while its
/// siblings are still substituted.
pub fn shadow_modifier(value: &str, ctx: &PipelineContext) -> Option<Modifier> {
  let mut parts: Vec<Modifier> = Vec::new();
  let mut cursor = 0usize;
  let mut substituted = 0usize;

  for (seg_start, seg_end) in scan::top_level_comma_ranges(value) {
    let segment = &value[seg_start..seg_end];
    let color_token = scan::top_level_token_ranges(segment)
      .into_iter()
      .find_map(|(start, end)| {
        let token = &value[seg_start + start..seg_start + end];
        if !is_color_candidate(token) {
          return None;
        }
        ctx
          .parse_color_cached(token)
          .map(|color| (seg_start + start, seg_start + end, color))
      });

    if let Some((token_start, token_end, color)) = color_token {
      if token_start > cursor {
        parts.push(Modifier::Literal(value[cursor..token_start].to_string()));
      }
      parts.push(Modifier::ColorAxis {
        axis: ColorAxis::Shadow,
        color,
      });
      cursor = token_end;
      substituted += 1;
    }
  }

  if substituted == 0 {
    ctx.warn(format!("no color token found in shadow value '{value}'"));
    return None;
  }

  if cursor < value.len() {
    parts.push(Modifier::Literal(value[cursor..].to_string()));
  }

  Some(Modifier::Composite(parts))
}
