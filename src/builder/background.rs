//! Background-image / gradient value modifier builder.
//!
//! The hardest of the builders: a `background-image` value interleaves
//! `url(...)` references, `*-gradient(...)` functions and literal text
//! (position keywords, separators), all of which must survive
//! byte-for-byte around the substituted spans.

use crate::context::PipelineContext;
use crate::declaration::RuleContext;
use crate::modifier::{CancellationProbe, Modifier};
use crate::resolve;
use crate::scan::{self, SpanKind};

/// Builds a modifier for a `background-image` or `list-style-image` value.
///
/// A value with no url/gradient spans passes through literally. URL spans
/// are resolved to absolute URLs at build time, against the owning
/// stylesheet's base when there is one, else the document base.
pub fn background_image_modifier(
  value: &str,
  rule: &dyn RuleContext,
  ignored_image_selectors: &[String],
  probe: &CancellationProbe,
  ctx: &PipelineContext,
) -> Option<Modifier> {
  let spans = scan::find_value_spans(value);
  if spans.is_empty() {
    return Some(Modifier::Literal(value.to_string()));
  }

  let skip_analysis = !ignored_image_selectors.is_empty() && rule.matches_any(ignored_image_selectors);

  let mut parts = Vec::new();
  let mut cursor = 0usize;
  for span in &spans {
    if span.start > cursor {
      parts.push(Modifier::Literal(value[cursor..span.start].to_string()));
    }
    let text = &value[span.start..span.end];
    let part = match span.kind {
      SpanKind::Gradient => gradient_modifier(text, ctx),
      SpanKind::Url => url_modifier(text, rule, skip_analysis, probe, ctx),
    };
    parts.push(part);
    cursor = span.end;
  }
  if cursor < value.len() {
    parts.push(Modifier::Literal(value[cursor..].to_string()));
  }

  Some(Modifier::Composite(parts))
}

/// Compiles one `type(content)` gradient span.
///
/// Content splits on top-level commas; each part is tried as a plain
/// color, then as color-plus-trailing-suffix, then as legacy
/// `from()`/`to()`/`color-stop()` syntax. Unrecognized parts stay literal.
fn gradient_modifier(text: &str, ctx: &PipelineContext) -> Modifier {
  let Some(open) = text.find('(') else {
    return Modifier::Literal(text.to_string());
  };
  let type_name = &text[..open];
  let content = &text[open + 1..text.len() - 1];

  let parts = scan::split_top_level_commas(content)
    .into_iter()
    .map(|part| gradient_part_modifier(part, ctx))
    .collect();

  Modifier::Gradient {
    type_name: type_name.to_string(),
    parts,
  }
}

fn gradient_part_modifier(part: &str, ctx: &PipelineContext) -> Modifier {
  if let Some(color) = ctx.parse_color_cached(part) {
    return Modifier::GradientColor {
      color,
      position: None,
    };
  }

  let (color_text, suffix) = scan::split_color_and_suffix(part);
  if let Some(suffix) = suffix {
    if let Some(color) = ctx.parse_color_cached(color_text) {
      return Modifier::GradientColor {
        color,
        position: Some(suffix.to_string()),
      };
    }
  }

  if let Some(stop) = legacy_stop_modifier(part, ctx) {
    return stop;
  }

  Modifier::Literal(part.to_string())
}

/// Recognizes the legacy `-webkit-gradient()` stop syntax:
/// `from(color)`, `to(color)` and `color-stop(position, color)`.
fn legacy_stop_modifier(part: &str, ctx: &PipelineContext) -> Option<Modifier> {
  for name in ["from", "color-stop", "to"] {
    let Some(rest) = part.strip_prefix(name) else {
      continue;
    };
    if !rest.starts_with('(') || !rest.ends_with(')') {
      continue;
    }
    let inner = &rest[1..rest.len() - 1];

    let ranges = scan::top_level_comma_ranges(inner);
    let (args_prefix, color_text) = match ranges.len() {
      1 => (None, inner.trim()),
      2 => {
        // Keep the position argument and its separator verbatim.
        let after_comma = &inner[ranges[1].0..ranges[1].1];
        let whitespace = after_comma.len() - after_comma.trim_start().len();
        let prefix_end = ranges[1].0 + whitespace;
        (Some(inner[..prefix_end].to_string()), after_comma.trim())
      }
      _ => continue,
    };

    let color = ctx.parse_color_cached(color_text)?;
    return Some(Modifier::LegacyStop {
      name: name.to_string(),
      args_prefix,
      color,
    });
  }
  None
}

fn url_modifier(
  text: &str,
  rule: &dyn RuleContext,
  skip_analysis: bool,
  probe: &CancellationProbe,
  ctx: &PipelineContext,
) -> Modifier {
  let Some(raw) = scan::url_argument(text) else {
    return Modifier::Literal(text.to_string());
  };
  // An empty url() never triggers a fetch.
  if raw.is_empty() {
    return Modifier::Literal(text.to_string());
  }

  let base = match rule.stylesheet_href() {
    Some(href) => resolve::base_of(href),
    None => rule.document_base().to_string(),
  };
  let resolved_url = match resolve::resolve_against(&base, raw) {
    Ok(resolved) => resolved,
    Err(err) => {
      ctx.warn(format!("{err}"));
      return Modifier::Literal(text.to_string());
    }
  };

  Modifier::Image {
    resolved_url,
    skip_analysis,
    probe: probe.clone(),
  }
}
