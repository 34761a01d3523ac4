//! Generated baseline style blocks.
//!
//! These generators compose canonical declaration blocks from fixed source
//! colors run through the configured transform, for injection as baseline
//! page styles: the user-agent override, the pre-paint fallback, and the
//! scrollbar/selection blocks. They are the primary consumers of the color
//! modifiers and contain no parsing of their own.

use crate::color::Rgba;
use crate::config::ThemeConfig;
use crate::context::PipelineContext;

/// The sentinel selecting computed colors over an explicit override.
const AUTO: &str = "auto";

/// Options for [`user_agent_style`].
#[derive(Clone, Copy, Debug, Default)]
pub struct UserAgentStyleOptions {
  /// Inside an iframe the root background is left to the top document.
  pub is_iframe: bool,
  /// Also restyle form controls (`input`, `textarea`, `select`, ...).
  pub style_system_controls: bool,
}

/// Composes the user-agent override block.
pub fn user_agent_style(
  config: &ThemeConfig,
  ctx: &PipelineContext,
  options: UserAgentStyleOptions,
) -> String {
  let transform = ctx.transform();
  let mut lines: Vec<String> = Vec::new();

  if !options.is_iframe {
    lines.push("html {".to_string());
    lines.push(format!(
      "    background-color: {} !important;",
      transform.modify_background(Rgba::WHITE, config)
    ));
    lines.push("}".to_string());
  }

  let mut background_selectors: Vec<&str> = Vec::new();
  if !options.is_iframe {
    background_selectors.extend(["html", "body"]);
  }
  let mut text_selectors: Vec<&str> = vec!["html", "body"];
  if options.style_system_controls {
    background_selectors.extend(["input", "textarea", "select", "button", "dialog"]);
    text_selectors.extend(["input", "textarea", "select", "button"]);
  }

  if !background_selectors.is_empty() {
    lines.push(format!("{} {{", background_selectors.join(", ")));
    lines.push(format!(
      "    background-color: {};",
      transform.modify_background(Rgba::WHITE, config)
    ));
    lines.push("}".to_string());
  }

  lines.push(format!("{} {{", text_selectors.join(", ")));
  lines.push(format!(
    "    border-color: {};",
    transform.modify_border(Rgba::rgb(76, 76, 76), config)
  ));
  lines.push(format!(
    "    color: {};",
    transform.modify_foreground(Rgba::BLACK, config)
  ));
  lines.push("}".to_string());

  lines.push("a {".to_string());
  lines.push(format!(
    "    color: {};",
    transform.modify_foreground(Rgba::rgb(0, 64, 255), config)
  ));
  lines.push("}".to_string());

  lines.push("table {".to_string());
  lines.push(format!(
    "    border-color: {};",
    transform.modify_border(Rgba::rgb(128, 128, 128), config)
  ));
  lines.push("}".to_string());

  lines.push("::placeholder {".to_string());
  lines.push(format!(
    "    color: {};",
    transform.modify_foreground(Rgba::rgb(169, 169, 169), config)
  ));
  lines.push("}".to_string());

  lines.push("input:-webkit-autofill,".to_string());
  lines.push("textarea:-webkit-autofill,".to_string());
  lines.push("select:-webkit-autofill {".to_string());
  lines.push(format!(
    "    background-color: {} !important;",
    transform.modify_background(Rgba::rgb(250, 255, 189), config)
  ));
  lines.push(format!(
    "    color: {} !important;",
    transform.modify_foreground(Rgba::BLACK, config)
  ));
  lines.push("}".to_string());

  if config.scrollbar_color.is_some() {
    lines.push(scrollbar_style(config, ctx));
  }
  if config.selection_color.is_some() {
    lines.push(selection_style(config, ctx));
  }

  lines.join("\n")
}

/// Composes the fallback block applied before full processing finishes.
pub fn fallback_style(config: &ThemeConfig, ctx: &PipelineContext, strict: bool) -> String {
  let transform = ctx.transform();
  let descendants = if strict {
    "body :not(iframe)"
  } else {
    "body > :not(iframe)"
  };
  let mut lines: Vec<String> = Vec::new();
  lines.push(format!("html, body, {descendants} {{"));
  lines.push(format!(
    "    background-color: {} !important;",
    transform.modify_background(Rgba::WHITE, config)
  ));
  lines.push(format!(
    "    border-color: {} !important;",
    transform.modify_border(Rgba::rgb(64, 64, 64), config)
  ));
  lines.push(format!(
    "    color: {} !important;",
    transform.modify_foreground(Rgba::BLACK, config)
  ));
  lines.push("}".to_string());
  lines.join("\n")
}

/// Selection colors derived from the configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionColors {
  pub background: String,
  pub text: String,
}

/// Derives the selection colors: `"auto"` computes both from fixed base
/// colors (with grayscale forced off); an explicit override is used
/// verbatim with a contrasting text color by lightness threshold.
pub fn selection_colors(config: &ThemeConfig, ctx: &PipelineContext) -> SelectionColors {
  let transform = ctx.transform();
  let override_color = config.selection_color.as_deref().unwrap_or(AUTO);

  if override_color != AUTO {
    if let Some(rgba) = ctx.parse_color_cached(override_color) {
      let text = if rgba.to_hsla().l < 50.0 { "#FFF" } else { "#000" };
      return SelectionColors {
        background: override_color.to_string(),
        text: text.to_string(),
      };
    }
    ctx.warn(format!(
      "unparsable selection color override '{override_color}', falling back to auto"
    ));
  }

  let no_grayscale = config.with_grayscale(0);
  SelectionColors {
    background: transform.modify_background(Rgba::rgb(0, 96, 212), &no_grayscale),
    text: transform.modify_foreground(Rgba::WHITE, &no_grayscale),
  }
}

/// Composes the `::selection` block.
pub fn selection_style(config: &ThemeConfig, ctx: &PipelineContext) -> String {
  let colors = selection_colors(config, ctx);
  let mut lines: Vec<String> = Vec::new();
  for selector in ["::selection", "::-moz-selection"] {
    lines.push(format!("{selector} {{"));
    lines.push(format!("    background-color: {} !important;", colors.background));
    lines.push(format!("    color: {} !important;", colors.text));
    lines.push("}".to_string());
  }
  lines.join("\n")
}

/// Composes the scrollbar block.
///
/// `"auto"` derives every shade from fixed grays through the transform; an
/// explicit override derives hover/active/track shades by clamped
/// lightness offsets in HSL space.
pub fn scrollbar_style(config: &ThemeConfig, ctx: &PipelineContext) -> String {
  let transform = ctx.transform();
  let override_color = config.scrollbar_color.as_deref().unwrap_or(AUTO);

  let custom = if override_color == AUTO {
    None
  } else {
    let parsed = ctx.parse_color_cached(override_color);
    if parsed.is_none() {
      ctx.warn(format!(
        "unparsable scrollbar color override '{override_color}', falling back to auto"
      ));
    }
    parsed
  };

  let (track, icons, thumb, thumb_hover, thumb_active, corner) = match custom {
    Some(rgba) => {
      let hsl = rgba.to_hsla();
      let is_light = hsl.l > 50.0;
      let track = hsl.shift_lightness(-40.0);
      let icons = if is_light {
        hsl.shift_lightness(-40.0)
      } else {
        hsl.shift_lightness(40.0)
      };
      (
        track.to_string(),
        icons.to_string(),
        hsl.to_string(),
        hsl.shift_lightness(10.0).to_string(),
        hsl.shift_lightness(20.0).to_string(),
        track.to_string(),
      )
    }
    None => (
      transform.modify_background(Rgba::rgb(241, 241, 241), config),
      transform.modify_foreground(Rgba::rgb(96, 96, 96), config),
      transform.modify_background(Rgba::rgb(176, 176, 176), config),
      transform.modify_background(Rgba::rgb(144, 144, 144), config),
      transform.modify_background(Rgba::rgb(96, 96, 96), config),
      transform.modify_background(Rgba::WHITE, config),
    ),
  };

  let mut lines: Vec<String> = Vec::new();
  lines.push("::-webkit-scrollbar {".to_string());
  lines.push(format!("    background-color: {track};"));
  lines.push(format!("    color: {icons};"));
  lines.push("}".to_string());
  lines.push("::-webkit-scrollbar-thumb {".to_string());
  lines.push(format!("    background-color: {thumb};"));
  lines.push("}".to_string());
  lines.push("::-webkit-scrollbar-thumb:hover {".to_string());
  lines.push(format!("    background-color: {thumb_hover};"));
  lines.push("}".to_string());
  lines.push("::-webkit-scrollbar-thumb:active {".to_string());
  lines.push(format!("    background-color: {thumb_active};"));
  lines.push("}".to_string());
  lines.push("::-webkit-scrollbar-corner {".to_string());
  lines.push(format!("    background-color: {corner};"));
  lines.push("}".to_string());
  lines.push("* {".to_string());
  lines.push(format!("    scrollbar-color: {thumb} {track};"));
  lines.push("}".to_string());
  lines.join("\n")
}
