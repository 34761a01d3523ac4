//! The modifier graph.
//!
//! Builders compile a declaration value into a [`Modifier`] tree once; theme
//! changes only re-evaluate the tree against a new [`ThemeConfig`]. The tree
//! is a tagged union rather than boxed closures so it stays `Clone`,
//! inspectable and cheap to cache.
//!
//! Evaluation is pure with respect to the configuration: the same tree
//! evaluated twice with equal configs yields identical strings. The only
//! side effects are cache population and diagnostics.

use crate::color::Rgba;
use crate::config::ThemeConfig;
use crate::context::PipelineContext;
use crate::image;
use std::fmt;
use std::sync::Arc;

/// Which semantic role a color plays in its declaration, selecting the
/// external transform function applied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorAxis {
  Background,
  Border,
  Foreground,
  GradientStop,
  Shadow,
}

/// Cooperative cancellation probe.
///
/// Consulted after every wait point of an image span; a `true` report makes
/// that span contribute nothing while sibling spans still evaluate. The
/// in-flight classification itself is never aborted, only the use of its
/// result by this call site.
#[derive(Clone, Default)]
pub struct CancellationProbe(Option<Arc<dyn Fn() -> bool + Send + Sync>>);

impl CancellationProbe {
  /// A probe that never reports cancellation.
  pub fn never() -> Self {
    Self(None)
  }

  /// Wraps an arbitrary probe function.
  pub fn new(probe: impl Fn() -> bool + Send + Sync + 'static) -> Self {
    Self(Some(Arc::new(probe)))
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.as_ref().is_some_and(|probe| probe())
  }
}

impl fmt::Debug for CancellationProbe {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.0 {
      Some(_) => write!(f, "CancellationProbe(..)"),
      None => write!(f, "CancellationProbe(never)"),
    }
  }
}

/// A compiled, lazily-evaluated CSS value rewrite.
///
/// `Literal` spans reproduce source text byte-for-byte; the other variants
/// substitute a transformed color or a re-rendered image at evaluation
/// time.
#[derive(Clone, Debug)]
pub enum Modifier {
  /// Verbatim source text.
  Literal(String),
  /// A whole-value color rewritten through one axis of the transform.
  ColorAxis { axis: ColorAxis, color: Rgba },
  /// A gradient stop: color plus an optional position/keyword suffix kept
  /// verbatim.
  GradientColor {
    color: Rgba,
    position: Option<String>,
  },
  /// Legacy `from()`/`to()`/`color-stop()` stop syntax. `args_prefix`
  /// preserves a leading position argument including its separator.
  LegacyStop {
    name: String,
    args_prefix: Option<String>,
    color: Rgba,
  },
  /// A `type(part, part, …)` gradient function.
  Gradient {
    type_name: String,
    parts: Vec<Modifier>,
  },
  /// A `url(...)` reference, resolved to an absolute URL at build time.
  Image {
    resolved_url: String,
    /// Set when the owning rule matched an ignored-image selector; the
    /// span then skips classification and stays the literal URL.
    skip_analysis: bool,
    probe: CancellationProbe,
  },
  /// Ordered literal/url/gradient spans covering a whole value.
  Composite(Vec<Modifier>),
}

impl Modifier {
  /// Evaluates the tree against a configuration.
  ///
  /// Returns `None` only when a cancelled image span is evaluated
  /// directly; inside a [`Modifier::Composite`] a cancelled child becomes
  /// an empty contribution and the composite still yields a value.
  pub fn evaluate(&self, config: &ThemeConfig, ctx: &PipelineContext) -> Option<String> {
    match self {
      Self::Literal(text) => Some(text.clone()),
      Self::ColorAxis { axis, color } => Some(ctx.transform().modify(*axis, *color, config)),
      Self::GradientColor { color, position } => {
        let modified = ctx.transform().modify_gradient(*color, config);
        Some(match position {
          Some(position) => format!("{modified} {position}"),
          None => modified,
        })
      }
      Self::LegacyStop {
        name,
        args_prefix,
        color,
      } => {
        let modified = ctx.transform().modify_gradient(*color, config);
        let prefix = args_prefix.as_deref().unwrap_or("");
        Some(format!("{name}({prefix}{modified})"))
      }
      Self::Gradient { type_name, parts } => {
        let rendered: Vec<String> = parts
          .iter()
          .map(|part| part.evaluate(config, ctx).unwrap_or_default())
          .collect();
        Some(format!("{}({})", type_name, rendered.join(", ")))
      }
      Self::Image {
        resolved_url,
        skip_analysis,
        probe,
      } => evaluate_image(resolved_url, *skip_analysis, probe, config, ctx),
      Self::Composite(parts) => {
        let mut out = String::new();
        for part in parts {
          if let Some(rendered) = part.evaluate(config, ctx) {
            out.push_str(&rendered);
          }
        }
        Some(out)
      }
    }
  }
}

fn evaluate_image(
  resolved_url: &str,
  skip_analysis: bool,
  probe: &CancellationProbe,
  config: &ThemeConfig,
  ctx: &PipelineContext,
) -> Option<String> {
  let literal = format!("url(\"{resolved_url}\")");
  if skip_analysis {
    return Some(literal);
  }

  let classified = match ctx.classify_image(resolved_url) {
    Ok(classified) => classified,
    Err(err) => {
      ctx.warn(format!("image classification failed: {err}"));
      return Some(literal);
    }
  };

  if probe.is_cancelled() {
    return None;
  }

  Some(image::rendered_override(&classified, config, ctx.analyzer()).unwrap_or(literal))
}
