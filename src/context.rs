//! The pipeline context.
//!
//! Owns the three pieces of shared state the builders and the evaluator
//! touch: the color parse cache, the image classification cache with its
//! single-flight registry, and the diagnostics sink, plus handles to the
//! two collaborator services. [`PipelineContext::reset`] clears everything
//! and forwards the reset to both collaborators, for when the active
//! theme's underlying assumptions change (navigation, reload).

use crate::color::{self, Rgba};
use crate::diagnostics::PipelineDiagnostics;
use crate::error::Result;
use crate::image::{ClassificationCache, ImageAnalyzer, ImageClassification};
use crate::transform::ColorTransform;
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

/// Number of color parse results to keep.
///
/// Large stylesheets repeat the same literal colors thousands of times;
/// 8k entries covers real-world repetition while keeping memory bounded.
const COLOR_PARSE_CACHE_CAPACITY: usize = 8 * 1024;

type ColorParseCache = LruCache<String, Option<Rgba>, FxBuildHasher>;

fn new_color_cache() -> ColorParseCache {
  let cap = NonZeroUsize::new(COLOR_PARSE_CACHE_CAPACITY)
    .expect("Color parse cache capacity must be non-zero");
  ColorParseCache::with_hasher(cap, FxBuildHasher)
}

/// Shared state and collaborator handles for one rewriting pipeline.
///
/// # Example
///
/// ```
/// use recolor::{IdentityTransform, PipelineContext};
/// use recolor::image::{ImageAnalyzer, ImageClassification};
/// use recolor::{Result, ThemeConfig};
/// use std::sync::Arc;
///
/// struct NoImages;
/// impl ImageAnalyzer for NoImages {
///     fn analyze(&self, url: &str) -> Result<ImageClassification> {
///         Err(recolor::Error::Other(format!("no analyzer for {url}")))
///     }
///     fn filtered_data_url(&self, image: &ImageClassification, _: &ThemeConfig) -> String {
///         image.data_url.clone()
///     }
/// }
///
/// let ctx = PipelineContext::new(Arc::new(IdentityTransform), Arc::new(NoImages));
/// assert!(ctx.parse_color_cached("red").is_some());
/// ```
pub struct PipelineContext {
  color_cache: Mutex<ColorParseCache>,
  images: ClassificationCache,
  transform: Arc<dyn ColorTransform>,
  analyzer: Arc<dyn ImageAnalyzer>,
  diagnostics: Option<Arc<Mutex<PipelineDiagnostics>>>,
  #[cfg(test)]
  parse_stats: Mutex<(usize, usize)>,
}

impl PipelineContext {
  pub fn new(transform: Arc<dyn ColorTransform>, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
    Self {
      color_cache: Mutex::new(new_color_cache()),
      images: ClassificationCache::new(),
      transform,
      analyzer,
      diagnostics: None,
      #[cfg(test)]
      parse_stats: Mutex::new((0, 0)),
    }
  }

  /// Attaches a diagnostics sink for recorded warnings and notes.
  pub fn with_diagnostics(mut self, diagnostics: Arc<Mutex<PipelineDiagnostics>>) -> Self {
    self.diagnostics = Some(diagnostics);
    self
  }

  pub fn transform(&self) -> &dyn ColorTransform {
    &*self.transform
  }

  pub fn analyzer(&self) -> &dyn ImageAnalyzer {
    &*self.analyzer
  }

  /// Parses a color through the memoizing cache.
  ///
  /// The key is the exact trimmed source substring, case-sensitive, so
  /// `"RED"` and `"red"` occupy distinct entries. Failures are cached too:
  /// a malformed literal repeated across a stylesheet is parsed once.
  pub fn parse_color_cached(&self, raw: &str) -> Option<Rgba> {
    let key = raw.trim();
    let mut cache = self.color_cache.lock().unwrap();
    if let Some(hit) = cache.get(key) {
      #[cfg(test)]
      {
        self.parse_stats.lock().unwrap().0 += 1;
      }
      return *hit;
    }

    #[cfg(test)]
    {
      self.parse_stats.lock().unwrap().1 += 1;
    }
    let parsed = color::parse_color(key).ok();
    cache.put(key.to_string(), parsed);
    parsed
  }

  pub(crate) fn classify_image(&self, resolved_url: &str) -> Result<Arc<ImageClassification>> {
    self.images.classify(resolved_url, &*self.analyzer)
  }

  pub(crate) fn warn(&self, message: impl Into<String>) {
    if let Some(diagnostics) = &self.diagnostics {
      if let Ok(mut guard) = diagnostics.lock() {
        guard.warn(message);
      }
    }
  }

  #[allow(dead_code)]
  pub(crate) fn info(&self, message: impl Into<String>) {
    if let Some(diagnostics) = &self.diagnostics {
      if let Ok(mut guard) = diagnostics.lock() {
        guard.info(message);
      }
    }
  }

  /// Clears the color parse cache and the classification cache, and
  /// forwards the reset to the transform and analyzer services.
  pub fn reset(&self) {
    if let Ok(mut cache) = self.color_cache.lock() {
      *cache = new_color_cache();
    }
    self.images.clear();
    self.transform.reset();
    self.analyzer.reset();
  }

  #[cfg(test)]
  pub(crate) fn parse_stats(&self) -> (usize, usize) {
    *self.parse_stats.lock().unwrap()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::test_context;

  #[test]
  fn test_parse_cache_hits_on_repeat() {
    let ctx = test_context();
    assert!(ctx.parse_color_cached("red").is_some());
    assert!(ctx.parse_color_cached("red").is_some());
    assert!(ctx.parse_color_cached("  red  ").is_some());
    let (hits, misses) = ctx.parse_stats();
    assert_eq!(misses, 1);
    assert_eq!(hits, 2);
  }

  #[test]
  fn test_parse_cache_is_case_sensitive() {
    let ctx = test_context();
    ctx.parse_color_cached("red");
    ctx.parse_color_cached("RED");
    let (_, misses) = ctx.parse_stats();
    assert_eq!(misses, 2);
  }

  #[test]
  fn test_parse_cache_caches_failures() {
    let ctx = test_context();
    assert!(ctx.parse_color_cached("blurple").is_none());
    assert!(ctx.parse_color_cached("blurple").is_none());
    let (hits, misses) = ctx.parse_stats();
    assert_eq!(misses, 1);
    assert_eq!(hits, 1);
  }

  #[test]
  fn test_reset_forces_reparse() {
    let ctx = test_context();
    ctx.parse_color_cached("red");
    ctx.reset();
    ctx.parse_color_cached("red");
    let (_, misses) = ctx.parse_stats();
    assert_eq!(misses, 2);
  }

  #[test]
  fn test_warn_without_sink_is_noop() {
    let ctx = test_context();
    ctx.warn("nobody listening");
  }

  #[test]
  fn test_warn_records_into_sink() {
    let diagnostics = Arc::new(Mutex::new(PipelineDiagnostics::new()));
    let ctx = test_context().with_diagnostics(Arc::clone(&diagnostics));
    ctx.warn("bad value");
    assert_eq!(diagnostics.lock().unwrap().warnings(), ["bad value"]);
  }
}
