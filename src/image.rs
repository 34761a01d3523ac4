//! Image classification: analyzer seam, result cache and single-flight
//! registry.
//!
//! Decoding and per-pixel classification live behind the [`ImageAnalyzer`]
//! trait; this module owns what the pipeline itself guarantees: a resolved
//! URL is analyzed at most once per cache epoch no matter how many
//! declarations reference it concurrently, and every concurrent caller
//! observes the same result (or the same failure).

use crate::config::{Mode, ThemeConfig};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

/// Derived properties of a decoded image, computed once per resolved URL.
///
/// `data_url` carries the unfiltered rendition so the analyzer can
/// re-render it under a configuration without refetching.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageClassification {
  pub src: String,
  pub data_url: String,
  pub width: u32,
  pub height: u32,
  pub is_dark: bool,
  pub is_light: bool,
  pub is_transparent: bool,
  pub is_large: bool,
}

/// External image analysis service.
///
/// `analyze` may block (fetch + decode); the pipeline serializes concurrent
/// calls per URL through the single-flight registry, so implementations do
/// not need their own deduplication.
pub trait ImageAnalyzer: Send + Sync {
  /// Fetch, decode and classify the image at an absolute URL.
  fn analyze(&self, url: &str) -> Result<ImageClassification>;

  /// Re-render a classified image under a configuration, returning a data
  /// URL.
  fn filtered_data_url(&self, image: &ImageClassification, config: &ThemeConfig) -> String;

  /// Drop any internal caches. Forwarded from
  /// [`PipelineContext::reset`](crate::PipelineContext::reset).
  fn reset(&self) {}
}

impl<T: ImageAnalyzer + ?Sized> ImageAnalyzer for Arc<T> {
  fn analyze(&self, url: &str) -> Result<ImageClassification> {
    (**self).analyze(url)
  }

  fn filtered_data_url(&self, image: &ImageClassification, config: &ThemeConfig) -> String {
    (**self).filtered_data_url(image, config)
  }

  fn reset(&self) {
    (**self).reset()
  }
}

#[derive(Clone)]
enum SharedClassifyResult {
  Success(Arc<ImageClassification>),
  Error(Error),
}

impl SharedClassifyResult {
  fn as_result(&self) -> Result<Arc<ImageClassification>> {
    match self {
      Self::Success(image) => Ok(Arc::clone(image)),
      Self::Error(err) => Err(err.clone()),
    }
  }
}

struct ClassifyInFlight {
  result: Mutex<Option<SharedClassifyResult>>,
  cv: Condvar,
}

impl ClassifyInFlight {
  fn new() -> Self {
    Self {
      result: Mutex::new(None),
      cv: Condvar::new(),
    }
  }

  fn set(&self, result: SharedClassifyResult) {
    if let Ok(mut slot) = self.result.lock() {
      *slot = Some(result);
      self.cv.notify_all();
    }
  }

  fn wait(&self) -> Result<Arc<ImageClassification>> {
    let mut guard = self.result.lock().unwrap();
    while guard.is_none() {
      guard = self.cv.wait(guard).unwrap();
    }
    guard.as_ref().unwrap().as_result()
  }
}

/// Classification results keyed by resolved URL, with per-URL single-flight
/// deduplication of concurrent analysis.
///
/// Successes are cached until [`clear`](Self::clear); failures release all
/// waiters with the shared error and leave the cache empty for that URL, so
/// future references re-attempt.
pub struct ClassificationCache {
  cache: Mutex<HashMap<String, Arc<ImageClassification>>>,
  /// In-flight analyses keyed by resolved URL to de-duplicate concurrent
  /// classification of the same image.
  in_flight: Mutex<HashMap<String, Arc<ClassifyInFlight>>>,
}

impl ClassificationCache {
  pub fn new() -> Self {
    Self {
      cache: Mutex::new(HashMap::new()),
      in_flight: Mutex::new(HashMap::new()),
    }
  }

  /// Returns the cached classification for `resolved_url`, analyzing it if
  /// needed. Concurrent callers for the same URL either own the analysis or
  /// block until the owner publishes its result.
  pub fn classify(
    &self,
    resolved_url: &str,
    analyzer: &dyn ImageAnalyzer,
  ) -> Result<Arc<ImageClassification>> {
    if let Some(image) = self.get_cached(resolved_url) {
      return Ok(image);
    }

    let (flight, is_owner) = self.join_inflight(resolved_url);
    if !is_owner {
      return flight.wait();
    }

    let result = analyzer.analyze(resolved_url).map(Arc::new);
    if let Ok(image) = &result {
      if let Ok(mut cache) = self.cache.lock() {
        cache.insert(resolved_url.to_string(), Arc::clone(image));
      }
    }
    let shared = match &result {
      Ok(image) => SharedClassifyResult::Success(Arc::clone(image)),
      Err(err) => SharedClassifyResult::Error(err.clone()),
    };
    self.finish_inflight(resolved_url, &flight, shared);

    result
  }

  fn get_cached(&self, resolved_url: &str) -> Option<Arc<ImageClassification>> {
    self
      .cache
      .lock()
      .ok()
      .and_then(|cache| cache.get(resolved_url).cloned())
  }

  fn join_inflight(&self, resolved_url: &str) -> (Arc<ClassifyInFlight>, bool) {
    let mut map = self.in_flight.lock().unwrap();
    if let Some(existing) = map.get(resolved_url) {
      return (Arc::clone(existing), false);
    }

    let flight = Arc::new(ClassifyInFlight::new());
    map.insert(resolved_url.to_string(), Arc::clone(&flight));
    (flight, true)
  }

  fn finish_inflight(
    &self,
    resolved_url: &str,
    flight: &Arc<ClassifyInFlight>,
    result: SharedClassifyResult,
  ) {
    flight.set(result);
    if let Ok(mut map) = self.in_flight.lock() {
      map.remove(resolved_url);
    }
  }

  /// Drops every cached classification. Entries still in flight publish to
  /// their waiters normally; only the memoized results are discarded.
  pub fn clear(&self) {
    if let Ok(mut cache) = self.cache.lock() {
      cache.clear();
    }
  }

  #[cfg(test)]
  pub(crate) fn cached_len(&self) -> usize {
    self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
  }
}

impl Default for ClassificationCache {
  fn default() -> Self {
    Self::new()
  }
}

/// The fixed override policy for a classified image under a configuration.
///
/// Returns `None` when no override applies (the caller falls back to the
/// literal absolute URL).
pub(crate) fn rendered_override(
  image: &ImageClassification,
  config: &ThemeConfig,
  analyzer: &dyn ImageAnalyzer,
) -> Option<String> {
  if image.is_dark
    && image.is_transparent
    && config.mode == Mode::Dark
    && !image.is_large
    && image.width > 2
  {
    let inverted = analyzer.filtered_data_url(image, &config.with_sepia(config.sepia + 10));
    Some(format!("url(\"{inverted}\")"))
  } else if image.is_light && !image.is_transparent && config.mode == Mode::Dark {
    if image.is_large {
      Some("none".to_string())
    } else {
      let dimmed = analyzer.filtered_data_url(image, config);
      Some(format!("url(\"{dimmed}\")"))
    }
  } else if config.mode == Mode::LightAdjust && image.is_light && !image.is_large {
    let filtered = analyzer.filtered_data_url(
      image,
      &config
        .with_brightness(config.brightness - 10)
        .with_sepia(config.sepia + 10),
    );
    Some(format!("url(\"{filtered}\")"))
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct FixedAnalyzer(ImageClassification);

  impl ImageAnalyzer for FixedAnalyzer {
    fn analyze(&self, _url: &str) -> Result<ImageClassification> {
      Ok(self.0.clone())
    }

    fn filtered_data_url(&self, _image: &ImageClassification, config: &ThemeConfig) -> String {
      format!("data:filtered;b={};s={}", config.brightness, config.sepia)
    }
  }

  fn classification(src: &str) -> ImageClassification {
    ImageClassification {
      src: src.to_string(),
      data_url: "data:raw".to_string(),
      width: 16,
      height: 16,
      is_dark: false,
      is_light: false,
      is_transparent: false,
      is_large: false,
    }
  }

  #[test]
  fn test_classify_caches_success() {
    let cache = ClassificationCache::new();
    let analyzer = FixedAnalyzer(classification("https://x/a.png"));
    let first = cache.classify("https://x/a.png", &analyzer).unwrap();
    let second = cache.classify("https://x/a.png", &analyzer).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.cached_len(), 1);
  }

  #[test]
  fn test_clear_drops_entries() {
    let cache = ClassificationCache::new();
    let analyzer = FixedAnalyzer(classification("https://x/a.png"));
    cache.classify("https://x/a.png", &analyzer).unwrap();
    cache.clear();
    assert_eq!(cache.cached_len(), 0);
  }

  #[test]
  fn test_override_policy_dark_transparent() {
    let image = ImageClassification {
      is_dark: true,
      is_transparent: true,
      ..classification("x")
    };
    let analyzer = FixedAnalyzer(image.clone());
    let config = ThemeConfig::default();
    let out = rendered_override(&image, &config, &analyzer).unwrap();
    // Inverted rendition carries the +10 sepia boost.
    assert_eq!(out, "url(\"data:filtered;b=100;s=10\")");
  }

  #[test]
  fn test_override_policy_large_light_suppressed() {
    let image = ImageClassification {
      is_light: true,
      is_large: true,
      ..classification("x")
    };
    let analyzer = FixedAnalyzer(image.clone());
    let out = rendered_override(&image, &ThemeConfig::default(), &analyzer).unwrap();
    assert_eq!(out, "none");
  }

  #[test]
  fn test_override_policy_light_adjust_mode() {
    let image = ImageClassification {
      is_light: true,
      ..classification("x")
    };
    let analyzer = FixedAnalyzer(image.clone());
    let config = ThemeConfig {
      mode: Mode::LightAdjust,
      ..ThemeConfig::default()
    };
    let out = rendered_override(&image, &config, &analyzer).unwrap();
    assert_eq!(out, "url(\"data:filtered;b=90;s=10\")");
  }

  #[test]
  fn test_override_policy_no_match_falls_through() {
    let image = classification("x");
    let analyzer = FixedAnalyzer(image.clone());
    assert!(rendered_override(&image, &ThemeConfig::default(), &analyzer).is_none());
  }

  #[test]
  fn test_narrow_dark_transparent_image_not_inverted() {
    let image = ImageClassification {
      is_dark: true,
      is_transparent: true,
      width: 2,
      ..classification("x")
    };
    let analyzer = FixedAnalyzer(image.clone());
    assert!(rendered_override(&image, &ThemeConfig::default(), &analyzer).is_none());
  }
}
