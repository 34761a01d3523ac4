//! Error types for the recolor pipeline.
//!
//! Two subsystems can fail: value micro-parsing (colors, gradients,
//! shadows, URLs) and image classification. Failures are contained at the
//! declaration/span level; callers degrade to the literal source text
//! instead of propagating.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for recolor operations
///
/// # Examples
///
/// ```
/// use recolor::Result;
///
/// fn rewrite(value: &str) -> Result<String> {
///     Ok(value.to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the pipeline
///
/// Every variant is `Clone` so a single failure can be fanned out to all
/// waiters of an in-flight classification.
#[derive(Error, Debug, Clone)]
pub enum Error {
  /// Value micro-parsing error
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// Image classification error
  #[error("Image error: {0}")]
  Image(#[from] ImageError),

  /// Generic error for miscellaneous issues
  #[error("{0}")]
  Other(String),
}

/// Errors from parsing a declaration value
#[derive(Error, Debug, Clone)]
pub enum ParseError {
  /// A color value the parser does not recognize
  #[error("Unrecognized color value '{value}'")]
  InvalidColor { value: String },

  /// A composite value (gradient, shadow list) that cannot be tokenized
  #[error("Malformed {kind} value '{value}'")]
  InvalidValue { kind: &'static str, value: String },

  /// A URL that cannot be resolved against its base
  #[error("Cannot resolve URL '{url}': {reason}")]
  UnresolvableUrl { url: String, reason: String },
}

/// Errors from the image classification service
#[derive(Error, Debug, Clone)]
pub enum ImageError {
  /// Fetch/decode/classification failed for a resolved URL
  #[error("Failed to classify image from '{url}': {reason}")]
  ClassificationFailed { url: String, reason: String },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_from_parse_error() {
    let parse_error = ParseError::InvalidColor {
      value: "no-such-color".to_string(),
    };
    let error: Error = parse_error.into();
    assert!(matches!(error, Error::Parse(_)));
  }

  #[test]
  fn test_error_from_image_error() {
    let image_error = ImageError::ClassificationFailed {
      url: "https://example.com/image.png".to_string(),
      reason: "404 Not Found".to_string(),
    };
    let error: Error = image_error.into();
    assert!(matches!(error, Error::Image(_)));
  }

  #[test]
  fn test_error_display_messages() {
    let error = Error::Parse(ParseError::InvalidColor {
      value: "blurple".to_string(),
    });
    let display = format!("{}", error);
    assert!(display.contains("Parse error"));
    assert!(display.contains("blurple"));
  }

  #[test]
  fn test_clone_errors() {
    let error = Error::Image(ImageError::ClassificationFailed {
      url: "https://example.com/a.png".to_string(),
      reason: "timeout".to_string(),
    });
    let cloned = error.clone();
    assert_eq!(format!("{}", error), format!("{}", cloned));
  }
}
