//! URL resolution against a stylesheet or document base.
//!
//! Thin wrappers over the `url` crate: compute the base of an owning
//! stylesheet's href, and resolve a possibly-relative reference against a
//! base.

use crate::error::ParseError;
use url::Url;

/// Returns the directory base of a stylesheet href, e.g.
/// `https://x/y/style.css` -> `https://x/y/`.
///
/// An unparsable href is returned unchanged; resolution against it will
/// then fail and the caller degrades to the literal value.
pub fn base_of(href: &str) -> String {
  match Url::parse(href).and_then(|parsed| parsed.join(".")) {
    Ok(base) => base.to_string(),
    Err(_) => href.to_string(),
  }
}

/// Resolves `reference` to an absolute URL string.
///
/// Already-absolute references (including `data:` URLs) pass through
/// normalized; relative ones join against `base`.
pub fn resolve_against(base: &str, reference: &str) -> Result<String, ParseError> {
  if let Ok(absolute) = Url::parse(reference) {
    return Ok(absolute.to_string());
  }

  Url::parse(base)
    .and_then(|base| base.join(reference))
    .map(|resolved| resolved.to_string())
    .map_err(|err| ParseError::UnresolvableUrl {
      url: reference.to_string(),
      reason: err.to_string(),
    })
}
