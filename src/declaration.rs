//! Declaration classification.
//!
//! The single entry point for one declaration: decide whether its value is
//! theme-sensitive and, if so, compile it into a modifier. Declarations
//! the pipeline does not recognize yield `None` and are copied through by
//! the caller unchanged.

use crate::builder;
use crate::context::PipelineContext;
use crate::modifier::{CancellationProbe, Modifier};

/// Read-only access to the rule owning a declaration.
///
/// Implemented by the embedding document engine; the pipeline only needs
/// the priority flag, a selector-match predicate for the image-skip list,
/// and the bases URLs resolve against.
pub trait RuleContext {
  /// Whether the declaration for `property` carries `!important`.
  fn priority(&self, property: &str) -> bool;

  /// Whether the rule's selector matches any of the given selectors.
  fn matches_any(&self, selectors: &[String]) -> bool;

  /// The owning stylesheet's href, when it has one.
  fn stylesheet_href(&self) -> Option<&str>;

  /// The document base URI, the fallback for URL resolution.
  fn document_base(&self) -> &str;
}

/// A declaration value: the verbatim source string until a builder
/// recognizes it, a compiled modifier afterwards.
#[derive(Clone, Debug)]
pub enum DeclarationValue {
  Literal(String),
  Modified(Modifier),
}

/// A declaration recognized as theme-sensitive.
///
/// `source_value` always retains the untouched original string for
/// diagnostics and rollback.
#[derive(Clone, Debug)]
pub struct ModifiableDeclaration {
  pub property: String,
  pub value: DeclarationValue,
  pub important: bool,
  pub source_value: String,
}

/// Classifies one declaration, returning `None` when it is not
/// theme-sensitive (or its value could not be parsed).
///
/// Routing, in priority order: custom properties are always skipped; any
/// property containing `color` (except `-webkit-print-color-adjust`) plus
/// `fill` and `stroke` go to the color builder; `background-image` and
/// `list-style-image` to the background builder; any property containing
/// `shadow` to the shadow builder.
pub fn classify_declaration(
  property: &str,
  value: &str,
  rule: &dyn RuleContext,
  ignored_image_selectors: &[String],
  probe: &CancellationProbe,
  ctx: &PipelineContext,
) -> Option<ModifiableDeclaration> {
  if property.starts_with("--") {
    return None;
  }

  let modifier = if (property.contains("color") && property != "-webkit-print-color-adjust")
    || property == "fill"
    || property == "stroke"
  {
    builder::color_modifier(property, value, ctx)
  } else if property == "background-image" || property == "list-style-image" {
    builder::background_image_modifier(value, rule, ignored_image_selectors, probe, ctx)
  } else if property.contains("shadow") {
    builder::shadow_modifier(value, ctx)
  } else {
    None
  };

  modifier.map(|modifier| ModifiableDeclaration {
    property: property.to_string(),
    value: DeclarationValue::Modified(modifier),
    important: rule.priority(property),
    source_value: value.to_string(),
  })
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::test_support::test_context;

  /// Fixed-answer rule context for tests.
  #[derive(Default)]
  pub(crate) struct StaticRule {
    pub stylesheet_href: Option<String>,
    pub document_base: String,
    pub important: bool,
    pub selector_matches: bool,
  }

  impl StaticRule {
    pub(crate) fn with_stylesheet(href: &str) -> Self {
      Self {
        stylesheet_href: Some(href.to_string()),
        document_base: "https://fallback.example/".to_string(),
        ..Self::default()
      }
    }

    pub(crate) fn with_selector_match(href: &str, selector_matches: bool) -> Self {
      Self {
        selector_matches,
        ..Self::with_stylesheet(href)
      }
    }
  }

  impl RuleContext for StaticRule {
    fn priority(&self, _property: &str) -> bool {
      self.important
    }

    fn matches_any(&self, _selectors: &[String]) -> bool {
      self.selector_matches
    }

    fn stylesheet_href(&self) -> Option<&str> {
      self.stylesheet_href.as_deref()
    }

    fn document_base(&self) -> &str {
      &self.document_base
    }
  }

  #[test]
  fn test_custom_properties_are_skipped() {
    let ctx = test_context();
    let rule = StaticRule::default();
    let declaration = classify_declaration(
      "--accent-color",
      "red",
      &rule,
      &[],
      &CancellationProbe::never(),
      &ctx,
    );
    assert!(declaration.is_none());
  }

  #[test]
  fn test_print_color_adjust_exception() {
    let ctx = test_context();
    let rule = StaticRule::default();
    let declaration = classify_declaration(
      "-webkit-print-color-adjust",
      "exact",
      &rule,
      &[],
      &CancellationProbe::never(),
      &ctx,
    );
    assert!(declaration.is_none());
  }

  #[test]
  fn test_color_properties_routed() {
    let ctx = test_context();
    let rule = StaticRule::default();
    for property in ["color", "background-color", "border-left-color", "fill", "stroke"] {
      let declaration =
        classify_declaration(property, "red", &rule, &[], &CancellationProbe::never(), &ctx)
          .unwrap_or_else(|| panic!("{property} should classify"));
      assert_eq!(declaration.property, property);
      assert_eq!(declaration.source_value, "red");
      assert!(matches!(declaration.value, DeclarationValue::Modified(_)));
    }
  }

  #[test]
  fn test_shadow_and_image_properties_routed() {
    let ctx = test_context();
    let rule = StaticRule::with_stylesheet("https://x/s.css");
    assert!(classify_declaration(
      "box-shadow",
      "0 0 2px red",
      &rule,
      &[],
      &CancellationProbe::never(),
      &ctx
    )
    .is_some());
    assert!(classify_declaration(
      "background-image",
      "url(a.png)",
      &rule,
      &[],
      &CancellationProbe::never(),
      &ctx
    )
    .is_some());
    assert!(classify_declaration(
      "list-style-image",
      "none",
      &rule,
      &[],
      &CancellationProbe::never(),
      &ctx
    )
    .is_some());
  }

  #[test]
  fn test_unrelated_property_ignored() {
    let ctx = test_context();
    let rule = StaticRule::default();
    assert!(
      classify_declaration("margin", "4px", &rule, &[], &CancellationProbe::never(), &ctx)
        .is_none()
    );
  }

  #[test]
  fn test_important_flag_carried() {
    let ctx = test_context();
    let rule = StaticRule {
      important: true,
      ..StaticRule::default()
    };
    let declaration =
      classify_declaration("color", "red", &rule, &[], &CancellationProbe::never(), &ctx).unwrap();
    assert!(declaration.important);
  }
}
