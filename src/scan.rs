//! Depth-tracking micro-scanners for composite CSS values.
//!
//! Gradients, shadow lists and functional color notation nest parentheses
//! and commas arbitrarily, so the builders share a few small scanners that
//! track paren depth explicitly instead of pattern-matching with a bounded
//! nesting depth. Quote state is tracked inside `url(...)` so a quoted URL
//! containing `)` does not end the span early.

/// What a recognized span of a composite value is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpanKind {
  /// A `url(...)` reference.
  Url,
  /// An `<ident>-gradient(...)` function, vendor prefixes included.
  Gradient,
}

/// A recognized `url(...)` or `*-gradient(...)` span, byte offsets into the
/// original value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FunctionSpan {
  pub start: usize,
  /// One past the closing paren.
  pub end: usize,
  pub kind: SpanKind,
}

fn is_ident_char(ch: u8) -> bool {
  ch.is_ascii_alphanumeric() || ch == b'-' || ch == b'_'
}

/// Finds every `url(...)` and `<ident>-gradient(...)` span in `value`,
/// ordered by start offset. Nested parentheses are matched at any depth.
pub(crate) fn find_value_spans(value: &str) -> Vec<FunctionSpan> {
  let bytes = value.as_bytes();
  let mut spans = Vec::new();
  let mut i = 0;

  while i < bytes.len() {
    if !is_ident_char(bytes[i]) || (i > 0 && is_ident_char(bytes[i - 1])) {
      i += 1;
      continue;
    }

    let ident_start = i;
    let mut j = i;
    while j < bytes.len() && is_ident_char(bytes[j]) {
      j += 1;
    }
    if j >= bytes.len() || bytes[j] != b'(' {
      i = j.max(i + 1);
      continue;
    }

    let ident = &value[ident_start..j];
    let kind = if ident.eq_ignore_ascii_case("url") {
      Some(SpanKind::Url)
    } else if ident.len() > "-gradient".len()
      && ident
        .get(ident.len() - "-gradient".len()..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case("-gradient"))
    {
      Some(SpanKind::Gradient)
    } else {
      None
    };

    let Some(kind) = kind else {
      i = j;
      continue;
    };

    match find_closing_paren(bytes, j) {
      Some(close) => {
        spans.push(FunctionSpan {
          start: ident_start,
          end: close + 1,
          kind,
        });
        i = close + 1;
      }
      // Unbalanced value; leave the tail literal.
      None => break,
    }
  }

  spans
}

/// Returns the index of the paren matching `bytes[open]`, honoring single
/// and double quotes.
fn find_closing_paren(bytes: &[u8], open: usize) -> Option<usize> {
  debug_assert_eq!(bytes[open], b'(');
  let mut depth = 0usize;
  let mut quote: Option<u8> = None;
  let mut i = open;
  while i < bytes.len() {
    let ch = bytes[i];
    match quote {
      Some(q) => {
        if ch == q {
          quote = None;
        } else if ch == b'\\' {
          i += 1;
        }
      }
      None => match ch {
        b'\'' | b'"' => quote = Some(ch),
        b'(' => depth += 1,
        b')' => {
          depth -= 1;
          if depth == 0 {
            return Some(i);
          }
        }
        _ => {}
      },
    }
    i += 1;
  }
  None
}

/// Splits `input` on commas at paren depth zero, trimming each part.
pub(crate) fn split_top_level_commas(input: &str) -> Vec<&str> {
  let mut parts = Vec::new();
  let mut depth = 0i32;
  let mut start = 0usize;
  for (i, ch) in input.char_indices() {
    match ch {
      '(' => depth += 1,
      ')' => depth -= 1,
      ',' if depth == 0 => {
        parts.push(input[start..i].trim());
        start = i + 1;
      }
      _ => {}
    }
  }
  if start < input.len() {
    parts.push(input[start..].trim());
  }
  parts
}

/// Byte ranges of the comma-separated parts of `input` at paren depth zero,
/// untrimmed. Used where surrounding text must survive byte-for-byte.
pub(crate) fn top_level_comma_ranges(input: &str) -> Vec<(usize, usize)> {
  let mut ranges = Vec::new();
  let mut depth = 0i32;
  let mut start = 0usize;
  for (i, ch) in input.char_indices() {
    match ch {
      '(' => depth += 1,
      ')' => depth -= 1,
      ',' if depth == 0 => {
        ranges.push((start, i));
        start = i + 1;
      }
      _ => {}
    }
  }
  ranges.push((start, input.len()));
  ranges
}

/// Splits a gradient part into its color text and an optional trailing
/// position/keyword suffix, splitting at the last depth-zero space so
/// functional notation stays intact.
pub(crate) fn split_color_and_suffix(token: &str) -> (&str, Option<&str>) {
  let mut depth = 0i32;
  let mut split = None;
  for (idx, ch) in token.char_indices().rev() {
    match ch {
      ')' => depth += 1,
      '(' => depth -= 1,
      ' ' | '\t' if depth == 0 => {
        split = Some(idx);
        break;
      }
      _ => {}
    }
  }

  if let Some(idx) = split {
    let color = token[..idx].trim_end();
    let suffix = token[idx..].trim();
    if suffix.is_empty() {
      (color, None)
    } else {
      (color, Some(suffix))
    }
  } else {
    (token, None)
  }
}

/// Byte ranges of whitespace-separated tokens at paren depth zero.
pub(crate) fn top_level_token_ranges(input: &str) -> Vec<(usize, usize)> {
  let bytes = input.as_bytes();
  let mut ranges = Vec::new();
  let mut depth = 0i32;
  let mut start: Option<usize> = None;
  for (i, &ch) in bytes.iter().enumerate() {
    match ch {
      b'(' => {
        depth += 1;
        start.get_or_insert(i);
      }
      b')' => {
        depth -= 1;
        start.get_or_insert(i);
      }
      b' ' | b'\t' | b'\n' | b'\r' if depth == 0 => {
        if let Some(s) = start.take() {
          ranges.push((s, i));
        }
      }
      _ => {
        start.get_or_insert(i);
      }
    }
  }
  if let Some(s) = start {
    ranges.push((s, input.len()));
  }
  ranges
}

/// Extracts the (unquoted) argument of a `url(...)` span.
pub(crate) fn url_argument(span_text: &str) -> Option<&str> {
  let open = span_text.find('(')?;
  let inner = span_text
    .get(open + 1..span_text.len().checked_sub(1)?)?
    .trim();
  let unquoted = if (inner.starts_with('"') && inner.ends_with('"') && inner.len() >= 2)
    || (inner.starts_with('\'') && inner.ends_with('\'') && inner.len() >= 2)
  {
    &inner[1..inner.len() - 1]
  } else {
    inner
  };
  Some(unquoted)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_find_spans_url_and_gradient() {
    let value = "url(a.png), linear-gradient(red, blue) no-repeat";
    let spans = find_value_spans(value);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].kind, SpanKind::Url);
    assert_eq!(&value[spans[0].start..spans[0].end], "url(a.png)");
    assert_eq!(spans[1].kind, SpanKind::Gradient);
    assert_eq!(&value[spans[1].start..spans[1].end], "linear-gradient(red, blue)");
  }

  #[test]
  fn test_find_spans_vendor_prefix_and_case() {
    let value = "-webkit-linear-gradient(top, #fff, #000), URL('b.png')";
    let spans = find_value_spans(value);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].kind, SpanKind::Gradient);
    assert_eq!(spans[1].kind, SpanKind::Url);
  }

  #[test]
  fn test_find_spans_deep_nesting() {
    // Deeper than any bounded-depth pattern would track.
    let mut inner = "rgb(1, 2, 3)".to_string();
    for _ in 0..32 {
      inner = format!("calc(0px + calc({inner}, 1px))");
    }
    let value = format!("linear-gradient({inner}, blue)");
    let spans = find_value_spans(&value);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans[0].end, value.len());
  }

  #[test]
  fn test_find_spans_quoted_paren_in_url() {
    let value = "url(\"weird).png\") center";
    let spans = find_value_spans(value);
    assert_eq!(spans.len(), 1);
    assert_eq!(&value[spans[0].start..spans[0].end], "url(\"weird).png\")");
  }

  #[test]
  fn test_plain_ident_is_not_a_span() {
    assert!(find_value_spans("none").is_empty());
    assert!(find_value_spans("var(--some-url)").is_empty());
    // "curl(...)" must not match as url(...)
    assert!(find_value_spans("curl(x)").is_empty());
  }

  #[test]
  fn test_split_top_level_commas() {
    let parts = split_top_level_commas("red, rgba(0, 0, 0, 0.5) 10%, blue");
    assert_eq!(parts, vec!["red", "rgba(0, 0, 0, 0.5) 10%", "blue"]);
  }

  #[test]
  fn test_top_level_comma_ranges_preserve_text() {
    let value = "2px 2px red , inset 0 0 #000";
    let ranges = top_level_comma_ranges(value);
    assert_eq!(ranges.len(), 2);
    assert_eq!(&value[ranges[0].0..ranges[0].1], "2px 2px red ");
    assert_eq!(&value[ranges[1].0..ranges[1].1], " inset 0 0 #000");
  }

  #[test]
  fn test_split_color_and_suffix() {
    assert_eq!(split_color_and_suffix("blue 50%"), ("blue", Some("50%")));
    assert_eq!(
      split_color_and_suffix("rgb(0, 0, 255) 50%"),
      ("rgb(0, 0, 255)", Some("50%"))
    );
    assert_eq!(split_color_and_suffix("red"), ("red", None));
  }

  #[test]
  fn test_token_ranges_skip_nested_whitespace() {
    let input = "0 0 3px rgba(0, 0, 0, 0.5)";
    let tokens: Vec<&str> = top_level_token_ranges(input)
      .into_iter()
      .map(|(s, e)| &input[s..e])
      .collect();
    assert_eq!(tokens, vec!["0", "0", "3px", "rgba(0, 0, 0, 0.5)"]);
  }

  #[test]
  fn test_url_argument() {
    assert_eq!(url_argument("url(a.png)"), Some("a.png"));
    assert_eq!(url_argument("url( 'a b.png' )"), Some("a b.png"));
    assert_eq!(url_argument("url(\"x.png\")"), Some("x.png"));
    assert_eq!(url_argument("url()"), Some(""));
  }
}
