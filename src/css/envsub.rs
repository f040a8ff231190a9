//! Substitution of `env()` placeholders with concrete values.
//!
//! Engines without the foldable extension leave `env(fold-*)` and
//! `env(viewport-segment-*)` references unresolved; these helpers replace
//! them with computed pixel literals once device geometry is known.

use regex::Regex;

fn env_pattern(variable: &str) -> Regex {
  let pattern = format!(r"(?i)env\(\s*{}\s*\)", regex::escape(variable));
  Regex::new(&pattern)
    .unwrap_or_else(|err| panic!("invalid env pattern for {variable:?}: {err}"))
}

/// Replaces every `env(variable)` occurrence in `css` with `value`.
///
/// The `env` token is matched case-insensitively and arbitrary whitespace is
/// tolerated inside the parentheses. Each call is independent text surgery:
/// recognized variable names are disjoint, so callers may apply one call per
/// named value in any order.
///
/// # Examples
///
/// ```
/// use foldcss::css::envsub::substitute_env;
///
/// let css = "a{top:env(fold-top);left:ENV( fold-left )}";
/// let css = substitute_env(&css, "fold-top", "0px");
/// let css = substitute_env(&css, "fold-left", "490px");
/// assert_eq!(css, "a{top:0px;left:490px}");
/// ```
pub fn substitute_env(css: &str, variable: &str, value: &str) -> String {
  env_pattern(variable).replace_all(css, value).into_owned()
}

/// Applies [`substitute_env`] once per `(name, px)` pair, rendering each
/// value with a `px` suffix.
pub fn substitute_env_pixels(css: &str, values: &[(String, f64)]) -> String {
  values.iter().fold(css.to_string(), |acc, (name, px)| {
    substitute_env(&acc, name, &format!("{px}px"))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replaces_all_occurrences() {
    let css = "a{width:env(fold-width)}b{width:env(fold-width)}";
    assert_eq!(
      substitute_env(css, "fold-width", "20px"),
      "a{width:20px}b{width:20px}"
    );
  }

  #[test]
  fn tolerates_internal_whitespace() {
    let css = "env(   fold-top   ) env( fold-top )env(fold-top)";
    assert_eq!(substitute_env(css, "fold-top", "0px"), "0px 0px0px");
  }

  #[test]
  fn leaves_unrelated_variables_untouched() {
    let css = "a{top:env(fold-top);left:env(fold-left)}";
    assert_eq!(
      substitute_env(css, "fold-top", "5px"),
      "a{top:5px;left:env(fold-left)}"
    );
  }

  #[test]
  fn substitutes_indexed_segment_names() {
    let css = "a{left:env(viewport-segment-left 1 0)}";
    assert_eq!(
      substitute_env(css, "viewport-segment-left 1 0", "420px"),
      "a{left:420px}"
    );
  }

  #[test]
  fn pixel_batch_applies_every_pair() {
    let css = "a{top:env(fold-top);height:env(fold-height)}";
    let values = vec![("fold-top".to_string(), 0.0), ("fold-height".to_string(), 800.0)];
    assert_eq!(
      substitute_env_pixels(css, &values),
      "a{top:0px;height:800px}"
    );
  }
}
