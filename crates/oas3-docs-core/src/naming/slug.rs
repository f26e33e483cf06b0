use std::sync::LazyLock;

use any_ascii::any_ascii;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LOWER_TO_UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static ACRONYM_TO_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z0-9]+)").unwrap());
static NON_SLUG_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]+").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static MULTI_HYPHEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Options that change how slugs are derived.
///
/// One value must be shared by every component that produces or parses slugs
/// for the same document, otherwise generated links stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct SlugOptions {
  /// Split `camelCase` boundaries into separate words before slugifying.
  pub decamelize: bool,
}

impl SlugOptions {
  #[must_use]
  pub const fn decamelized() -> Self {
    Self { decamelize: true }
  }
}

/// Splits `camelCase` and `ACRONYMWord` boundaries with hyphens.
///
/// `getUserByID` becomes `get-User-By-ID`, `XMLHttpRequest` becomes `XML-Http-Request`.
#[must_use]
pub fn decamelize(input: &str) -> String {
  let split = LOWER_TO_UPPER_RE.replace_all(input, "$1-$2");
  ACRONYM_TO_WORD_RE.replace_all(&split, "$1-$2").into_owned()
}

/// Converts arbitrary text into a URL-safe slug with default options.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, turns whitespace runs into single hyphens, collapses repeated
/// hyphens and trims hyphens from both ends. Non-ASCII letters are
/// transliterated first so `Café` slugs to `cafe`.
#[must_use]
pub fn slugify(input: &str) -> String {
  slugify_with(input, SlugOptions::default())
}

/// [`slugify`] with explicit [`SlugOptions`].
#[must_use]
pub fn slugify_with(input: &str, options: SlugOptions) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let split = if options.decamelize { decamelize(&ascii) } else { ascii };
  let lowered = split.to_lowercase();
  let stripped = NON_SLUG_CHARS_RE.replace_all(&lowered, "");
  let hyphenated = WHITESPACE_RE.replace_all(&stripped, "-");
  let collapsed = MULTI_HYPHEN_RE.replace_all(&hyphenated, "-");

  collapsed.trim_matches('-').to_string()
}
