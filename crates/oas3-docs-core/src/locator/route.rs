use std::{convert::Infallible, fmt, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

const ORDINAL_SEPARATOR: char = '_';

/// A slug plus the collision ordinal that selects one of the operations
/// sharing it, as encoded in a UI route segment (`slug` or `slug_<ordinal>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct RouteKey {
  pub slug: String,
  pub ordinal: usize,
}

impl RouteKey {
  #[must_use]
  pub fn new(slug: impl Into<String>, ordinal: usize) -> Self {
    Self {
      slug: slug.into(),
      ordinal,
    }
  }

  /// Splits a route segment into slug and ordinal.
  ///
  /// A trailing `_<digits>` is the ordinal; anything else is a bare slug with
  /// ordinal 0.
  #[must_use]
  pub fn parse(segment: &str) -> Self {
    split_ordinal(segment).map_or_else(|| Self::new(segment, 0), |(slug, ordinal)| Self::new(slug, ordinal))
  }
}

fn split_ordinal(segment: &str) -> Option<(&str, usize)> {
  let (slug, digits) = segment.rsplit_once(ORDINAL_SEPARATOR)?;
  if slug.is_empty() || digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
    return None;
  }
  digits.parse().ok().map(|ordinal| (slug, ordinal))
}

impl fmt::Display for RouteKey {
  /// Ordinal 0 is written as the bare slug unless the slug itself would parse
  /// as carrying an ordinal.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.ordinal == 0 && split_ordinal(&self.slug).is_none() {
      f.write_str(&self.slug)
    } else {
      write!(f, "{}{ORDINAL_SEPARATOR}{}", self.slug, self.ordinal)
    }
  }
}

impl FromStr for RouteKey {
  type Err = Infallible;

  fn from_str(segment: &str) -> Result<Self, Self::Err> {
    Ok(Self::parse(segment))
  }
}
